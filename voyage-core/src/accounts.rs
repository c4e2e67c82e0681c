//! Resource behaviour for clients and back-office users.

use chrono::Utc;
use voyage_shared::{Client, ClientDraft, ClientPatch, Masked, User, UserDraft, UserPatch};

use crate::resource::{text_matches, Creatable, Entity, Patchable};
use crate::validation::{optional_text, require_email, require_text};
use crate::CoreResult;

impl Entity for Client {
    const ID_PREFIX: &'static str = "C";
    const KIND: &'static str = "Client";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        let mut fields = vec![self.id.as_str(), self.name.as_str(), self.email.as_str()];
        fields.extend(self.first_name.as_deref());
        fields.extend(self.phone.as_deref());
        text_matches(fields, needle)
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        if self.email.eq_ignore_ascii_case(&other.email) {
            return Some(format!("a client with email {} already exists ({})", self.email, other.id));
        }
        None
    }
}

impl Creatable for Client {
    type Draft = ClientDraft;

    fn create(draft: ClientDraft) -> CoreResult<Self> {
        Ok(Client {
            id: String::new(),
            name: require_text("name", &draft.name)?,
            first_name: optional_text(draft.first_name),
            email: require_email(&draft.email)?,
            phone: optional_text(draft.phone),
            address: optional_text(draft.address),
            nationality: optional_text(draft.nationality),
            passport_number: draft
                .passport_number
                .and_then(|p| optional_text(Some(p.into_inner())))
                .map(Masked),
            created_at: Utc::now(),
        })
    }
}

impl Patchable for Client {
    type Patch = ClientPatch;

    fn apply(&mut self, patch: ClientPatch) -> CoreResult<()> {
        if let Some(name) = patch.name {
            self.name = require_text("name", &name)?;
        }
        if let Some(email) = patch.email {
            self.email = require_email(&email)?;
        }
        if patch.first_name.is_some() {
            self.first_name = optional_text(patch.first_name);
        }
        if patch.phone.is_some() {
            self.phone = optional_text(patch.phone);
        }
        if patch.address.is_some() {
            self.address = optional_text(patch.address);
        }
        if patch.nationality.is_some() {
            self.nationality = optional_text(patch.nationality);
        }
        if let Some(passport) = patch.passport_number {
            self.passport_number = optional_text(Some(passport.into_inner())).map(Masked);
        }
        Ok(())
    }
}

impl Entity for User {
    const ID_PREFIX: &'static str = "U";
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        text_matches(
            [self.id.as_str(), self.username.as_str(), self.full_name.as_str(), self.email.expose().as_str()],
            needle,
        )
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        if self.username.eq_ignore_ascii_case(&other.username) {
            return Some(format!("username {} is already taken", self.username));
        }
        None
    }
}

impl Creatable for User {
    type Draft = UserDraft;

    fn create(draft: UserDraft) -> CoreResult<Self> {
        Ok(User {
            id: String::new(),
            username: require_text("username", &draft.username)?,
            email: Masked(require_email(&draft.email)?),
            full_name: require_text("full_name", &draft.full_name)?,
            role: draft.role,
            active: true,
            created_at: Utc::now(),
        })
    }
}

impl Patchable for User {
    type Patch = UserPatch;

    fn apply(&mut self, patch: UserPatch) -> CoreResult<()> {
        if let Some(username) = patch.username {
            self.username = require_text("username", &username)?;
        }
        if let Some(email) = patch.email {
            self.email = Masked(require_email(&email)?);
        }
        if let Some(full_name) = patch.full_name {
            self.full_name = require_text("full_name", &full_name)?;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_shared::Role;

    fn draft() -> ClientDraft {
        ClientDraft {
            name: "Dupont".into(),
            first_name: Some("Marie".into()),
            email: "marie.dupont@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_requires_name_and_email() {
        assert!(Client::create(draft()).is_ok());
        assert!(Client::create(ClientDraft { name: "".into(), ..draft() }).is_err());
        assert!(Client::create(ClientDraft { email: "nope".into(), ..draft() }).is_err());
    }

    #[test]
    fn test_client_patch_keeps_absent_fields() {
        let mut client = Client::create(draft()).unwrap();
        let patch: ClientPatch = serde_json::from_value(serde_json::json!({ "phone": "+33 6 12 34 56 78" })).unwrap();
        client.apply(patch).unwrap();

        assert_eq!(client.name, "Dupont");
        assert_eq!(client.phone.as_deref(), Some("+33 6 12 34 56 78"));
        assert_eq!(client.display_name(), "Marie Dupont");
    }

    #[test]
    fn test_client_search_and_conflict() {
        let a = Client::create(draft()).unwrap();
        let b = Client::create(ClientDraft { email: "MARIE.DUPONT@example.com".into(), ..draft() }).unwrap();
        assert!(a.matches("marie"));
        assert!(!a.matches("lyon"));
        assert!(b.conflicts_with(&a).is_some());
    }

    #[test]
    fn test_user_defaults_to_active_agent() {
        let user = User::create(UserDraft {
            username: "jmartin".into(),
            email: "j.martin@agence.fr".into(),
            full_name: "Julie Martin".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(user.active);
        assert_eq!(user.role, Role::Agent);
        assert!(!format!("{:?}", user).contains("agence.fr"));
    }
}
