use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use voyage_core::ids::next_id;
use voyage_core::{CoreError, CoreResult, Entity, Repository};

/// Array-backed collection. Insertion order is preserved, ids are allocated under the
/// write lock so concurrent creates never share an id.
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self { items: RwLock::new(Vec::new()) }
    }

    /// Preloads `items`, giving the next free id to any item that has none.
    pub fn with_items(mut items: Vec<T>) -> Self {
        assign_missing_ids(&mut items);
        Self { items: RwLock::new(items) }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Gives every item without an id the next free one, in order. Ids already present are kept
/// and never handed out twice.
pub fn assign_missing_ids<T: Entity>(items: &mut [T]) {
    for i in 0..items.len() {
        if items[i].id().is_empty() {
            let id = next_id(T::ID_PREFIX, items.iter().map(|e| e.id()));
            items[i].assign_id(id);
        }
    }
}

fn check_conflicts<T: Entity>(candidate: &T, items: &[T]) -> CoreResult<()> {
    for other in items.iter().filter(|o| o.id() != candidate.id()) {
        if let Some(msg) = candidate.conflicts_with(other) {
            return Err(CoreError::Conflict(msg));
        }
    }
    Ok(())
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> CoreResult<Vec<T>> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: &str) -> CoreResult<Option<T>> {
        Ok(self.items.read().await.iter().find(|e| e.id() == id).cloned())
    }

    async fn insert(&self, mut entity: T) -> CoreResult<T> {
        let mut items = self.items.write().await;
        let id = next_id(T::ID_PREFIX, items.iter().map(|e| e.id()));
        entity.assign_id(id);
        check_conflicts(&entity, &items)?;
        items.push(entity.clone());
        debug!(kind = T::KIND, id = entity.id(), "inserted");
        Ok(entity)
    }

    async fn update(&self, entity: T) -> CoreResult<T> {
        let mut items = self.items.write().await;
        let pos = items
            .iter()
            .position(|e| e.id() == entity.id())
            .ok_or_else(|| CoreError::not_found(T::KIND, entity.id()))?;
        check_conflicts(&entity, &items)?;
        items[pos] = entity.clone();
        debug!(kind = T::KIND, id = entity.id(), "updated");
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> CoreResult<T> {
        let mut items = self.items.write().await;
        let pos = items
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))?;
        let removed = items.remove(pos);
        debug!(kind = T::KIND, id, "deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_core::Creatable;
    use voyage_shared::{Client, ClientDraft, Role, User, UserDraft};

    fn client(name: &str, email: &str) -> Client {
        Client::create(ClientDraft { name: name.into(), email: email.into(), ..Default::default() }).unwrap()
    }

    fn user(username: &str) -> User {
        User::create(UserDraft {
            username: username.into(),
            email: format!("{}@voyage.example.com", username),
            full_name: username.into(),
            role: Role::Agent,
        })
        .unwrap()
    }

    #[test]
    fn test_assign_missing_ids_keeps_explicit_ones() {
        let mut explicit = client("Martin", "b@example.com");
        explicit.assign_id("C002".into());
        let mut items = vec![client("Dupont", "a@example.com"), explicit, client("Durand", "c@example.com")];

        assign_missing_ids(&mut items);

        let ids: Vec<_> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["C003", "C002", "C004"]);
    }

    #[tokio::test]
    async fn test_update_to_another_clients_email_conflicts() {
        let repo = InMemoryRepository::with_items(vec![
            client("Dupont", "marie@example.com"),
            client("Martin", "paul@example.com"),
        ]);
        let mut paul = repo.find("C002").await.unwrap();
        paul.email = "MARIE@example.com".into();

        let err = repo.update(paul).await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(repo.find("C002").await.unwrap().email, "paul@example.com");

        // Saving a client with its own email is not a conflict
        let marie = repo.find("C001").await.unwrap();
        assert!(repo.update(marie).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_taken_username_conflicts() {
        let repo = InMemoryRepository::with_items(vec![user("admin"), user("agent1")]);
        let mut agent = repo.find("U002").await.unwrap();
        agent.username = "admin".into();

        assert!(matches!(repo.update(agent).await, Err(CoreError::Conflict(_))));
        assert_eq!(repo.find("U002").await.unwrap().username, "agent1");
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo: InMemoryRepository<Client> = InMemoryRepository::new();
        let a = repo.insert(client("Dupont", "a@example.com")).await.unwrap();
        let b = repo.insert(client("Martin", "b@example.com")).await.unwrap();

        assert_eq!(a.id, "C001");
        assert_eq!(b.id, "C002");
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo: InMemoryRepository<Client> = InMemoryRepository::new();
        repo.insert(client("Dupont", "a@example.com")).await.unwrap();
        let err = repo.insert(client("Durand", "A@example.com")).await.unwrap_err();

        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryRepository::with_items(vec![client("Dupont", "a@example.com")]);
        let mut stored = repo.find("C001").await.unwrap();
        stored.name = "Dupont-Leroy".into();
        repo.update(stored).await.unwrap();
        assert_eq!(repo.find("C001").await.unwrap().name, "Dupont-Leroy");

        let removed = repo.delete("C001").await.unwrap();
        assert_eq!(removed.id, "C001");
        assert!(repo.get("C001").await.unwrap().is_none());
        assert!(matches!(repo.delete("C001").await, Err(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = InMemoryRepository::with_items(vec![
            client("Dupont", "marie@example.com"),
            client("Martin", "paul@example.com"),
        ]);
        let found = repo.search("  DUP ").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "C001");
        assert_eq!(repo.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let repo = std::sync::Arc::new(InMemoryRepository::<Client>::new());
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert(client("Client", &format!("c{}@example.com", i))).await.unwrap().id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
