use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pii::Masked;

/// A traveller or company the agency books for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub first_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub nationality: Option<String>,
    pub passport_number: Option<Masked<String>>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// "First Last" when a first name is known, otherwise the bare name.
    pub fn display_name(&self) -> String {
        match &self.first_name {
            Some(first) if !first.trim().is_empty() => format!("{} {}", first.trim(), self.name),
            _ => self.name.clone(),
        }
    }
}

/// Body of `POST /api/clients`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientDraft {
    #[serde(default)]
    pub name: String,
    pub first_name: Option<String>,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub nationality: Option<String>,
    pub passport_number: Option<Masked<String>>,
}

/// Body of `PUT`/`PATCH /api/clients/{id}`; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub nationality: Option<String>,
    pub passport_number: Option<Masked<String>>,
}
