use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::CoreResult;

/// A record stored in one of the in-memory collections.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Prefix of generated ids, e.g. `C` for `C001`.
    const ID_PREFIX: &'static str;
    /// Human readable kind used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn assign_id(&mut self, id: String);

    /// Case-insensitive free-text match used by `?search=` on list endpoints.
    /// `needle` is already lowercased.
    fn matches(&self, needle: &str) -> bool;

    /// Returns a message when `self` may not coexist with `other` in the same collection.
    fn conflicts_with(&self, _other: &Self) -> Option<String> {
        None
    }
}

/// Entities that can be built straight from a request body.
pub trait Creatable: Entity {
    type Draft: DeserializeOwned + Send + 'static;

    /// Validates required fields. The id is left empty, the repository assigns it.
    fn create(draft: Self::Draft) -> CoreResult<Self>;
}

/// Entities that accept partial updates. PUT and PATCH both merge.
pub trait Patchable: Entity {
    type Patch: DeserializeOwned + Send + 'static;

    fn apply(&mut self, patch: Self::Patch) -> CoreResult<()>;
}

/// True when any of `fields` contains `needle` (lowercased) case-insensitively.
pub fn text_matches<'a>(fields: impl IntoIterator<Item = &'a str>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_matches() {
        assert!(text_matches(["Dupont", "marie@example.com"], "dup"));
        assert!(text_matches(["Dupont"], ""));
        assert!(!text_matches(["Dupont", "Paris"], "lyon"));
    }
}
