use serde::{Serialize, Deserialize, Serializer};
use std::fmt;

/// A wrapper for personal data (passport numbers, staff emails) that masks its value in
/// Debug and Display output. Serialization keeps the real value so API responses stay usable.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_value() {
        let passport = Masked::from("FR1234567");
        assert_eq!(format!("{:?}", passport), "********");
        assert_eq!(passport.to_string(), "********");
    }

    #[test]
    fn test_serializes_real_value() {
        let passport = Masked::from("FR1234567");
        let json = serde_json::to_string(&passport).unwrap();
        assert_eq!(json, "\"FR1234567\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.expose(), "FR1234567");
    }
}
