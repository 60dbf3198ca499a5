use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A user's capability class, parsed from the free-form role string the
/// backend sends. The closed set is normalized to lower-case once, here;
/// no other component re-normalizes.
#[derive(Debug, Clone, Eq)]
pub enum Role {
    Patient,
    Doctor,
    LabAssistant,
    Admin,
    /// A role string outside the closed set, preserved exactly as received.
    Unknown(String),
}

impl Role {
    /// Parse a role string case-insensitively. Anything outside the closed
    /// set becomes `Unknown` with the original text kept unchanged.
    pub fn parse(raw: &str) -> Role {
        match raw.trim().to_lowercase().as_str() {
            "patient" => Role::Patient,
            "doctor" => Role::Doctor,
            "lab_assistant" => Role::LabAssistant,
            "admin" => Role::Admin,
            _ => Role::Unknown(raw.to_string()),
        }
    }

    /// The normalized wire name for this role. `Unknown` yields the
    /// original string.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::LabAssistant => "lab_assistant",
            Role::Admin => "admin",
            Role::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        // Unknown roles still compare case-insensitively, so two sources
        // that never went through parse() agree the way the closed set does.
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that parsing is case-insensitive over the closed role set.
    #[test]
    fn test_parse_normalizes_case() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("Doctor"), Role::Doctor);
        assert_eq!(Role::parse("patient"), Role::Patient);
        assert_eq!(Role::parse("Lab_Assistant"), Role::LabAssistant);
    }

    /// Test that surrounding whitespace does not change the parse result.
    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Role::parse("  admin  "), Role::Admin);
    }

    /// Test that a role outside the closed set keeps its original text.
    #[test]
    fn test_unknown_preserves_original() {
        let role = Role::parse("SuperUser");
        assert!(!role.is_known());
        assert_eq!(role.as_str(), "SuperUser");
    }

    /// Test that unknown roles compare case-insensitively.
    #[test]
    fn test_unknown_equality_ignores_case() {
        assert_eq!(Role::parse("SuperUser"), Role::parse("superuser"));
        assert_ne!(Role::parse("superuser"), Role::Admin);
    }

    /// Test that serialization emits the normalized wire name.
    #[test]
    fn test_serialize_normalized() {
        let json = serde_json::to_string(&Role::parse("DOCTOR")).unwrap();
        assert_eq!(json, "\"doctor\"");
    }

    /// Test that deserialization parses through the same normalization.
    #[test]
    fn test_deserialize_round_trip() {
        let role: Role = serde_json::from_str("\"LAB_ASSISTANT\"").unwrap();
        assert_eq!(role, Role::LabAssistant);
        assert_eq!(role.as_str(), "lab_assistant");
    }
}
