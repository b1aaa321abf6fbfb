use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::core::error::Error;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Opaque 24-character hex identifier. Malformed values are rejected at the
/// boundary, before any storage access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String")]
#[sqlx(transparent)]
pub(crate) struct Id(String);

impl Id {
    pub(crate) fn generate() -> Self {
        let mut bytes = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut bytes);

        let mut value = String::with_capacity(24);

        for byte in bytes {
            value.push(HEX[(byte >> 4) as usize] as char);
            value.push(HEX[(byte & 0x0f) as usize] as char);
        }

        Self(value)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Id {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() != 24 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidId);
        }

        Ok(Self(value))
    }
}

impl std::str::FromStr for Id {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value.to_owned())
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_identifiers() {
        assert!("65f2a1b3c4d5e6f708192a3b".parse::<Id>().is_ok());
        assert!("ABCDEF0123456789abcdef01".parse::<Id>().is_ok());
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert!("".parse::<Id>().is_err());
        assert!("65f2a1b3c4d5e6f708192a3".parse::<Id>().is_err());
        assert!("65f2a1b3c4d5e6f708192a3b7".parse::<Id>().is_err());
        assert!("65f2a1b3c4d5e6f708192a3g".parse::<Id>().is_err());
        assert!("65f2a1b3-4d5e6f708192a3b".parse::<Id>().is_err());
    }

    #[test]
    fn generated_identifiers_are_valid_and_distinct() {
        let first = Id::generate();
        let second = Id::generate();

        assert!(first.as_str().parse::<Id>().is_ok());
        assert_eq!(first.as_str().len(), 24);
        assert_ne!(first, second);
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Id>("\"65f2a1b3c4d5e6f708192a3b\"").is_ok());
        assert!(serde_json::from_str::<Id>("\"not-an-id\"").is_err());
    }
}
