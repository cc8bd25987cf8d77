//! Strongly-typed identifiers used across the domain.
//!
//! The remote API keys people by their national person number and every other
//! record by a numeric surrogate, so all identifiers wrap a `u64`.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a person (the tax/person number). Immutable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(u64);

/// Identifier of an organizational group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(u64);

/// Identifier of the owning company.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(u64);

/// Identifier of an absence event (leave request).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbsenceEventId(u64);

/// Identifier of a reference-data row (absence type, holiday, shift).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(u64);

macro_rules! impl_numeric_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_numeric_newtype!(PersonId, "PersonId");
impl_numeric_newtype!(GroupId, "GroupId");
impl_numeric_newtype!(CompanyId, "CompanyId");
impl_numeric_newtype!(AbsenceEventId, "AbsenceEventId");
impl_numeric_newtype!(ReferenceId, "ReferenceId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_person_number_with_whitespace() {
        let id: PersonId = " 12345678901 ".parse().unwrap();
        assert_eq!(id.get(), 12_345_678_901);
        assert_eq!(id.to_string(), "12345678901");
    }

    #[test]
    fn rejects_non_numeric_identifier() {
        let err = "abc".parse::<GroupId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("GroupId")));
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&AbsenceEventId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
