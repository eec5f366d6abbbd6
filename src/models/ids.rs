//! Strongly-typed ID wrappers for backend-assigned identifiers
//!
//! The backend assigns plain integer ids. Wrapping them keeps a category id
//! from being passed where an expense id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend id
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the underlying integer
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

define_id!(CategoryId);
define_id!(ExpenseId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryId::new(7).to_string(), "7");
        assert_eq!(ExpenseId::new(120).to_string(), "120");
    }

    #[test]
    fn test_id_parse() {
        let id: ExpenseId = " 15 ".parse().unwrap();
        assert_eq!(id.get(), 15);
        assert!("abc".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_id_is_a_bare_number_on_the_wire() {
        let json = serde_json::to_string(&CategoryId::new(3)).unwrap();
        assert_eq!(json, "3");
        let id: CategoryId = serde_json::from_str("3").unwrap();
        assert_eq!(id, CategoryId::new(3));
    }
}
