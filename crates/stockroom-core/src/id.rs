//! Typed ID wrapper for products.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

/// A strongly-typed wrapper for store-assigned product IDs.
///
/// Serialized as a bare JSON integer and displayed as a plain decimal, which
/// is also the form used inside cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    /// Creates a product ID from a raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses a product ID from a decimal string.
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        s.parse::<i64>().map(Self)
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ProductId::parse("42").unwrap(), ProductId(42));
        assert!(ProductId::parse("abc").is_err());
        assert!(ProductId::parse("1.5").is_err());
        assert!(ProductId::parse("").is_err());
    }

    #[test]
    fn test_display_has_no_padding() {
        assert_eq!(ProductId(7).to_string(), "7");
        assert_eq!(ProductId(1200).to_string(), "1200");
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&ProductId(3)).unwrap(), "3");
        let id: ProductId = serde_json::from_str("15").unwrap();
        assert_eq!(id, ProductId(15));
    }
}
