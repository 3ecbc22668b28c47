//! Role hierarchy and the minimum-role rule.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Ordered role tiers carried in token claims.
///
/// Serialized as its ordinal so tokens stay compatible with the wire form
/// used by the other services (`0..=3`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    /// No role assigned; below every real tier.
    #[default]
    Unspecified,
    /// Regular customer account.
    Customer,
    /// Supplier account; includes customer privileges.
    Supplier,
    /// Administrator. Terminal tier: it neither inherits nor is inherited.
    Admin,
}

impl Role {
    /// Checks whether a caller holding `self` meets `required`.
    ///
    /// Customer and supplier minimums use ordinal `>=`. Admin sits outside
    /// the inheritance chain: an admin-only check demands exact equality,
    /// and an admin caller does not satisfy the lower tiers.
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        match (self, required) {
            (Self::Admin, Self::Admin) => true,
            (Self::Admin, _) | (_, Self::Admin) => false,
            _ => self as u8 >= required as u8,
        }
    }

    /// Returns the lower-case name used in logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::Admin => "admin",
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role as Self
    }
}

impl TryFrom<u8> for Role {
    type Error = DomainError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::Customer),
            2 => Ok(Self::Supplier),
            3 => Ok(Self::Admin),
            other => Err(DomainError::UnknownRole(other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ordering_matches_ordinals() {
        assert!(Role::Unspecified < Role::Customer);
        assert!(Role::Customer < Role::Supplier);
        assert!(Role::Supplier < Role::Admin);
    }

    #[test]
    fn test_minimum_rule_for_lower_tiers() {
        assert!(Role::Customer.satisfies(Role::Customer));
        assert!(Role::Supplier.satisfies(Role::Customer));
        assert!(Role::Supplier.satisfies(Role::Supplier));
        assert!(!Role::Customer.satisfies(Role::Supplier));
        assert!(!Role::Unspecified.satisfies(Role::Customer));
    }

    #[test]
    fn test_admin_is_exact_match_only() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(!Role::Supplier.satisfies(Role::Admin));
        assert!(!Role::Customer.satisfies(Role::Admin));
        // Admin is terminal, not a superset of the lower tiers.
        assert!(!Role::Admin.satisfies(Role::Supplier));
        assert!(!Role::Admin.satisfies(Role::Customer));
    }

    #[test]
    fn test_ordinal_roundtrip() {
        for role in [Role::Unspecified, Role::Customer, Role::Supplier, Role::Admin] {
            let ordinal = u8::from(role);
            assert_eq!(Role::try_from(ordinal).unwrap(), role);
        }
        assert!(Role::try_from(9).is_err());
    }

    #[test]
    fn test_serializes_as_ordinal() {
        let json = serde_json::to_string(&Role::Supplier).unwrap();
        assert_eq!(json, "2");
        let back: Role = serde_json::from_str("3").unwrap();
        assert_eq!(back, Role::Admin);
    }
}
