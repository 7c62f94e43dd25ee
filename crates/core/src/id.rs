//! Strongly-typed identifiers used across the domain.
//!
//! Wire-level ids in this system are positive integers; `0` is the "absent"
//! sentinel and is not representable. `Option<Id>` is the absent form.

use core::num::NonZeroU64;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a tenant (billing/organizational scope above entities).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(NonZeroU64);

/// Identifier of a single temple entity (the primary scoping unit).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(NonZeroU64);

/// Identifier of a user account (actor identity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(NonZeroU64);

macro_rules! impl_numeric_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw wire value, mapping the `0` sentinel to `None`.
            pub fn from_raw(raw: u64) -> Option<Self> {
                NonZeroU64::new(raw).map(Self)
            }

            pub fn get(&self) -> u64 {
                self.0.get()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<NonZeroU64> for $t {
            fn from(value: NonZeroU64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0.get()
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: u64 = s
                    .trim()
                    .parse()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::from_raw(raw).ok_or_else(|| {
                    DomainError::invalid_id(format!("{}: zero is not a valid id", $name))
                })
            }
        }
    };
}

impl_numeric_id!(TenantId, "TenantId");
impl_numeric_id!(EntityId, "EntityId");
impl_numeric_id!(UserId, "UserId");

/// A tenant id can stand in as an acting entity id (SuperAdmin tenant scope
/// and assigned-tenant fallbacks act on a whole tenant through this).
impl From<TenantId> for EntityId {
    fn from(value: TenantId) -> Self {
        Self(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        let id: EntityId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_zero() {
        let err = "0".parse::<EntityId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert_eq!(EntityId::from_raw(0), None);
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<TenantId>().is_err());
        assert!("all".parse::<TenantId>().is_err());
        assert!("-3".parse::<TenantId>().is_err());
        assert!("12abc".parse::<TenantId>().is_err());
    }

    #[test]
    fn tenant_converts_to_entity() {
        let tenant = TenantId::from_raw(9).unwrap();
        assert_eq!(EntityId::from(tenant).get(), 9);
    }
}
