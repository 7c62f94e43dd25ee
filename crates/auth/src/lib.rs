//! `mandir-auth` — access resolution and authorization for temple tenants.
//!
//! Everything a request needs to be authorized lives here: token claims and
//! their verification, the closed role model, entity/tenant resolution from
//! request signals, the [`AccessContext`] built from all of it, and the gates
//! handlers put in front of their work.
//!
//! The crate is intentionally decoupled from HTTP and storage. Signals arrive
//! as plain values in a [`RequestScope`], accounts come through the
//! [`UserStore`] seam, and the clock is always a parameter, so the whole
//! decision path is deterministic and testable without a server.

pub mod access;
pub mod claims;
pub mod error;
pub mod gate;
pub mod resolve;
pub mod roles;
pub mod token;
pub mod user;

pub use access::AccessContext;
pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use error::{AccessError, DenialClass};
pub use gate::{require_entity, require_entity_access, require_write_access};
pub use resolve::{ENTITY_HEADER, RequestScope, SCOPE_ALL, TENANT_HEADER, acting_entity};
pub use roles::{PermissionType, Role};
pub use token::{Hs256TokenVerifier, TokenError, TokenVerifier};
pub use user::{StoreError, User, UserStore};
