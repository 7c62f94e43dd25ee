//! Denial taxonomy for access decisions.

use mandir_core::EntityId;
use thiserror::Error;

use crate::roles::Role;

/// Coarse class of a denial, used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialClass {
    /// No usable identity: missing/invalid credential or vanished subject.
    Unauthenticated,
    /// Identity is fine, the operation is not permitted.
    Forbidden,
    /// The request itself is malformed.
    BadRequest,
}

/// Why an access decision failed.
///
/// Messages are deliberately flat: they name the rule that fired, never
/// internal lookup details. The paired [`AccessError::code`] is the stable
/// machine-readable form carried in responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("authorization header missing or malformed")]
    MissingCredentials,

    #[error("bearer token rejected")]
    InvalidToken,

    #[error("token subject no longer exists")]
    UnknownSubject,

    #[error("role {0} is not allowed on this route")]
    RoleNotAllowed(Role),

    #[error("role {0} requires an entity scope and none was resolved")]
    EntityRequired(Role),

    #[error("role {0} has no write permission here")]
    WriteDenied(Role),

    #[error("entity {0} is outside the caller's scope")]
    EntityForbidden(EntityId),

    #[error("malformed identifier: {0}")]
    MalformedId(String),
}

impl AccessError {
    pub fn class(&self) -> DenialClass {
        match self {
            AccessError::MissingCredentials
            | AccessError::InvalidToken
            | AccessError::UnknownSubject => DenialClass::Unauthenticated,
            AccessError::RoleNotAllowed(_)
            | AccessError::EntityRequired(_)
            | AccessError::WriteDenied(_)
            | AccessError::EntityForbidden(_) => DenialClass::Forbidden,
            AccessError::MalformedId(_) => DenialClass::BadRequest,
        }
    }

    /// Stable reason code for error payloads and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::MissingCredentials => "missing_credentials",
            AccessError::InvalidToken => "invalid_token",
            AccessError::UnknownSubject => "unknown_subject",
            AccessError::RoleNotAllowed(_) => "role_not_allowed",
            AccessError::EntityRequired(_) => "entity_required",
            AccessError::WriteDenied(_) => "write_denied",
            AccessError::EntityForbidden(_) => "entity_forbidden",
            AccessError::MalformedId(_) => "invalid_id",
        }
    }
}
