// error.rs — Error types for the policy subsystem.

use thiserror::Error;

use crate::checker::CheckerError;

/// Errors that can occur during registration or evaluation.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// No permission with this name has been registered.
    #[error("unknown permission '{name}'")]
    UnknownPermission { name: String },

    /// A different definition is already registered under this name.
    #[error("permission '{name}' is already registered with a different definition")]
    DuplicateName { name: String },

    /// The definition cannot be registered as written.
    #[error("permission '{name}' is invalid: {reason}")]
    InvalidPermission { name: String, reason: String },

    /// A checker failed while rendering its opinion. The evaluation is
    /// abandoned rather than converted into an Allow or a Deny.
    #[error("checker '{checker}' failed while evaluating '{permission}': {source}")]
    CheckerFailure {
        checker: String,
        permission: String,
        source: CheckerError,
    },

    /// The decision denied the actor (returned by `ensure_permission`).
    #[error("actor {} is not allowed '{permission}'", .actor_id.as_deref().unwrap_or("<anonymous>"))]
    Forbidden {
        permission: String,
        actor_id: Option<String>,
    },

    /// The audit log could not be constructed.
    #[error("audit error: {0}")]
    Audit(#[from] warden_audit::AuditError),
}
