// error.rs — Error types for the debug facade.

use thiserror::Error;
use warden_policy::PolicyError;

/// Errors reported to the operator using the simulation surface.
#[derive(Debug, Error)]
pub enum DebugError {
    /// The submitted actor is not valid JSON, or not a JSON object.
    #[error("actor JSON error: {0}")]
    InvalidActor(String),

    /// A table or query name was given without a database.
    #[error("a database is required when a resource is provided")]
    InvalidResource,

    /// A direct check was requested without naming a permission.
    #[error("permission parameter is required")]
    MissingPermission,

    /// The evaluation itself failed.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
