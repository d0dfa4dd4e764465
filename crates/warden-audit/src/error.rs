// error.rs — Error types for the audit subsystem.

use thiserror::Error;

/// Errors that can occur while constructing or querying the audit log.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditError {
    /// A ring buffer must hold at least one record.
    #[error("audit log capacity must be greater than zero")]
    ZeroCapacity,
}
