//! # warden-audit
//!
//! Bounded, in-memory audit trail for Warden permission decisions.
//!
//! Every evaluation the engine performs is appended to an [`AuditLog`] as an
//! [`AuditRecord`] carrying a monotonically increasing sequence id. The log
//! is a fixed-size ring buffer: once full, the oldest record is evicted.
//! Nothing is written to disk; history is lost on restart.
//!
//! ## Quick Example
//!
//! ```rust
//! use warden_audit::{ActorFilter, Attributed, AuditLog};
//!
//! #[derive(Clone)]
//! struct Check(&'static str);
//!
//! impl Attributed for Check {
//!     fn actor_id(&self) -> Option<String> {
//!         Some(self.0.to_string())
//!     }
//! }
//!
//! let log = AuditLog::with_capacity(2).unwrap();
//! log.append(Check("root"));
//! log.append(Check("guest"));
//! log.append(Check("root"));
//!
//! let recent = log.recent(10, &ActorFilter::only("root"));
//! assert_eq!(recent.len(), 1);
//! assert_eq!(recent[0].seq, 3);
//! ```

pub mod error;
pub mod log;
pub mod record;

// Re-export the main types at the crate root for convenience.
pub use error::AuditError;
pub use log::{AuditLog, DEFAULT_CAPACITY};
pub use record::{ActorFilter, Attributed, AuditRecord};
