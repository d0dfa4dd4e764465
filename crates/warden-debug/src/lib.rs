//! # warden-debug
//!
//! Operator tooling on top of [`warden_policy::PermissionEngine`].
//!
//! [`DebugFacade`] lists the registered permissions, simulates a check for
//! an arbitrary actor, and pages through recent decisions filtered relative
//! to the operator looking at them. It holds no state of its own; every
//! simulation is an ordinary, audited evaluation.

pub mod error;
pub mod facade;
pub mod form;
pub mod view;

pub use error::DebugError;
pub use facade::DebugFacade;
pub use form::{CheckFilter, SimulationForm, DEFAULT_ACTOR_JSON};
pub use view::{CatalogEntry, CheckView, DebugPage, ResourceView, SimulationResponse};
