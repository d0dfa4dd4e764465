//! # warden-policy
//!
//! Actor-based permission evaluation for Warden.
//!
//! A [`PermissionEngine`] answers "may this actor do this, here?" by asking
//! an ordered chain of plugin-supplied [`PermissionChecker`]s. The first
//! checker to Allow or Deny settles the question; if every checker abstains
//! the permission's static default applies. Every answer is returned as a
//! [`Decision`] and recorded in the engine's in-memory audit log.
//!
//! ## Key invariants
//!
//! - **No silent defaults for unknown names**: checking an unregistered
//!   permission fails with [`PolicyError::UnknownPermission`].
//! - **First opinion wins**: earlier-registered checkers take precedence and
//!   later ones are not called once a verdict is reached.
//! - **Broken checkers fail loudly**: a checker error propagates as
//!   [`PolicyError::CheckerFailure`] and is never read as Allow or Deny.
//! - **Frozen history**: decisions hold a deep copy of the actor.
//! - **Restricted actors stay restricted**: an actor carrying `_r`
//!   allowlists is denied anything outside them, ahead of host checkers
//!   (see [`RestrictionsChecker`]).

pub mod actor;
pub mod checker;
pub mod decision;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod permission;
pub mod registry;
pub mod restrictions;

pub use actor::{Actor, ResourceScope};
pub use checker::{
    checker_fn, ChainEntry, CheckerChain, CheckerError, FnChecker, PermissionChecker,
    RootChecker, Verdict,
};
pub use decision::Decision;
pub use defaults::default_permissions;
pub use engine::PermissionEngine;
pub use error::PolicyError;
pub use permission::Permission;
pub use registry::PermissionRegistry;
pub use restrictions::{RestrictionsChecker, RESTRICTIONS_KEY};

/// Audit log size used when the host does not choose one.
pub use warden_audit::DEFAULT_CAPACITY as DEFAULT_AUDIT_CAPACITY;
