// checker.rs — Plugin-supplied permission checkers and the ordered chain.
//
// A checker renders an opinion on one check: Allow, Deny, or NoOpinion.
// Plugins register checkers during startup; the engine consults them in
// registration order and the first non-NoOpinion answer wins.
//
// The chain is read on every evaluation and written almost never, so it is
// stored as a copy-on-write list: appending swaps in a new Arc'd vector
// under the write lock, and readers just clone the current Arc. An
// evaluation therefore works on a consistent snapshot and never calls a
// checker while holding the lock.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ResourceScope};
use crate::error::PolicyError;
use crate::permission::Permission;
use crate::registry::PermissionRegistry;

/// Error type a checker returns when it cannot render an opinion at all.
pub type CheckerError = Box<dyn std::error::Error + Send + Sync>;

/// A checker's opinion on one permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Allow,
    Deny,
    /// Defer to later checkers or to the permission's default.
    NoOpinion,
}

impl Verdict {
    /// `Some(true)` for Allow, `Some(false)` for Deny, `None` otherwise.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Verdict::Allow => Some(true),
            Verdict::Deny => Some(false),
            Verdict::NoOpinion => None,
        }
    }
}

impl From<bool> for Verdict {
    fn from(allowed: bool) -> Self {
        if allowed {
            Verdict::Allow
        } else {
            Verdict::Deny
        }
    }
}

/// A decision provider contributed by a plugin.
///
/// Implementations are called concurrently from many evaluations and must
/// not touch registry or audit state. Returning `Err` aborts the evaluation
/// with `PolicyError::CheckerFailure`; it is never treated as a Deny.
pub trait PermissionChecker: Send + Sync {
    /// Name recorded in decisions this checker settles.
    fn name(&self) -> &str;

    fn check(
        &self,
        actor: &Actor,
        permission: &Permission,
        scope: &ResourceScope,
    ) -> Result<Verdict, CheckerError>;
}

/// A checker backed by a closure. Build one with [`checker_fn`].
pub struct FnChecker<F> {
    name: String,
    f: F,
}

impl<F> PermissionChecker for FnChecker<F>
where
    F: Fn(&Actor, &Permission, &ResourceScope) -> Result<Verdict, CheckerError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(
        &self,
        actor: &Actor,
        permission: &Permission,
        scope: &ResourceScope,
    ) -> Result<Verdict, CheckerError> {
        (self.f)(actor, permission, scope)
    }
}

/// Wrap a closure as a named checker.
///
/// ```rust
/// use warden_policy::{checker_fn, Verdict};
///
/// let owner_only = checker_fn("owner-only", |actor, _permission, _scope| {
///     Ok(match actor.id().as_deref() {
///         Some("owner") => Verdict::Allow,
///         _ => Verdict::NoOpinion,
///     })
/// });
/// # let _ = owner_only;
/// ```
pub fn checker_fn<F>(name: impl Into<String>, f: F) -> FnChecker<F>
where
    F: Fn(&Actor, &Permission, &ResourceScope) -> Result<Verdict, CheckerError> + Send + Sync,
{
    FnChecker {
        name: name.into(),
        f,
    }
}

/// Allows everything for the actor `{"id": "root"}`.
///
/// Installed only when the host runs in root mode; abstains for everyone
/// else.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootChecker;

impl PermissionChecker for RootChecker {
    fn name(&self) -> &str {
        "root"
    }

    fn check(
        &self,
        actor: &Actor,
        _permission: &Permission,
        _scope: &ResourceScope,
    ) -> Result<Verdict, CheckerError> {
        Ok(if actor.id().as_deref() == Some("root") {
            Verdict::Allow
        } else {
            Verdict::NoOpinion
        })
    }
}

/// One registered checker, optionally restricted to named permissions.
#[derive(Clone)]
pub struct ChainEntry {
    checker: Arc<dyn PermissionChecker>,
    permissions: Option<Arc<[String]>>,
}

impl ChainEntry {
    pub fn checker(&self) -> &dyn PermissionChecker {
        self.checker.as_ref()
    }

    /// Whether this entry is consulted for the named permission.
    pub fn applies_to(&self, permission: &str) -> bool {
        match &self.permissions {
            None => true,
            Some(names) => names.iter().any(|name| name == permission),
        }
    }
}

/// Ordered list of checkers. Duplicates are allowed.
#[derive(Default)]
pub struct CheckerChain {
    entries: RwLock<Arc<Vec<ChainEntry>>>,
}

impl CheckerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a checker consulted for every permission.
    pub fn append(&self, checker: Arc<dyn PermissionChecker>) {
        self.push(ChainEntry {
            checker,
            permissions: None,
        });
    }

    /// Append a checker consulted only for the named permissions.
    ///
    /// Every name must already be registered; nothing is appended if any
    /// name is unknown.
    pub fn append_for(
        &self,
        permissions: &[&str],
        checker: Arc<dyn PermissionChecker>,
        registry: &PermissionRegistry,
    ) -> Result<(), PolicyError> {
        if let Some(unknown) = permissions.iter().find(|name| !registry.contains(name)) {
            return Err(PolicyError::UnknownPermission {
                name: unknown.to_string(),
            });
        }
        let names: Arc<[String]> = permissions.iter().map(|name| name.to_string()).collect();
        self.push(ChainEntry {
            checker,
            permissions: Some(names),
        });
        Ok(())
    }

    /// The chain as it stands right now. Later appends do not affect it.
    pub fn snapshot(&self) -> Arc<Vec<ChainEntry>> {
        Arc::clone(&self.entries.read())
    }

    /// Checker names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|entry| entry.checker.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, entry: ChainEntry) {
        tracing::info!(checker = entry.checker.name(), "registered permission checker");
        let mut entries = self.entries.write();
        let mut next = Vec::clone(&entries);
        next.push(entry);
        *entries = Arc::new(next);
    }
}
