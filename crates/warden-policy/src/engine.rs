// engine.rs — Permission evaluation engine.
//
// The PermissionEngine bundles the registry, the checker chain and the
// audit log into one owned object. The host builds it at startup, registers
// permissions and checkers, then shares it (usually behind an Arc) with
// request handling. Every check flows through `evaluate()`:
//
// 1. Is the permission registered? → No → UnknownPermission
// 2. Narrow the scope to the fields the permission declares
// 3. Ask each applicable checker in registration order; the first
//    Allow or Deny wins and later checkers are not called
// 4. Nobody opined → the permission's static default, used_default = true
// 5. Record the Decision in the audit log, then return it
//
// A checker error aborts the evaluation with CheckerFailure. The engine
// never turns a broken checker into an Allow or a Deny, and records nothing
// for a failed evaluation.

use std::sync::Arc;

use chrono::Utc;
use warden_audit::{ActorFilter, AuditLog, AuditRecord};

use crate::actor::{Actor, ResourceScope};
use crate::checker::{CheckerChain, PermissionChecker, Verdict};
use crate::decision::Decision;
use crate::defaults::default_permissions;
use crate::error::PolicyError;
use crate::permission::Permission;
use crate::registry::PermissionRegistry;
use crate::restrictions::RestrictionsChecker;

/// The permission engine: registry, checker chain and audit log.
pub struct PermissionEngine {
    registry: PermissionRegistry,
    chain: CheckerChain,
    audit: AuditLog<Decision>,
}

impl PermissionEngine {
    /// Create an engine with no permissions and no checkers, keeping up to
    /// `audit_capacity` decisions in memory.
    pub fn new(audit_capacity: usize) -> Result<Self, PolicyError> {
        Ok(Self {
            registry: PermissionRegistry::new(),
            chain: CheckerChain::new(),
            audit: AuditLog::with_capacity(audit_capacity)?,
        })
    }

    /// Create an engine pre-loaded with the core permission catalog and
    /// the actor restrictions checker, ahead of any host checkers.
    pub fn with_defaults(audit_capacity: usize) -> Result<Self, PolicyError> {
        let engine = Self::new(audit_capacity)?;
        engine.registry.register_all(default_permissions())?;
        engine.add_checker(RestrictionsChecker);
        Ok(engine)
    }

    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    pub fn chain(&self) -> &CheckerChain {
        &self.chain
    }

    pub fn audit_log(&self) -> &AuditLog<Decision> {
        &self.audit
    }

    /// Register a permission definition.
    pub fn register_permission(&self, permission: Permission) -> Result<(), PolicyError> {
        self.registry.register(permission)
    }

    /// Append a checker consulted for every permission.
    pub fn add_checker(&self, checker: impl PermissionChecker + 'static) {
        self.chain.append(Arc::new(checker));
    }

    /// Append a checker consulted only for the named permissions, which
    /// must already be registered.
    pub fn add_checker_for(
        &self,
        permissions: &[&str],
        checker: impl PermissionChecker + 'static,
    ) -> Result<(), PolicyError> {
        self.chain
            .append_for(permissions, Arc::new(checker), &self.registry)
    }

    /// Decide whether `actor` holds `permission` within `scope`.
    ///
    /// The decision is appended to the audit log before it is returned.
    pub fn evaluate(
        &self,
        actor: &Actor,
        permission: &str,
        scope: &ResourceScope,
    ) -> Result<Decision, PolicyError> {
        let permission = self.registry.lookup(permission).inspect_err(|_| {
            tracing::warn!(permission, "check for unregistered permission");
        })?;
        let scope = scope.narrowed(permission.takes_database, permission.takes_resource);

        let mut settled = None;
        let chain = self.chain.snapshot();
        for entry in chain.iter().filter(|e| e.applies_to(&permission.name)) {
            let checker = entry.checker();
            let verdict = checker
                .check(actor, &permission, &scope)
                .map_err(|source| {
                    tracing::warn!(
                        checker = checker.name(),
                        permission = %permission.name,
                        error = %source,
                        "permission checker failed"
                    );
                    PolicyError::CheckerFailure {
                        checker: checker.name().to_string(),
                        permission: permission.name.clone(),
                        source,
                    }
                })?;
            if verdict != Verdict::NoOpinion {
                settled = Some((verdict, checker.name().to_string()));
                break;
            }
        }

        let (outcome, result, used_default, decided_by) = match settled {
            Some((verdict, checker)) => (verdict, verdict == Verdict::Allow, false, Some(checker)),
            None => (Verdict::NoOpinion, permission.default, true, None),
        };

        let decision = Decision {
            permission: permission.name.clone(),
            actor: actor.clone(),
            resource: scope,
            outcome,
            result,
            used_default,
            decided_by,
            when: Utc::now(),
        };

        let seq = self.audit.append(decision.clone());
        let actor_id = decision.actor.id();
        tracing::debug!(
            seq,
            permission = %decision.permission,
            actor = actor_id.as_deref().unwrap_or("-"),
            result,
            used_default,
            "permission check"
        );

        Ok(decision)
    }

    /// Just the verdict. The check is still audited.
    pub fn allowed(
        &self,
        actor: &Actor,
        permission: &str,
        scope: &ResourceScope,
    ) -> Result<bool, PolicyError> {
        Ok(self.evaluate(actor, permission, scope)?.result)
    }

    /// Evaluate and fail with `Forbidden` unless the actor is allowed.
    pub fn ensure_permission(
        &self,
        actor: &Actor,
        permission: &str,
        scope: &ResourceScope,
    ) -> Result<Decision, PolicyError> {
        let decision = self.evaluate(actor, permission, scope)?;
        if decision.result {
            Ok(decision)
        } else {
            Err(PolicyError::Forbidden {
                permission: decision.permission,
                actor_id: decision.actor.id(),
            })
        }
    }

    /// Recent decisions, most recent first.
    pub fn recent(&self, limit: usize, filter: &ActorFilter) -> Vec<AuditRecord<Decision>> {
        self.audit.recent(limit, filter)
    }
}
