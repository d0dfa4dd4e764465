// decision.rs — The recorded outcome of one evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_audit::Attributed;

use crate::actor::{Actor, ResourceScope};
use crate::checker::Verdict;

/// Outcome of `PermissionEngine::evaluate`, also stored in the audit log.
///
/// The actor is an owned deep copy taken at evaluation time, so mutating
/// the caller's actor afterwards cannot rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    /// Name of the permission that was checked.
    pub permission: String,
    /// Snapshot of the actor the check was made for.
    pub actor: Actor,
    /// Scope after narrowing to the permission's declared shape.
    pub resource: ResourceScope,
    /// Verdict of the checker that settled the check; `NoOpinion` when
    /// the default was used.
    pub outcome: Verdict,
    /// Final answer.
    pub result: bool,
    /// True when no checker had an opinion and the static default applied.
    pub used_default: bool,
    /// Name of the checker that settled the check, if any.
    pub decided_by: Option<String>,
    pub when: DateTime<Utc>,
}

impl Attributed for Decision {
    fn actor_id(&self) -> Option<String> {
        self.actor.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_is_attributed_to_actor_id() {
        let decision = Decision {
            permission: "view-instance".to_string(),
            actor: Actor::with_id("root"),
            resource: ResourceScope::instance(),
            outcome: Verdict::NoOpinion,
            result: true,
            used_default: true,
            decided_by: None,
            when: Utc::now(),
        };
        assert_eq!(decision.actor_id(), Some("root".to_string()));

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["outcome"], "no_opinion");
        assert_eq!(json["actor"]["id"], "root");
    }
}
