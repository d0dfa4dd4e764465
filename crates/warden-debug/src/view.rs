// view.rs — Serializable views handed to the operator.
//
// Field names are camelCase on the wire; the debug page's script reads
// them directly.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use warden_audit::AuditRecord;
use warden_policy::{Decision, Permission, ResourceScope, Verdict};

/// One row of the permission catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub abbr: Option<String>,
    pub description: String,
    pub default: bool,
    pub takes_database: bool,
    pub takes_resource: bool,
}

impl From<&Permission> for CatalogEntry {
    fn from(permission: &Permission) -> Self {
        Self {
            name: permission.name.clone(),
            abbr: permission.abbr.clone(),
            description: permission.description.clone(),
            default: permission.default,
            takes_database: permission.takes_database,
            takes_resource: permission.takes_resource,
        }
    }
}

/// The scope a check ran against, plus its path form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceView {
    pub database: Option<String>,
    pub resource: Option<String>,
    pub path: String,
}

impl From<&ResourceScope> for ResourceView {
    fn from(scope: &ResourceScope) -> Self {
        Self {
            database: scope.database.clone(),
            resource: scope.resource.clone(),
            path: scope.path(),
        }
    }
}

/// Result of a simulated check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub result: bool,
    pub used_default: bool,
    pub outcome: Verdict,
    pub decided_by: Option<String>,
    pub actor: Value,
    pub resource: ResourceView,
    pub permission: String,
}

impl From<&Decision> for SimulationResponse {
    fn from(decision: &Decision) -> Self {
        Self {
            result: decision.result,
            used_default: decision.used_default,
            outcome: decision.outcome,
            decided_by: decision.decided_by.clone(),
            actor: decision.actor.to_value(),
            resource: ResourceView::from(&decision.resource),
            permission: decision.permission.clone(),
        }
    }
}

/// A recorded check, formatted for the history table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckView {
    pub seq: u64,
    pub when: DateTime<Utc>,
    pub permission: String,
    pub actor_id: Option<String>,
    pub actor: Value,
    /// Tri-state: allow, deny, or no_opinion when the default applied.
    pub outcome: Verdict,
    pub result: bool,
    pub used_default: bool,
    pub decided_by: Option<String>,
    /// `db` or `db/resource`; absent for instance-wide checks.
    pub resource: Option<String>,
}

impl From<&AuditRecord<Decision>> for CheckView {
    fn from(record: &AuditRecord<Decision>) -> Self {
        let decision = &record.entry;
        Self {
            seq: record.seq,
            when: decision.when,
            permission: decision.permission.clone(),
            actor_id: decision.actor.id(),
            actor: decision.actor.to_value(),
            outcome: decision.outcome,
            result: decision.result,
            used_default: decision.used_default,
            decided_by: decision.decided_by.clone(),
            resource: decision.resource.summary(),
        }
    }
}

/// Everything the debug page renders in one response.
#[derive(Debug, Clone, Serialize)]
pub struct DebugPage {
    pub filter: String,
    pub permissions: Vec<CatalogEntry>,
    pub checks: Vec<CheckView>,
}
