// facade.rs — Read-mostly operator view over a permission engine.
//
// The facade never decides anything itself. Simulations go through the
// engine like any other check, so they land in the audit log too.

use std::sync::Arc;

use warden_audit::ActorFilter;
use warden_policy::{Actor, PermissionEngine};

use crate::error::DebugError;
use crate::form::{CheckFilter, SimulationForm};
use crate::view::{CatalogEntry, CheckView, DebugPage, SimulationResponse};

/// Operator-facing entry point: catalog, simulation and history.
#[derive(Clone)]
pub struct DebugFacade {
    engine: Arc<PermissionEngine>,
}

impl DebugFacade {
    pub fn new(engine: Arc<PermissionEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &PermissionEngine {
        &self.engine
    }

    /// All registered permissions in registration order.
    pub fn permission_catalog(&self) -> Vec<CatalogEntry> {
        self.engine
            .registry()
            .list()
            .iter()
            .map(|p| CatalogEntry::from(p.as_ref()))
            .collect()
    }

    /// Run a check for an arbitrary actor and report how it was decided.
    pub fn simulate(&self, form: &SimulationForm) -> Result<SimulationResponse, DebugError> {
        let actor = form.parse_actor()?;
        let response = self.run(&actor, form)?;
        tracing::info!(
            permission = %response.permission,
            path = %response.resource.path,
            result = response.result,
            used_default = response.used_default,
            "simulated permission check"
        );
        Ok(response)
    }

    /// Check a permission for `actor` itself. The form's actor field is
    /// ignored and the permission must be named.
    pub fn check_for(
        &self,
        actor: &Actor,
        form: &SimulationForm,
    ) -> Result<SimulationResponse, DebugError> {
        if form.permission.trim().is_empty() {
            return Err(DebugError::MissingPermission);
        }
        self.run(actor, form)
    }

    fn run(&self, actor: &Actor, form: &SimulationForm) -> Result<SimulationResponse, DebugError> {
        let scope = form.scope()?;
        let decision = self.engine.evaluate(actor, form.permission.trim(), &scope)?;
        Ok(SimulationResponse::from(&decision))
    }

    /// Recent checks, most recent first.
    pub fn recent_checks(&self, filter: &ActorFilter, limit: usize) -> Vec<CheckView> {
        self.engine
            .recent(limit, filter)
            .iter()
            .map(CheckView::from)
            .collect()
    }

    /// Catalog plus history, filtered relative to the viewing operator.
    ///
    /// `only-yours` shows nothing to a viewer without an id, since no
    /// record can be attributed to them.
    pub fn debug_page(&self, filter: CheckFilter, viewer: &Actor, limit: usize) -> DebugPage {
        let checks = match resolve_filter(filter, viewer) {
            Some(actor_filter) => self.recent_checks(&actor_filter, limit),
            None => Vec::new(),
        };
        DebugPage {
            filter: filter.to_string(),
            permissions: self.permission_catalog(),
            checks,
        }
    }
}

fn resolve_filter(filter: CheckFilter, viewer: &Actor) -> Option<ActorFilter> {
    match (filter, viewer.id()) {
        (CheckFilter::All, _) | (CheckFilter::ExcludeYours, None) => Some(ActorFilter::All),
        (CheckFilter::ExcludeYours, Some(id)) => Some(ActorFilter::ExcludeActor(id)),
        (CheckFilter::OnlyYours, Some(id)) => Some(ActorFilter::OnlyActor(id)),
        (CheckFilter::OnlyYours, None) => None,
    }
}
