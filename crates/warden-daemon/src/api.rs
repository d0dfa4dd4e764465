// api.rs — HTTP routes for the permissions debug surface.
//
// Routes:
//   GET  /-/permissions  catalog plus recent checks
//   POST /-/permissions  simulate a check (form-encoded)
//   GET  /-/check        check a permission for the operator itself
//   GET  /-/health       liveness and counters
//
// The permissions routes require the operator to hold view-instance and
// then permissions-debug; /-/check requires permissions-debug only.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use warden_debug::{
    CheckFilter, DebugError, DebugFacade, DebugPage, SimulationForm, SimulationResponse,
};
use warden_policy::{Actor, PermissionEngine, PolicyError, ResourceScope};

pub const DEBUG_PERMISSION: &str = "permissions-debug";
pub const VIEW_INSTANCE: &str = "view-instance";

#[derive(Clone)]
pub struct AppState {
    pub facade: DebugFacade,
    pub operator: Arc<Actor>,
}

impl AppState {
    pub fn new(engine: Arc<PermissionEngine>, operator: Actor) -> Self {
        Self {
            facade: DebugFacade::new(engine),
            operator: Arc::new(operator),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/-/permissions", get(debug_page).post(simulate))
        .route("/-/check", get(check))
        .route("/-/health", get(health))
        .with_state(state)
}

/// Error body `{"error": "..."}` with a status derived from the failure.
pub struct ApiError(DebugError);

impl From<DebugError> for ApiError {
    fn from(e: DebugError) -> Self {
        Self(e)
    }
}

impl From<PolicyError> for ApiError {
    fn from(e: PolicyError) -> Self {
        Self(DebugError::Policy(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DebugError::InvalidActor(_)
            | DebugError::InvalidResource
            | DebugError::MissingPermission => StatusCode::BAD_REQUEST,
            DebugError::Policy(PolicyError::UnknownPermission { .. }) => StatusCode::NOT_FOUND,
            DebugError::Policy(PolicyError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            DebugError::Policy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn require(state: &AppState, permission: &str) -> Result<(), ApiError> {
    state
        .facade
        .engine()
        .ensure_permission(&state.operator, permission, &ResourceScope::instance())?;
    Ok(())
}

fn require_debug(state: &AppState) -> Result<(), ApiError> {
    require(state, VIEW_INSTANCE)?;
    require(state, DEBUG_PERMISSION)
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

async fn debug_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<DebugPage>, ApiError> {
    require_debug(&state)?;
    let filter = CheckFilter::parse_lossy(query.filter.as_deref().unwrap_or_default());
    let limit = query
        .limit
        .unwrap_or_else(|| state.facade.engine().audit_log().capacity());
    Ok(Json(state.facade.debug_page(filter, &state.operator, limit)))
}

async fn simulate(
    State(state): State<AppState>,
    Form(form): Form<SimulationForm>,
) -> Result<Json<SimulationResponse>, ApiError> {
    require_debug(&state)?;
    Ok(Json(state.facade.simulate(&form)?))
}

async fn check(
    State(state): State<AppState>,
    Query(form): Query<SimulationForm>,
) -> Result<Json<SimulationResponse>, ApiError> {
    require(&state, DEBUG_PERMISSION)?;
    Ok(Json(state.facade.check_for(&state.operator, &form)?))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let engine = state.facade.engine();
    Json(json!({
        "status": "ok",
        "permissions": engine.registry().len(),
        "audit_len": engine.audit_log().len(),
    }))
}
