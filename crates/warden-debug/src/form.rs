// form.rs — Simulation form input and history filter names.
//
// The simulation form mirrors what an operator submits from the debug
// page: raw actor JSON, a permission name, and two optional resource
// fields. Empty strings mean "not given".

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use warden_policy::{Actor, ResourceScope};

use crate::error::DebugError;

/// Actor used when the form's actor field is left blank.
pub const DEFAULT_ACTOR_JSON: &str = r#"{"id":"root"}"#;

/// A submitted simulation request (form-encoded on the wire).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationForm {
    /// Actor as JSON text.
    #[serde(default)]
    pub actor: String,
    /// Left empty when omitted; evaluation then reports it as unknown.
    #[serde(default)]
    pub permission: String,
    /// Database name.
    #[serde(default)]
    pub resource_1: String,
    /// Table or query name.
    #[serde(default)]
    pub resource_2: String,
}

impl SimulationForm {
    pub fn new(actor: &str, permission: &str, database: &str, resource: &str) -> Self {
        Self {
            actor: actor.to_string(),
            permission: permission.to_string(),
            resource_1: database.to_string(),
            resource_2: resource.to_string(),
        }
    }

    /// Parse the actor field.
    ///
    /// Blank input means `{"id":"root"}` and JSON `null` means an anonymous
    /// actor. Anything else must be a JSON object.
    pub fn parse_actor(&self) -> Result<Actor, DebugError> {
        let text = match self.actor.trim() {
            "" => DEFAULT_ACTOR_JSON,
            text => text,
        };
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(Actor::from(map)),
            Ok(Value::Null) => Ok(Actor::anonymous()),
            Ok(other) => Err(DebugError::InvalidActor(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(DebugError::InvalidActor(e.to_string())),
        }
    }

    /// Build the resource scope, treating empty fields as absent.
    pub fn scope(&self) -> Result<ResourceScope, DebugError> {
        let database = non_empty(&self.resource_1);
        let resource = non_empty(&self.resource_2);
        if resource.is_some() && database.is_none() {
            return Err(DebugError::InvalidResource);
        }
        Ok(ResourceScope { database, resource })
    }
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Which part of the history the operator wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckFilter {
    #[default]
    All,
    /// Checks made for anyone but the viewing operator.
    ExcludeYours,
    /// Only checks made for the viewing operator.
    OnlyYours,
}

impl CheckFilter {
    /// Parse a filter name, treating anything unrecognised as `All`.
    pub fn parse_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckFilter::All => "all",
            CheckFilter::ExcludeYours => "exclude-yours",
            CheckFilter::OnlyYours => "only-yours",
        }
    }
}

impl FromStr for CheckFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CheckFilter::All),
            "exclude-yours" => Ok(CheckFilter::ExcludeYours),
            "only-yours" => Ok(CheckFilter::OnlyYours),
            _ => Err(format!(
                "Invalid filter: '{}'. Valid filters: all, exclude-yours, only-yours",
                s
            )),
        }
    }
}

impl std::fmt::Display for CheckFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
