// actor.rs — Actor and resource scope definitions.
//
// An actor is whatever the authentication layer decided the caller is: a
// schema-free JSON object. The engine never mutates it and only reads the
// conventional `id` key, for audit attribution. Checkers are free to look
// at any other key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The entity on whose behalf a permission check is performed.
///
/// Keys keep the order the caller supplied them in. An empty actor stands
/// for an anonymous caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(Map<String, Value>);

impl Actor {
    /// An actor with no keys at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An actor carrying only an `id`.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(id.into()));
        Self(map)
    }

    /// The actor's `id`, if present.
    ///
    /// Numeric ids are returned as their decimal text so that `{"id": 1}`
    /// and `{"id": "1"}` attribute to the same actor.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a key, returning the previous value. Used by callers building
    /// actors; the engine itself never calls this.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The actor as a JSON value, for display.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Actor {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Optional (database, resource) pair narrowing a check.
///
/// `resource` names a table or a saved query inside `database`. Leaving a
/// field out widens the check: no database means an instance-wide check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceScope {
    pub database: Option<String>,
    pub resource: Option<String>,
}

impl ResourceScope {
    /// Instance-wide scope.
    pub fn instance() -> Self {
        Self::default()
    }

    /// A whole database.
    pub fn database(database: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            resource: None,
        }
    }

    /// A table or query inside a database.
    pub fn resource(database: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            resource: Some(resource.into()),
        }
    }

    pub fn is_instance(&self) -> bool {
        self.database.is_none() && self.resource.is_none()
    }

    /// Drop whichever fields the permission does not take.
    pub fn narrowed(&self, takes_database: bool, takes_resource: bool) -> Self {
        Self {
            database: self.database.clone().filter(|_| takes_database),
            resource: self.resource.clone().filter(|_| takes_resource),
        }
    }

    /// URL-style path: `/`, `/db` or `/db/resource`.
    pub fn path(&self) -> String {
        match (&self.database, &self.resource) {
            (None, None) => "/".to_string(),
            (None, Some(resource)) => format!("/{}", resource),
            (Some(database), None) => format!("/{}", database),
            (Some(database), Some(resource)) => format!("/{}/{}", database, resource),
        }
    }

    /// Short summary for history listings, `None` for instance scope.
    pub fn summary(&self) -> Option<String> {
        match (&self.database, &self.resource) {
            (None, None) => None,
            (Some(database), None) => Some(database.clone()),
            (None, Some(resource)) => Some(resource.clone()),
            (Some(database), Some(resource)) => Some(format!("{}/{}", database, resource)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_reads_strings_and_numbers() {
        assert_eq!(Actor::with_id("root").id(), Some("root".to_string()));

        let numeric: Actor = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(numeric.id(), Some("42".to_string()));

        let nested: Actor = serde_json::from_value(json!({"id": {"x": 1}})).unwrap();
        assert_eq!(nested.id(), None);

        assert_eq!(Actor::anonymous().id(), None);
    }

    #[test]
    fn actor_keeps_key_order() {
        let actor: Actor =
            serde_json::from_str(r#"{"zeta": 1, "id": "root", "alpha": true}"#).unwrap();
        let keys: Vec<&str> = actor.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "id", "alpha"]);
    }

    #[test]
    fn actor_rejects_non_objects() {
        assert!(serde_json::from_str::<Actor>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Actor>("\"root\"").is_err());
    }

    #[test]
    fn narrowing_drops_undeclared_fields() {
        let scope = ResourceScope::resource("mydb", "mytable");
        assert_eq!(scope.narrowed(true, true), scope);
        assert_eq!(scope.narrowed(true, false), ResourceScope::database("mydb"));
        assert_eq!(scope.narrowed(false, false), ResourceScope::instance());
    }

    #[test]
    fn paths_and_summaries() {
        assert_eq!(ResourceScope::instance().path(), "/");
        assert_eq!(ResourceScope::database("mydb").path(), "/mydb");
        assert_eq!(ResourceScope::resource("mydb", "t").path(), "/mydb/t");

        assert_eq!(ResourceScope::instance().summary(), None);
        assert_eq!(
            ResourceScope::resource("mydb", "t").summary().as_deref(),
            Some("mydb/t")
        );
    }
}
