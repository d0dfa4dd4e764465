// restrictions.rs — Allowlists carried on the actor itself.
//
// An actor (typically a scoped API token) may carry an `_r` key limiting
// what it can do, whatever other checkers say:
//
//   {"_r": {"a": ["vi"],                       // anywhere
//           "d": {"mydb": ["vt", "es"]},       // anywhere in mydb
//           "r": {"mydb": {"users": ["vt"]}}}} // only mydb/users
//
// Entries may use either the permission name or its abbreviation. A
// restricted actor is denied any permission not listed at a level that
// covers the (narrowed) scope being checked.

use serde_json::{Map, Value};

use crate::actor::{Actor, ResourceScope};
use crate::checker::{CheckerError, PermissionChecker, Verdict};
use crate::permission::Permission;

/// Actor key holding the allowlists.
pub const RESTRICTIONS_KEY: &str = "_r";

/// Denies restricted actors anything outside their allowlists; abstains
/// for unrestricted actors and for allowlisted permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictionsChecker;

impl PermissionChecker for RestrictionsChecker {
    fn name(&self) -> &str {
        "restrictions"
    }

    fn check(
        &self,
        actor: &Actor,
        permission: &Permission,
        scope: &ResourceScope,
    ) -> Result<Verdict, CheckerError> {
        let restrictions = match actor.get(RESTRICTIONS_KEY) {
            None | Some(Value::Null) => return Ok(Verdict::NoOpinion),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(format!("{} must be a JSON object", RESTRICTIONS_KEY).into()),
        };

        if allowlist_permits(restrictions.get("a"), permission)? {
            return Ok(Verdict::NoOpinion);
        }
        if let Some(database) = &scope.database {
            let listed = nested(restrictions, "d")?.and_then(|dbs| dbs.get(database));
            if allowlist_permits(listed, permission)? {
                return Ok(Verdict::NoOpinion);
            }
            if let Some(resource) = &scope.resource {
                let listed = match nested(restrictions, "r")?.and_then(|dbs| dbs.get(database)) {
                    Some(Value::Object(tables)) => tables.get(resource),
                    None | Some(Value::Null) => None,
                    Some(_) => return Err("_r.r entries must be JSON objects".into()),
                };
                if allowlist_permits(listed, permission)? {
                    return Ok(Verdict::NoOpinion);
                }
            }
        }
        Ok(Verdict::Deny)
    }
}

fn nested<'a>(
    restrictions: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, CheckerError> {
    match restrictions.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(format!("_r.{} must be a JSON object", key).into()),
    }
}

fn allowlist_permits(list: Option<&Value>, permission: &Permission) -> Result<bool, CheckerError> {
    let entries = match list {
        None | Some(Value::Null) => return Ok(false),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err("restriction allowlists must be JSON arrays".into()),
    };
    Ok(entries.iter().filter_map(Value::as_str).any(|entry| {
        entry == permission.name || permission.abbr.as_deref() == Some(entry)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view_table() -> Permission {
        Permission::new("view-table", "View table", true)
            .with_abbr("vt")
            .takes_resource()
    }

    fn restricted(restrictions: Value) -> Actor {
        let mut actor = Actor::with_id("token-bot");
        actor.insert(RESTRICTIONS_KEY, restrictions);
        actor
    }

    fn verdict(actor: &Actor, scope: ResourceScope) -> Verdict {
        RestrictionsChecker
            .check(actor, &view_table(), &scope)
            .unwrap()
    }

    #[test]
    fn unrestricted_actor_is_left_alone() {
        let actor = Actor::with_id("alice");
        assert_eq!(
            verdict(&actor, ResourceScope::resource("mydb", "secret")),
            Verdict::NoOpinion
        );
    }

    #[test]
    fn global_allowlist_covers_every_scope() {
        let actor = restricted(json!({"a": ["vt"]}));
        assert_eq!(verdict(&actor, ResourceScope::instance()), Verdict::NoOpinion);
        assert_eq!(
            verdict(&actor, ResourceScope::resource("otherdb", "t")),
            Verdict::NoOpinion
        );

        let actor = restricted(json!({"a": ["vi"]}));
        assert_eq!(
            verdict(&actor, ResourceScope::resource("mydb", "secret")),
            Verdict::Deny
        );
    }

    #[test]
    fn database_allowlist_covers_its_tables_only() {
        let actor = restricted(json!({"d": {"mydb": ["view-table"]}}));
        assert_eq!(
            verdict(&actor, ResourceScope::resource("mydb", "anything")),
            Verdict::NoOpinion
        );
        assert_eq!(
            verdict(&actor, ResourceScope::resource("otherdb", "anything")),
            Verdict::Deny
        );
        assert_eq!(verdict(&actor, ResourceScope::instance()), Verdict::Deny);
    }

    #[test]
    fn resource_allowlist_covers_one_table() {
        let actor = restricted(json!({"r": {"mydb": {"users": ["vt"]}}}));
        assert_eq!(
            verdict(&actor, ResourceScope::resource("mydb", "users")),
            Verdict::NoOpinion
        );
        assert_eq!(
            verdict(&actor, ResourceScope::resource("mydb", "secret")),
            Verdict::Deny
        );
        assert_eq!(verdict(&actor, ResourceScope::database("mydb")), Verdict::Deny);
    }

    #[test]
    fn malformed_restrictions_are_errors() {
        for bad in [json!("vt"), json!({"a": "vt"}), json!({"d": ["mydb"]})] {
            let actor = restricted(bad);
            assert!(RestrictionsChecker
                .check(&actor, &view_table(), &ResourceScope::database("mydb"))
                .is_err());
        }
    }
}
