// registry.rs — Append-only catalog of permission definitions.
//
// Permissions are registered during startup (core defaults first, then
// whatever plugins and config declare) and never removed. Lookups hand out
// shared handles so evaluations never hold the registry lock while checkers
// run.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::PolicyError;
use crate::permission::Permission;

/// Catalog of every permission known to the engine, in registration order.
#[derive(Default)]
pub struct PermissionRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    ordered: Vec<Arc<Permission>>,
    by_name: HashMap<String, usize>,
}

impl PermissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a permission.
    ///
    /// Re-registering an identical definition is a no-op. A different
    /// definition under an existing name fails with `DuplicateName`, and a
    /// permission taking a resource but no database fails with
    /// `InvalidPermission`.
    pub fn register(&self, permission: Permission) -> Result<(), PolicyError> {
        if permission.takes_resource && !permission.takes_database {
            return Err(PolicyError::InvalidPermission {
                name: permission.name,
                reason: "takes_resource requires takes_database".to_string(),
            });
        }

        let mut inner = self.inner.write();

        if let Some(&index) = inner.by_name.get(&permission.name) {
            if *inner.ordered[index] == permission {
                return Ok(());
            }
            return Err(PolicyError::DuplicateName {
                name: permission.name,
            });
        }

        tracing::debug!(permission = %permission.name, "registered permission");
        let index = inner.ordered.len();
        inner.by_name.insert(permission.name.clone(), index);
        inner.ordered.push(Arc::new(permission));
        Ok(())
    }

    /// Register a batch, stopping at the first conflict.
    pub fn register_all(
        &self,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Result<(), PolicyError> {
        permissions
            .into_iter()
            .try_for_each(|permission| self.register(permission))
    }

    /// Find a permission by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<Permission>, PolicyError> {
        let inner = self.inner.read();
        inner
            .by_name
            .get(name)
            .map(|&index| Arc::clone(&inner.ordered[index]))
            .ok_or_else(|| PolicyError::UnknownPermission {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().by_name.contains_key(name)
    }

    /// Every registered permission, in registration order.
    ///
    /// The returned vector is a snapshot; iterate it as often as needed.
    pub fn list(&self) -> Vec<Arc<Permission>> {
        self.inner.read().ordered.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_table() -> Permission {
        Permission::new("view-table", "View table", false).takes_resource()
    }

    #[test]
    fn lookup_returns_registered_permission() {
        let registry = PermissionRegistry::new();
        registry.register(view_table()).unwrap();

        let found = registry.lookup("view-table").unwrap();
        assert_eq!(*found, view_table());
        assert!(registry.contains("view-table"));
    }

    #[test]
    fn lookup_unknown_fails() {
        let registry = PermissionRegistry::new();
        match registry.lookup("drop-everything") {
            Err(PolicyError::UnknownPermission { name }) => assert_eq!(name, "drop-everything"),
            other => panic!("expected UnknownPermission, got {:?}", other),
        }
    }

    #[test]
    fn identical_reregistration_is_a_no_op() {
        let registry = PermissionRegistry::new();
        registry.register(view_table()).unwrap();
        registry.register(view_table()).unwrap();

        let names: Vec<String> = registry.list().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["view-table"]);
    }

    #[test]
    fn conflicting_reregistration_fails() {
        let registry = PermissionRegistry::new();
        registry.register(view_table()).unwrap();

        let conflicting = Permission::new("view-table", "View table", true).takes_resource();
        match registry.register(conflicting) {
            Err(PolicyError::DuplicateName { name }) => assert_eq!(name, "view-table"),
            other => panic!("expected DuplicateName, got {:?}", other),
        }
        // The original definition survives.
        assert!(!registry.lookup("view-table").unwrap().default);
    }

    #[test]
    fn list_preserves_registration_order() {
        let registry = PermissionRegistry::new();
        registry
            .register_all(vec![
                Permission::new("zeta", "", true),
                Permission::new("alpha", "", true),
                Permission::new("mid", "", false),
            ])
            .unwrap();

        let names: Vec<String> = registry.list().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        // Restartable: a second listing sees the same sequence.
        assert_eq!(registry.list().len(), 3);
    }

    #[test]
    fn resource_without_database_is_rejected() {
        let registry = PermissionRegistry::new();
        let mut broken = Permission::new("view-row", "View row", false);
        broken.takes_resource = true;

        match registry.register(broken) {
            Err(PolicyError::InvalidPermission { name, .. }) => assert_eq!(name, "view-row"),
            other => panic!("expected InvalidPermission, got {:?}", other),
        }
        assert!(registry.is_empty());
    }
}
