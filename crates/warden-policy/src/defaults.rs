// defaults.rs — Core permission catalog.
//
// These are the permissions every deployment starts with. Plugins and
// configuration add more on top. Read-style permissions default to allowed,
// write-style and debugging permissions default to denied.

use crate::permission::Permission;

/// The core permissions, in catalog display order.
pub fn default_permissions() -> Vec<Permission> {
    vec![
        Permission::new("view-instance", "View instance", true).with_abbr("vi"),
        Permission::new("permissions-debug", "Access permission debug tool", false)
            .with_abbr("pd"),
        Permission::new("debug-menu", "View debug menu items", false).with_abbr("dm"),
        Permission::new("view-database", "View database", true)
            .with_abbr("vd")
            .takes_database(),
        Permission::new("view-database-download", "Download database file", true)
            .with_abbr("vdd")
            .takes_database(),
        Permission::new("execute-sql", "Execute read-only SQL queries", true)
            .with_abbr("es")
            .takes_database(),
        Permission::new("create-table", "Create tables", false)
            .with_abbr("ct")
            .takes_database(),
        Permission::new("view-table", "View table", true)
            .with_abbr("vt")
            .takes_resource(),
        Permission::new("insert-row", "Insert rows", false)
            .with_abbr("ir")
            .takes_resource(),
        Permission::new("delete-row", "Delete rows", false)
            .with_abbr("dr")
            .takes_resource(),
        Permission::new("update-row", "Update rows", false)
            .with_abbr("ur")
            .takes_resource(),
        Permission::new("alter-table", "Alter tables", false)
            .with_abbr("at")
            .takes_resource(),
        Permission::new("drop-table", "Drop tables", false)
            .with_abbr("dt")
            .takes_resource(),
        Permission::new("view-query", "View named query results", true)
            .with_abbr("vq")
            .takes_resource(),
    ]
}
