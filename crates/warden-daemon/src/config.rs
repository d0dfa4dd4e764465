// config.rs — Daemon configuration loaded from warden.toml.
//
// Every field has a default, so an empty file (or no file at all) gives a
// working daemon on localhost with the core permission catalog.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use warden_policy::{Actor, Permission, PermissionEngine, RootChecker};

pub const DEFAULT_BIND: &str = "127.0.0.1:8001";

/// Top-level daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Address the HTTP surface listens on.
    pub bind: String,
    /// Install the root checker: `{"id":"root"}` is granted everything.
    pub root: bool,
    pub audit: AuditConfig,
    /// Actor the debug surface acts as. Authentication happens upstream.
    pub operator: Actor,
    /// Extra permissions registered after the core catalog.
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Number of decisions kept in memory.
    pub capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            capacity: warden_policy::DEFAULT_AUDIT_CAPACITY,
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            root: false,
            audit: AuditConfig::default(),
            operator: Actor::with_id("root"),
            permissions: Vec::new(),
        }
    }
}

impl DaemonConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Build an engine with the core catalog, the configured extra
    /// permissions, and the root checker when root mode is on.
    pub fn build_engine(&self) -> Result<PermissionEngine> {
        let engine = PermissionEngine::with_defaults(self.audit.capacity)?;
        engine
            .registry()
            .register_all(self.permissions.iter().cloned())
            .context("failed to register configured permissions")?;
        if self.root {
            tracing::warn!("root mode enabled: actor \"root\" is granted every permission");
            engine.add_checker(RootChecker);
        }
        Ok(engine)
    }
}
