//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize)]
pub(super) struct RawConfig {
    pub app: RawApp,
    #[serde(default)]
    pub devtools: RawDevtools,
    /// Top-level `ssr = true|false` key.
    #[serde(default = "default_true")]
    pub ssr: bool,
    /// Top-level `modules = [...]` key; absent means none.
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub dev_server: RawDevServer,
    #[serde(default)]
    pub cors: RawCors,
    #[serde(default)]
    pub database: RawDatabase,
}

#[derive(Deserialize)]
pub(super) struct RawApp {
    pub name: String,
    pub work_dir: String,
    pub log_level: String,
}

// ── Application record ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawDevtools {
    /// Defaults to `false`: devtools must be explicitly enabled.
    #[serde(default = "default_false")]
    pub enabled: bool,
}

impl Default for RawDevtools {
    fn default() -> Self {
        Self { enabled: false }
    }
}

#[derive(Deserialize)]
pub(super) struct RawDevServer {
    #[serde(default = "default_dev_server_host")]
    pub host: String,
    #[serde(default = "default_dev_server_port")]
    pub port: u16,
}

impl Default for RawDevServer {
    fn default() -> Self {
        Self {
            host: default_dev_server_host(),
            port: default_dev_server_port(),
        }
    }
}

// ── Server-side sections ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawCors {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for RawCors {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawDatabase {
    #[serde(default = "default_database_file")]
    pub file: String,
}

impl Default for RawDatabase {
    fn default() -> Self {
        Self {
            file: default_database_file(),
        }
    }
}

// ── Defaults ─────────────────────────────────────────────────────────────────

pub(super) fn default_dev_server_host() -> String {
    "127.0.0.1".to_string()
}

pub(super) fn default_dev_server_port() -> u16 {
    3000
}

pub(super) fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

pub(super) fn default_database_file() -> String {
    "todos.db".to_string()
}

pub(super) fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}
