//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the rest of the server
//! consumes. Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

// ── Application record ───────────────────────────────────────────────────────

/// Developer tooling configuration.
#[derive(Debug, Clone)]
pub struct DevtoolsConfig {
    /// Whether the `/_devtools/*` route group is mounted.
    pub enabled: bool,
}

/// Dev server bind settings.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Address the HTTP listener binds to.
    pub host: String,
    /// Listening port.
    pub port: u16,
}

// ── Server-side sections ─────────────────────────────────────────────────────

/// CORS settings for the `/api/*` surface.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins allowed to call the API (the frontend dev origin by default).
    pub allowed_origins: Vec<String>,
}

/// Todo store settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite file name, resolved relative to `work_dir`.
    pub file: String,
}

// ── Config (root) ────────────────────────────────────────────────────────────

/// Fully-resolved application configuration.
///
/// Loaded once at process start and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    /// Directory for all persistent data (already expanded, no `~`).
    pub work_dir: PathBuf,
    pub log_level: String,
    pub devtools: DevtoolsConfig,
    /// Render the app shell on the server when `true`; serve the client-boot
    /// shell otherwise.
    pub ssr: bool,
    /// Modules to register at startup, in file order.
    pub modules: Vec<String>,
    pub dev_server: DevServerConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.dev_server.host, self.dev_server.port)
    }

    /// Absolute path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.work_dir.join(&self.database.file)
    }
}
