//! HTTP server — router assembly and the serve loop.
//!
//! ## URL layout
//!
//! ```text
//! GET    /                   → app shell (SSR or client-boot, per config)
//! GET    /health             → 200 "OK"
//! GET    /favicon.ico        → 204
//! GET    /api/todos          → todo list
//! POST   /api/todos          → create todo
//! PATCH  /api/todos/{id}     → update completion state
//! DELETE /api/todos/{id}     → delete todo
//! GET    /_devtools/config   → resolved config   (devtools only)
//! GET    /_devtools/modules  → registered modules (devtools only)
//! <module routes>            → contributed by registered modules
//! ```
//!
//! The `/_devtools` subtree is only mounted when `devtools.enabled` is set;
//! otherwise those paths 404 like any other unknown route.

mod api;
mod shell;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::{get, patch};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::modules::{self, AppModule};
use crate::service::TodoService;

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — all fields are reference-counted or `Copy`.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Application name shown in the shell page.
    pub app_name: Arc<str>,
    /// Render the shell server-side when `true`.
    pub ssr: bool,
    /// Head markup contributed by registered modules.
    pub head_html: Arc<str>,
    pub service: Arc<TodoService>,
    /// Registered module names, in registration order.
    pub module_names: Arc<[String]>,
    /// Resolved config snapshot — `Some` only when devtools is enabled.
    pub config_snapshot: Option<Arc<serde_json::Value>>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Assemble the full application router from the resolved config, the todo
/// service, and the registered modules.
pub fn build_router(
    config: &Config,
    service: Arc<TodoService>,
    modules: &[Box<dyn AppModule>],
) -> Result<Router, AppError> {
    let state = AppState {
        app_name: Arc::from(config.app_name.as_str()),
        ssr: config.ssr,
        head_html: Arc::from(modules::head_html(modules).as_str()),
        service,
        module_names: modules::names(modules).into(),
        config_snapshot: config
            .devtools
            .enabled
            .then(|| Arc::new(config_snapshot(config))),
    };

    let mut router = Router::new()
        .route("/", get(shell::root))
        .route("/health", get(api::health))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route("/api/todos", get(api::list_todos).post(api::create_todo))
        .route(
            "/api/todos/{id}",
            patch(api::update_todo).delete(api::delete_todo),
        );

    if config.devtools.enabled {
        router = router
            .route("/_devtools/config", get(api::devtools_config))
            .route("/_devtools/modules", get(api::devtools_modules));
    }

    let mut app = router
        .layer(cors_layer(&config.cors.allowed_origins)?)
        .with_state(state);

    // Module routes are stateless and own their own path namespace.
    for module in modules {
        app = app.merge(module.routes());
    }

    Ok(app)
}

/// CORS for the frontend dev origin(s): explicit origin list, credentials
/// allowed, preflight cached for five minutes.
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| AppError::Config(format!("invalid CORS origin '{origin}': {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(300)))
}

/// Resolved config as reported by `/_devtools/config`.
/// Paths are stringified; the record holds nothing secret.
fn config_snapshot(config: &Config) -> serde_json::Value {
    json!({
        "app": {
            "name": config.app_name,
            "work_dir": config.work_dir.display().to_string(),
            "log_level": config.log_level,
        },
        "devtools": { "enabled": config.devtools.enabled },
        "ssr": config.ssr,
        "modules": config.modules,
        "dev_server": {
            "host": config.dev_server.host,
            "port": config.dev_server.port,
        },
        "cors": { "allowed_origins": config.cors.allowed_origins },
        "database": { "file": config.database.file },
    })
}

// ── Serve loop ────────────────────────────────────────────────────────────────

/// Bind `bind_addr` and serve `app` until `shutdown` is cancelled.
pub async fn run(
    bind_addr: &str,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "dev server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("dev server shut down");
    Ok(())
}
