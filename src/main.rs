//! Nelum — dev server entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI flags
//!   3. Load config (read once; never mutated afterwards)
//!   4. Init logger at the effective level (CLI > env > config)
//!   5. Ensure work_dir, open the todo store
//!   6. Register configured modules, in order
//!   7. Build the router, print a startup summary
//!   8. Serve until Ctrl-C cancels the shutdown token

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use nelum::config::{self, Config};
use nelum::error::AppError;
use nelum::logger;
use nelum::modules::{self, AppModule};
use nelum::server;
use nelum::service::TodoService;
use nelum::storage::SqliteTodoStore;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level)?;

    info!(
        app = %config.app_name,
        work_dir = %config.work_dir.display(),
        log_level = %effective_log_level,
        ssr = %config.ssr,
        "config loaded"
    );

    std::fs::create_dir_all(&config.work_dir)?;

    let store = SqliteTodoStore::open(&config.database_path())?;
    let service = Arc::new(TodoService::new(Arc::new(store)));

    let registry = modules::build_registry(&config.modules)?;
    for module in &registry {
        info!(module = %module.name(), "module registered");
    }

    let app = server::build_router(&config, service, &registry)?;

    // Shared shutdown token — Ctrl-C cancels it, the serve loop watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    print_startup_summary(&config, &registry);

    server::run(&config.bind_addr(), app, shutdown).await
}

fn print_startup_summary(config: &Config, registry: &[Box<dyn AppModule>]) {
    let module_names = modules::names(registry);
    let modules_line = if module_names.is_empty() {
        "none".to_string()
    } else {
        module_names.join(", ")
    };

    println!("✓ {} ready", config.app_name);
    println!("  bind:     http://{}", config.bind_addr());
    println!("  ssr:      {}", if config.ssr { "on" } else { "off" });
    println!(
        "  devtools: {}",
        if config.devtools.enabled { "enabled" } else { "disabled" }
    );
    println!("  modules:  {modules_line}");
    println!("  database: {}", config.database_path().display());
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: nelum [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    // Each -v raises verbosity one tier from the config default:
    //   -v      → warn   (suppress info noise, show warnings+errors only)
    //   -vv     → info   (normal operational output — the typical default)
    //   -vvv    → debug  (flow-level diagnostics: routing, store calls)
    //   -vvvv+  → trace  (full payload dumps, very verbose)
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path }
}
