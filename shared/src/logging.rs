use std::env;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Deployment flavour, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Turns on backtrace capture for `anyhow` errors unless the operator already
/// chose a setting through `RUST_LIB_BACKTRACE` or `RUST_BACKTRACE`.
///
/// Must run before any other thread exists; returns whether it changed anything.
pub fn enable_error_backtraces() -> bool {
    if env::var_os("RUST_LIB_BACKTRACE").is_some() || env::var_os("RUST_BACKTRACE").is_some() {
        return false;
    }
    env::set_var("RUST_LIB_BACKTRACE", "1");
    true
}

/// Initialize the global tracing subscriber.
///
/// - **Production**: JSON lines without module targets, `info` by default.
/// - **Development**: pretty output, `debug` by default.
///
/// `RUST_LOG` overrides the default filter in both cases. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info,tower_http=info")
        } else {
            EnvFilter::new("debug,hyper=info,reqwest=info")
        }
    });

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
