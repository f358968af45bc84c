//! Tracing setup for the binary.
//!
//! - `LOG_LEVEL` holds the filter directives (e.g. "debug" or
//!   "info,services=debug,sqlx=warn").
//! - `LOG_FORMAT=json` switches to structured JSON lines; anything else is
//!   human-readable.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,services=debug,storage=info,sqlx=warn";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
