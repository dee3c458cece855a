use std::env;
use std::sync::Arc;

use domscore::application::services::ScoringService;
use domscore::cli::{output, print_report};
use domscore::config::Settings;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Log filter variable, falls back to RUST_LOG.
const LOG_ENV: &str = "DOMSCORE_LOG";

fn main() {
    setup_logging();

    // settings are looked up next to where we run; unreadable cwd means global/env only
    let cwd = env::current_dir().ok();
    let settings = match Settings::load(cwd.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("effective settings: {:?}", settings);

    let settings = Arc::new(settings);
    let report = ScoringService::new(Arc::clone(&settings)).run();
    print_report(&report, &settings);
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
