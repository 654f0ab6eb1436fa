//! Restprobe scenario runner binary.
//!
//! Runs the built-in JSONPlaceholder smoke suite against the configured
//! base URL. Exits 0 when every scenario passes, 1 otherwise.

use std::process::ExitCode;

use restprobe_cli::{report, scenarios};
use restprobe_domain::ProbeConfig;
use restprobe_engine::{ReqwestClient, ScenarioRunner};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProbeConfig::from_env();
    tracing::info!(base_url = %config.base_url, "starting restprobe v{}", env!("CARGO_PKG_VERSION"));

    let client = match ReqwestClient::new() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("failed to build HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let suite = scenarios::smoke_suite(&config);
    let runner = ScenarioRunner::new(client, config);
    let results = runner.run_suite(scenarios::SUITE_NAME, &suite).await;

    print!("{}", report::render_suite(&results));

    if results.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
