//! `dexfield` binary

use anyhow::Result;
use dex_cli::{build_cli, load_config, run, Invocation};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let invocation = Invocation::from_matches(&matches)?;

    init_tracing(invocation.verbose);

    let config = load_config(invocation.config.as_deref())?;
    tracing::debug!("Using API at {}", config.api_base_url);

    let report = run(invocation.action, &config).await?;
    println!("{}", report.output);

    if !report.success {
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to stderr
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
