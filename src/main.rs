use anyhow::Result;
use receiving_loader::{config::Config, discover, process, store::PgStore};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("error during CSV load: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // ─── 2) configuration ────────────────────────────────────────────
    let config = Config::from_env()?;

    // ─── 3) discover inputs; nothing to do means nothing to connect to ─
    let files = discover::find_csv_files(&config.data_dir)?;
    if files.is_empty() {
        anyhow::bail!("no CSV files found in {}", config.data_dir.display());
    }
    info!("{} CSV files to load", files.len());

    // ─── 4) one storage session for the whole run ───────────────────
    let mut store = PgStore::connect(&config).await?;
    let result = process::ingest_all(&mut store, &files).await;

    // released on success and failure alike
    if let Err(e) = store.close().await {
        warn!("{:#}", e);
    }

    let total = result?;
    info!(rows = total, "all done");
    Ok(())
}
