use anyhow::Context;

use tidelapse::FetchConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=info (or debug) to see fetch and replay progress.
    env_logger::init();

    tidelapse::run(FetchConfig::trident_pier())
        .await
        .context("tidelapse run failed")?;

    Ok(())
}
