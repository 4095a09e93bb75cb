//! routelist - proxy rule list compiler and domain liveness monitor.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    routelist_cli::run().await
}
