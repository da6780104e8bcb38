mod config;
mod decoder;
mod parser;
mod rpc;

use alloy::primitives::U256;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Force logging to stdout for visibility
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stdout)           // force logs to stdout
        .with_target(false)                     // cleaner logs (no module names unless needed)
        .init();

    info!("Transfer scan starting...");

    // Load configuration
    let cfg = config::load()?;
    info!("Loaded config:");
    info!("  RPC URL: {}", cfg.rpc_http_url);
    info!("  Block hash: {}", cfg.block_hash);

    // Connectivity check before the real queries
    let latest_block = rpc::get_block_number(&cfg.rpc_http_url).await?;
    info!("Chain tip at block {}", latest_block);

    scan_erc20_transfers(&cfg).await?;
    scan_native_transfers(&cfg).await?;

    info!("Transfer scan done.");
    Ok(())
}

/// Fetch and report every ERC20 Transfer event in the target block
async fn scan_erc20_transfers(cfg: &config::Config) -> eyre::Result<()> {
    let logs = rpc::get_transfer_logs(&cfg.rpc_http_url, &cfg.block_hash).await?;

    let mut decoded_count = 0;
    for log in &logs {
        match parser::decode_transfer(log) {
            Some(t) => {
                info!(
                    "ERC20 transfer from={} to={} token={} amount={}",
                    t.from, t.to, t.token, t.value
                );
                decoded_count += 1;
            }
            None => warn!("Could not parse transfer event, log {:?}", log),
        }
    }

    info!(
        "ERC20 transfer logs: {} fetched, {} decoded",
        logs.len(),
        decoded_count
    );
    Ok(())
}

/// Trace the target block and report the native transfer of every transaction
async fn scan_native_transfers(cfg: &config::Config) -> eyre::Result<()> {
    let traces = rpc::trace_block_by_hash(&cfg.rpc_http_url, &cfg.block_hash).await?;
    let (records, errors) = decoder::decode_transfers(&traces);

    for record in &records {
        info!(
            "native transfer tx#{} from={} to={} amount={}",
            record.index,
            record.from,
            record.to,
            format_amount(record.amount)
        );
    }
    for err in &errors {
        warn!("Trace entry {} skipped: {}", err.index(), err);
    }

    info!(
        "Traced {} transactions: {} transfers, {} decode failures",
        traces.len(),
        records.len(),
        errors.len()
    );
    Ok(())
}

/// Render wei with an ETH reading where it fits Decimal range
fn format_amount(amount: U256) -> String {
    match u128::try_from(amount).ok().and_then(Decimal::from_u128) {
        Some(wei) => format!("{} ({} ETH)", amount, wei / Decimal::from(10u64.pow(18))),
        None => amount.to_string(),
    }
}
