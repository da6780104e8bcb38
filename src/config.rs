use dotenvy::dotenv;
use eyre::Result;
use std::env;
use tracing::info;

/// Mainnet block 16139416, the default scan target
const DEFAULT_BLOCK_HASH: &str =
    "0x7008451b87e4f126e3b5428d4ea2c6f23167ddbb8a1c1fa1d4e1d9ca70faaca8";

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_http_url: String,       // ✅ HTTP RPC URL
    pub block_hash: String,         // block to scan
}

pub fn load() -> Result<Config> {
    dotenv().ok(); // ✅ Load from .env file

    // ✅ Load RPC URL (prefer HTTP, fallback to a public mainnet endpoint)
    let rpc_http_url = env::var("RPC_HTTP_URL")
        .or_else(|_| env::var("ETH_RPC_URL")) // alias support
        .unwrap_or_else(|_| "https://ethereum.kyberengineering.io".to_string());

    // ✅ Block hash to scan (default: mainnet block 16139416)
    let block_hash = env::var("BLOCK_HASH")
        .or_else(|_| env::var("TARGET_BLOCK_HASH"))
        .unwrap_or_else(|_| DEFAULT_BLOCK_HASH.to_string());

    let cfg = Config {
        rpc_http_url,
        block_hash,
    };

    // ✅ Log loaded config for debugging
    info!("Loaded config: {:?}", cfg);

    Ok(cfg)
}
