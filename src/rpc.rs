// src/rpc.rs
use eyre::{eyre, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,

    #[serde(rename = "blockNumber")]
    pub block_number_hex: String,

    #[serde(rename = "transactionHash")]
    pub tx_hash: String,

    #[serde(rename = "logIndex")] // ✅ Needed for uniqueness in parser
    pub log_index_hex: String,
}

/// One callTracer frame, as loosely typed as the node emits it.
/// Contract creations have no `to`, pure invocations often omit `value`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CallFrame {
    #[allow(dead_code)]
    #[serde(rename = "type", default)]
    pub call_type: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<String>,

    #[allow(dead_code)]
    pub gas: Option<String>,

    #[allow(dead_code)]
    #[serde(rename = "gasUsed")]
    pub gas_used: Option<String>,

    #[allow(dead_code)]
    pub input: Option<String>,

    #[allow(dead_code)]
    pub output: Option<String>,
}

/// Per-transaction wrapper in a debug_traceBlockByHash response
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TraceResult {
    pub result: CallFrame,

    #[allow(dead_code)]
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: T,
}

/// ERC20 Transfer event topic keccak256("Transfer(address,address,uint256)")
pub const TRANSFER_TOPIC: &str =
    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

/// Get the latest block number with retries and timeout
pub async fn get_block_number(rpc_url: &str) -> Result<u64> {
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    for attempt in 1..=3 {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_blockNumber",
            "params": []
        });

        info!("📡 Sending eth_blockNumber → {}", rpc_url);

        let res = client.post(rpc_url).json(&payload).send().await;

        match res {
            Ok(resp) => {
                if resp.status() != StatusCode::OK {
                    return Err(eyre!("RPC error: HTTP {}", resp.status()));
                }
                let text = resp.text().await?;
                info!("📩 Raw blockNumber response: {}", text);

                let parsed: RpcResponse<String> = serde_json::from_str(&text)?;
                let block_number =
                    u64::from_str_radix(parsed.result.trim_start_matches("0x"), 16)?;
                return Ok(block_number);
            }
            Err(e) if attempt < 3 => {
                eprintln!(
                    "⚠️ RPC request failed (attempt {}): {}. Retrying...",
                    attempt, e
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            Err(e) => return Err(eyre!("❌ RPC request failed after 3 retries: {}", e)),
        }
    }

    Err(eyre!("Unreachable: retries exhausted"))
}

/// Fetch every ERC20 Transfer log emitted in a single block
pub async fn get_transfer_logs(rpc_url: &str, block_hash: &str) -> Result<Vec<Log>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .build()?;

    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_getLogs",
        "params": [{
            "blockHash": block_hash,
            "topics": [TRANSFER_TOPIC]
        }]
    });

    info!(
        "📡 Sending eth_getLogs → {} (block {})",
        rpc_url, block_hash
    );

    let resp = client.post(rpc_url).json(&payload).send().await?;
    let text = resp.text().await?;
    info!("📩 getLogs response: {} bytes", text.len());

    let parsed: RpcResponse<Vec<Log>> = serde_json::from_str(&text)?;
    Ok(parsed.result)
}

/// Trace every transaction in a block with the built-in callTracer
pub async fn trace_block_by_hash(rpc_url: &str, block_hash: &str) -> Result<Vec<TraceResult>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "debug_traceBlockByHash",
        "params": [block_hash, { "tracer": "callTracer" }]
    });

    info!(
        "📡 Sending debug_traceBlockByHash → {} (block {})",
        rpc_url, block_hash
    );

    let resp = client.post(rpc_url).json(&payload).send().await?;
    let text = resp.text().await?;
    info!("📩 Trace response: {} bytes", text.len());

    let parsed: RpcResponse<Vec<TraceResult>> = serde_json::from_str(&text)?;
    Ok(parsed.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_block_response_deserializes() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "result": [
                {
                    "txHash": "0x4e3a3754410177e6937ef1f84bba68ea139e8d1a2258c5f85db9f1cd715a1bdd",
                    "result": {
                        "type": "CALL",
                        "from": "0x1f9090aae28b8a3dceadf281b0f12828e676c326",
                        "to": "0x388c818ca8b9251b393131c08a736a67ccb19297",
                        "value": "0x42b4df2c9054ee",
                        "gas": "0x7a120",
                        "gasUsed": "0x5208",
                        "input": "0x",
                        "output": "0x"
                    }
                },
                {
                    "result": {
                        "type": "CREATE",
                        "from": "0x9b1054d24dc31a54739b6d8950af5a7dbaa56815",
                        "value": "0x0",
                        "gas": "0x2fa9d8",
                        "gasUsed": "0x2a8e6b",
                        "input": "0x60806040",
                        "output": "0x60806040"
                    }
                }
            ]
        }"#;

        let parsed: RpcResponse<Vec<TraceResult>> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.result.len(), 2);

        let call = &parsed.result[0].result;
        assert_eq!(call.call_type, "CALL");
        assert_eq!(call.value.as_deref(), Some("0x42b4df2c9054ee"));

        let create = &parsed.result[1];
        assert!(create.tx_hash.is_none());
        assert!(create.result.to.is_none());
    }

    #[test]
    fn transfer_log_deserializes() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "result": [{
                "address": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                "topics": [
                    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                    "0x000000000000000000000000aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                    "0x000000000000000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
                ],
                "data": "0x00000000000000000000000000000000000000000000000000000000000003e8",
                "blockNumber": "0xf64398",
                "transactionHash": "0x06a2a0f1a2b06e1a26c3a3e19a1b1a0a55ac46d5b46b2f5ee7b5a4ae1c080d11",
                "logIndex": "0x2a"
            }]
        }"#;

        let parsed: RpcResponse<Vec<Log>> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.result.len(), 1);

        let log = &parsed.result[0];
        assert_eq!(log.address, "0xdac17f958d2ee523a2206206994597c13d831ec7");
        assert_eq!(log.topics.len(), 3);
        assert_eq!(log.topics[0], TRANSFER_TOPIC);
        assert_eq!(log.block_number_hex, "0xf64398");
        assert_eq!(log.log_index_hex, "0x2a");
    }
}
