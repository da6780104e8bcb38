use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RpcResponse<T> {
    Success { result: T },
    Error { error: RpcError },
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[allow(dead_code)]
    code: i64,
    #[allow(dead_code)]
    message: String,
}

const RPC_URL: &str = "https://ethereum.kyberengineering.io";
const BLOCK_HASH: &str = "0x7008451b87e4f126e3b5428d4ea2c6f23167ddbb8a1c1fa1d4e1d9ca70faaca8";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();
    println!("Tracing block {}...", BLOCK_HASH);

    // debug_traceBlockByHash with the built-in callTracer
    let trace_res: RpcResponse<Vec<Value>> = client
        .post(RPC_URL)
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "debug_traceBlockByHash",
            "params": [BLOCK_HASH, { "tracer": "callTracer" }]
        }))
        .send()
        .await?
        .json()
        .await?;

    match trace_res {
        RpcResponse::Success { result: entries } => {
            println!("Fetched {} traced transactions", entries.len());
            for entry in entries.iter().take(5) {
                let frame = &entry["result"];
                println!(
                    "Type: {} | From: {} | To: {} | Value: {}",
                    frame["type"], frame["from"], frame["to"], frame["value"]
                );
            }
        }
        RpcResponse::Error { error } => {
            eprintln!("RPC error while tracing block: {:?}", error);
        }
    }

    Ok(())
}
