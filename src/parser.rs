// src/parser.rs
use alloy::primitives::{Address, U256};
use crate::rpc::Log;

/// A decoded ERC20 Transfer
#[derive(Debug, Clone)]
pub struct Erc20Transfer {
    pub token: Address,      // emitting contract
    pub from: Address,
    pub to: Address,
    pub value: U256,         // raw token units
    pub block_number: u64,
    pub tx_hash: String,
    pub log_index: u64,      //  added for uniqueness
}

fn topic_to_address(topic: &str) -> Option<Address> {
    // topics[1] and topics[2] are 32-byte (padded) hex strings; address is the last 20 bytes
    let s = topic.trim_start_matches("0x");
    let bytes = hex::decode(s).ok()?;
    if bytes.len() != 32 {
        return None;
    }
    let addr_bytes: [u8; 20] = bytes[12..32].try_into().ok()?;
    Some(Address::from(addr_bytes))
}

/// Decode a single log into `Erc20Transfer`
pub fn decode_transfer(log: &Log) -> Option<Erc20Transfer> {
    if log.topics.len() < 3 {
        return None;
    }

    let token: Address = log.address.parse().ok()?;
    let from = topic_to_address(&log.topics[1])?;
    let to = topic_to_address(&log.topics[2])?;

    let value_hex = log.data.trim_start_matches("0x");
    let value = U256::from_str_radix(value_hex, 16).unwrap_or(U256::ZERO);

    let block_number =
        u64::from_str_radix(log.block_number_hex.trim_start_matches("0x"), 16).ok()?;

    let log_index =
        u64::from_str_radix(log.log_index_hex.trim_start_matches("0x"), 16).unwrap_or(0);

    Some(Erc20Transfer {
        token,
        from,
        to,
        value,
        block_number,
        tx_hash: log.tx_hash.clone(),
        log_index,
    })
}
