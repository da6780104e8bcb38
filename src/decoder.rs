// src/decoder.rs
use std::fmt;

use alloy::primitives::U256;
use thiserror::Error;

use crate::rpc::TraceResult;

/// An account address exactly as the tracer reported it. Kept verbatim:
/// no checksum normalisation, no length check. Callers that need strict
/// validation wrap this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Address(s.to_string())
    }
}

/// A native transfer decoded from the top-level call frame of one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    /// Position of the source entry in the traced batch
    pub index: usize,
    pub from: Address,
    pub to: Address,
    /// Base units (wei); zero for calls that moved nothing
    pub amount: U256,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("value {raw:?} is not a hex quantity")]
    MalformedValue { index: usize, raw: String },

    #[error("frame has no `{field}` address")]
    MissingField { index: usize, field: &'static str },
}

impl DecodeError {
    /// Position of the offending entry in the traced batch
    pub fn index(&self) -> usize {
        match self {
            DecodeError::MalformedValue { index, .. } => *index,
            DecodeError::MissingField { index, .. } => *index,
        }
    }
}

/// Decode every top-level call frame into a native transfer.
///
/// One bad entry never sinks the batch: failures come back as `DecodeError`s
/// alongside the records that did decode, both in input order. Every input
/// index lands in exactly one of the two sequences.
pub fn decode_transfers(traces: &[TraceResult]) -> (Vec<TransferRecord>, Vec<DecodeError>) {
    let mut records = Vec::with_capacity(traces.len());
    let mut errors = Vec::new();

    for (index, entry) in traces.iter().enumerate() {
        match decode_frame(index, entry) {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }

    (records, errors)
}

fn decode_frame(index: usize, entry: &TraceResult) -> Result<TransferRecord, DecodeError> {
    let frame = &entry.result;

    let from = frame
        .from
        .as_deref()
        .ok_or(DecodeError::MissingField { index, field: "from" })?;

    // Contract creations have no conventional recipient
    let to = frame
        .to
        .as_deref()
        .ok_or(DecodeError::MissingField { index, field: "to" })?;

    let amount = parse_value(index, frame.value.as_deref())?;

    Ok(TransferRecord {
        index,
        from: Address::from(from),
        to: Address::from(to),
        amount,
    })
}

/// An absent or empty `value` is a call that moved nothing, not an error.
/// Anything else must be a hex quantity with an optional 0x prefix.
fn parse_value(index: usize, value: Option<&str>) -> Result<U256, DecodeError> {
    let raw = match value {
        None | Some("") => return Ok(U256::ZERO),
        Some(raw) => raw,
    };

    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.is_empty() {
        return Err(DecodeError::MalformedValue {
            index,
            raw: raw.to_string(),
        });
    }

    U256::from_str_radix(digits, 16).map_err(|_| DecodeError::MalformedValue {
        index,
        raw: raw.to_string(),
    })
}
