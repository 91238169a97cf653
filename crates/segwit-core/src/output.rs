//! Structural outputs of coinbase and coinstake transactions.
//!
//! A coinbase creates the block reward and commits to the block's witness
//! data through an OP_RETURN output. A coinstake records a proof-of-stake
//! claim: its first output is empty and it may carry an OP_RETURN marker.
//! Neither kind of output is a payment.

use crate::error::Result;
use crate::script::{self, Script, OP_RETURN};

/// Witness commitment header (magic bytes).
pub const WITNESS_COMMITMENT_HEADER: [u8; 4] = [0xaa, 0x21, 0xa9, 0xed];

/// Transaction flags consumed by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxKind {
    pub is_coinbase: bool,
    pub is_coinstake: bool,
}

impl TxKind {
    pub fn coinbase() -> Self {
        TxKind {
            is_coinbase: true,
            is_coinstake: false,
        }
    }

    pub fn coinstake() -> Self {
        TxKind {
            is_coinbase: false,
            is_coinstake: true,
        }
    }

    pub fn regular() -> Self {
        TxKind::default()
    }
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: u64,
    pub script_pubkey: Option<Script>,
}

impl TxOut {
    pub fn new(value: u64, script_pubkey: Script) -> Self {
        TxOut {
            value,
            script_pubkey: Some(script_pubkey),
        }
    }
}

/// Why an output is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolOutput {
    /// Empty script: the empty first output of a coinstake or stake-marker
    /// coinbase.
    Marker,
    /// `OP_RETURN 0x24 aa21a9ed <32 bytes>`
    WitnessCommitment,
    /// Any other OP_RETURN script.
    DataCarrier,
}

/// Whether `output` of a transaction of kind `tx` is structural rather than
/// a payment.
pub fn is_protocol_output(output: &TxOut, tx: &TxKind) -> Result<bool> {
    let script_pubkey = output.script_pubkey.as_ref();

    if tx.is_coinbase {
        return Ok(script::is_empty(script_pubkey)? || script::is_op_return(script_pubkey)?);
    }

    if tx.is_coinstake {
        return Ok(script::is_empty(script_pubkey)? || script::is_op_return(script_pubkey)?);
    }

    Ok(false)
}

/// Like [`is_protocol_output`], but says which kind of structural output it is.
pub fn protocol_output_kind(output: &TxOut, tx: &TxKind) -> Result<Option<ProtocolOutput>> {
    if !is_protocol_output(output, tx)? {
        return Ok(None);
    }

    let kind = match output.script_pubkey.as_ref() {
        Some(script) if script.is_empty() => ProtocolOutput::Marker,
        Some(script) if is_witness_commitment(script) => ProtocolOutput::WitnessCommitment,
        _ => ProtocolOutput::DataCarrier,
    };
    Ok(Some(kind))
}

/// Matches the witness commitment layout.
pub fn is_witness_commitment(script: &Script) -> bool {
    let bytes = script.as_bytes();
    bytes.len() >= 38
        && bytes[0] == OP_RETURN
        && bytes[1] == 0x24
        && bytes[2..6] == WITNESS_COMMITMENT_HEADER
}

/// Generate the scriptPubKey for a witness commitment output.
///
/// Format: OP_RETURN <commitment>
/// Where commitment = 0xaa21a9ed || witness_commitment
pub fn witness_commitment_script(witness_commitment: &[u8; 32]) -> Script {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&WITNESS_COMMITMENT_HEADER);
    data.extend_from_slice(witness_commitment);
    Script::new_op_return(&data)
}
