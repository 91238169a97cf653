//! Locking scripts and their byte-pattern classification.

use std::fmt;

use crate::error::{Error, Result};

/// OP_0, also the witness version 0 marker.
pub const OP_0: u8 = 0x00;
/// Next byte holds the push length.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Next two bytes (little-endian) hold the push length.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Next four bytes (little-endian) hold the push length.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// OP_RETURN, marks a provably unspendable data carrier.
pub const OP_RETURN: u8 = 0x6a;

/// Witness program size of a pubkey-hash output.
pub const PUBKEY_HASH_LEN: usize = 20;
/// Witness program size of a script-hash output.
pub const SCRIPT_HASH_LEN: usize = 32;

/// Marker returned in place of an address for unrecognised scripts.
pub const UNSPENDABLE: &str = "unspendable";

/// A serialized locking script (scriptPubKey).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

/// Shape of a locking script as far as address derivation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass {
    /// `OP_0 <20 bytes>`
    PubKeyHash([u8; PUBKEY_HASH_LEN]),
    /// `OP_0 <32 bytes>`
    ScriptHash([u8; SCRIPT_HASH_LEN]),
    /// Anything else. Not an error.
    Unspendable,
}

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// `OP_0 <push 20-byte program>`
    pub fn new_p2wpkh(hash: &[u8; PUBKEY_HASH_LEN]) -> Self {
        Self::new_v0(hash)
    }

    /// `OP_0 <push 32-byte program>`
    pub fn new_p2wsh(hash: &[u8; SCRIPT_HASH_LEN]) -> Self {
        Self::new_v0(hash)
    }

    fn new_v0(program: &[u8]) -> Self {
        let mut script = Vec::with_capacity(2 + program.len());
        script.push(OP_0);
        script.push(program.len() as u8);
        script.extend_from_slice(program);
        Script(script)
    }

    /// `OP_RETURN <push data>`, or a bare `OP_RETURN` for empty data.
    pub fn new_op_return(data: &[u8]) -> Self {
        let mut script = Vec::with_capacity(6 + data.len());
        script.push(OP_RETURN);
        if !data.is_empty() {
            push_data(&mut script, data);
        }
        Script(script)
    }

    /// Parse a hex-encoded script.
    pub fn from_hex(s: &str) -> core::result::Result<Self, hex::FromHexError> {
        hex::decode(s).map(Script)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First byte is OP_RETURN.
    pub fn is_op_return(&self) -> bool {
        self.0.first() == Some(&OP_RETURN)
    }

    /// Classify by `(length, byte[0], byte[1])`.
    pub fn classify(&self) -> ScriptClass {
        match (self.0.len(), self.0.first(), self.0.get(1)) {
            (22, Some(&OP_0), Some(&20)) => {
                let mut hash = [0u8; PUBKEY_HASH_LEN];
                hash.copy_from_slice(&self.0[2..22]);
                ScriptClass::PubKeyHash(hash)
            }
            (34, Some(&OP_0), Some(&32)) => {
                let mut hash = [0u8; SCRIPT_HASH_LEN];
                hash.copy_from_slice(&self.0[2..34]);
                ScriptClass::ScriptHash(hash)
            }
            _ => ScriptClass::Unspendable,
        }
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl From<Script> for Vec<u8> {
    fn from(script: Script) -> Self {
        script.0
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Append the minimal push of `data`.
fn push_data(script: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
    if len <= 75 {
        script.push(len as u8);
    } else if len <= 0xff {
        script.push(OP_PUSHDATA1);
        script.push(len as u8);
    } else if len <= 0xffff {
        script.push(OP_PUSHDATA2);
        script.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        script.push(OP_PUSHDATA4);
        script.extend_from_slice(&(len as u32).to_le_bytes());
    }
    script.extend_from_slice(data);
}

fn present(script: Option<&Script>) -> Result<&Script> {
    script.ok_or_else(|| Error::InvalidScript("null".into()))
}

/// Whether an optional script starts with OP_RETURN. Absent scripts are a
/// caller error.
pub fn is_op_return(script: Option<&Script>) -> Result<bool> {
    Ok(present(script)?.is_op_return())
}

/// Whether an optional script has zero length. Absent scripts are a caller
/// error.
pub fn is_empty(script: Option<&Script>) -> Result<bool> {
    Ok(present(script)?.is_empty())
}

/// Classify an optional script that is expected to resolve to an address.
pub(crate) fn classify_present(script: Option<&Script>) -> Result<ScriptClass> {
    let script = present(script)?;
    if script.is_empty() {
        return Err(Error::InvalidScript("empty script".into()));
    }
    Ok(script.classify())
}
