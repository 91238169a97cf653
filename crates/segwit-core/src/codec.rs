//! Codec configuration: the encoders and prefixes of one network.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::network::{Bech32Type, NetworkParams, WitnessEncoder};
use crate::script::{PUBKEY_HASH_LEN, SCRIPT_HASH_LEN};

/// Separator between the human-readable part and the data part.
pub const SEPARATOR: char = '1';

/// Number of checksum characters appended to the data part.
const CHECKSUM_LEN: usize = 6;

/// Immutable address codec for one network.
///
/// Construct once from [`NetworkParams`] and share it by reference or `Arc`;
/// it is never mutated afterwards.
#[derive(Clone)]
pub struct AddressCodec {
    pub(crate) pubkey_hash_encoder: Arc<dyn WitnessEncoder>,
    pub(crate) script_hash_encoder: Arc<dyn WitnessEncoder>,
    pubkey_hash_prefix: String,
    script_hash_prefix: String,
}

impl AddressCodec {
    /// Pick the witness pubkey and witness script encoders out of the
    /// network's encoder table.
    pub fn new(params: &NetworkParams) -> Result<Self> {
        let pubkey_hash_encoder = params
            .encoder(Bech32Type::WitnessPubkeyAddress)
            .ok_or(Error::MissingEncoder(Bech32Type::WitnessPubkeyAddress))?
            .clone();
        let script_hash_encoder = params
            .encoder(Bech32Type::WitnessScriptAddress)
            .ok_or(Error::MissingEncoder(Bech32Type::WitnessScriptAddress))?
            .clone();

        let pubkey_hash_prefix = format!("{}{}", pubkey_hash_encoder.hrp(), SEPARATOR);
        let script_hash_prefix = format!("{}{}", script_hash_encoder.hrp(), SEPARATOR);

        Ok(AddressCodec {
            pubkey_hash_encoder,
            script_hash_encoder,
            pubkey_hash_prefix,
            script_hash_prefix,
        })
    }

    /// `<hrp>1` of pubkey-hash addresses.
    pub fn pubkey_hash_prefix(&self) -> &str {
        &self.pubkey_hash_prefix
    }

    /// `<hrp>1` of script-hash addresses.
    pub fn script_hash_prefix(&self) -> &str {
        &self.script_hash_prefix
    }

    /// Length of every valid pubkey-hash address on this network.
    pub fn pubkey_hash_address_len(&self) -> usize {
        address_len(&self.pubkey_hash_prefix, PUBKEY_HASH_LEN)
    }

    /// Length of every valid script-hash address on this network.
    pub fn script_hash_address_len(&self) -> usize {
        address_len(&self.script_hash_prefix, SCRIPT_HASH_LEN)
    }
}

impl fmt::Debug for AddressCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressCodec")
            .field("pubkey_hash_prefix", &self.pubkey_hash_prefix)
            .field("script_hash_prefix", &self.script_hash_prefix)
            .finish()
    }
}

/// Prefix, one version character, the program in 5-bit groups, checksum.
fn address_len(prefix: &str, program_len: usize) -> usize {
    prefix.len() + 1 + (program_len * 8 + 4) / 5 + CHECKSUM_LEN
}
