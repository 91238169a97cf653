//! Network definitions and their checksum-alphabet encoder tables.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bech32::{segwit, Fe32, Hrp};

use crate::error::EncoderError;

/// Index into a network's encoder table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bech32Type {
    /// Encoder for 20-byte witness pubkey-hash programs.
    WitnessPubkeyAddress,
    /// Encoder for 32-byte witness script-hash programs.
    WitnessScriptAddress,
}

impl fmt::Display for Bech32Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bech32Type::WitnessPubkeyAddress => "witness pubkey address",
            Bech32Type::WitnessScriptAddress => "witness script address",
        })
    }
}

/// A checksum-protected text encoding of (witness version, witness program).
///
/// Implementations own the checksum algorithm; the codec only layers length,
/// prefix and version rules on top.
pub trait WitnessEncoder: Send + Sync {
    /// Human-readable part, without the `1` separator.
    fn hrp(&self) -> &str;

    /// Encode a witness program under the given version.
    fn encode(&self, version: u8, program: &[u8]) -> Result<String, EncoderError>;

    /// Decode an address into its witness version and program.
    fn decode(&self, address: &str) -> Result<(u8, Vec<u8>), EncoderError>;
}

/// Bech32 (v0) / Bech32m (v1+) encoder bound to one human-readable part.
#[derive(Debug, Clone)]
pub struct Bech32Encoder {
    hrp: Hrp,
}

impl Bech32Encoder {
    /// Create an encoder for `hrp`, e.g. `"bc"`. The part is stored lowercase,
    /// matching the case of every address the encoder writes.
    pub fn new(hrp: &str) -> Result<Self, EncoderError> {
        let hrp = Hrp::parse(&hrp.to_lowercase())
            .map_err(|e| EncoderError::Encode(e.to_string()))?;
        Ok(Bech32Encoder { hrp })
    }
}

impl WitnessEncoder for Bech32Encoder {
    fn hrp(&self) -> &str {
        self.hrp.as_str()
    }

    fn encode(&self, version: u8, program: &[u8]) -> Result<String, EncoderError> {
        let version =
            Fe32::try_from(version).map_err(|e| EncoderError::Encode(e.to_string()))?;
        segwit::encode(self.hrp, version, program)
            .map_err(|e| EncoderError::Encode(e.to_string()))
    }

    fn decode(&self, address: &str) -> Result<(u8, Vec<u8>), EncoderError> {
        let (hrp, version, program) =
            segwit::decode(address).map_err(|e| EncoderError::Decode(e.to_string()))?;

        if hrp.to_lowercase() != self.hrp.to_lowercase() {
            return Err(EncoderError::HrpMismatch {
                expected: self.hrp.to_lowercase(),
                got: hrp.to_lowercase(),
            });
        }

        Ok((version.to_u8(), program))
    }
}

/// Per-network parameters consumed when building an [`AddressCodec`](crate::AddressCodec).
#[derive(Clone)]
pub struct NetworkParams {
    name: String,
    encoders: BTreeMap<Bech32Type, Arc<dyn WitnessEncoder>>,
}

impl NetworkParams {
    /// Create parameters with an empty encoder table.
    pub fn new(name: impl Into<String>) -> Self {
        NetworkParams {
            name: name.into(),
            encoders: BTreeMap::new(),
        }
    }

    /// Register the encoder for one address kind.
    pub fn with_encoder(mut self, kind: Bech32Type, encoder: Arc<dyn WitnessEncoder>) -> Self {
        self.encoders.insert(kind, encoder);
        self
    }

    /// Look up an encoder by kind.
    pub fn encoder(&self, kind: Bech32Type) -> Option<&Arc<dyn WitnessEncoder>> {
        self.encoders.get(&kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for NetworkParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrps: BTreeMap<_, _> = self.encoders.iter().map(|(k, e)| (*k, e.hrp())).collect();
        f.debug_struct("NetworkParams")
            .field("name", &self.name)
            .field("encoders", &hrps)
            .finish()
    }
}

/// Built-in networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet4,
    Regtest,
}

impl Network {
    /// Get the Bech32 human-readable part for this network.
    pub fn bech32_hrp(&self) -> &'static str {
        match self {
            Network::Mainnet => "bc",
            Network::Testnet4 => "tb",
            Network::Regtest => "bcrt",
        }
    }

    /// Build the encoder table for this network. Both address kinds share
    /// the network's Bech32 human-readable part.
    pub fn params(&self) -> NetworkParams {
        let encoder: Arc<dyn WitnessEncoder> = Arc::new(Bech32Encoder {
            hrp: Hrp::parse_unchecked(self.bech32_hrp()),
        });
        NetworkParams::new(self.name())
            .with_encoder(Bech32Type::WitnessPubkeyAddress, encoder.clone())
            .with_encoder(Bech32Type::WitnessScriptAddress, encoder)
    }

    /// Parse network from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Some(Network::Mainnet),
            "testnet4" | "testnet" | "test" => Some(Network::Testnet4),
            "regtest" => Some(Network::Regtest),
            _ => None,
        }
    }

    /// Get network name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet4 => "testnet4",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
