//! SegWit v0 address decoding and encoding.
//!
//! Supports:
//! - P2WPKH (Pay to Witness Public Key Hash) - 20-byte program
//! - P2WSH (Pay to Witness Script Hash) - 32-byte program
//!
//! Only witness version 0 is accepted. Scripts of any other shape map to the
//! [`UNSPENDABLE`] marker rather than an error.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::codec::AddressCodec;
use crate::error::{Error, Result};
use crate::filter::AddressRecord;
use crate::hash::sha256;
use crate::network::WitnessEncoder;
use crate::script::{
    classify_present, Script, ScriptClass, PUBKEY_HASH_LEN, SCRIPT_HASH_LEN, UNSPENDABLE,
};

/// The only witness version this codec produces or accepts.
pub const WITNESS_VERSION_0: u8 = 0;

/// Address kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Native SegWit v0 P2WPKH: OP_0 <20-byte-hash>
    P2WPKH,
    /// Native SegWit v0 P2WSH: OP_0 <32-byte-hash>
    P2WSH,
    /// Wildcard used by address filters. Never produced by the codec.
    All,
}

impl AddressType {
    /// Get the display name for this address type.
    pub fn name(&self) -> &'static str {
        match self {
            AddressType::P2WPKH => "P2WPKH",
            AddressType::P2WSH => "P2WSH",
            AddressType::All => "all",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown address type: {0}")]
pub struct UnknownAddressTypeError(pub String);

impl FromStr for AddressType {
    type Err = UnknownAddressTypeError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p2wpkh" | "pubkeyhash" => Ok(AddressType::P2WPKH),
            "p2wsh" | "scripthash" => Ok(AddressType::P2WSH),
            "all" | "*" => Ok(AddressType::All),
            _ => Err(UnknownAddressTypeError(s.to_string())),
        }
    }
}

/// What a locking script pays to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Address {
        address: String,
        address_type: AddressType,
    },
    Unspendable,
}

impl Destination {
    /// Address text, or the [`UNSPENDABLE`] marker.
    pub fn as_str(&self) -> &str {
        match self {
            Destination::Address { address, .. } => address,
            Destination::Unspendable => UNSPENDABLE,
        }
    }
}

impl AddressCodec {
    /// Decode an address into its locking script.
    ///
    /// Each kind is recognised by exact length and prefix, then decoded with
    /// the encoder registered for that kind.
    pub fn decode_address(&self, address: &str) -> Result<Script> {
        if address.len() == self.pubkey_hash_address_len()
            && address.starts_with(self.pubkey_hash_prefix())
        {
            let hash = decode_v0::<PUBKEY_HASH_LEN>(&*self.pubkey_hash_encoder, address)?;
            return Ok(Script::new_p2wpkh(&hash));
        }

        if address.len() == self.script_hash_address_len()
            && address.starts_with(self.script_hash_prefix())
        {
            let hash = decode_v0::<SCRIPT_HASH_LEN>(&*self.script_hash_encoder, address)?;
            return Ok(Script::new_p2wsh(&hash));
        }

        Err(Error::invalid_address(address, "unrecognised length or prefix"))
    }

    /// Encode a 20-byte witness pubkey hash.
    pub fn encode_pubkey_hash(&self, hash: &[u8]) -> Result<String> {
        encode_v0(&*self.pubkey_hash_encoder, hash, PUBKEY_HASH_LEN)
    }

    /// Encode a 32-byte witness script hash.
    pub fn encode_script_hash(&self, hash: &[u8]) -> Result<String> {
        encode_v0(&*self.script_hash_encoder, hash, SCRIPT_HASH_LEN)
    }

    /// P2WSH address committing to `witness_script`.
    pub fn encode_witness_script(&self, witness_script: &Script) -> Result<String> {
        self.encode_script_hash(&sha256(witness_script.as_bytes()))
    }

    /// Resolve a script to what it pays to. Absent or empty scripts are an
    /// error; unrecognised shapes are [`Destination::Unspendable`].
    pub fn destination(&self, script: Option<&Script>) -> Result<Destination> {
        Ok(match classify_present(script)? {
            ScriptClass::PubKeyHash(hash) => Destination::Address {
                address: self.encode_pubkey_hash(&hash)?,
                address_type: AddressType::P2WPKH,
            },
            ScriptClass::ScriptHash(hash) => Destination::Address {
                address: self.encode_script_hash(&hash)?,
                address_type: AddressType::P2WSH,
            },
            ScriptClass::Unspendable => Destination::Unspendable,
        })
    }

    /// Address text of a script, or `"unspendable"`.
    pub fn classify_to_address(&self, script: Option<&Script>) -> Result<String> {
        self.destination(script).map(|d| d.as_str().to_string())
    }

    /// Kind of a valid address.
    pub fn address_type(&self, address: &str) -> Result<AddressType> {
        match self.decode_address(address)?.classify() {
            ScriptClass::PubKeyHash(_) => Ok(AddressType::P2WPKH),
            ScriptClass::ScriptHash(_) => Ok(AddressType::P2WSH),
            ScriptClass::Unspendable => {
                Err(Error::invalid_address(address, "not a witness address"))
            }
        }
    }

    /// Validate an address and tag it with its kind.
    pub fn to_record(&self, address: &str) -> Result<AddressRecord> {
        Ok(AddressRecord {
            address: address.to_string(),
            address_type: self.address_type(address)?,
        })
    }
}

fn decode_v0<const N: usize>(encoder: &dyn WitnessEncoder, address: &str) -> Result<[u8; N]> {
    let (version, program) = encoder
        .decode(address)
        .map_err(|e| Error::invalid_address(address, e.to_string()))?;

    let hash: [u8; N] = program
        .as_slice()
        .try_into()
        .map_err(|_| Error::WitnessProgramLength {
            expected: N,
            actual: program.len(),
        })?;

    if version != WITNESS_VERSION_0 {
        return Err(Error::invalid_address(
            address,
            format!("unsupported witness version {}", version),
        ));
    }

    Ok(hash)
}

fn encode_v0(encoder: &dyn WitnessEncoder, program: &[u8], expected: usize) -> Result<String> {
    if program.len() != expected {
        return Err(Error::invalid_address(
            &hex::encode(program),
            format!("expected {}-byte witness program, got {}", expected, program.len()),
        ));
    }

    encoder
        .encode(WITNESS_VERSION_0, program)
        .map_err(|e| Error::invalid_address(&hex::encode(program), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::error::EncoderError;
    use crate::network::{Bech32Encoder, Bech32Type, Network, NetworkParams};

    fn mainnet() -> AddressCodec {
        AddressCodec::new(&Network::Mainnet.params()).unwrap()
    }

    #[test]
    fn test_p2wpkh_mainnet() {
        let script = mainnet()
            .decode_address("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
            .unwrap();
        assert_eq!(script.to_string(), "0014751e76e8199196d454941c45d1b3a323f1433bd6");
    }

    #[test]
    fn test_p2wsh_mainnet() {
        let script = mainnet()
            .decode_address("bc1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3qccfmv3")
            .unwrap();
        assert_eq!(
            script.to_string(),
            "00201863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262"
        );
    }

    #[test]
    fn test_p2wsh_testnet() {
        let codec = AddressCodec::new(&Network::Testnet4.params()).unwrap();
        let script = codec
            .decode_address("tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7")
            .unwrap();
        assert_eq!(script.len(), 34);
        assert_eq!(
            script.classify(),
            ScriptClass::ScriptHash(
                hex::decode("1863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262")
                    .unwrap()
                    .try_into()
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_round_trip_pubkey_hash() {
        let codec = mainnet();
        for seed in [0x00u8, 0x5a, 0xff] {
            let hash = [seed; 20];
            let address = codec.encode_pubkey_hash(&hash).unwrap();
            assert_eq!(codec.decode_address(&address).unwrap(), Script::new_p2wpkh(&hash));
        }
    }

    #[test]
    fn test_round_trip_script_hash() {
        let codec = mainnet();
        let hash: [u8; 32] = core::array::from_fn(|i| i as u8);
        let address = codec.encode_script_hash(&hash).unwrap();
        assert_eq!(address.len(), 62);
        assert_eq!(codec.decode_address(&address).unwrap(), Script::new_p2wsh(&hash));
    }

    #[test]
    fn test_classify_reproduces_address() {
        let codec = mainnet();
        for address in [
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
            "bc1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3qccfmv3",
        ] {
            let script = codec.decode_address(address).unwrap();
            assert_eq!(codec.classify_to_address(Some(&script)).unwrap(), address);
        }
    }

    #[test]
    fn test_wrong_length_or_prefix() {
        let codec = mainnet();
        for address in [
            "",
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t",
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx",
            "BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4",
            "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
        ] {
            let err = codec.decode_address(address).unwrap_err();
            assert!(matches!(err, Error::InvalidAddress { .. }), "{address}");
        }
    }

    #[test]
    fn test_invalid_checksum() {
        let err = mainnet()
            .decode_address("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5")
            .unwrap_err();
        match err {
            Error::InvalidAddress { address, .. } => {
                assert_eq!(address, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nonzero_witness_version_rejected() {
        let encoder = Bech32Encoder::new("bc").unwrap();
        let v1 = encoder.encode(1, &[0x42; 20]).unwrap();
        assert_eq!(v1.len(), 42);

        let err = mainnet().decode_address(&v1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAddress { ref reason, .. } if reason.contains("version 1")
        ));

        let v1_sh = encoder.encode(1, &[0x42; 32]).unwrap();
        assert!(matches!(
            mainnet().decode_address(&v1_sh),
            Err(Error::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_encode_rejects_wrong_program_length() {
        let codec = mainnet();
        assert!(matches!(
            codec.encode_pubkey_hash(&[0u8; 32]),
            Err(Error::InvalidAddress { .. })
        ));
        assert!(matches!(
            codec.encode_script_hash(&[0u8; 20]),
            Err(Error::InvalidAddress { .. })
        ));
        assert!(matches!(codec.encode_pubkey_hash(&[]), Err(Error::InvalidAddress { .. })));
    }

    #[test]
    fn test_script_hash_uses_its_own_encoder() {
        let params = NetworkParams::new("split")
            .with_encoder(
                Bech32Type::WitnessPubkeyAddress,
                Arc::new(Bech32Encoder::new("pk").unwrap()),
            )
            .with_encoder(
                Bech32Type::WitnessScriptAddress,
                Arc::new(Bech32Encoder::new("sh").unwrap()),
            );
        let codec = AddressCodec::new(&params).unwrap();

        let hash = [0x77u8; 32];
        let address = codec.encode_script_hash(&hash).unwrap();
        assert!(address.starts_with("sh1"));
        assert!(codec.pubkey_hash_encoder.decode(&address).is_err());
        assert_eq!(codec.decode_address(&address).unwrap(), Script::new_p2wsh(&hash));

        let address = codec.encode_pubkey_hash(&[0x11; 20]).unwrap();
        assert!(address.starts_with("pk1"));
        assert_eq!(codec.address_type(&address).unwrap(), AddressType::P2WPKH);
    }

    #[test]
    fn test_uppercase_hrp_round_trip() {
        let encoder = Arc::new(Bech32Encoder::new("BC").unwrap());
        let params = NetworkParams::new("upper")
            .with_encoder(Bech32Type::WitnessPubkeyAddress, encoder.clone())
            .with_encoder(Bech32Type::WitnessScriptAddress, encoder);
        let codec = AddressCodec::new(&params).unwrap();
        assert_eq!(codec.pubkey_hash_prefix(), "bc1");

        let hash = [0x11u8; 20];
        let address = codec.encode_pubkey_hash(&hash).unwrap();
        assert!(address.starts_with(codec.pubkey_hash_prefix()));
        assert_eq!(codec.decode_address(&address).unwrap(), Script::new_p2wpkh(&hash));

        let hash = [0x22u8; 32];
        let address = codec.encode_script_hash(&hash).unwrap();
        assert_eq!(codec.decode_address(&address).unwrap(), Script::new_p2wsh(&hash));
    }

    /// Returns a fixed decode result regardless of input.
    struct FixedEncoder {
        version: u8,
        program: Vec<u8>,
    }

    impl WitnessEncoder for FixedEncoder {
        fn hrp(&self) -> &str {
            "bc"
        }

        fn encode(
            &self,
            _version: u8,
            _program: &[u8],
        ) -> core::result::Result<String, EncoderError> {
            Err(EncoderError::Encode("unsupported".into()))
        }

        fn decode(&self, _address: &str) -> core::result::Result<(u8, Vec<u8>), EncoderError> {
            Ok((self.version, self.program.clone()))
        }
    }

    #[test]
    fn test_decoder_inconsistency_is_not_invalid_address() {
        let encoder = Arc::new(FixedEncoder { version: 0, program: vec![0u8; 32] });
        let params = NetworkParams::new("broken")
            .with_encoder(Bech32Type::WitnessPubkeyAddress, encoder.clone())
            .with_encoder(Bech32Type::WitnessScriptAddress, encoder);
        let codec = AddressCodec::new(&params).unwrap();

        let err = codec
            .decode_address("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
            .unwrap_err();
        assert_eq!(err, Error::WitnessProgramLength { expected: 20, actual: 32 });
    }

    #[test]
    fn test_witness_script_address() {
        // BIP173 P2WSH vector: 1-of-1 multisig witness script
        let witness_script = Script::from_hex(
            "210279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798ac",
        )
        .unwrap();
        let address = mainnet().encode_witness_script(&witness_script).unwrap();
        assert_eq!(address, "bc1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3qccfmv3");
    }

    #[test]
    fn test_classify_to_address() {
        let codec = mainnet();

        let p2wpkh = Script::new_p2wpkh(&[0x01; 20]);
        let address = codec.classify_to_address(Some(&p2wpkh)).unwrap();
        assert_eq!(codec.address_type(&address).unwrap(), AddressType::P2WPKH);

        let p2wsh = Script::new_p2wsh(&[0x02; 32]);
        let address = codec.classify_to_address(Some(&p2wsh)).unwrap();
        assert_eq!(codec.address_type(&address).unwrap(), AddressType::P2WSH);

        let op_return = Script::from(vec![0x6a]);
        assert_eq!(codec.classify_to_address(Some(&op_return)).unwrap(), UNSPENDABLE);
        assert_eq!(codec.destination(Some(&op_return)).unwrap(), Destination::Unspendable);
    }

    #[test]
    fn test_classify_to_address_rejects_absent_or_empty() {
        let codec = mainnet();
        assert!(matches!(codec.classify_to_address(None), Err(Error::InvalidScript(_))));
        assert!(matches!(
            codec.classify_to_address(Some(&Script::new())),
            Err(Error::InvalidScript(_))
        ));
    }

    #[test]
    fn test_address_type_from_str() {
        assert_eq!("p2wpkh".parse::<AddressType>(), Ok(AddressType::P2WPKH));
        assert_eq!("P2WSH".parse::<AddressType>(), Ok(AddressType::P2WSH));
        assert_eq!("all".parse::<AddressType>(), Ok(AddressType::All));
        assert!("p2tr".parse::<AddressType>().is_err());
    }
}
