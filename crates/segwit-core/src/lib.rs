//! SegWit v0 address codec and transaction-output classifier.
//!
//! This crate provides:
//! - Address decoding into locking scripts (P2WPKH, P2WSH)
//! - Locking script classification and address encoding
//! - Detection of structural coinbase/coinstake outputs
//! - Address filtering by value and kind
//!
//! Build an [`AddressCodec`] once per network and share it; every operation
//! on it is a pure function.

pub mod address;
pub mod codec;
pub mod error;
pub mod filter;
pub mod hash;
pub mod network;
pub mod output;
pub mod script;

pub use address::{AddressType, Destination, UnknownAddressTypeError};
pub use codec::AddressCodec;
pub use error::{EncoderError, Error, Result, StatusCode};
pub use filter::{filter_addresses, match_address, AddressRecord};
pub use network::{Bech32Encoder, Bech32Type, Network, NetworkParams, WitnessEncoder};
pub use output::{is_protocol_output, protocol_output_kind, ProtocolOutput, TxKind, TxOut};
pub use script::{is_empty, is_op_return, Script, ScriptClass, UNSPENDABLE};
