//! Errors surfaced by the codec and classifiers.

use thiserror::Error;

use crate::network::Bech32Type;

/// HTTP-style status attached to every codec error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// The caller supplied a malformed address or script.
    BadRequest,
    /// Configuration or decoder inconsistency, not the caller's fault.
    InternalServerError,
}

impl StatusCode {
    /// Numeric HTTP status.
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::BadRequest => 400,
            StatusCode::InternalServerError => 500,
        }
    }
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed length, prefix, checksum or witness version.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    /// Script reference was absent, or empty where an address was requested.
    #[error("Invalid script: {0}")]
    InvalidScript(String),
    /// The encoder returned a program whose length contradicts the address kind.
    #[error("Witness program length mismatch: expected {expected}, got {actual}")]
    WitnessProgramLength { expected: usize, actual: usize },
    /// The network's encoder table lacks an entry.
    #[error("Network has no encoder for {0}")]
    MissingEncoder(Bech32Type),
}

impl Error {
    pub(crate) fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        Error::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Status reported to callers.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidAddress { .. } | Error::InvalidScript(_) => StatusCode::BadRequest,
            Error::WitnessProgramLength { .. } | Error::MissingEncoder(_) => {
                StatusCode::InternalServerError
            }
        }
    }
}

/// Failures of a checksum-alphabet encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    /// Checksum, character set or segwit structure rejected by the encoder.
    #[error("{0}")]
    Decode(String),
    /// The address was produced for another human-readable part.
    #[error("expected prefix '{expected}', got '{got}'")]
    HrpMismatch { expected: String, got: String },
    /// The program or version cannot be encoded.
    #[error("{0}")]
    Encode(String),
}

pub type Result<T> = core::result::Result<T, Error>;
