//! Plain data objects handed to JavaScript.

use segwit_core::{Destination, Error};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Error reported to JavaScript callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// HTTP-style status (400 for bad input).
    pub status: u16,
    /// Human-readable message including the offending input.
    pub message: String,
}

impl ErrorInfo {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ErrorInfo {
            status: 400,
            message: message.into(),
        }
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self).unwrap_or_else(|_| JsValue::from_str(&self.message))
    }
}

impl From<Error> for ErrorInfo {
    fn from(err: Error) -> Self {
        ErrorInfo {
            status: err.status().code(),
            message: err.to_string(),
        }
    }
}

/// Classification of a locking script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationInfo {
    /// Address text, or "unspendable".
    pub address: String,
    /// "P2WPKH", "P2WSH", or absent for unspendable scripts.
    pub address_type: Option<String>,
    /// Whether the script resolves to an address.
    pub spendable: bool,
}

impl From<Destination> for ClassificationInfo {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Address {
                address,
                address_type,
            } => ClassificationInfo {
                address,
                address_type: Some(address_type.name().to_string()),
                spendable: true,
            },
            Destination::Unspendable => ClassificationInfo {
                address: Destination::Unspendable.as_str().to_string(),
                address_type: None,
                spendable: false,
            },
        }
    }
}

impl ClassificationInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

/// An address that passed a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    /// The matched address text.
    pub address: String,
    /// "P2WPKH" or "P2WSH".
    pub address_type: String,
}

impl AddressInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}
