//! Address codec exposed to JavaScript.

use segwit_core::{
    is_protocol_output, match_address, AddressCodec, AddressRecord, AddressType, Network, Script,
    TxKind, TxOut,
};
use wasm_bindgen::prelude::*;

use crate::dto::{AddressInfo, ClassificationInfo, ErrorInfo};

/// Address codec bound to one network.
#[wasm_bindgen]
pub struct Codec {
    /// The network addresses belong to.
    network: Network,
    /// Encoders and prefixes of that network.
    inner: AddressCodec,
}

impl Codec {
    /// Build a codec for a network name ("mainnet", "testnet4", "regtest").
    pub fn for_network(network: &str) -> Result<Codec, ErrorInfo> {
        let net = Network::from_str(network)
            .ok_or_else(|| ErrorInfo::bad_request(format!("Invalid network: {}", network)))?;
        let inner = AddressCodec::new(&net.params())?;

        Ok(Codec {
            network: net,
            inner,
        })
    }

    /// Locking script of an address, as hex.
    pub fn script_hex(&self, address: &str) -> Result<String, ErrorInfo> {
        Ok(self.inner.decode_address(address)?.to_string())
    }

    /// Classify a hex-encoded locking script.
    pub fn classification(&self, script_hex: &str) -> Result<ClassificationInfo, ErrorInfo> {
        let script = parse_script(script_hex)?;
        Ok(self.inner.destination(Some(&script))?.into())
    }

    /// Whether an output with the given script is structural for the
    /// transaction kind. `None` stands for a missing script.
    pub fn protocol_output(
        &self,
        script_hex: Option<&str>,
        is_coinbase: bool,
        is_coinstake: bool,
    ) -> Result<bool, ErrorInfo> {
        let output = TxOut {
            value: 0,
            script_pubkey: script_hex.map(parse_script).transpose()?,
        };
        let tx = TxKind {
            is_coinbase,
            is_coinstake,
        };
        Ok(is_protocol_output(&output, &tx)?)
    }

    /// Validate `address` and return it if it passes the filter.
    pub fn filtered(
        &self,
        address: &str,
        filter: Option<&str>,
        filter_type: &str,
    ) -> Result<Option<AddressInfo>, ErrorInfo> {
        let filter_type: AddressType = filter_type.parse().map_err(
            |e: segwit_core::UnknownAddressTypeError| ErrorInfo::bad_request(e.to_string()),
        )?;
        let record: AddressRecord = self.inner.to_record(address)?;

        Ok(match_address(Some(&record), filter, filter_type).map(|r| AddressInfo {
            address: r.address.clone(),
            address_type: r.address_type.name().to_string(),
        }))
    }
}

#[wasm_bindgen]
impl Codec {
    /// Create a codec for the specified network.
    ///
    /// # Arguments
    /// * `network` - The network ("mainnet", "testnet4" or "regtest")
    #[wasm_bindgen(constructor)]
    pub fn new(network: &str) -> Result<Codec, JsValue> {
        Self::for_network(network).map_err(into_js)
    }

    /// Decode an address into its hex-encoded locking script.
    #[wasm_bindgen]
    pub fn decode_address(&self, address: &str) -> Result<String, JsValue> {
        self.script_hex(address).map_err(into_js)
    }

    /// Encode a hex 20-byte witness pubkey hash as an address.
    #[wasm_bindgen]
    pub fn encode_pubkey_hash(&self, hash_hex: &str) -> Result<String, JsValue> {
        let hash = parse_hex(hash_hex).map_err(into_js)?;
        self.inner
            .encode_pubkey_hash(&hash)
            .map_err(|e| into_js(e.into()))
    }

    /// Encode a hex 32-byte witness script hash as an address.
    #[wasm_bindgen]
    pub fn encode_script_hash(&self, hash_hex: &str) -> Result<String, JsValue> {
        let hash = parse_hex(hash_hex).map_err(into_js)?;
        self.inner
            .encode_script_hash(&hash)
            .map_err(|e| into_js(e.into()))
    }

    /// Address of a hex-encoded locking script, or "unspendable".
    #[wasm_bindgen]
    pub fn script_to_address(&self, script_hex: &str) -> Result<String, JsValue> {
        self.classification(script_hex)
            .map(|info| info.address)
            .map_err(into_js)
    }

    /// Classify a hex-encoded locking script.
    #[wasm_bindgen]
    pub fn classify(&self, script_hex: &str) -> Result<JsValue, JsValue> {
        self.classification(script_hex).map_err(into_js)?.to_js()
    }

    /// Whether an output is a structural coinbase/coinstake output.
    #[wasm_bindgen]
    pub fn is_protocol_output(
        &self,
        script_hex: Option<String>,
        is_coinbase: bool,
        is_coinstake: bool,
    ) -> Result<bool, JsValue> {
        self.protocol_output(script_hex.as_deref(), is_coinbase, is_coinstake)
            .map_err(into_js)
    }

    /// Return the address info if it passes the filter, otherwise `null`.
    #[wasm_bindgen]
    pub fn match_address(
        &self,
        address: &str,
        filter: Option<String>,
        filter_type: &str,
    ) -> Result<JsValue, JsValue> {
        match self
            .filtered(address, filter.as_deref(), filter_type)
            .map_err(into_js)?
        {
            Some(info) => info.to_js(),
            None => Ok(JsValue::NULL),
        }
    }

    /// Get the network name.
    #[wasm_bindgen(getter)]
    pub fn network(&self) -> String {
        self.network.name().to_string()
    }
}

fn parse_hex(s: &str) -> Result<Vec<u8>, ErrorInfo> {
    hex::decode(s).map_err(|e| ErrorInfo::bad_request(format!("Invalid hex '{}': {}", s, e)))
}

fn parse_script(s: &str) -> Result<Script, ErrorInfo> {
    parse_hex(s).map(Script::from)
}

fn into_js(err: ErrorInfo) -> JsValue {
    console_log(&format!("[{}] {}", err.status, err.message));
    err.to_js()
}

/// Log to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
