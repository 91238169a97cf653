//! WebAssembly bindings for the SegWit address codec.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Decoding addresses into locking scripts
//! - Classifying locking scripts into addresses
//! - Detecting structural coinbase/coinstake outputs
//! - Filtering addresses by value and kind

use wasm_bindgen::prelude::*;

pub mod codec;
pub mod dto;

// Re-export main types for JS access
pub use codec::Codec;
pub use dto::{AddressInfo, ClassificationInfo, ErrorInfo};

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
