//! Error types for nextgauc

use thiserror::Error;

/// Error types shared by the nextgauc crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hex decoding errors for key material.
    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// A decoded field has the wrong length.
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending field
        field: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

/// Decodes a hex string of any length.
///
/// Whitespace anywhere in the string and a single `0x` or `0X` prefix are
/// accepted.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, Error> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(cleaned.as_str());
    Ok(hex::decode(digits)?)
}

/// Decodes a hex string into a fixed-size array, see [`decode_hex`].
pub fn decode_hex_array<const N: usize>(field: &'static str, s: &str) -> Result<[u8; N], Error> {
    let bytes = decode_hex(s)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| Error::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
