//! Test utility functions for integration tests
//!
//! Provides common utilities for test setup, logging and test data.

use tracing_subscriber::{fmt, EnvFilter};

/// Result type for integration tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Initialize logging for tests
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "info"
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Decode a hex literal of exactly `N` bytes.
///
/// # Panics
///
/// Panics on malformed test data.
pub fn h<const N: usize>(s: &str) -> [u8; N] {
    let bytes = hex::decode(s).unwrap_or_else(|e| panic!("bad hex {s:?}: {e}"));
    bytes
        .try_into()
        .unwrap_or_else(|v: Vec<u8>| panic!("expected {N} bytes, got {}", v.len()))
}

/// `count` distinct, deterministic challenges
pub fn rand_sequence(count: usize) -> Vec<[u8; 16]> {
    (0..count)
        .map(|i| {
            let mut rand = [0xa5u8; 16];
            rand[..8].copy_from_slice(&(i as u64).to_be_bytes());
            rand
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_helper() {
        assert_eq!(h::<2>("b9b9"), [0xb9, 0xb9]);
    }

    #[test]
    #[should_panic(expected = "expected 4 bytes")]
    fn test_hex_helper_length() {
        let _ = h::<4>("00");
    }

    #[test]
    fn test_rand_sequence_distinct() {
        let rands = rand_sequence(4);
        assert_eq!(rands.len(), 4);
        assert_ne!(rands[0], rands[1]);
    }
}
