//! AES-128 block primitive and byte helpers
//!
//! MILENAGE only ever needs single-block AES-128 encryption under the
//! subscriber key K. The cipher itself comes from the `aes` crate.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;

/// AES-128 block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// AES-128 key size in bytes
pub const KEY_SIZE: usize = 16;

/// AES-128 block cipher for single-block operations
#[derive(Clone)]
pub struct Aes128Block {
    cipher: Aes128,
}

impl Aes128Block {
    /// Create a new AES-128 block cipher with the given key
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let cipher = Aes128::new(GenericArray::from_slice(key));
        Self { cipher }
    }

    /// Encrypt a single 16-byte block in place
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let mut generic_block = GenericArray::clone_from_slice(block);
        self.cipher.encrypt_block(&mut generic_block);
        block.copy_from_slice(&generic_block);
    }

    /// Encrypt a single 16-byte block, returning the result
    pub fn encrypt_block_copy(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut result = *block;
        self.encrypt_block(&mut result);
        result
    }
}

/// XOR two equally sized arrays into a new array
#[inline]
pub fn xor_array<const N: usize>(a: &[u8; N], b: &[u8; N]) -> [u8; N] {
    let mut out = [0u8; N];
    for i in 0..N {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Compare two byte strings without early exit on the first difference.
///
/// Used for MAC-S verification during re-synchronisation.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
