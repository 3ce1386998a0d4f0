//! SQN/IND state machine (3GPP TS 33.102 Annex C)
//!
//! A 48-bit SQN is split into SEQ (high bits) and IND (low `ind_bitlen`
//! bits). Each vector generator owns one IND slot and only ever advances
//! SEQ within it, so that vectors from different slots are accepted by the
//! device's per-slot replay window.

use crate::error::{AuthError, Result};
use nextgauc_common::IND_BITLEN_MAX;

/// Largest representable SQN
pub const SQN_MAX: u64 = (1 << 48) - 1;

/// SQN size on the wire in bytes
pub const SQN_BYTES: usize = 6;

/// Mask selecting the IND bits
pub fn ind_mask(ind_bitlen: u32) -> u64 {
    (1u64 << ind_bitlen) - 1
}

/// SEQ part of `sqn`
pub fn seq(sqn: u64, ind_bitlen: u32) -> u64 {
    sqn >> ind_bitlen
}

/// IND part of `sqn`
pub fn ind(sqn: u64, ind_bitlen: u32) -> u32 {
    (sqn & ind_mask(ind_bitlen)) as u32
}

/// Build an SQN from SEQ and IND
pub fn compose(seq: u64, ind: u32, ind_bitlen: u32) -> u64 {
    (seq << ind_bitlen) | (u64::from(ind) & ind_mask(ind_bitlen))
}

/// Check that `sqn`, `ind_bitlen` and `ind` describe a valid state
pub fn validate(sqn: u64, ind_bitlen: u32, ind: u32) -> Result<()> {
    if ind_bitlen > IND_BITLEN_MAX {
        return Err(AuthError::InvalidArgument(format!(
            "ind_bitlen {ind_bitlen} exceeds {IND_BITLEN_MAX}"
        )));
    }
    if u64::from(ind) > ind_mask(ind_bitlen) {
        return Err(AuthError::InvalidArgument(format!(
            "ind {ind} does not fit in {ind_bitlen} bits"
        )));
    }
    if sqn > SQN_MAX {
        return Err(AuthError::InvalidArgument(format!(
            "sqn {sqn:#x} exceeds 48 bits"
        )));
    }
    Ok(())
}

/// Advance SEQ by one and select slot `ind`.
///
/// `sqn` is the last used value; the returned value is the one to use
/// next. Fails with [`AuthError::SequenceExhausted`] instead of wrapping.
pub fn next_sqn(sqn: u64, ind_bitlen: u32, ind: u32) -> Result<u64> {
    validate(sqn, ind_bitlen, ind)?;
    let next = ((sqn + (1u64 << ind_bitlen)) & !ind_mask(ind_bitlen)) | u64::from(ind);
    if next > SQN_MAX {
        return Err(AuthError::SequenceExhausted { sqn, ind });
    }
    Ok(next)
}

/// Encode a 48-bit SQN big-endian
pub fn to_bytes(sqn: u64) -> [u8; SQN_BYTES] {
    let mut out = [0u8; SQN_BYTES];
    out.copy_from_slice(&sqn.to_be_bytes()[2..]);
    out
}

/// Decode a 48-bit big-endian SQN
pub fn from_bytes(bytes: &[u8; SQN_BYTES]) -> u64 {
    let mut buf = [0u8; 8];
    buf[2..].copy_from_slice(bytes);
    u64::from_be_bytes(buf)
}
