//! GSM/UMTS key conversion functions (3GPP TS 33.102 §6.8.1.2)
//!
//! - c2: RES → SRES
//! - c3: CK, IK → Kc
//! - c4: Kc → CK
//! - c5: Kc → IK
//!
//! The `gsm_*`/`umts_*` wrappers are the names exposed to callers that
//! bridge 3G session keys and legacy 2G ciphering.

/// Kc size in bytes (64 bits)
pub const KC_SIZE: usize = 8;

/// SRES size in bytes (32 bits)
pub const SRES_SIZE: usize = 4;

/// CK/IK size in bytes (128 bits)
pub const UMTS_KEY_SIZE: usize = 16;

/// c2: fold a RES of up to 16 bytes into a 32-bit SRES.
///
/// RES is treated as a sequence of 4-byte words, zero-padded at the end,
/// and the words are XORed together.
pub fn c2(res: &[u8]) -> [u8; SRES_SIZE] {
    let mut sres = [0u8; SRES_SIZE];
    for (i, b) in res.iter().take(16).enumerate() {
        sres[i % SRES_SIZE] ^= b;
    }
    sres
}

/// c3: Kc = CK1 ⊕ CK2 ⊕ IK1 ⊕ IK2 over the 64-bit halves
pub fn c3(ck: &[u8; UMTS_KEY_SIZE], ik: &[u8; UMTS_KEY_SIZE]) -> [u8; KC_SIZE] {
    let mut kc = [0u8; KC_SIZE];
    for (i, out) in kc.iter_mut().enumerate() {
        *out = ck[i] ^ ck[i + 8] ^ ik[i] ^ ik[i + 8];
    }
    kc
}

/// c4: CK = Kc ‖ Kc
pub fn c4(kc: &[u8; KC_SIZE]) -> [u8; UMTS_KEY_SIZE] {
    let mut ck = [0u8; UMTS_KEY_SIZE];
    ck[..8].copy_from_slice(kc);
    ck[8..].copy_from_slice(kc);
    ck
}

/// c5: IK = (Kc1 ⊕ Kc2) ‖ Kc ‖ (Kc1 ⊕ Kc2), where Kc1/Kc2 are the 32-bit
/// halves of Kc.
pub fn c5(kc: &[u8; KC_SIZE]) -> [u8; UMTS_KEY_SIZE] {
    let mut ik = [0u8; UMTS_KEY_SIZE];
    for i in 0..4 {
        ik[i] = kc[i] ^ kc[i + 4];
        ik[i + 12] = ik[i];
    }
    ik[4..12].copy_from_slice(kc);
    ik
}

/// Derive a GSM Kc from a UMTS CK alone.
///
/// Inverse of c4: returns the first 64 bits of CK.
pub fn gsm_kc_from_umts(ck: &[u8; UMTS_KEY_SIZE]) -> [u8; KC_SIZE] {
    let mut kc = [0u8; KC_SIZE];
    kc.copy_from_slice(&ck[..8]);
    kc
}

/// Derive GSM Kc and SRES from a UMTS quintet (c3 and c2).
pub fn gsm_kc_and_sres_from_umts(
    ck: &[u8; UMTS_KEY_SIZE],
    ik: &[u8; UMTS_KEY_SIZE],
    res: &[u8],
) -> ([u8; KC_SIZE], [u8; SRES_SIZE]) {
    (c3(ck, ik), c2(res))
}

/// Expand a GSM Kc into a UMTS CK (c4).
pub fn umts_ck_from_gsm(kc: &[u8; KC_SIZE]) -> [u8; UMTS_KEY_SIZE] {
    c4(kc)
}

/// Expand a GSM Kc into a UMTS IK (c5).
pub fn umts_ik_from_gsm(kc: &[u8; KC_SIZE]) -> [u8; UMTS_KEY_SIZE] {
    c5(kc)
}
