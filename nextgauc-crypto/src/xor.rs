//! XOR test algorithm (3GPP TS 34.108 §8.1.2)
//!
//! A non-cryptographic stand-in for MILENAGE used with test SIMs.
//! Every output is a slice or rotation of XDOUT = K ⊕ RAND.

use crate::aes::{ct_eq, xor_array};
use crate::conversion::{c2, c3, KC_SIZE, SRES_SIZE};
use crate::milenage::{
    build_autn, AK_SIZE, AMF_SIZE, AUTN_SIZE, AUTS_SIZE, KEY_SIZE, MAC_SIZE, RAND_SIZE,
    RESYNC_AMF, SQN_SIZE,
};

/// RES size in bytes; XOR returns all of XDOUT
pub const RES_SIZE: usize = 16;

/// Output of one XOR vector computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorVector {
    /// AUTN = (SQN ⊕ AK) ‖ AMF ‖ MAC
    pub autn: [u8; AUTN_SIZE],
    /// Expected response (XDOUT)
    pub res: [u8; RES_SIZE],
    /// Cipher key
    pub ck: [u8; 16],
    /// Integrity key
    pub ik: [u8; 16],
    /// Anonymity key
    pub ak: [u8; AK_SIZE],
}

/// XDOUT = K ⊕ RAND
pub fn xdout(k: &[u8; KEY_SIZE], rand: &[u8; RAND_SIZE]) -> [u8; 16] {
    xor_array(k, rand)
}

fn ak(xdout: &[u8; 16]) -> [u8; AK_SIZE] {
    let mut ak = [0u8; AK_SIZE];
    ak.copy_from_slice(&xdout[3..9]);
    ak
}

/// MAC = XDOUT[0..8] ⊕ (SQN ‖ AMF)
fn mac(xdout: &[u8; 16], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> [u8; MAC_SIZE] {
    let mut cdout = [0u8; MAC_SIZE];
    cdout[..6].copy_from_slice(sqn);
    cdout[6..].copy_from_slice(amf);
    let mut head = [0u8; MAC_SIZE];
    head.copy_from_slice(&xdout[..8]);
    xor_array(&head, &cdout)
}

/// Compute a UMTS vector for `sqn`/`amf` under `rand`.
pub fn generate(
    k: &[u8; KEY_SIZE],
    rand: &[u8; RAND_SIZE],
    sqn: &[u8; SQN_SIZE],
    amf: &[u8; AMF_SIZE],
) -> XorVector {
    let x = xdout(k, rand);

    let mut ck = x;
    ck.rotate_left(1);
    let mut ik = x;
    ik.rotate_left(2);
    let ak = ak(&x);

    XorVector {
        autn: build_autn(sqn, &ak, amf, &mac(&x, sqn, amf)),
        res: x,
        ck,
        ik,
        ak,
    }
}

/// GSM outputs: SRES = c2(RES), Kc = c3(CK, IK).
pub fn gsm_triplet(k: &[u8; KEY_SIZE], rand: &[u8; RAND_SIZE]) -> ([u8; SRES_SIZE], [u8; KC_SIZE]) {
    let v = generate(k, rand, &[0; SQN_SIZE], &[0; AMF_SIZE]);
    (c2(&v.res), c3(&v.ck, &v.ik))
}

/// Recover SQN_MS from AUTS; `None` when MAC-S does not verify.
pub fn recover_sqn_ms(
    k: &[u8; KEY_SIZE],
    rand_auts: &[u8; RAND_SIZE],
    auts: &[u8; AUTS_SIZE],
) -> Option<[u8; SQN_SIZE]> {
    let x = xdout(k, rand_auts);
    let mut sqn_ms = [0u8; SQN_SIZE];
    for (i, b) in sqn_ms.iter_mut().enumerate() {
        *b = auts[i] ^ x[3 + i];
    }
    let mac_s = mac(&x, &sqn_ms, &RESYNC_AMF);
    ct_eq(&mac_s, &auts[SQN_SIZE..]).then_some(sqn_ms)
}

/// Build the AUTS a test SIM would return for `sqn_ms`.
pub fn build_auts(
    k: &[u8; KEY_SIZE],
    rand_auts: &[u8; RAND_SIZE],
    sqn_ms: &[u8; SQN_SIZE],
) -> [u8; AUTS_SIZE] {
    let x = xdout(k, rand_auts);
    let mut auts = [0u8; AUTS_SIZE];
    auts[..SQN_SIZE].copy_from_slice(&xor_array(sqn_ms, &ak(&x)));
    auts[SQN_SIZE..].copy_from_slice(&mac(&x, sqn_ms, &RESYNC_AMF));
    auts
}
