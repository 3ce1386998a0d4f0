//! MILENAGE algorithm set (3GPP TS 35.206)
//!
//! Functions computed on the AES-128 kernel keyed by K:
//! - f1: Network authentication (MAC-A)
//! - f1*: Re-synchronization authentication (MAC-S)
//! - f2: User authentication (RES)
//! - f3: Cipher key (CK)
//! - f4: Integrity key (IK)
//! - f5: Anonymity key (AK)
//! - f5*: Re-synchronization anonymity key (AK*)
//!
//! On top of the raw functions this module builds AUTN, verifies and
//! constructs AUTS, and derives GSM triplets (GSM-MILENAGE, TS 55.205).
//!
//! Reference: 3GPP TS 35.206 V17.0.0

use crate::aes::{ct_eq, xor_array, Aes128Block, BLOCK_SIZE};
use crate::conversion::{c2, c3, KC_SIZE, SRES_SIZE};

/// Key size in bytes (128 bits)
pub const KEY_SIZE: usize = 16;

/// OP/OPc size in bytes (128 bits)
pub const OP_SIZE: usize = 16;

/// RAND size in bytes (128 bits)
pub const RAND_SIZE: usize = 16;

/// SQN size in bytes (48 bits)
pub const SQN_SIZE: usize = 6;

/// AMF size in bytes (16 bits)
pub const AMF_SIZE: usize = 2;

/// MAC size in bytes (64 bits)
pub const MAC_SIZE: usize = 8;

/// RES size in bytes (64 bits)
pub const RES_SIZE: usize = 8;

/// AK size in bytes (48 bits)
pub const AK_SIZE: usize = 6;

/// AUTN size in bytes
pub const AUTN_SIZE: usize = SQN_SIZE + AMF_SIZE + MAC_SIZE;

/// AUTS size in bytes
pub const AUTS_SIZE: usize = SQN_SIZE + MAC_SIZE;

/// AMF used when computing MAC-S (TS 33.102 §6.3.3)
pub const RESYNC_AMF: [u8; AMF_SIZE] = [0x00, 0x00];

/// Rotation (in bytes) and last constant byte for OUT2..OUT5.
/// All MILENAGE rotation amounts are whole bytes.
const OUT2: (usize, u8) = (0, 0x01);
const OUT3: (usize, u8) = (4, 0x02);
const OUT4: (usize, u8) = (8, 0x04);
const OUT5: (usize, u8) = (12, 0x08);

/// Rotation applied to IN1 ⊕ OPc for OUT1 (r1 = 64 bits, c1 = 0)
const OUT1_ROT: usize = 8;

/// Compute OPc = OP ⊕ E_K(OP)
pub fn compute_opc(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> [u8; OP_SIZE] {
    let encrypted = Aes128Block::new(k).encrypt_block_copy(op);
    xor_array(op, &encrypted)
}

/// Output of one UMTS authentication vector computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilenageVector {
    /// AUTN = (SQN ⊕ AK) ‖ AMF ‖ MAC-A
    pub autn: [u8; AUTN_SIZE],
    /// Expected response
    pub res: [u8; RES_SIZE],
    /// Cipher key
    pub ck: [u8; BLOCK_SIZE],
    /// Integrity key
    pub ik: [u8; BLOCK_SIZE],
    /// Anonymity key
    pub ak: [u8; AK_SIZE],
}

/// MILENAGE context bound to one subscriber's K and OPc
#[derive(Clone)]
pub struct Milenage {
    cipher: Aes128Block,
    opc: [u8; OP_SIZE],
}

impl Milenage {
    /// Create a context from K and a precomputed OPc
    pub fn new(k: &[u8; KEY_SIZE], opc: &[u8; OP_SIZE]) -> Self {
        Self {
            cipher: Aes128Block::new(k),
            opc: *opc,
        }
    }

    /// Create a context from K and OP, deriving OPc
    pub fn new_with_op(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> Self {
        let opc = compute_opc(k, op);
        Self::new(k, &opc)
    }

    /// The OPc value in use
    pub fn opc(&self) -> &[u8; OP_SIZE] {
        &self.opc
    }

    /// TEMP = E_K(RAND ⊕ OPc)
    fn temp(&self, rand: &[u8; RAND_SIZE]) -> [u8; BLOCK_SIZE] {
        self.cipher.encrypt_block_copy(&xor_array(rand, &self.opc))
    }

    /// OUT1 = E_K(TEMP ⊕ rot(IN1 ⊕ OPc, r1) ⊕ c1) ⊕ OPc
    fn out1(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> [u8; BLOCK_SIZE] {
        let mut in1 = [0u8; BLOCK_SIZE];
        in1[0..6].copy_from_slice(sqn);
        in1[6..8].copy_from_slice(amf);
        in1[8..14].copy_from_slice(sqn);
        in1[14..16].copy_from_slice(amf);

        let mut block = xor_array(&in1, &self.opc);
        block.rotate_left(OUT1_ROT);
        let block = xor_array(&block, &self.temp(rand));
        xor_array(&self.cipher.encrypt_block_copy(&block), &self.opc)
    }

    /// OUTn = E_K(rot(TEMP ⊕ OPc, rn) ⊕ cn) ⊕ OPc for n in 2..=5
    fn out(&self, temp: &[u8; BLOCK_SIZE], (rot, c): (usize, u8)) -> [u8; BLOCK_SIZE] {
        let mut block = xor_array(temp, &self.opc);
        block.rotate_left(rot);
        block[BLOCK_SIZE - 1] ^= c;
        xor_array(&self.cipher.encrypt_block_copy(&block), &self.opc)
    }

    /// f1: MAC-A
    pub fn f1(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> [u8; MAC_SIZE] {
        head(&self.out1(rand, sqn, amf))
    }

    /// f1*: MAC-S
    pub fn f1_star(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> [u8; MAC_SIZE] {
        tail(&self.out1(rand, sqn, amf))
    }

    /// f2: RES
    pub fn f2(&self, rand: &[u8; RAND_SIZE]) -> [u8; RES_SIZE] {
        tail(&self.out(&self.temp(rand), OUT2))
    }

    /// f3: CK
    pub fn f3(&self, rand: &[u8; RAND_SIZE]) -> [u8; BLOCK_SIZE] {
        self.out(&self.temp(rand), OUT3)
    }

    /// f4: IK
    pub fn f4(&self, rand: &[u8; RAND_SIZE]) -> [u8; BLOCK_SIZE] {
        self.out(&self.temp(rand), OUT4)
    }

    /// f5: AK
    pub fn f5(&self, rand: &[u8; RAND_SIZE]) -> [u8; AK_SIZE] {
        head(&self.out(&self.temp(rand), OUT2))
    }

    /// f5*: AK used to conceal SQN_MS in AUTS
    pub fn f5_star(&self, rand: &[u8; RAND_SIZE]) -> [u8; AK_SIZE] {
        head(&self.out(&self.temp(rand), OUT5))
    }

    /// f2, f3, f4 and f5 sharing one TEMP computation.
    ///
    /// Returns `(RES, CK, IK, AK)`.
    pub fn f2345(
        &self,
        rand: &[u8; RAND_SIZE],
    ) -> ([u8; RES_SIZE], [u8; BLOCK_SIZE], [u8; BLOCK_SIZE], [u8; AK_SIZE]) {
        let temp = self.temp(rand);
        let out2 = self.out(&temp, OUT2);
        (
            tail(&out2),
            self.out(&temp, OUT3),
            self.out(&temp, OUT4),
            head(&out2),
        )
    }

    /// Compute a full UMTS vector for `sqn`/`amf` under `rand`.
    pub fn generate(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> MilenageVector {
        let mac_a = self.f1(rand, sqn, amf);
        let (res, ck, ik, ak) = self.f2345(rand);
        MilenageVector {
            autn: build_autn(sqn, &ak, amf, &mac_a),
            res,
            ck,
            ik,
            ak,
        }
    }

    /// Recover SQN_MS from a device's AUTS.
    ///
    /// `rand_auts` is the RAND the device received with the rejected
    /// challenge. Returns `None` when MAC-S does not verify.
    pub fn recover_sqn_ms(
        &self,
        rand_auts: &[u8; RAND_SIZE],
        auts: &[u8; AUTS_SIZE],
    ) -> Option<[u8; SQN_SIZE]> {
        let ak_star = self.f5_star(rand_auts);
        let concealed: [u8; SQN_SIZE] = head(auts);
        let sqn_ms = xor_array(&concealed, &ak_star);

        let mac_s = self.f1_star(rand_auts, &sqn_ms, &RESYNC_AMF);
        if ct_eq(&mac_s, &auts[SQN_SIZE..]) {
            Some(sqn_ms)
        } else {
            None
        }
    }

    /// Build the AUTS a device would send for `sqn_ms` after rejecting
    /// a challenge with `rand_auts`.
    pub fn build_auts(
        &self,
        rand_auts: &[u8; RAND_SIZE],
        sqn_ms: &[u8; SQN_SIZE],
    ) -> [u8; AUTS_SIZE] {
        let ak_star = self.f5_star(rand_auts);
        let mac_s = self.f1_star(rand_auts, sqn_ms, &RESYNC_AMF);
        let mut auts = [0u8; AUTS_SIZE];
        auts[..SQN_SIZE].copy_from_slice(&xor_array(sqn_ms, &ak_star));
        auts[SQN_SIZE..].copy_from_slice(&mac_s);
        auts
    }

    /// GSM-MILENAGE (TS 55.205): SRES = c2(RES), Kc = c3(CK, IK).
    pub fn gsm_triplet(&self, rand: &[u8; RAND_SIZE]) -> ([u8; SRES_SIZE], [u8; KC_SIZE]) {
        let (res, ck, ik, _) = self.f2345(rand);
        (c2(&res), c3(&ck, &ik))
    }
}

/// AUTN = (SQN ⊕ AK) ‖ AMF ‖ MAC-A
pub fn build_autn(
    sqn: &[u8; SQN_SIZE],
    ak: &[u8; AK_SIZE],
    amf: &[u8; AMF_SIZE],
    mac_a: &[u8; MAC_SIZE],
) -> [u8; AUTN_SIZE] {
    let mut autn = [0u8; AUTN_SIZE];
    autn[..6].copy_from_slice(&xor_array(sqn, ak));
    autn[6..8].copy_from_slice(amf);
    autn[8..].copy_from_slice(mac_a);
    autn
}

fn head<const N: usize>(block: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&block[..N]);
    out
}

fn tail<const N: usize>(block: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&block[block.len() - N..]);
    out
}
