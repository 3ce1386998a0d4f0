//! Subscriber authentication data and generated vectors

use std::fmt;

use nextgauc_common::{AuthAlgo, AuthType, AuthTypes, HexDump, Redacted};
use nextgauc_crypto::milenage::compute_opc;

use crate::error::{AuthError, Result};

/// Operator variant value as provisioned: either OP or the derived OPc
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OperatorKey {
    /// OP; OPc is derived per subscriber as OP ⊕ E_K(OP)
    Op([u8; 16]),
    /// Precomputed OPc
    Opc([u8; 16]),
}

impl OperatorKey {
    /// Resolve to OPc for subscriber key `k`
    pub fn opc(&self, k: &[u8; 16]) -> [u8; 16] {
        match self {
            OperatorKey::Op(op) => compute_opc(k, op),
            OperatorKey::Opc(opc) => *opc,
        }
    }
}

impl fmt::Debug for OperatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKey::Op(v) => write!(f, "Op({})", Redacted(v)),
            OperatorKey::Opc(v) => write!(f, "Opc({})", Redacted(v)),
        }
    }
}

/// GSM subscriber secret
#[derive(Clone, PartialEq, Eq)]
pub struct GsmAuthData {
    /// Ki, zero-padded to 128 bits
    pub ki: [u8; 16],
    /// Operator value, used only by GSM-MILENAGE
    pub op: Option<OperatorKey>,
}

impl GsmAuthData {
    /// Create from a Ki of at most 16 bytes; shorter keys are zero-padded.
    pub fn new(ki: &[u8]) -> Result<Self> {
        if ki.len() > 16 {
            return Err(AuthError::InvalidArgument(format!(
                "Ki must be at most 16 bytes, got {}",
                ki.len()
            )));
        }
        let mut padded = [0u8; 16];
        padded[..ki.len()].copy_from_slice(ki);
        Ok(Self {
            ki: padded,
            op: None,
        })
    }

    /// Attach an operator value for GSM-MILENAGE
    pub fn with_op(mut self, op: OperatorKey) -> Self {
        self.op = Some(op);
        self
    }
}

impl fmt::Debug for GsmAuthData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GsmAuthData")
            .field("ki", &Redacted(&self.ki))
            .field("op", &self.op)
            .finish()
    }
}

/// UMTS subscriber secret and sequence number state
#[derive(Clone, PartialEq, Eq)]
pub struct UmtsAuthData {
    /// OP or OPc
    pub opc: OperatorKey,
    /// Subscriber key K
    pub k: [u8; 16],
    /// Authentication management field
    pub amf: [u8; 2],
    /// Last used SQN on input; the SQN just used on output
    pub sqn: u64,
    /// Number of IND bits in SQN
    pub ind_bitlen: u32,
    /// IND slot of this generator
    pub ind: u32,
    /// SQN_MS recovered by the last re-synchronization
    pub sqn_ms: Option<u64>,
}

impl UmtsAuthData {
    /// Create with AMF 0000, SQN 0 and a single counter (no IND bits)
    pub fn new(k: [u8; 16], opc: OperatorKey) -> Self {
        Self {
            opc,
            k,
            amf: [0; 2],
            sqn: 0,
            ind_bitlen: 0,
            ind: 0,
            sqn_ms: None,
        }
    }

    /// Set the AMF
    pub fn with_amf(mut self, amf: [u8; 2]) -> Self {
        self.amf = amf;
        self
    }

    /// Set the last used SQN
    pub fn with_sqn(mut self, sqn: u64) -> Self {
        self.sqn = sqn;
        self
    }

    /// Set the IND bit length and slot
    pub fn with_ind(mut self, ind_bitlen: u32, ind: u32) -> Self {
        self.ind_bitlen = ind_bitlen;
        self.ind = ind;
        self
    }
}

impl fmt::Debug for UmtsAuthData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UmtsAuthData")
            .field("opc", &self.opc)
            .field("k", &Redacted(&self.k))
            .field("amf", &format_args!("{}", HexDump(&self.amf)))
            .field("sqn", &self.sqn)
            .field("ind_bitlen", &self.ind_bitlen)
            .field("ind", &self.ind)
            .field("sqn_ms", &self.sqn_ms)
            .finish()
    }
}

/// Secret material of one subscriber
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthSecret {
    /// No material; always rejected
    #[default]
    None,
    /// GSM (Ki) subscriber
    Gsm(GsmAuthData),
    /// UMTS (K, OP/OPc, SQN) subscriber
    Umts(UmtsAuthData),
}

impl AuthSecret {
    /// Authentication type of the material
    pub fn auth_type(&self) -> AuthType {
        match self {
            AuthSecret::None => AuthType::None,
            AuthSecret::Gsm(_) => AuthType::Gsm,
            AuthSecret::Umts(_) => AuthType::Umts,
        }
    }
}

/// Permanent authentication record of one subscriber
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberAuthData {
    /// Algorithm to run
    pub algo: AuthAlgo,
    /// Secret material
    pub secret: AuthSecret,
}

impl SubscriberAuthData {
    /// GSM subscriber record
    pub fn gsm(algo: AuthAlgo, data: GsmAuthData) -> Self {
        Self {
            algo,
            secret: AuthSecret::Gsm(data),
        }
    }

    /// UMTS subscriber record
    pub fn umts(algo: AuthAlgo, data: UmtsAuthData) -> Self {
        Self {
            algo,
            secret: AuthSecret::Umts(data),
        }
    }

    /// Authentication type of the record
    pub fn auth_type(&self) -> AuthType {
        self.secret.auth_type()
    }

    /// UMTS state, if this is a UMTS record
    pub fn umts_data(&self) -> Option<&UmtsAuthData> {
        match &self.secret {
            AuthSecret::Umts(u) => Some(u),
            _ => None,
        }
    }
}

/// One authentication vector (triplet, quintet or both)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthVector {
    /// Random challenge
    pub rand: [u8; 16],
    /// Authentication token
    pub autn: [u8; 16],
    /// Cipher key
    pub ck: [u8; 16],
    /// Integrity key
    pub ik: [u8; 16],
    /// Expected response, valid up to `res_len`
    pub res: [u8; 16],
    /// Number of valid bytes in `res` (0 when no UMTS output)
    pub res_len: u8,
    /// GSM ciphering key
    pub kc: [u8; 8],
    /// GSM signed response
    pub sres: [u8; 4],
    /// Which kinds of output are populated
    pub auth_types: AuthTypes,
}

impl AuthVector {
    /// Empty vector for challenge `rand`
    pub fn new(rand: &[u8; 16]) -> Self {
        Self {
            rand: *rand,
            ..Self::default()
        }
    }

    /// The valid part of RES
    pub fn res(&self) -> &[u8] {
        &self.res[..usize::from(self.res_len)]
    }

    /// Store a RES of 4 to 16 bytes
    pub fn set_res(&mut self, res: &[u8]) -> Result<()> {
        if !(4..=16).contains(&res.len()) {
            return Err(AuthError::InvalidArgument(format!(
                "RES must be 4..=16 bytes, got {}",
                res.len()
            )));
        }
        self.res = [0; 16];
        self.res[..res.len()].copy_from_slice(res);
        self.res_len = res.len() as u8;
        Ok(())
    }
}

impl fmt::Display for AuthVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RAND:\t{}", HexDump(&self.rand))?;
        if self.auth_types.contains(AuthType::Umts) {
            writeln!(f, "AUTN:\t{}", HexDump(&self.autn))?;
            writeln!(f, "IK:\t{}", HexDump(&self.ik))?;
            writeln!(f, "CK:\t{}", HexDump(&self.ck))?;
            writeln!(f, "RES:\t{}", HexDump(self.res()))?;
        }
        if self.auth_types.contains(AuthType::Gsm) {
            writeln!(f, "SRES:\t{}", HexDump(&self.sres))?;
            writeln!(f, "Kc:\t{}", HexDump(&self.kc))?;
        }
        write!(f, "Types:\t{}", self.auth_types)
    }
}
