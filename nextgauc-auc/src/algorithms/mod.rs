//! Built-in algorithm implementations
//!
//! Every algorithm family implements [`AuthAlgorithm`]. Implementations
//! receive a working copy of the subscriber record and may update its SQN
//! state freely; the dispatcher decides whether the update is kept.

use std::sync::Arc;

use nextgauc_common::{AuthAlgo, AuthType, AuthTypes};

use crate::error::{AuthError, Result};
use crate::sqn;
use crate::types::{AuthVector, SubscriberAuthData, UmtsAuthData};

mod comp128;
mod milenage;
mod xor;

pub use self::comp128::Comp128Algorithm;
pub use self::milenage::MilenageAlgorithm;
pub use self::xor::XorAlgorithm;

/// Suffix of the names of the built-in implementations
pub const BUILTIN_SUFFIX: &str = "(nextgauc built-in)";

/// An authentication algorithm implementation
pub trait AuthAlgorithm: Send + Sync {
    /// Algorithm this implementation provides
    fn algo(&self) -> AuthAlgo;

    /// Human readable name, unique per algorithm within a registry
    fn name(&self) -> &str;

    /// Generate a vector for challenge `rand`.
    ///
    /// UMTS implementations advance `data`'s SQN before computing AUTN.
    fn generate(&self, data: &mut SubscriberAuthData, rand: &[u8; 16]) -> Result<AuthVector>;

    /// Verify `auts` against `rand_auts`, adopt the device's SQN and
    /// generate a fresh vector for `rand`.
    fn generate_with_resync(
        &self,
        data: &mut SubscriberAuthData,
        auts: &[u8; 14],
        rand_auts: &[u8; 16],
        rand: &[u8; 16],
    ) -> Result<AuthVector>;
}

/// One instance of every built-in implementation
pub fn builtin() -> Vec<Arc<dyn AuthAlgorithm>> {
    vec![
        Arc::new(Comp128Algorithm::v1()),
        Arc::new(Comp128Algorithm::v2()),
        Arc::new(Comp128Algorithm::v3()),
        Arc::new(XorAlgorithm),
        Arc::new(MilenageAlgorithm),
    ]
}

/// Error for an algorithm applied to the wrong kind of record
fn unsupported(algo: AuthAlgo, auth_type: AuthType) -> AuthError {
    AuthError::UnsupportedForAuthType { algo, auth_type }
}

/// Step the record's SQN and return the new value as bytes
fn advance_sqn(umts: &mut UmtsAuthData) -> Result<[u8; sqn::SQN_BYTES]> {
    let next = sqn::next_sqn(umts.sqn, umts.ind_bitlen, umts.ind)?;
    umts.sqn = next;
    Ok(sqn::to_bytes(next))
}

/// Adopt a recovered SQN_MS as the new starting point
fn adopt_sqn_ms(umts: &mut UmtsAuthData, sqn_ms: &[u8; sqn::SQN_BYTES]) {
    let sqn_ms = sqn::from_bytes(sqn_ms);
    umts.sqn_ms = Some(sqn_ms);
    umts.sqn = sqn_ms;
}

/// Vector carrying GSM outputs only
fn triplet(rand: &[u8; 16], sres: [u8; 4], kc: [u8; 8]) -> AuthVector {
    AuthVector {
        sres,
        kc,
        auth_types: AuthTypes::GSM,
        ..AuthVector::new(rand)
    }
}

/// Vector carrying UMTS outputs only
fn quintet(
    rand: &[u8; 16],
    autn: [u8; 16],
    res: &[u8],
    ck: [u8; 16],
    ik: [u8; 16],
) -> Result<AuthVector> {
    let mut vec = AuthVector {
        autn,
        ck,
        ik,
        auth_types: AuthTypes::UMTS,
        ..AuthVector::new(rand)
    };
    vec.set_res(res)?;
    Ok(vec)
}
