//! COMP128 v1/v2/v3 for GSM records

use nextgauc_common::AuthAlgo;
use nextgauc_crypto::{comp128v1, comp128v2, comp128v3};

use super::{triplet, unsupported, AuthAlgorithm};
use crate::error::{AuthError, Result};
use crate::types::{AuthSecret, AuthVector, SubscriberAuthData};

type Comp128Fn = fn(&[u8; 16], &[u8; 16]) -> ([u8; 4], [u8; 8]);

/// Built-in COMP128 implementation for one of the three versions
#[derive(Clone, Copy)]
pub struct Comp128Algorithm {
    algo: AuthAlgo,
    name: &'static str,
    run: Comp128Fn,
}

impl Comp128Algorithm {
    /// COMP128v1
    pub fn v1() -> Self {
        Self {
            algo: AuthAlgo::Comp128v1,
            name: "COMP128v1 (nextgauc built-in)",
            run: comp128v1,
        }
    }

    /// COMP128v2
    pub fn v2() -> Self {
        Self {
            algo: AuthAlgo::Comp128v2,
            name: "COMP128v2 (nextgauc built-in)",
            run: comp128v2,
        }
    }

    /// COMP128v3
    pub fn v3() -> Self {
        Self {
            algo: AuthAlgo::Comp128v3,
            name: "COMP128v3 (nextgauc built-in)",
            run: comp128v3,
        }
    }
}

impl std::fmt::Debug for Comp128Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comp128Algorithm").field("algo", &self.algo).finish()
    }
}

impl AuthAlgorithm for Comp128Algorithm {
    fn algo(&self) -> AuthAlgo {
        self.algo
    }

    fn name(&self) -> &str {
        self.name
    }

    fn generate(&self, data: &mut SubscriberAuthData, rand: &[u8; 16]) -> Result<AuthVector> {
        match &data.secret {
            AuthSecret::Gsm(gsm) => {
                let (sres, kc) = (self.run)(&gsm.ki, rand);
                Ok(triplet(rand, sres, kc))
            }
            AuthSecret::Umts(_) => Err(unsupported(self.algo, data.auth_type())),
            AuthSecret::None => Err(AuthError::InvalidAuthType),
        }
    }

    fn generate_with_resync(
        &self,
        _data: &mut SubscriberAuthData,
        _auts: &[u8; 14],
        _rand_auts: &[u8; 16],
        _rand: &[u8; 16],
    ) -> Result<AuthVector> {
        Err(AuthError::NotApplicable(self.algo))
    }
}
