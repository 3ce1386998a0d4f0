//! XOR test algorithm for GSM and UMTS records

use nextgauc_common::{AuthAlgo, AuthTypes};
use nextgauc_crypto::conversion::{c2, c3};
use nextgauc_crypto::xor;

use super::{adopt_sqn_ms, advance_sqn, quintet, triplet, unsupported, AuthAlgorithm};
use crate::error::{AuthError, Result};
use crate::types::{AuthSecret, AuthVector, SubscriberAuthData};

/// Built-in XOR implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct XorAlgorithm;

impl AuthAlgorithm for XorAlgorithm {
    fn algo(&self) -> AuthAlgo {
        AuthAlgo::Xor
    }

    fn name(&self) -> &str {
        "XOR (nextgauc built-in)"
    }

    fn generate(&self, data: &mut SubscriberAuthData, rand: &[u8; 16]) -> Result<AuthVector> {
        match &mut data.secret {
            AuthSecret::Umts(umts) => {
                let sqn = advance_sqn(umts)?;
                let out = xor::generate(&umts.k, rand, &sqn, &umts.amf);

                let mut vec = quintet(rand, out.autn, &out.res, out.ck, out.ik)?;
                vec.kc = c3(&out.ck, &out.ik);
                vec.sres = c2(&out.res);
                vec.auth_types = AuthTypes::GSM | AuthTypes::UMTS;
                Ok(vec)
            }
            AuthSecret::Gsm(gsm) => {
                let (sres, kc) = xor::gsm_triplet(&gsm.ki, rand);
                Ok(triplet(rand, sres, kc))
            }
            AuthSecret::None => Err(AuthError::InvalidAuthType),
        }
    }

    fn generate_with_resync(
        &self,
        data: &mut SubscriberAuthData,
        auts: &[u8; 14],
        rand_auts: &[u8; 16],
        rand: &[u8; 16],
    ) -> Result<AuthVector> {
        let auth_type = data.auth_type();
        let AuthSecret::Umts(umts) = &mut data.secret else {
            return Err(unsupported(self.algo(), auth_type));
        };

        let sqn_ms = xor::recover_sqn_ms(&umts.k, rand_auts, auts)
            .ok_or(AuthError::ResyncAuthenticationFailed)?;
        adopt_sqn_ms(umts, &sqn_ms);

        self.generate(data, rand)
    }
}
