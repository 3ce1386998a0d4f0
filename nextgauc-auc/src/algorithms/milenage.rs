//! MILENAGE for UMTS records and GSM-MILENAGE for GSM records

use nextgauc_common::{AuthAlgo, AuthType, AuthTypes};
use nextgauc_crypto::conversion::{c2, c3};
use nextgauc_crypto::Milenage;

use super::{adopt_sqn_ms, advance_sqn, quintet, triplet, unsupported, AuthAlgorithm};
use crate::error::{AuthError, Result};
use crate::types::{AuthSecret, AuthVector, SubscriberAuthData};

/// Built-in MILENAGE implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct MilenageAlgorithm;

impl AuthAlgorithm for MilenageAlgorithm {
    fn algo(&self) -> AuthAlgo {
        AuthAlgo::Milenage
    }

    fn name(&self) -> &str {
        "MILENAGE (nextgauc built-in)"
    }

    fn generate(&self, data: &mut SubscriberAuthData, rand: &[u8; 16]) -> Result<AuthVector> {
        match &mut data.secret {
            AuthSecret::Umts(umts) => {
                let m = Milenage::new(&umts.k, &umts.opc.opc(&umts.k));
                let sqn = advance_sqn(umts)?;
                let out = m.generate(rand, &sqn, &umts.amf);

                let mut vec = quintet(rand, out.autn, &out.res, out.ck, out.ik)?;
                vec.kc = c3(&out.ck, &out.ik);
                vec.sres = c2(&out.res);
                vec.auth_types = AuthTypes::GSM | AuthTypes::UMTS;
                Ok(vec)
            }
            AuthSecret::Gsm(gsm) => {
                let Some(op) = gsm.op else {
                    return Err(unsupported(self.algo(), AuthType::Gsm));
                };
                let m = Milenage::new(&gsm.ki, &op.opc(&gsm.ki));
                let (sres, kc) = m.gsm_triplet(rand);
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

        let m = Milenage::new(&umts.k, &umts.opc.opc(&umts.k));
        let sqn_ms = m
            .recover_sqn_ms(rand_auts, auts)
            .ok_or(AuthError::ResyncAuthenticationFailed)?;
        adopt_sqn_ms(umts, &sqn_ms);

        self.generate(data, rand)
    }
}
