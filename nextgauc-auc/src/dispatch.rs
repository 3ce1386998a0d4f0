//! Vector generation and re-synchronization dispatch
//!
//! The dispatcher resolves the subscriber's algorithm, runs it on a
//! working copy of the record, fills in converted keys and only then
//! writes the updated SQN state back. Any error leaves the caller's
//! record exactly as it was.

use nextgauc_common::{AucConfig, AuthType, AuthTypes, HexDump};
use nextgauc_crypto::conversion::{c2, c3, c4, c5};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, trace, warn};

use crate::error::{AuthError, Result};
use crate::registry::Registry;
use crate::types::{AuthSecret, AuthVector, SubscriberAuthData};

/// AUTS length in bytes
pub const AUTS_LEN: usize = 14;

/// Post-processing applied to every generated vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Derive SRES/Kc (c2/c3) for UMTS records whose algorithm did not
    pub gsm_compat: bool,
    /// Derive CK/IK (c4/c5) for GSM-only vectors
    pub umts_keys_from_gsm: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            gsm_compat: true,
            umts_keys_from_gsm: false,
        }
    }
}

impl From<&AucConfig> for DispatchOptions {
    fn from(config: &AucConfig) -> Self {
        Self {
            gsm_compat: config.gsm_compat,
            umts_keys_from_gsm: config.umts_keys_from_gsm,
        }
    }
}

/// Generate one vector with default options.
///
/// A fresh RAND is drawn from the OS RNG when `rand` is `None`.
pub fn generate_vector(
    registry: &Registry,
    auth_data: &mut SubscriberAuthData,
    rand: Option<&[u8; 16]>,
) -> Result<AuthVector> {
    dispatch(registry, DispatchOptions::default(), auth_data, rand, None)
}

/// Re-synchronize with the device's AUTS and generate one vector with
/// default options.
///
/// `rand_auts` is the RAND of the challenge the device rejected.
pub fn generate_vector_with_resync(
    registry: &Registry,
    auth_data: &mut SubscriberAuthData,
    auts: &[u8],
    rand_auts: &[u8; 16],
    rand: Option<&[u8; 16]>,
) -> Result<AuthVector> {
    let auts = auts_array(auts)?;
    dispatch(
        registry,
        DispatchOptions::default(),
        auth_data,
        rand,
        Some((&auts, rand_auts)),
    )
}

fn auts_array(auts: &[u8]) -> Result<[u8; AUTS_LEN]> {
    <[u8; AUTS_LEN]>::try_from(auts).map_err(|_| {
        AuthError::InvalidArgument(format!(
            "AUTS must be {AUTS_LEN} bytes, got {}",
            auts.len()
        ))
    })
}

fn fresh_rand() -> [u8; 16] {
    let mut rand = [0u8; 16];
    OsRng.fill_bytes(&mut rand);
    rand
}

fn dispatch(
    registry: &Registry,
    options: DispatchOptions,
    auth_data: &mut SubscriberAuthData,
    rand: Option<&[u8; 16]>,
    resync: Option<(&[u8; AUTS_LEN], &[u8; 16])>,
) -> Result<AuthVector> {
    if matches!(auth_data.secret, AuthSecret::None) {
        return Err(AuthError::InvalidAuthType);
    }

    let imp = registry.resolve(auth_data.algo)?;
    if resync.is_some() && imp.algo().is_gsm_only() {
        return Err(AuthError::NotApplicable(imp.algo()));
    }

    let rand = rand.copied().unwrap_or_else(fresh_rand);
    trace!("RAND {}", HexDump(&rand));

    let mut working = auth_data.clone();
    let mut vec = match resync {
        None => imp.algorithm().generate(&mut working, &rand)?,
        Some((auts, rand_auts)) => imp
            .algorithm()
            .generate_with_resync(&mut working, auts, rand_auts, &rand)
            .map_err(|e| {
                if e == AuthError::ResyncAuthenticationFailed {
                    warn!(
                        "AUTS verification failed for {} subscriber (RAND_AUTS {})",
                        imp.algo(),
                        HexDump(rand_auts)
                    );
                }
                e
            })?,
    };

    convert_keys(&mut vec, working.auth_type(), options);

    if let Some(umts) = working.umts_data() {
        debug!(
            "Generated {} vector with '{}', SQN {:#x}{}",
            imp.algo(),
            imp.name(),
            umts.sqn,
            umts.sqn_ms
                .filter(|_| resync.is_some())
                .map(|ms| format!(" (resync from SQN_MS {ms:#x})"))
                .unwrap_or_default()
        );
        trace!("AUTN {}", HexDump(&vec.autn));
    } else {
        debug!("Generated {} vector with '{}'", imp.algo(), imp.name());
    }

    *auth_data = working;
    Ok(vec)
}

fn convert_keys(vec: &mut AuthVector, auth_type: AuthType, options: DispatchOptions) {
    if options.gsm_compat
        && auth_type == AuthType::Umts
        && !vec.auth_types.contains(AuthType::Gsm)
    {
        vec.kc = c3(&vec.ck, &vec.ik);
        vec.sres = c2(vec.res());
        vec.auth_types.insert(AuthType::Gsm);
    }

    if options.umts_keys_from_gsm && vec.auth_types == AuthTypes::GSM {
        vec.ck = c4(&vec.kc);
        vec.ik = c5(&vec.kc);
    }
}

/// Authentication centre: a registry bundled with dispatch options
#[derive(Debug, Clone, Default)]
pub struct Auc {
    registry: Registry,
    options: DispatchOptions,
}

impl Auc {
    /// Engine over `registry` with `options`
    pub fn new(registry: Registry, options: DispatchOptions) -> Self {
        Self { registry, options }
    }

    /// Engine over the built-in implementations with default options
    pub fn with_builtin() -> Self {
        Self::new(Registry::with_builtin(), DispatchOptions::default())
    }

    /// Engine configured from an [`AucConfig`]
    pub fn from_config(config: &AucConfig) -> Self {
        Self::new(Registry::from_config(config), DispatchOptions::from(config))
    }

    /// The underlying registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access for registering additional implementations
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Dispatch options in use
    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    /// See [`generate_vector`]
    pub fn generate_vector(
        &self,
        auth_data: &mut SubscriberAuthData,
        rand: Option<&[u8; 16]>,
    ) -> Result<AuthVector> {
        dispatch(&self.registry, self.options, auth_data, rand, None)
    }

    /// See [`generate_vector_with_resync`]
    pub fn generate_vector_with_resync(
        &self,
        auth_data: &mut SubscriberAuthData,
        auts: &[u8],
        rand_auts: &[u8; 16],
        rand: Option<&[u8; 16]>,
    ) -> Result<AuthVector> {
        let auts = auts_array(auts)?;
        dispatch(
            &self.registry,
            self.options,
            auth_data,
            rand,
            Some((&auts, rand_auts)),
        )
    }
}
