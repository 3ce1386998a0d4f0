//! GSM/UMTS authentication vector engine
//!
//! This crate generates authentication vectors for GSM (SRES, Kc) and
//! UMTS AKA (RAND, AUTN, RES, CK, IK) subscribers and handles
//! sequence-number re-synchronization:
//!
//! - [`registry`]: priority-ordered algorithm implementations
//! - [`dispatch`]: vector generation, key conversion and atomic commit
//! - [`sqn`]: the SQN/IND state machine
//! - [`algorithms`]: built-in MILENAGE, COMP128 and XOR
//!
//! # Example
//!
//! ```
//! use nextgauc_auc::{generate_vector, OperatorKey, Registry, SubscriberAuthData, UmtsAuthData};
//! use nextgauc_common::AuthAlgo;
//!
//! let registry = Registry::with_builtin();
//! let umts = UmtsAuthData::new([0; 16], OperatorKey::Op([0; 16]));
//! let mut sub = SubscriberAuthData::umts(AuthAlgo::Milenage, umts);
//!
//! let vec = generate_vector(&registry, &mut sub, Some(&[0; 16])).unwrap();
//! assert_eq!(hex::encode(vec.res()), "8a5e8ded813e1b86");
//! assert_eq!(sub.umts_data().unwrap().sqn, 1);
//! ```

pub mod algorithms;
pub mod dispatch;
pub mod error;
pub mod profile;
pub mod registry;
pub mod sqn;
pub mod types;

pub use algorithms::AuthAlgorithm;
pub use dispatch::{generate_vector, generate_vector_with_resync, Auc, DispatchOptions};
pub use error::{AuthError, Result};
pub use nextgauc_crypto::{
    gsm_kc_and_sres_from_umts, gsm_kc_from_umts, umts_ck_from_gsm, umts_ik_from_gsm,
};
pub use registry::{global, AuthImpl, Registry};
pub use types::{
    AuthSecret, AuthVector, GsmAuthData, OperatorKey, SubscriberAuthData, UmtsAuthData,
};
