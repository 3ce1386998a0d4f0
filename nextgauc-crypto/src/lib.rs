//! Authentication algorithms for nextgauc
//!
//! Implements the GSM/UMTS authentication algorithm sets:
//! - MILENAGE (3GPP TS 35.206) including GSM-MILENAGE
//! - COMP128 v1, v2 and v3 (GSM A3/A8)
//! - XOR test algorithm (3GPP TS 34.108)
//! - GSM/UMTS key conversion functions c2, c3, c4, c5

pub mod aes;
pub mod comp128;
pub mod comp128v23;
pub mod conversion;
pub mod milenage;
pub mod xor;

pub use comp128::comp128v1;
pub use comp128v23::{comp128v2, comp128v3};
pub use conversion::{
    gsm_kc_and_sres_from_umts, gsm_kc_from_umts, umts_ck_from_gsm, umts_ik_from_gsm,
};
pub use milenage::{compute_opc, Milenage, MilenageVector};
