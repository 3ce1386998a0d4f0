//! Subscriber profile assembled from a YAML file and command-line values

use anyhow::{Context, Result};

use nextgauc_common::{
    load_subscriber_config, AuthType, OpType, SubscriberConfig, DEFAULT_IND_BITLEN,
};

use crate::Args;

/// Build the subscriber profile for this invocation.
///
/// Without `--config` the algorithm and key are mandatory. The record is
/// UMTS unless `-2` is given or the algorithm is GSM-only.
pub fn from_args(args: &Args) -> Result<SubscriberConfig> {
    let mut profile = match &args.config {
        Some(path) => load_subscriber_config(path)
            .with_context(|| format!("Failed to load subscriber profile {}", path.display()))?,
        None => {
            let algo = args
                .algo
                .context("--algorithm is required when no profile is given")?;
            let key = args
                .key
                .clone()
                .context("--key is required when no profile is given")?;
            let auth_type = if args.gsm || algo.is_gsm_only() {
                AuthType::Gsm
            } else {
                AuthType::Umts
            };
            SubscriberConfig {
                algo,
                auth_type,
                key,
                op_type: OpType::Opc,
                op: None,
                amf: "0000".to_string(),
                sqn: 0,
                ind_bitlen: DEFAULT_IND_BITLEN,
                ind: 0,
            }
        }
    };

    if let Some(algo) = args.algo {
        profile.algo = algo;
    }
    if let Some(key) = &args.key {
        profile.key = key.clone();
    }
    if args.gsm {
        profile.auth_type = AuthType::Gsm;
    } else if args.umts {
        profile.auth_type = AuthType::Umts;
    }
    if let Some(opc) = &args.opc {
        profile.op_type = OpType::Opc;
        profile.op = Some(opc.clone());
    } else if let Some(op) = &args.op {
        profile.op_type = OpType::Op;
        profile.op = Some(op.clone());
    }
    if let Some(amf) = &args.amf {
        profile.amf = amf.clone();
    }
    if let Some(sqn) = args.sqn {
        profile.sqn = sqn;
    }
    if let Some(ind_bitlen) = args.ind_bitlen {
        profile.ind_bitlen = ind_bitlen;
    }
    if let Some(ind) = args.ind {
        profile.ind = ind;
    }

    Ok(profile)
}
