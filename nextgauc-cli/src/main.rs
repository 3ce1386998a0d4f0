//! auc-gen: generate GSM/UMTS authentication vectors

mod profile;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use nextgauc_auc::{Auc, AuthVector, SubscriberAuthData};
use nextgauc_common::{
    decode_hex, decode_hex_array, init_logging, load_auc_config, AucConfig, AuthAlgo, LogLevel,
};

/// Command-line arguments of auc-gen
#[derive(Parser, Debug)]
#[command(name = "auc-gen")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate a GSM triplet
    #[arg(short = '2', long = "2g", conflicts_with = "umts")]
    pub gsm: bool,

    /// Generate a UMTS quintet
    #[arg(short = '3', long = "3g")]
    pub umts: bool,

    /// Authentication algorithm (COMP128v1, COMP128v2, COMP128v3, XOR, MILENAGE)
    #[arg(short = 'a', long = "algorithm", value_name = "ALGO")]
    pub algo: Option<AuthAlgo>,

    /// Subscriber key K or Ki, hex
    #[arg(short = 'k', long = "key", value_name = "HEX")]
    pub key: Option<String>,

    /// OPc, hex
    #[arg(short = 'o', long = "opc", value_name = "HEX", conflicts_with = "op")]
    pub opc: Option<String>,

    /// OP, hex
    #[arg(short = 'O', long = "op", value_name = "HEX")]
    pub op: Option<String>,

    /// Authentication management field, hex
    #[arg(short = 'f', long = "amf", value_name = "HEX")]
    pub amf: Option<String>,

    /// Last used SQN; the vector is generated with the next one
    #[arg(short = 's', long = "sqn")]
    pub sqn: Option<u64>,

    /// IND slot
    #[arg(short = 'i', long = "ind")]
    pub ind: Option<u32>,

    /// Number of IND bits in SQN
    #[arg(short = 'l', long = "ind-len", value_name = "BITS")]
    pub ind_bitlen: Option<u32>,

    /// Challenge RAND, hex; random when omitted
    #[arg(short = 'r', long = "rand", value_name = "HEX")]
    pub rand: Option<String>,

    /// AUTS received from the device, hex
    #[arg(short = 'A', long = "auts", value_name = "HEX", requires = "rand_auts")]
    pub auts: Option<String>,

    /// RAND of the challenge the device rejected, hex
    #[arg(short = 'R', long = "rand-auts", value_name = "HEX", requires = "auts")]
    pub rand_auts: Option<String>,

    /// YAML subscriber profile; command-line values override it
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// YAML engine configuration
    #[arg(long = "auc-config", value_name = "FILE")]
    pub auc_config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let auc_config = match &args.auc_config {
        Some(path) => load_auc_config(path)
            .with_context(|| format!("Failed to load engine config {}", path.display()))?,
        None => AucConfig::default(),
    };
    auc_config
        .validate()
        .context("Invalid engine configuration")?;
    init_logging(args.log_level.unwrap_or(auc_config.log_level));

    let profile = profile::from_args(&args)?;
    let mut subscriber =
        SubscriberAuthData::try_from(&profile).context("Invalid subscriber data")?;
    debug!("Subscriber: {:?}", subscriber);

    let auc = Auc::from_config(&auc_config);
    let rand = args
        .rand
        .as_deref()
        .map(|s| decode_hex_array::<16>("rand", s))
        .transpose()
        .context("Invalid RAND")?;

    let vector = match (&args.auts, &args.rand_auts) {
        (Some(auts), Some(rand_auts)) => resync(&auc, &mut subscriber, auts, rand_auts, rand)?,
        (None, None) => auc
            .generate_vector(&mut subscriber, rand.as_ref())
            .context("Vector generation failed")?,
        _ => bail!("--auts and --rand-auts must be given together"),
    };

    print_vector(&vector, &subscriber);
    Ok(())
}

fn resync(
    auc: &Auc,
    subscriber: &mut SubscriberAuthData,
    auts: &str,
    rand_auts: &str,
    rand: Option<[u8; 16]>,
) -> Result<AuthVector> {
    let auts = decode_hex(auts).context("AUTS is not valid hex")?;
    let rand_auts = decode_hex_array::<16>("rand-auts", rand_auts).context("Invalid RAND_AUTS")?;

    let vector = auc
        .generate_vector_with_resync(subscriber, &auts, &rand_auts, rand.as_ref())
        .context("Re-synchronization failed")?;
    if let Some(sqn_ms) = subscriber.umts_data().and_then(|u| u.sqn_ms) {
        info!("Re-synchronized to SQN.MS {}", sqn_ms);
    }
    Ok(vector)
}

fn print_vector(vector: &AuthVector, subscriber: &SubscriberAuthData) {
    println!("{vector}");
    if let Some(umts) = subscriber.umts_data() {
        if let Some(sqn_ms) = umts.sqn_ms {
            println!("SQN.MS:\t{}", sqn_ms);
        }
        println!("SQN:\t{}", umts.sqn);
        println!("IND:\t{}", umts.ind);
    }
}
