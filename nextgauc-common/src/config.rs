//! Configuration structures for the authentication centre
//!
//! Two documents are supported, both YAML:
//! - [`AucConfig`]: engine-wide settings (log level, key-conversion policy,
//!   implementation priority overrides)
//! - [`SubscriberConfig`]: one subscriber's key material and SQN state, with
//!   all binary fields written as hex strings
//!
//! # Example
//!
//! ```
//! use nextgauc_common::config::load_subscriber_config_from_str;
//!
//! let sub = load_subscriber_config_from_str(r#"
//! algo: MILENAGE
//! auth_type: umts
//! key: 465b5ce8b199b49faa5f0a2ee238a6bc
//! op_type: Op
//! op: cdc202d5123e20f62b6d676ac72cb318
//! amf: b9b9
//! sqn: 0
//! "#).unwrap();
//! assert_eq!(sub.ind_bitlen, 5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogLevel;
use crate::types::{AuthAlgo, AuthType, OpType};

/// Largest supported IND bit length
pub const IND_BITLEN_MAX: u32 = 28;

/// IND bit length suggested by 3GPP TS 33.102 Annex C
pub const DEFAULT_IND_BITLEN: u32 = 5;

/// Default priority of the built-in algorithm implementations
pub const DEFAULT_PRIORITY: u32 = 1000;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Overrides the registration priority of one algorithm's built-in
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOverride {
    /// Algorithm whose built-in implementation is re-prioritised
    pub algo: AuthAlgo,
    /// New priority (higher wins)
    pub priority: u32,
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AucConfig {
    /// Log level used by binaries embedding the engine
    #[serde(default)]
    pub log_level: LogLevel,
    /// Derive SRES/Kc for UMTS subscribers when the algorithm did not
    #[serde(default = "default_true")]
    pub gsm_compat: bool,
    /// Derive CK/IK from Kc for GSM-only vectors
    #[serde(default)]
    pub umts_keys_from_gsm: bool,
    /// Priority overrides for built-in implementations
    #[serde(default)]
    pub priorities: Vec<PriorityOverride>,
}

fn default_true() -> bool {
    true
}

impl Default for AucConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            gsm_compat: true,
            umts_keys_from_gsm: false,
            priorities: Vec::new(),
        }
    }
}

impl AucConfig {
    /// Returns the configured priority for `algo`, or the default.
    pub fn priority_for(&self, algo: AuthAlgo) -> u32 {
        self.priorities
            .iter()
            .rev()
            .find(|p| p.algo == algo)
            .map(|p| p.priority)
            .unwrap_or(DEFAULT_PRIORITY)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(p) = self.priorities.iter().find(|p| p.algo == AuthAlgo::None) {
            return Err(ConfigError::ValidationError(format!(
                "priority override for algorithm {} is not allowed",
                p.algo
            )));
        }
        Ok(())
    }
}

/// One subscriber's authentication profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberConfig {
    /// Authentication algorithm
    pub algo: AuthAlgo,
    /// GSM or UMTS subscriber
    pub auth_type: AuthType,
    /// Subscriber key (K or Ki), 32 hex digits
    pub key: String,
    /// Whether `op` holds OP or OPc
    #[serde(default)]
    pub op_type: OpType,
    /// Operator variant value, 32 hex digits
    #[serde(default)]
    pub op: Option<String>,
    /// Authentication management field, 4 hex digits
    #[serde(default = "default_amf")]
    pub amf: String,
    /// Last used sequence number
    #[serde(default)]
    pub sqn: u64,
    /// Number of IND bits in SQN
    #[serde(default = "default_ind_bitlen")]
    pub ind_bitlen: u32,
    /// IND slot used by this generator
    #[serde(default)]
    pub ind: u32,
}

fn default_amf() -> String {
    "0000".to_string()
}

fn default_ind_bitlen() -> u32 {
    DEFAULT_IND_BITLEN
}

impl SubscriberConfig {
    /// Validates field ranges that can be checked without decoding key material.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_type == AuthType::None {
            return Err(ConfigError::ValidationError(
                "auth_type must be gsm or umts".to_string(),
            ));
        }
        if self.algo == AuthAlgo::None {
            return Err(ConfigError::ValidationError(
                "algo must not be None".to_string(),
            ));
        }
        if self.auth_type == AuthType::Umts
            && self.op.is_none()
            && self.algo == AuthAlgo::Milenage
        {
            return Err(ConfigError::ValidationError(
                "MILENAGE subscribers need an op value".to_string(),
            ));
        }
        if self.ind_bitlen > IND_BITLEN_MAX {
            return Err(ConfigError::ValidationError(format!(
                "ind_bitlen {} exceeds maximum {}",
                self.ind_bitlen, IND_BITLEN_MAX
            )));
        }
        if u64::from(self.ind) >= 1u64 << self.ind_bitlen {
            return Err(ConfigError::ValidationError(format!(
                "ind {} does not fit in {} bits",
                self.ind, self.ind_bitlen
            )));
        }
        Ok(())
    }
}

/// Loads an engine configuration from a YAML file.
pub fn load_auc_config<P: AsRef<Path>>(path: P) -> Result<AucConfig, ConfigError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    load_auc_config_from_str(&contents)
}

/// Loads an engine configuration from a YAML string.
pub fn load_auc_config_from_str(yaml: &str) -> Result<AucConfig, ConfigError> {
    let config: AucConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Loads a subscriber profile from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the YAML profile
///
/// # Returns
///
/// * `Ok(SubscriberConfig)` - Successfully loaded and validated profile
/// * `Err(ConfigError)` - Loading, parsing or validation failed
pub fn load_subscriber_config<P: AsRef<Path>>(path: P) -> Result<SubscriberConfig, ConfigError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    load_subscriber_config_from_str(&contents)
}

/// Loads a subscriber profile from a YAML string.
pub fn load_subscriber_config_from_str(yaml: &str) -> Result<SubscriberConfig, ConfigError> {
    let config: SubscriberConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
