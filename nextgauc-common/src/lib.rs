//! Common types and utilities for nextgauc
//!
//! This crate provides the algorithm and authentication-type identifiers,
//! configuration structures, error types and logging helpers shared by the
//! nextgauc crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{
    load_auc_config, load_auc_config_from_str, load_subscriber_config,
    load_subscriber_config_from_str, AucConfig, ConfigError, PriorityOverride, SubscriberConfig,
    DEFAULT_IND_BITLEN, DEFAULT_PRIORITY, IND_BITLEN_MAX,
};
pub use error::{decode_hex, decode_hex_array, Error};
pub use logging::{init_logging, init_logging_with_filter, HexDump, LogLevel, Redacted};
pub use types::{AuthAlgo, AuthType, AuthTypes, OpType, UnknownAlgorithm};
