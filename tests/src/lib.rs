//! Integration test framework for nextgauc
#![allow(missing_docs)]
//!
//! Test utilities and a simulated SIM for end-to-end testing of the
//! authentication vector engine.
//!
//! # Components
//!
//! - [`sim`] - Device-side AUTN verification and AUTS generation
//! - [`test_fixtures`] - Subscriber records and profiles from the 3GPP test sets
//! - [`test_utils`] - Logging setup and hex helpers
//!
//! # Test Categories
//!
//! 1. **Vector Generation** - Vectors per algorithm, accepted by the SIM
//! 2. **Resync** - SQN synchronization failure and recovery
//! 3. **Registry Selection** - Priorities and custom implementations
//! 4. **Subscriber Profiles** - YAML profiles and engine configuration

pub mod sim;
pub mod test_utils;

pub use sim::{SimAlgo, SimReject, SimResponse, TestSim};
pub use test_fixtures::{
    comp128_subscriber, gsm_milenage_subscriber, milenage_subscriber, xor_subscriber,
    TestSubscriber,
};
pub use test_utils::{h, init_test_logging, rand_sequence, TestResult};
