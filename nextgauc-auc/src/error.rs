//! Error type for vector generation and registry operations

use nextgauc_common::{AuthAlgo, AuthType};
use thiserror::Error;

/// Errors returned by the authentication engine.
///
/// No variant is returned after the subscriber record was modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No implementation is registered for the algorithm
    #[error("No implementation registered for algorithm {0}")]
    UnsupportedAlgorithm(AuthAlgo),

    /// The subscriber record carries no secret material
    #[error("Subscriber has no authentication data")]
    InvalidAuthType,

    /// The algorithm cannot operate on this kind of subscriber data
    #[error("Algorithm {algo} does not support {auth_type} subscriber data")]
    UnsupportedForAuthType {
        /// Requested algorithm
        algo: AuthAlgo,
        /// Type of the subscriber data
        auth_type: AuthType,
    },

    /// An implementation with the same name is already registered
    #[error("Implementation '{name}' is already registered for {algo}")]
    DuplicateImplementation {
        /// Algorithm of the rejected registration
        algo: AuthAlgo,
        /// Name of the rejected implementation
        name: String,
    },

    /// MAC-S in the AUTS did not verify
    #[error("AUTS authentication failed")]
    ResyncAuthenticationFailed,

    /// The next SEQ for this IND slot would not fit in 48 bits
    #[error("Sequence number space exhausted (SQN {sqn:#014x}, IND {ind})")]
    SequenceExhausted {
        /// Last used SQN
        sqn: u64,
        /// IND slot
        ind: u32,
    },

    /// Malformed length or SQN/IND parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Re-synchronization requested on a GSM-only algorithm
    #[error("Re-synchronization is not applicable to {0}")]
    NotApplicable(AuthAlgo),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, AuthError>;
