//! Algorithm registry
//!
//! Maps each [`AuthAlgo`] to the implementations registered for it, kept
//! in descending priority order. The head of each list is the one used
//! for dispatch. Equal priorities keep registration order, so the first
//! registered implementation wins a tie.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use nextgauc_common::{AucConfig, AuthAlgo, DEFAULT_PRIORITY};
use tracing::{debug, warn};

use crate::algorithms::{self, AuthAlgorithm};
use crate::error::{AuthError, Result};

/// A registered implementation and its priority
#[derive(Clone)]
pub struct AuthImpl {
    /// Higher priorities are preferred
    pub priority: u32,
    algorithm: Arc<dyn AuthAlgorithm>,
}

impl AuthImpl {
    /// Wrap `algorithm` with `priority`
    pub fn new(priority: u32, algorithm: Arc<dyn AuthAlgorithm>) -> Self {
        Self {
            priority,
            algorithm,
        }
    }

    /// Algorithm provided
    pub fn algo(&self) -> AuthAlgo {
        self.algorithm.algo()
    }

    /// Implementation name
    pub fn name(&self) -> &str {
        self.algorithm.name()
    }

    /// The implementation object
    pub fn algorithm(&self) -> &dyn AuthAlgorithm {
        self.algorithm.as_ref()
    }
}

impl fmt::Debug for AuthImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthImpl")
            .field("algo", &self.algo())
            .field("name", &self.name())
            .field("priority", &self.priority)
            .finish()
    }
}

/// Priority-ordered implementations per algorithm
#[derive(Debug, Clone, Default)]
pub struct Registry {
    impls: BTreeMap<AuthAlgo, Vec<AuthImpl>>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in implementation at the default
    /// priority
    pub fn with_builtin() -> Self {
        Self::with_priorities(|_| DEFAULT_PRIORITY)
    }

    /// Registry holding the built-ins with priorities taken from `config`
    pub fn from_config(config: &AucConfig) -> Self {
        Self::with_priorities(|algo| config.priority_for(algo))
    }

    fn with_priorities(priority: impl Fn(AuthAlgo) -> u32) -> Self {
        Self::with_algorithms(algorithms::builtin(), priority)
    }

    fn with_algorithms(
        algorithms: Vec<Arc<dyn AuthAlgorithm>>,
        priority: impl Fn(AuthAlgo) -> u32,
    ) -> Self {
        let mut registry = Self::new();
        for algorithm in algorithms {
            let imp = AuthImpl::new(priority(algorithm.algo()), algorithm);
            let registered = registry.register(imp);
            if let Err(e) = &registered {
                warn!("Built-in implementation not registered: {}", e);
            }
            debug_assert!(registered.is_ok(), "built-in not registered: {registered:?}");
        }
        registry
    }

    /// Insert `imp` behind every implementation of equal or higher
    /// priority.
    ///
    /// Fails without modifying the registry if the algorithm is `None` or
    /// an implementation of the same name is already registered for it.
    pub fn register(&mut self, imp: AuthImpl) -> Result<()> {
        let algo = imp.algo();
        if algo == AuthAlgo::None {
            return Err(AuthError::UnsupportedAlgorithm(algo));
        }

        let list = self.impls.entry(algo).or_default();
        if list.iter().any(|existing| existing.name() == imp.name()) {
            return Err(AuthError::DuplicateImplementation {
                algo,
                name: imp.name().to_string(),
            });
        }

        let pos = list
            .iter()
            .position(|existing| existing.priority < imp.priority)
            .unwrap_or(list.len());
        debug!(
            "Registered {} implementation '{}' (priority {}, rank {})",
            algo,
            imp.name(),
            imp.priority,
            pos
        );
        list.insert(pos, imp);
        Ok(())
    }

    /// Highest-priority implementation of `algo`
    pub fn resolve(&self, algo: AuthAlgo) -> Result<&AuthImpl> {
        self.impls
            .get(&algo)
            .and_then(|list| list.first())
            .ok_or(AuthError::UnsupportedAlgorithm(algo))
    }

    /// Whether any implementation of `algo` is registered
    pub fn supported(&self, algo: AuthAlgo) -> bool {
        self.resolve(algo).is_ok()
    }

    /// Implementations of `algo` in dispatch order
    pub fn implementations(&self, algo: AuthAlgo) -> impl Iterator<Item = &AuthImpl> {
        self.impls.get(&algo).into_iter().flatten()
    }

    /// Algorithms with at least one implementation
    pub fn algorithms(&self) -> impl Iterator<Item = AuthAlgo> + '_ {
        self.impls
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(algo, _)| *algo)
    }
}

/// Process-wide registry of the built-in implementations
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::with_builtin)
}
