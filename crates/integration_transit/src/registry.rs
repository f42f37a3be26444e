//! Provider registry
//!
//! Maps provider names to constructors so the caller can pick a transit
//! provider by name (from configuration or the command line).

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::metrotransit::MetroTransitProvider;
use crate::provider::TransitProvider;
use crate::transport::ReqwestTransport;

/// Registry name of the Metro Transit NexTrip provider
pub const METRO_TRANSIT: &str = "metrotransit";

/// Builds a provider from configuration
pub type ProviderConstructor = fn(&TransitConfig) -> Result<Box<dyn TransitProvider>, TransitError>;

/// Named provider constructors
#[derive(Clone)]
pub struct ProviderRegistry {
    constructors: BTreeMap<&'static str, ProviderConstructor>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

impl ProviderRegistry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// A registry with every built-in provider
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(METRO_TRANSIT, metro_transit);
        registry
    }

    /// Register (or replace) the constructor for `name`
    pub fn register(&mut self, name: &'static str, constructor: ProviderConstructor) {
        self.constructors.insert(name, constructor);
    }

    /// Registered provider names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }

    /// Construct the provider registered under `name`
    pub fn create(
        &self,
        name: &str,
        config: &TransitConfig,
    ) -> Result<Box<dyn TransitProvider>, TransitError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| TransitError::UnknownProvider(name.to_string()))?;

        debug!(provider = name, sandbox = config.use_sandbox, "Creating provider");
        constructor(config)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn metro_transit(config: &TransitConfig) -> Result<Box<dyn TransitProvider>, TransitError> {
    let transport = ReqwestTransport::new(config)?;
    Ok(Box::new(MetroTransitProvider::new(transport, config)?))
}
