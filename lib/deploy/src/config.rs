//! The set of networks the harness knows about.
use std::collections::BTreeMap;

use crate::{
    environment,
    network::{NetworkConfig, BASE_SEPOLIA},
    Error,
};

/// Declared networks, keyed by name.
#[derive(Clone, Debug)]
pub struct Config {
    /// Every declared network.
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Call [`environment::load_dotenv`] first to pick up a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(environment::var)
    }

    /// Build the configuration from the variables `lookup` returns.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_sepolia = NetworkConfig::base_sepolia(lookup);
        let networks =
            BTreeMap::from([(base_sepolia.name.clone(), base_sepolia)]);
        Self { networks }
    }

    /// Look up the network declared as `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownNetwork`] if no such network is declared.
    pub fn network(&self, name: &str) -> eyre::Result<&NetworkConfig> {
        self.networks.get(name).ok_or_else(|| {
            Error::UnknownNetwork {
                name: name.to_owned(),
                available: self.networks.keys().cloned().collect(),
            }
            .into()
        })
    }

    /// The network deployments target unless told otherwise.
    ///
    /// # Errors
    ///
    /// Never fails for a configuration built by this module.
    pub fn default_network(&self) -> eyre::Result<&NetworkConfig> {
        self.network(BASE_SEPOLIA)
    }
}
