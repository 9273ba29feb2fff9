//! The network configuration: which networks are local, and which dependency
//! addresses are deployed on each public chain

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    str::FromStr,
};

use alloy_primitives::Address;
use serde::Deserialize;

use crate::{
    constants::{DEFAULT_DEVELOPMENT_CHAINS, DEFAULT_HELPER_CONFIG},
    errors::DeployError,
    types::{NetworkDescriptor, NetworkKind},
};

/// The known contract addresses on a single public chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    /// A human-readable name for the chain
    #[serde(default)]
    pub name: String,
    /// The confirmation count to use on this chain, if it differs from the default
    #[serde(default)]
    pub block_confirmations: Option<u64>,
    /// Dependency name to deployed address
    #[serde(default)]
    pub contracts: BTreeMap<String, Address>,
}

/// The network configuration of the scripts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperConfig {
    /// Names of the networks considered local / ephemeral
    #[serde(default = "default_development_chains")]
    pub development_chains: BTreeSet<String>,
    /// The dependency registry, keyed by chain ID
    #[serde(default)]
    pub networks: BTreeMap<u64, NetworkEntry>,
}

fn default_development_chains() -> BTreeSet<String> {
    DEFAULT_DEVELOPMENT_CHAINS.iter().map(|s| s.to_string()).collect()
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            development_chains: default_development_chains(),
            networks: BTreeMap::new(),
        }
    }
}

impl FromStr for HelperConfig {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| DeployError::ReadConfig(e.to_string()))
    }
}

impl HelperConfig {
    /// The configuration bundled with the scripts
    pub fn bundled() -> Result<Self, DeployError> {
        DEFAULT_HELPER_CONFIG.parse()
    }

    /// Read the configuration from the given file
    pub fn from_file(path: &Path) -> Result<Self, DeployError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DeployError::ReadConfig(format!("{}: {}", path.display(), e)))?;
        contents.parse()
    }

    /// Read the configuration from `path` if given, falling back to the bundled one
    pub fn load(path: Option<&Path>) -> Result<Self, DeployError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }

    /// Classify the given network as development or public.
    ///
    /// Names outside the development set are public
    pub fn classify(&self, network: &NetworkDescriptor) -> NetworkKind {
        if self.development_chains.contains(&network.name) {
            NetworkKind::Development
        } else {
            NetworkKind::Public
        }
    }

    /// The confirmation count configured for the given chain, if any
    pub fn block_confirmations(&self, chain_id: u64) -> Option<u64> {
        self.networks
            .get(&chain_id)
            .and_then(|entry| entry.block_confirmations)
    }

    /// Look up the address of `dependency` on the given chain
    pub fn dependency_address(
        &self,
        chain_id: u64,
        dependency: &str,
    ) -> Result<Address, DeployError> {
        self.networks
            .get(&chain_id)
            .and_then(|entry| entry.contracts.get(dependency))
            .copied()
            .filter(|addr| !addr.is_zero())
            .ok_or_else(|| DeployError::UnknownNetworkConfig {
                chain_id,
                dependency: dependency.to_string(),
            })
    }
}
