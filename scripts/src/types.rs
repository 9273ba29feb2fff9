//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_BLOCK_CONFIRMATIONS;

/// The network the scripts are running against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDescriptor {
    /// The symbolic name of the network, e.g. `sepolia` or `localhost`
    pub name: String,
    /// The chain ID of the network
    pub chain_id: u64,
    /// The number of confirmations to wait for on deployment transactions,
    /// always at least 1
    pub block_confirmations: u64,
}

impl NetworkDescriptor {
    /// Create a descriptor, clamping the confirmation count to at least 1
    pub fn new(name: impl Into<String>, chain_id: u64, block_confirmations: Option<u64>) -> Self {
        let block_confirmations = block_confirmations
            .unwrap_or(DEFAULT_BLOCK_CONFIRMATIONS)
            .max(1);

        Self {
            name: name.into(),
            chain_id,
            block_confirmations,
        }
    }
}

/// Whether a network is a local, ephemeral chain or a public one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// A simulated or throwaway chain, on which dependencies are mocked
    Development,
    /// A chain with real dependency deployments
    Public,
}

impl NetworkKind {
    /// Whether this is a development network
    pub fn is_development(&self) -> bool {
        matches!(self, NetworkKind::Development)
    }
}

impl Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkKind::Development => write!(f, "development"),
            NetworkKind::Public => write!(f, "public"),
        }
    }
}

/// A contract deployment, as persisted in the deployments ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// The name of the deployed contract
    pub name: String,
    /// The address the contract was deployed to
    pub address: Address,
    /// The contract ABI, copied from its compilation artifact
    pub abi: Value,
    /// The constructor arguments, in display form
    #[serde(default)]
    pub args: Vec<String>,
    /// The ABI-encoded constructor arguments the contract was created with
    #[serde(default)]
    pub constructor_args: Bytes,
    /// The hash of the creating transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
    /// The number of confirmations the creating transaction was awaited for
    pub confirmations: u64,
}

/// The result of a deployment transaction that reached its confirmations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// The address of the new contract
    pub address: Address,
    /// The contract ABI
    pub abi: Value,
    /// The hash of the creating transaction
    pub transaction_hash: B256,
    /// The number of confirmations awaited
    pub confirmations: u64,
}

/// Render a constructor argument the way it is stored in the ledger
pub fn display_arg(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(addr) => addr.to_checksum(None),
        DynSolValue::Uint(v, _) => v.to_string(),
        DynSolValue::Int(v, _) => v.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::String(s) => s.clone(),
        other => format!("{other:?}"),
    }
}
