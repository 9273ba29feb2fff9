//! Utilities for the deploy scripts.

use std::str::FromStr;

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing_subscriber::EnvFilter;

use crate::{
    config::HelperConfig, constants::DEFAULT_BLOCK_CONFIRMATIONS, errors::DeployError,
    types::NetworkDescriptor,
};

/// The log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global tracing subscriber, filtered by `RUST_LOG`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().pretty().with_env_filter(filter).init();
}

/// Sets up a signing client for the given private key and RPC url
pub fn setup_client(priv_key: Option<&str>, rpc_url: &str) -> Result<DynProvider, DeployError> {
    let priv_key = priv_key.ok_or_else(|| {
        DeployError::ClientInitialization("no private key given (--pkey / PKEY)".to_string())
    })?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(rpc_url).map_err(|e| DeployError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    Ok(DynProvider::new(provider))
}

/// Build the descriptor of the network the scripts run against.
///
/// The chain ID is read from the node; an explicitly given one must match it.
/// The confirmation count is taken from the CLI, then from the network
/// configuration, then defaults to 1
pub async fn network_descriptor(
    name: &str,
    chain_id: Option<u64>,
    block_confirmations: Option<u64>,
    helper: &HelperConfig,
    client: &DynProvider,
) -> Result<NetworkDescriptor, DeployError> {
    let reported = client
        .get_chain_id()
        .await
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let chain_id = check_chain_id(chain_id, reported)?;

    let block_confirmations = block_confirmations
        .or_else(|| helper.block_confirmations(chain_id))
        .unwrap_or(DEFAULT_BLOCK_CONFIRMATIONS);

    Ok(NetworkDescriptor::new(name, chain_id, Some(block_confirmations)))
}

/// Check an expected chain ID against the one reported by the node
fn check_chain_id(expected: Option<u64>, reported: u64) -> Result<u64, DeployError> {
    match expected {
        Some(id) if id != reported => Err(DeployError::ClientInitialization(format!(
            "chain ID {id} given, but the node reports {reported}"
        ))),
        _ => Ok(reported),
    }
}
