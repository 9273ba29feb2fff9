//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// Error reading or parsing the network configuration file
    ReadConfig(String),
    /// Error reading the deployments ledger
    ReadDeployments(String),
    /// Error writing the deployments ledger
    WriteDeployments(String),
    /// Error parsing a Solidity compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// No dependency address is registered for a public network
    UnknownNetworkConfig {
        /// The chain ID that was looked up
        chain_id: u64,
        /// The dependency that could not be resolved
        dependency: String,
    },
    /// Error sending a deployment transaction
    ContractDeployment(String),
    /// The deployment transaction did not reach the required confirmations in time
    DeploymentTimeout(String),
    /// The deployment transaction was mined but reverted
    TransactionReverted(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error submitting a contract for source verification
    VerificationFailure(String),
}

impl DeployError {
    /// Whether the error must abort the run
    ///
    /// Verification is best-effort, every other failure leaves the run incomplete
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DeployError::VerificationFailure(_))
    }
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::ReadConfig(s) => write!(f, "error reading network config: {}", s),
            DeployError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            DeployError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            DeployError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            DeployError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            DeployError::UnknownNetworkConfig {
                chain_id,
                dependency,
            } => write!(
                f,
                "no `{}` address configured for chain ID {}",
                dependency, chain_id
            ),
            DeployError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            DeployError::DeploymentTimeout(s) => {
                write!(f, "timed out waiting for deployment: {}", s)
            }
            DeployError::TransactionReverted(s) => {
                write!(f, "deployment transaction reverted: {}", s)
            }
            DeployError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            DeployError::VerificationFailure(s) => write!(f, "error verifying contract: {}", s),
        }
    }
}

impl Error for DeployError {}

#[cfg(test)]
mod tests {
    use super::DeployError;

    #[test]
    fn test_only_verification_is_non_fatal() {
        assert!(!DeployError::VerificationFailure("rate limited".to_string()).is_fatal());
        assert!(DeployError::DeploymentTimeout("0x01".to_string()).is_fatal());
        assert!(DeployError::UnknownNetworkConfig {
            chain_id: 999999,
            dependency: "ethUsdPriceFeed".to_string()
        }
        .is_fatal());
    }

    #[test]
    fn test_unknown_network_message() {
        let err = DeployError::UnknownNetworkConfig {
            chain_id: 999999,
            dependency: "ethUsdPriceFeed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no `ethUsdPriceFeed` address configured for chain ID 999999"
        );
    }
}
