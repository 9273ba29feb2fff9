//! Third-party source verification of deployed contracts

use std::{future::Future, path::PathBuf, process::Stdio};

use alloy_primitives::{hex, Address, Bytes};
use tokio::process::Command;
use tracing::debug;

use crate::{
    constants::{FORGE_COMMAND, VERIFY_CONTRACT_COMMAND},
    errors::DeployError,
};

/// A request to verify a deployed contract against its published source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// The chain the contract is deployed on
    pub chain_id: u64,
    /// The name of the contract
    pub contract_name: String,
    /// The deployed address
    pub address: Address,
    /// The ABI-encoded constructor arguments the contract was deployed with
    pub constructor_args: Bytes,
    /// The block explorer API key
    pub api_key: String,
}

/// A source verification service
pub trait Verifier {
    /// Submit a contract for verification
    fn verify(
        &self,
        request: &VerificationRequest,
    ) -> impl Future<Output = Result<(), DeployError>> + Send;
}

/// Verifies contracts through `forge verify-contract`.
///
/// Assumes `forge` is locally available and `project_root` is the foundry
/// project the artifacts were compiled from
#[derive(Debug, Clone)]
pub struct ForgeVerifier {
    /// The root of the foundry project
    project_root: PathBuf,
}

impl ForgeVerifier {
    /// Create a verifier for the given project
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Build the `forge verify-contract` invocation for a request
    fn command(&self, request: &VerificationRequest) -> Command {
        let mut cmd = Command::new(FORGE_COMMAND);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        cmd.current_dir(&self.project_root);
        cmd.arg(VERIFY_CONTRACT_COMMAND)
            .arg(request.address.to_string())
            .arg(&request.contract_name)
            .arg("--chain-id")
            .arg(request.chain_id.to_string())
            .arg("--etherscan-api-key")
            .arg(&request.api_key)
            // Block until the explorer has processed the submission
            .arg("--watch");

        if !request.constructor_args.is_empty() {
            cmd.arg("--constructor-args")
                .arg(hex::encode_prefixed(&request.constructor_args));
        }

        cmd
    }
}

impl Verifier for ForgeVerifier {
    async fn verify(&self, request: &VerificationRequest) -> Result<(), DeployError> {
        debug!(
            contract = %request.contract_name,
            address = %request.address,
            chain_id = request.chain_id,
            "submitting contract for verification"
        );

        let status = self
            .command(request)
            .status()
            .await
            .map_err(|e| DeployError::VerificationFailure(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(DeployError::VerificationFailure(format!(
                "`{} {}` exited with {}",
                FORGE_COMMAND, VERIFY_CONTRACT_COMMAND, status
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use alloy_primitives::{Address, Bytes};

    use super::{ForgeVerifier, VerificationRequest};

    #[test]
    fn test_forge_command_args() {
        let verifier = ForgeVerifier::new(PathBuf::from("."));
        let request = VerificationRequest {
            chain_id: 11155111,
            contract_name: "FundMe".to_string(),
            address: Address::with_last_byte(1),
            constructor_args: Bytes::from(vec![0xab; 2]),
            api_key: "key".to_string(),
        };

        let cmd = verifier.command(&request);
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[0], "verify-contract");
        assert_eq!(args[2], "FundMe");
        assert!(args.windows(2).any(|w| w == ["--chain-id", "11155111"]));
        assert!(args.windows(2).any(|w| w == ["--constructor-args", "0xabab"]));
        assert!(args.contains(&"--watch".to_string()));
    }

    #[test]
    fn test_forge_command_without_args() {
        let verifier = ForgeVerifier::new(PathBuf::from("."));
        let request = VerificationRequest {
            chain_id: 1,
            contract_name: "FundMe".to_string(),
            address: Address::ZERO,
            constructor_args: Bytes::new(),
            api_key: "key".to_string(),
        };

        let cmd = verifier.command(&request);
        assert!(!cmd
            .as_std()
            .get_args()
            .any(|a| a == "--constructor-args"));
    }
}
