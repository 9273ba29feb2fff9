//! The boundary through which contracts are deployed to a chain

use std::{future::Future, path::PathBuf, time::Duration};

use alloy::{
    dyn_abi::DynSolValue,
    network::TransactionBuilder,
    providers::{DynProvider, PendingTransactionError, Provider, WatchTxError},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use alloy_primitives::{Address, Bytes, B256};
use tracing::debug;

use crate::{artifacts::Artifact, errors::DeployError, types::DeployedContract};

/// Something that can deploy a named contract and wait for it to confirm
pub trait ContractDeployer {
    /// Deploy the contract `name` with the given constructor arguments, resolving
    /// once the creating transaction has `confirmations` confirmations
    fn deploy(
        &self,
        name: &str,
        args: &[DynSolValue],
        confirmations: u64,
    ) -> impl Future<Output = Result<DeployedContract, DeployError>> + Send;

    /// Whether there is contract code at the given address
    fn is_deployed(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<bool, DeployError>> + Send;
}

/// ABI-encode constructor arguments, as appended to the creation bytecode
pub fn encode_constructor_args(args: &[DynSolValue]) -> Bytes {
    DynSolValue::Tuple(args.to_vec()).abi_encode_params().into()
}

/// Map a failure while awaiting the confirmations of a deployment
fn confirmation_error(
    name: &str,
    tx_hash: B256,
    timeout: Duration,
    err: PendingTransactionError,
) -> DeployError {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            DeployError::DeploymentTimeout(format!(
                "{name} ({tx_hash:#x}) after {}s",
                timeout.as_secs()
            ))
        }
        e => DeployError::ContractDeployment(e.to_string()),
    }
}

/// The address of the contract created by a confirmed deployment
fn created_address(name: &str, receipt: &TransactionReceipt) -> Result<Address, DeployError> {
    let tx_hash = receipt.transaction_hash;
    if !receipt.status() {
        return Err(DeployError::TransactionReverted(format!("{name} ({tx_hash:#x})")));
    }

    receipt.contract_address.ok_or_else(|| {
        DeployError::ContractDeployment(format!("no contract address in receipt of {tx_hash:#x}"))
    })
}

/// Deploys contracts from compiled artifacts over JSON-RPC
#[derive(Clone)]
pub struct RpcDeployer {
    /// The signing provider used to send deployment transactions
    provider: DynProvider,
    /// The directory holding compiled artifacts
    artifacts_dir: PathBuf,
    /// The bound on the wait for a deployment to confirm
    confirmation_timeout: Duration,
}

impl RpcDeployer {
    /// Create a deployer over the given provider
    pub fn new(
        provider: DynProvider,
        artifacts_dir: PathBuf,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            artifacts_dir,
            confirmation_timeout,
        }
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy(
        &self,
        name: &str,
        args: &[DynSolValue],
        confirmations: u64,
    ) -> Result<DeployedContract, DeployError> {
        let artifact = Artifact::load(&self.artifacts_dir, name)?;

        let mut code = artifact.bytecode.to_vec();
        code.extend_from_slice(&encode_constructor_args(args));
        let tx = TransactionRequest::default().with_deploy_code(code);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;
        let tx_hash = *pending.tx_hash();
        debug!(contract = name, tx_hash = %tx_hash, confirmations, "awaiting deployment");

        let receipt = pending
            .with_required_confirmations(confirmations)
            .with_timeout(Some(self.confirmation_timeout))
            .get_receipt()
            .await
            .map_err(|e| confirmation_error(name, tx_hash, self.confirmation_timeout, e))?;
        let address = created_address(name, &receipt)?;

        Ok(DeployedContract {
            address,
            abi: artifact.abi,
            transaction_hash: tx_hash,
            confirmations,
        })
    }

    async fn is_deployed(&self, address: Address) -> Result<bool, DeployError> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;
        Ok(!code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path, time::Duration};

    use alloy::{
        dyn_abi::DynSolValue,
        providers::{DynProvider, PendingTransactionError, ProviderBuilder, WatchTxError},
        rpc::types::TransactionReceipt,
        transports::mock::Asserter,
    };
    use alloy_primitives::{Address, Bytes, B256, I256, U256};
    use serde_json::json;

    use crate::errors::DeployError;

    use super::{
        confirmation_error, created_address, encode_constructor_args, ContractDeployer,
        RpcDeployer,
    };

    /// A receipt for a deployment with the given status and created address
    fn receipt(status: bool, contract_address: Option<Address>) -> TransactionReceipt {
        serde_json::from_value(json!({
            "type": "0x2",
            "status": if status { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": Bytes::from(vec![0u8; 256]),
            "transactionHash": B256::with_last_byte(1),
            "transactionIndex": "0x0",
            "blockHash": B256::with_last_byte(2),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": Address::with_last_byte(3),
            "to": null,
            "contractAddress": contract_address,
        }))
        .unwrap()
    }

    /// A deployer over a mocked transport, with a `FundMe` artifact on disk
    fn mocked_deployer(artifacts_dir: &Path) -> (RpcDeployer, Asserter) {
        fs::write(
            artifacts_dir.join("FundMe.json"),
            json!({ "abi": [], "bytecode": "0x6080" }).to_string(),
        )
        .unwrap();

        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        let deployer = RpcDeployer::new(
            DynProvider::new(provider),
            artifacts_dir.to_path_buf(),
            Duration::from_secs(300),
        );
        (deployer, asserter)
    }

    #[test]
    fn test_encode_single_address() {
        let addr = Address::with_last_byte(0xaa);
        let encoded = encode_constructor_args(&[DynSolValue::Address(addr)]);

        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[12..], addr.as_slice());
    }

    #[test]
    fn test_encode_mock_aggregator_args() {
        let encoded = encode_constructor_args(&[
            DynSolValue::Uint(U256::from(8u8), 8),
            DynSolValue::Int(I256::try_from(200_000_000_000i64).unwrap(), 256),
        ]);

        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 8);
        assert_eq!(U256::from_be_slice(&encoded[32..]), U256::from(200_000_000_000u64));
    }

    #[test]
    fn test_encode_no_args() {
        assert!(encode_constructor_args(&[]).is_empty());
    }

    #[test]
    fn test_confirmation_errors() {
        let timeout = confirmation_error(
            "FundMe",
            B256::with_last_byte(1),
            Duration::from_secs(300),
            PendingTransactionError::TxWatcher(WatchTxError::Timeout),
        );
        match timeout {
            DeployError::DeploymentTimeout(msg) => assert!(msg.ends_with("after 300s")),
            e => panic!("expected a timeout, got {e:?}"),
        }

        let other = confirmation_error(
            "FundMe",
            B256::with_last_byte(1),
            Duration::from_secs(300),
            PendingTransactionError::FailedToRegister,
        );
        assert!(matches!(other, DeployError::ContractDeployment(_)));
    }

    #[test]
    fn test_created_address_from_receipt() {
        let created = Address::with_last_byte(0xcc);
        assert_eq!(created_address("FundMe", &receipt(true, Some(created))), Ok(created));

        assert!(matches!(
            created_address("FundMe", &receipt(false, Some(created))),
            Err(DeployError::TransactionReverted(_))
        ));
        assert!(matches!(
            created_address("FundMe", &receipt(true, None)),
            Err(DeployError::ContractDeployment(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_deployment_transaction() {
        let dir = tempfile::tempdir().unwrap();
        let (deployer, asserter) = mocked_deployer(dir.path());
        asserter.push_failure_msg("insufficient funds for gas * price + value");

        let res = deployer.deploy("FundMe", &[], 1).await;
        assert!(matches!(res, Err(DeployError::ContractDeployment(_))));
    }

    #[tokio::test]
    async fn test_missing_artifact_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (deployer, _asserter) = mocked_deployer(dir.path());

        let res = deployer.deploy("MockV3Aggregator", &[], 1).await;
        assert!(matches!(res, Err(DeployError::ArtifactParsing(_))));
    }

    #[tokio::test]
    async fn test_is_deployed_checks_code() {
        let dir = tempfile::tempdir().unwrap();
        let (deployer, asserter) = mocked_deployer(dir.path());
        asserter.push_success(&Bytes::from_static(&[0x60, 0x80]));
        asserter.push_success(&Bytes::new());

        let addr = Address::with_last_byte(1);
        assert_eq!(deployer.is_deployed(addr).await, Ok(true));
        assert_eq!(deployer.is_deployed(addr).await, Ok(false));
    }
}
