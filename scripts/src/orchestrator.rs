//! The deployment pipeline: classify the network, resolve the price feed the
//! primary contract depends on, deploy the primary contract, and submit it for
//! verification when on a public network with an explorer API key.
//!
//! Only dependency resolution and deployment can fail a run; verification
//! failures are logged and reported in the [`DeploymentOutcome`]

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, I256, U256};
use tracing::{info, warn};

use crate::{
    config::HelperConfig,
    constants::{
        ETH_USD_PRICE_FEED_KEY, FUND_ME_CONTRACT, MOCK_AGGREGATOR_CONTRACT,
        MOCK_AGGREGATOR_DECIMALS, MOCK_AGGREGATOR_INITIAL_ANSWER,
    },
    deployer::{encode_constructor_args, ContractDeployer},
    errors::DeployError,
    ledger::DeploymentStore,
    types::{display_arg, DeploymentRecord, NetworkDescriptor, NetworkKind},
    verify::{VerificationRequest, Verifier},
};

// ---------
// | Types |
// ---------

/// A contract deployed in place of a dependency on development networks
#[derive(Debug, Clone, PartialEq)]
pub struct MockContract {
    /// The contract name
    pub name: String,
    /// The constructor arguments
    pub args: Vec<DynSolValue>,
}

/// What gets deployed: the primary contract, the registry key of its single
/// constructor dependency, and the mock standing in for that dependency
#[derive(Debug, Clone, PartialEq)]
pub struct DeployPlan {
    /// The primary contract name
    pub contract: String,
    /// The registry key of the dependency
    pub dependency: String,
    /// The mock deployed on development networks
    pub mock: MockContract,
}

impl Default for DeployPlan {
    fn default() -> Self {
        Self {
            contract: FUND_ME_CONTRACT.to_string(),
            dependency: ETH_USD_PRICE_FEED_KEY.to_string(),
            mock: MockContract {
                name: MOCK_AGGREGATOR_CONTRACT.to_string(),
                args: vec![
                    DynSolValue::Uint(U256::from(MOCK_AGGREGATOR_DECIMALS), 8),
                    DynSolValue::Int(I256::unchecked_from(MOCK_AGGREGATOR_INITIAL_ANSWER), 256),
                ],
            },
        }
    }
}

/// The configuration of a single run
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// The network deployed to
    pub network: NetworkDescriptor,
    /// The development network set and dependency registry
    pub helper: HelperConfig,
    /// What to deploy
    pub plan: DeployPlan,
    /// The block explorer API key, verification is skipped without one
    pub verification_key: Option<String>,
}

/// Why verification did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Contracts on development networks are never verified
    DevelopmentNetwork,
    /// No explorer API key was configured
    NoCredential,
}

/// The result of the verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Verification was not attempted
    Skipped(SkipReason),
    /// The verification service accepted the contract
    Verified,
    /// Verification was attempted and failed
    Failed(String),
}

impl VerificationStatus {
    /// Whether verification was attempted
    pub fn attempted(&self) -> bool {
        !matches!(self, VerificationStatus::Skipped(_))
    }
}

/// The result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    /// The classification of the network
    pub kind: NetworkKind,
    /// The dependency address the primary contract was constructed with
    pub dependency: Address,
    /// The mock deployment, on development networks
    pub mock: Option<DeploymentRecord>,
    /// The primary deployment
    pub primary: DeploymentRecord,
    /// The result of the verification step
    pub verification: VerificationStatus,
}

// ----------------
// | Orchestrator |
// ----------------

/// Drives a deployment run against a ledger, a deployer and a verifier
pub struct Orchestrator<D, V, S> {
    /// The run configuration
    config: DeployConfig,
    /// Deploys contracts to the chain
    deployer: D,
    /// Submits contracts for verification
    verifier: V,
    /// The deployments ledger
    store: S,
}

impl<D, V, S> Orchestrator<D, V, S>
where
    D: ContractDeployer,
    V: Verifier,
    S: DeploymentStore,
{
    /// Create an orchestrator
    pub fn new(config: DeployConfig, deployer: D, verifier: V, store: S) -> Self {
        Self {
            config,
            deployer,
            verifier,
            store,
        }
    }

    /// The deployments ledger
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The classification of the configured network
    pub fn kind(&self) -> NetworkKind {
        self.config.helper.classify(&self.config.network)
    }

    /// Run the full pipeline
    pub async fn run(&mut self) -> Result<DeploymentOutcome, DeployError> {
        let kind = self.kind();
        info!(
            network = %self.config.network.name,
            chain_id = self.config.network.chain_id,
            %kind,
            "starting deployment"
        );

        let (dependency, mock) = self.resolve_dependency(kind).await?;

        let args = vec![DynSolValue::Address(dependency)];
        let contract = self.config.plan.contract.clone();
        let primary = self.deploy_if_absent(&contract, &args).await?;

        let verification = self.verify(kind, &primary).await;

        info!(contract = %primary.name, address = %primary.address, "deployment complete");
        Ok(DeploymentOutcome {
            kind,
            dependency,
            mock,
            primary,
            verification,
        })
    }

    /// Deploy the dependency mock if on a development network
    pub async fn deploy_mocks(&mut self) -> Result<Option<DeploymentRecord>, DeployError> {
        if !self.kind().is_development() {
            info!(network = %self.config.network.name, "public network, not deploying mocks");
            return Ok(None);
        }

        info!(network = %self.config.network.name, "local network detected, deploying mocks");
        self.deploy_mock().await.map(Some)
    }

    /// Deploy the dependency mock regardless of network
    async fn deploy_mock(&mut self) -> Result<DeploymentRecord, DeployError> {
        let MockContract { name, args } = self.config.plan.mock.clone();
        self.deploy_if_absent(&name, &args).await
    }

    /// Resolve the address of the primary contract's dependency.
    ///
    /// On development networks the mock is deployed (or reused) and its address
    /// returned alongside its record; on public networks the registry is consulted
    pub async fn resolve_dependency(
        &mut self,
        kind: NetworkKind,
    ) -> Result<(Address, Option<DeploymentRecord>), DeployError> {
        match kind {
            NetworkKind::Development => {
                let mock = self.deploy_mock().await?;
                Ok((mock.address, Some(mock)))
            }
            NetworkKind::Public => {
                let DeployConfig {
                    network, helper, plan, ..
                } = &self.config;
                let addr = helper.dependency_address(network.chain_id, &plan.dependency)?;
                info!(
                    dependency = %plan.dependency,
                    address = %addr,
                    "using registered dependency"
                );
                Ok((addr, None))
            }
        }
    }

    /// Deploy `name` unless the ledger already holds a record for it whose
    /// address still holds code.
    ///
    /// The record is written only after the deployment has confirmed
    pub async fn deploy_if_absent(
        &mut self,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<DeploymentRecord, DeployError> {
        let display_args: Vec<String> = args.iter().map(display_arg).collect();

        if let Some(existing) = self.store.get(name)? {
            if self.deployer.is_deployed(existing.address).await? {
                if existing.args != display_args {
                    warn!(
                        contract = name,
                        stored = ?existing.args,
                        requested = ?display_args,
                        "reusing deployment with different constructor arguments"
                    );
                }
                info!(contract = name, address = %existing.address, "reusing deployment");
                return Ok(existing);
            }

            // A restarted local node loses the code the ledger points at
            warn!(
                contract = name,
                address = %existing.address,
                "no code at recorded address, redeploying"
            );
        }

        let confirmations = self.config.network.block_confirmations;
        info!(contract = name, args = ?display_args, confirmations, "deploying");
        let deployed = self.deployer.deploy(name, args, confirmations).await?;

        let record = DeploymentRecord {
            name: name.to_string(),
            address: deployed.address,
            abi: deployed.abi,
            args: display_args,
            constructor_args: encode_constructor_args(args),
            transaction_hash: Some(deployed.transaction_hash),
            confirmations: deployed.confirmations,
        };
        self.store.save(record.clone())?;

        info!(
            contract = name,
            address = %record.address,
            tx_hash = %deployed.transaction_hash,
            confirmations = record.confirmations,
            "deployed"
        );
        Ok(record)
    }

    /// Submit the primary contract for verification if on a public network with
    /// an API key, along with the arguments it was created with. Never fails;
    /// failures are logged and reported in the status
    pub async fn verify(
        &self,
        kind: NetworkKind,
        record: &DeploymentRecord,
    ) -> VerificationStatus {
        if kind.is_development() {
            return VerificationStatus::Skipped(SkipReason::DevelopmentNetwork);
        }
        let Some(api_key) = self.config.verification_key.clone() else {
            info!(contract = %record.name, "no explorer API key, skipping verification");
            return VerificationStatus::Skipped(SkipReason::NoCredential);
        };

        let request = VerificationRequest {
            chain_id: self.config.network.chain_id,
            contract_name: record.name.clone(),
            address: record.address,
            constructor_args: record.constructor_args.clone(),
            api_key,
        };

        info!(contract = %record.name, address = %record.address, "verifying");
        match self.verifier.verify(&request).await {
            Ok(()) => VerificationStatus::Verified,
            Err(e) => {
                warn!(contract = %record.name, error = %e, "verification failed, continuing");
                VerificationStatus::Failed(e.to_string())
            }
        }
    }
}
