//! Implementations of the various deploy scripts

use std::time::Duration;

use alloy::providers::DynProvider;
use alloy_primitives::utils::parse_ether;
use tracing::info;

use crate::{
    cli::{FundArgs, GlobalArgs, ShowArgs},
    config::HelperConfig,
    constants::{FUND_ME_CONTRACT, INTERACTION_CONFIRMATIONS},
    deployer::RpcDeployer,
    errors::DeployError,
    ledger::{DeploymentStore, JsonFileStore},
    orchestrator::{DeployConfig, DeployPlan, Orchestrator},
    solidity::FundMe,
    utils::{network_descriptor, setup_client},
    verify::ForgeVerifier,
};

/// The orchestrator as wired up against a live network
type LiveOrchestrator = Orchestrator<RpcDeployer, ForgeVerifier, JsonFileStore>;

/// Build an orchestrator from the CLI arguments
async fn live_orchestrator(args: &GlobalArgs) -> Result<LiveOrchestrator, DeployError> {
    let client = setup_client(args.priv_key.as_deref(), &args.rpc_url)?;
    let helper = HelperConfig::load(args.config.as_deref())?;
    let network = network_descriptor(
        &args.network,
        args.chain_id,
        args.block_confirmations,
        &helper,
        &client,
    )
    .await?;

    let config = DeployConfig {
        network,
        helper,
        plan: DeployPlan::default(),
        verification_key: args.etherscan_api_key.clone().filter(|k| !k.is_empty()),
    };
    let deployer = RpcDeployer::new(
        client,
        args.artifacts_dir.clone(),
        Duration::from_secs(args.confirmation_timeout),
    );
    let verifier = ForgeVerifier::new(args.project_root.clone());
    let store = JsonFileStore::open(&args.deployments_dir, &args.network)?;

    Ok(Orchestrator::new(config, deployer, verifier, store))
}

pub async fn deploy(args: &GlobalArgs) -> Result<(), DeployError> {
    let mut orchestrator = live_orchestrator(args).await?;
    let outcome = orchestrator.run().await?;

    info!(
        contract = %outcome.primary.name,
        address = %outcome.primary.address,
        price_feed = %outcome.dependency,
        verification = ?outcome.verification,
        ledger = %orchestrator.store().path().display(),
        "FundMe deployed"
    );
    Ok(())
}

pub async fn deploy_mocks(args: &GlobalArgs) -> Result<(), DeployError> {
    let mut orchestrator = live_orchestrator(args).await?;
    if let Some(mock) = orchestrator.deploy_mocks().await? {
        info!(contract = %mock.name, address = %mock.address, "mocks deployed");
    }

    Ok(())
}

/// Build a handle to the FundMe contract recorded in the ledger
fn fund_me_from_ledger(
    args: &GlobalArgs,
) -> Result<FundMe::FundMeInstance<DynProvider>, DeployError> {
    let client = setup_client(args.priv_key.as_deref(), &args.rpc_url)?;
    let store = JsonFileStore::open(&args.deployments_dir, &args.network)?;
    let record = store.require(FUND_ME_CONTRACT)?;

    Ok(FundMe::new(record.address, client))
}

pub async fn fund(args: &GlobalArgs, fund_args: FundArgs) -> Result<(), DeployError> {
    let fund_me = fund_me_from_ledger(args)?;
    let value = parse_ether(&fund_args.amount)
        .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;

    info!(address = %fund_me.address(), amount = %fund_args.amount, "funding contract");
    let receipt = fund_me
        .fund()
        .value(value)
        .send()
        .await
        .map_err(|e| DeployError::ContractInteraction(e.to_string()))?
        .with_required_confirmations(INTERACTION_CONFIRMATIONS)
        .get_receipt()
        .await
        .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;

    if !receipt.status() {
        return Err(DeployError::ContractInteraction(format!(
            "fund transaction {:#x} reverted",
            receipt.transaction_hash
        )));
    }

    info!(tx_hash = %receipt.transaction_hash, "funded");
    Ok(())
}

pub async fn withdraw(args: &GlobalArgs) -> Result<(), DeployError> {
    let fund_me = fund_me_from_ledger(args)?;

    info!(address = %fund_me.address(), "withdrawing");
    let receipt = fund_me
        .withdraw()
        .send()
        .await
        .map_err(|e| DeployError::ContractInteraction(e.to_string()))?
        .with_required_confirmations(INTERACTION_CONFIRMATIONS)
        .get_receipt()
        .await
        .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;

    if !receipt.status() {
        return Err(DeployError::ContractInteraction(format!(
            "withdraw transaction {:#x} reverted",
            receipt.transaction_hash
        )));
    }

    info!(tx_hash = %receipt.transaction_hash, "got it back");
    Ok(())
}

pub fn show(args: &GlobalArgs, show_args: ShowArgs) -> Result<(), DeployError> {
    let store = JsonFileStore::open(&args.deployments_dir, &args.network)?;
    let record = store.require(&show_args.contract)?;

    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| DeployError::ReadDeployments(e.to_string()))?;
    println!("{json}");
    Ok(())
}
