//! Constants used in the deploy scripts

use std::time::Duration;

/// The network configuration bundled with the scripts, used when no
/// `--config` file is given
pub const DEFAULT_HELPER_CONFIG: &str = include_str!("../config/helper-config.json");

/// The network names treated as local / ephemeral when the configuration
/// file does not list any
pub const DEFAULT_DEVELOPMENT_CHAINS: [&str; 4] = ["hardhat", "localhost", "anvil", "local-dev"];

/// The number of confirmations to wait for a deployment transaction when
/// neither the CLI nor the network configuration specify one
pub const DEFAULT_BLOCK_CONFIRMATIONS: u64 = 1;

/// The default bound on the wait for a deployment transaction to confirm
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

/// The number of confirmations the interaction scripts wait for
pub const INTERACTION_CONFIRMATIONS: u64 = 1;

/// The name of the primary contract
pub const FUND_ME_CONTRACT: &str = "FundMe";

/// The registry key of the price feed the primary contract is constructed with
pub const ETH_USD_PRICE_FEED_KEY: &str = "ethUsdPriceFeed";

/// The name of the price feed mock deployed on development networks
pub const MOCK_AGGREGATOR_CONTRACT: &str = "MockV3Aggregator";

/// The number of decimals reported by the mock price feed
pub const MOCK_AGGREGATOR_DECIMALS: u8 = 8;

/// The initial answer reported by the mock price feed, 2000 USD with 8 decimals
pub const MOCK_AGGREGATOR_INITIAL_ANSWER: i64 = 200_000_000_000;

/// The default amount of ether sent by the `fund` script
pub const DEFAULT_FUND_AMOUNT: &str = "0.017";

/// The name of the forge command
pub const FORGE_COMMAND: &str = "forge";

/// The forge subcommand used to submit a contract for verification
pub const VERIFY_CONTRACT_COMMAND: &str = "verify-contract";

/// The extension of ledger and artifact files
pub const JSON_EXTENSION: &str = "json";

/// The extension of Solidity source directories in the forge artifact layout
pub const SOLIDITY_EXTENSION: &str = "sol";
