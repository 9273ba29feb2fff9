//! Constants used in the staging tests

/// The default RPC url the tests run against
pub(crate) const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The amount of ether sent to the contract when funding it
pub(crate) const SEND_VALUE: &str = "0.016";

/// The number of confirmations to wait for on each transaction
pub(crate) const TX_CONFIRMATIONS: u64 = 1;
