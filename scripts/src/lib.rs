//! Scripts for deploying and interacting with the FundMe contract.
//!
//! The core is the [`orchestrator::Orchestrator`], which decides how the price
//! feed dependency is obtained on the target network, deploys `FundMe` against
//! it and submits it for source verification on public networks.

pub mod artifacts;
pub mod cli;
mod commands;
pub mod config;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod ledger;
pub mod orchestrator;
pub mod solidity;
pub mod types;
pub mod utils;
pub mod verify;
