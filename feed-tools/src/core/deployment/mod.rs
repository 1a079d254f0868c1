// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::{Address, TxHash, U256};

use crate::utils::{
    color::{Color, DebugColor},
    gwei_to_wei,
};

pub use handle::{deployed_address, DeployedContract};
pub use request::DeploymentRequest;

pub mod handle;
pub mod request;

/// Contract deployed by this tool.
pub const CONTRACT_NAME: &str = "SocialFeed";

/// Gas price override, in gwei, for networks enforcing a minimum fee.
pub const GAS_PRICE_OVERRIDE_GWEI: u64 = 25;

/// Gas price override in wei.
pub const GAS_PRICE_OVERRIDE_WEI: u128 = gwei_to_wei(GAS_PRICE_OVERRIDE_GWEI);

#[derive(Debug)]
pub struct DeploymentConfig {
    pub contract_name: String,
    /// Legacy gas price in wei; uses the node's gas price when unset.
    pub gas_price_wei: Option<u128>,
    /// Confirmations to wait for; `0` returns as soon as the tx is submitted.
    pub confirmations: u64,
    pub estimate_gas: bool,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            contract_name: CONTRACT_NAME.to_string(),
            gas_price_wei: Some(GAS_PRICE_OVERRIDE_WEI),
            confirmations: 1,
            estimate_gas: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("deployment failed during gas estimation")]
    GasEstimationFailure,
    #[error("failed to get balance")]
    FailedToGetBalance,
    #[error(
        "not enough funds in account {} to deploy\n\
         balance {} < {}",
        .from_address.red(),
        .balance.red(),
        format!("{} wei", .cost).red(),
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        cost: U256,
    },
    #[error("deploy tx {} failed to complete", .tx_hash.debug_red())]
    FailedToComplete { tx_hash: TxHash },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
}
