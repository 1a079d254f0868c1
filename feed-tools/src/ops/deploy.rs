// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.
//!
//! Deployment is a fixed sequence: resolve the contract factory, submit the deployment
//! transaction, then read the address off the resulting handle. Each step can fail on its
//! own, and each failure ends the run with a [`DeployOutcome`] describing it. Nothing is
//! retried.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::Provider,
};

use crate::{
    core::{
        deployment::{
            deployed_address, DeployedContract, DeploymentConfig, DeploymentError,
            DeploymentRequest,
        },
        factory::{ContractFactory, FactoryError},
    },
    utils::{color::DebugColor, format_fee, format_gas_price},
};

/// Diagnostic printed when a deployment resolves without a usable handle.
pub const MISSING_HANDLE_MESSAGE: &str = "deployment failed: no deployment handle was returned";

/// Where contract factories come from and where deployments go.
#[allow(async_fn_in_trait)]
pub trait DeploymentBackend {
    /// Look up the factory for `name`, bound to `signer`.
    async fn contract_factory(
        &self,
        name: &str,
        signer: Address,
    ) -> Result<ContractFactory, FactoryError>;

    /// Submit a deployment for `factory`, returning its handle if one was produced.
    async fn deploy(
        &self,
        factory: &ContractFactory,
        config: &DeploymentConfig,
    ) -> Result<Option<DeployedContract>, DeploymentError>;
}

/// Backend reading compiled artifacts from disk and deploying through an RPC provider.
#[derive(Debug)]
pub struct RpcBackend<P> {
    provider: P,
    artifacts_dir: PathBuf,
}

impl<P: Provider> RpcBackend<P> {
    pub fn new(provider: P, artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            artifacts_dir: artifacts_dir.into(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider> DeploymentBackend for RpcBackend<P> {
    async fn contract_factory(
        &self,
        name: &str,
        signer: Address,
    ) -> Result<ContractFactory, FactoryError> {
        ContractFactory::resolve(&self.artifacts_dir, name, signer)
    }

    async fn deploy(
        &self,
        factory: &ContractFactory,
        config: &DeploymentConfig,
    ) -> Result<Option<DeployedContract>, DeploymentError> {
        let req = DeploymentRequest::new(factory, config.gas_price_wei);
        let contract = req.exec(config.confirmations, &self.provider).await?;
        Ok(Some(contract))
    }
}

/// How a deployment run ended.
#[derive(Debug)]
pub enum DeployOutcome {
    Deployed {
        name: String,
        address: Address,
        contract: DeployedContract,
    },
    FactoryFailed(FactoryError),
    SubmissionFailed(DeploymentError),
    MissingHandle,
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Deployed { .. })
    }

    /// Address of the deployed contract, only known on success.
    pub fn address(&self) -> Option<Address> {
        match self {
            Self::Deployed { address, .. } => Some(*address),
            _ => None,
        }
    }

    /// Hash of the deployment transaction, only known on success.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::Deployed { contract, .. } => Some(contract.tx_hash()),
            _ => None,
        }
    }

    /// Write the outcome: one success line to `out`, or a diagnostic to `err`.
    pub fn report(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Deployed { name, address, .. } => {
                writeln!(out, "✅ {name} deployed to: {address}")
            }
            Self::FactoryFailed(e) => writeln!(err, "failed to get contract factory: {e}"),
            Self::SubmissionFailed(e) => writeln!(err, "failed to deploy contract: {e}"),
            Self::MissingHandle => writeln!(err, "{MISSING_HANDLE_MESSAGE}"),
        }
    }
}

/// Deploys the configured contract from `signer`.
pub async fn deploy(
    backend: &impl DeploymentBackend,
    signer: Address,
    config: &DeploymentConfig,
) -> DeployOutcome {
    debug!(@grey, "sender address: {}", signer.debug_lavender());

    let factory = match backend.contract_factory(&config.contract_name, signer).await {
        Ok(factory) => factory,
        Err(err) => return DeployOutcome::FactoryFailed(err),
    };

    match config.gas_price_wei {
        Some(wei) => debug!(@grey, "gas price override: {}", format_gas_price(wei)),
        None => debug!(@grey, "using the node's gas price"),
    }
    if config.confirmations == 0 {
        warn!(@yellow, "not waiting for the deployment to be confirmed");
    }

    let contract = match backend.deploy(&factory, config).await {
        Ok(Some(contract)) => contract,
        Ok(None) => return DeployOutcome::MissingHandle,
        Err(err) => return DeployOutcome::SubmissionFailed(err),
    };

    let Some(address) = deployed_address(&contract) else {
        return DeployOutcome::MissingHandle;
    };
    info!(@grey, "deployment tx hash: {}", contract.tx_hash().debug_lavender());
    if let DeployedContract::Confirmed {
        gas_used,
        block_number,
        ..
    } = &contract
    {
        match block_number {
            Some(block) => debug!(@grey, "gas used: {} in block {}", gas_used, block),
            None => debug!(@grey, "gas used: {}", gas_used),
        }
    }

    DeployOutcome::Deployed {
        name: factory.name().to_string(),
        address,
        contract,
    }
}

/// Gas estimate for a deployment, without sending it.
#[derive(Debug, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub gas_price_wei: u128,
}

impl GasEstimate {
    pub fn total_cost(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.gas_price_wei)
    }

    pub fn print(&self) {
        greyln!("estimates");
        greyln!("deployment tx gas: {}", self.gas.debug_lavender());
        greyln!("gas price: {}", format_gas_price(self.gas_price_wei));
        greyln!("deployment tx total cost: {}", format_fee(self.total_cost()));
    }
}

/// Estimates deployment gas for the configured contract.
pub async fn estimate_gas<P: Provider>(
    backend: &RpcBackend<P>,
    signer: Address,
    config: &DeploymentConfig,
) -> crate::Result<GasEstimate> {
    let factory = backend
        .contract_factory(&config.contract_name, signer)
        .await?;
    let req = DeploymentRequest::new(&factory, config.gas_price_wei);
    let gas = req.estimate_gas(backend.provider()).await?;
    let gas_price_wei = req.gas_price(backend.provider()).await?;
    Ok(GasEstimate { gas, gas_price_wei })
}
