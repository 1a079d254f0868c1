// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::io;

use alloy::{providers::Provider, signers::Signer};
use eyre::eyre;
use feed_tools::ops::{self, RpcBackend};

use crate::{
    common_args::{AuthArgs, ProviderArgs},
    error::FeedDeployResult,
};

#[derive(Debug, clap::Args)]
#[group(id = "DeployArgs")]
pub struct Args {
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// Exit with a failure code when the deployment does not complete, instead of only
    /// reporting it.
    #[arg(long, env = "DEPLOY_STRICT")]
    strict: bool,

    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> FeedDeployResult {
    let (name, network) = args.provider.network()?;
    let signer = args.auth.build_signer()?;
    let sender = signer.address();
    log::debug!("deploying to network {name} at {}", network.url);

    if network.chain_id.is_some() {
        let chain_id = args
            .provider
            .build_provider(&network)
            .await?
            .get_chain_id()
            .await?;
        network.check_chain_id(&name, chain_id)?;
    }

    let provider = args
        .provider
        .build_provider_with_wallet(&network, signer)
        .await?;
    let backend = RpcBackend::new(provider, &network.artifacts);
    let mut config = network.deployment_config();
    config.estimate_gas = args.estimate_gas;

    if config.estimate_gas {
        ops::estimate_gas(&backend, sender, &config).await?.print();
        return Ok(());
    }

    let outcome = ops::deploy(&backend, sender, &config).await;
    outcome.report(&mut io::stdout(), &mut io::stderr())?;

    if args.strict && !outcome.is_success() {
        let contract = &config.contract_name;
        return Err(eyre!("deployment of {contract} to {name} did not complete").into());
    }
    Ok(())
}
