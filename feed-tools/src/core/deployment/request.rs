// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment transaction for a contract factory

use alloy::{
    network::TransactionBuilder,
    primitives::U256,
    providers::Provider,
    rpc::types::TransactionRequest,
};

use super::{DeployedContract, DeploymentError};
use crate::{
    core::factory::ContractFactory,
    utils::{color::DebugColor, format_gas_price},
};

/// Deployment transaction request for a contract factory
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    gas_price_wei: Option<u128>,
}

impl DeploymentRequest {
    pub fn new(factory: &ContractFactory, gas_price_wei: Option<u128>) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(factory.signer())
                .with_deploy_code(factory.bytecode().to_vec()),
            gas_price_wei,
        }
    }

    pub fn tx(&self) -> &TransactionRequest {
        &self.tx
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        provider
            .estimate_gas(self.tx.clone())
            .await
            .or(Err(DeploymentError::GasEstimationFailure))
    }

    /// The override if one is set, the node's current gas price otherwise.
    pub async fn gas_price(&self, provider: &impl Provider) -> Result<u128, DeploymentError> {
        match self.gas_price_wei {
            Some(wei) => Ok(wei),
            None => Ok(provider.get_gas_price().await?),
        }
    }

    /// Sends the deployment, waiting for `confirmations` blocks unless it is zero.
    pub async fn exec(
        self,
        confirmations: u64,
        provider: &impl Provider,
    ) -> Result<DeployedContract, DeploymentError> {
        let gas = self.estimate_gas(provider).await?;
        let gas_price = self.gas_price(provider).await?;
        debug!(@grey, "deployment gas: {}, gas price: {}", gas, format_gas_price(gas_price));

        let sender = self.tx.from.unwrap_or_default();
        let balance = provider
            .get_balance(sender)
            .await
            .or(Err(DeploymentError::FailedToGetBalance))?;
        let cost = U256::from(gas) * U256::from(gas_price);
        if balance < cost {
            return Err(DeploymentError::NotEnoughFunds {
                from_address: sender,
                balance,
                cost,
            });
        }
        let nonce = provider.get_transaction_count(sender).pending().await?;

        let tx = self.tx.with_gas_limit(gas).with_gas_price(gas_price).with_nonce(nonce);
        let pending = provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        if confirmations == 0 {
            return Ok(DeployedContract::Submitted {
                tx_hash,
                sender,
                nonce,
            });
        }

        let receipt = pending
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await
            .or(Err(DeploymentError::FailedToComplete { tx_hash }))?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        Ok(DeployedContract::Confirmed {
            tx_hash,
            contract_address: receipt.contract_address,
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, TxKind};

    use super::*;
    use crate::core::{
        artifact::{
            tests::{artifact_json, CREATION_CODE},
            Artifact,
        },
        deployment::GAS_PRICE_OVERRIDE_WEI,
    };

    #[test]
    fn builds_create_transaction_from_signer() {
        let signer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let artifact: Artifact =
            serde_json::from_str(&artifact_json("SocialFeed", CREATION_CODE)).unwrap();
        let factory = ContractFactory::from_artifact(artifact, signer).unwrap();

        let req = DeploymentRequest::new(&factory, Some(GAS_PRICE_OVERRIDE_WEI));
        assert_eq!(req.tx().from, Some(signer));
        assert_eq!(req.tx().to, Some(TxKind::Create));
        assert_eq!(
            req.tx().input.input().map(|input| input.to_vec()),
            Some(factory.bytecode().to_vec())
        );
        assert_eq!(req.gas_price_wei, Some(25_000_000_000));
    }
}
