// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Handles to deployed contracts.

use alloy::primitives::{Address, TxHash};

/// Result of a deployment transaction.
///
/// Where the contract address lives depends on how far the deployment was followed: a
/// confirmed deployment carries it in the receipt, while a submitted one only knows the
/// sender and nonce it will be created from. Use [`deployed_address`] rather than matching
/// on the variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeployedContract {
    Confirmed {
        tx_hash: TxHash,
        contract_address: Option<Address>,
        gas_used: u64,
        block_number: Option<u64>,
    },
    Submitted {
        tx_hash: TxHash,
        sender: Address,
        nonce: u64,
    },
}

impl DeployedContract {
    pub fn tx_hash(&self) -> TxHash {
        match self {
            Self::Confirmed { tx_hash, .. } | Self::Submitted { tx_hash, .. } => *tx_hash,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// Address of the deployed contract, whichever form the handle takes.
pub fn deployed_address(contract: &DeployedContract) -> Option<Address> {
    match contract {
        DeployedContract::Confirmed {
            contract_address, ..
        } => *contract_address,
        DeployedContract::Submitted { sender, nonce, .. } => Some(sender.create(*nonce)),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};

    use super::*;

    const TX_HASH: TxHash =
        b256!("0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060");

    #[test]
    fn confirmed_address_comes_from_receipt() {
        let addr = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let contract = DeployedContract::Confirmed {
            tx_hash: TX_HASH,
            contract_address: Some(addr),
            gas_used: 53_000,
            block_number: Some(1),
        };
        assert_eq!(deployed_address(&contract), Some(addr));
        assert!(contract.is_confirmed());
        assert_eq!(contract.tx_hash(), TX_HASH);
    }

    #[test]
    fn confirmed_without_address() {
        let contract = DeployedContract::Confirmed {
            tx_hash: TX_HASH,
            contract_address: None,
            gas_used: 21_000,
            block_number: None,
        };
        assert_eq!(deployed_address(&contract), None);
    }

    #[test]
    fn submitted_address_is_derived_from_nonce() {
        // First contract created by the default Anvil/Hardhat account.
        let contract = DeployedContract::Submitted {
            tx_hash: TX_HASH,
            sender: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            nonce: 0,
        };
        assert_eq!(
            deployed_address(&contract),
            Some(address!("5FbDB2315678afecb367f032d93F642f64180aa3"))
        );
        assert!(!contract.is_confirmed());
    }
}
