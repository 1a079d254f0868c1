// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract factories: compiled bytecode bound to the signer that will deploy it.

use std::path::{Path, PathBuf};

use alloy::primitives::Address;

use super::artifact::Artifact;

#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("artifact for contract {name} not found in {}: {reason}", .dir.display())]
    ArtifactNotFound {
        name: String,
        dir: PathBuf,
        reason: String,
    },
    #[error("multiple artifacts found for contract {name}: {candidates:?}")]
    AmbiguousArtifact {
        name: String,
        candidates: Vec<PathBuf>,
    },
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse artifact {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("artifact describes contract {found}, expected {expected}")]
    NameMismatch { expected: String, found: String },
    #[error("contract {0} is not deployable (abstract contract or interface)")]
    NotDeployable(String),
    #[error("contract {name} has unlinked libraries: {libraries:?}")]
    UnlinkedLibraries { name: String, libraries: Vec<String> },
    #[error("contract {name} has invalid bytecode: {source}")]
    InvalidBytecode {
        name: String,
        source: hex::FromHexError,
    },
    #[error("contract {name} constructor expects {count} argument(s), none are supplied")]
    ConstructorArguments { name: String, count: usize },
    #[error("cannot bind contract factory to the zero address")]
    InvalidSigner,
}

/// Deployable contract code bound to a signer.
#[derive(Clone, Debug)]
pub struct ContractFactory {
    name: String,
    bytecode: Vec<u8>,
    signer: Address,
}

impl ContractFactory {
    /// Build a factory from a compiled artifact.
    ///
    /// Fails if the artifact cannot be deployed without further input: missing code,
    /// unlinked libraries, or constructor arguments.
    pub fn from_artifact(artifact: Artifact, signer: Address) -> Result<Self, FactoryError> {
        if signer.is_zero() {
            return Err(FactoryError::InvalidSigner);
        }
        let bytecode = artifact.creation_code()?;
        if let Some(constructor) = &artifact.abi.constructor {
            if !constructor.inputs.is_empty() {
                return Err(FactoryError::ConstructorArguments {
                    name: artifact.contract_name,
                    count: constructor.inputs.len(),
                });
            }
        }
        Ok(Self {
            name: artifact.contract_name,
            bytecode,
            signer,
        })
    }

    /// Resolve `name` under an artifacts directory and bind it to `signer`.
    pub fn resolve(
        artifacts_dir: impl AsRef<Path>,
        name: &str,
        signer: Address,
    ) -> Result<Self, FactoryError> {
        let artifact = Artifact::resolve(artifacts_dir, name)?;
        debug!(@grey, "resolved artifact {}", artifact.qualified_name());
        Self::from_artifact(artifact, signer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    pub fn signer(&self) -> Address {
        self.signer
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::core::artifact::tests::{artifact_json, write_artifact, CREATION_CODE};

    const SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn binds_signer() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "SocialFeed", &artifact_json("SocialFeed", CREATION_CODE));

        let factory = ContractFactory::resolve(dir.path(), "SocialFeed", SIGNER).unwrap();
        assert_eq!(factory.name(), "SocialFeed");
        assert_eq!(factory.signer(), SIGNER);
        assert_eq!(factory.bytecode().len(), 13);
    }

    #[test]
    fn rejects_zero_signer() {
        let artifact: Artifact =
            serde_json::from_str(&artifact_json("SocialFeed", CREATION_CODE)).unwrap();
        let err = ContractFactory::from_artifact(artifact, Address::ZERO).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidSigner));
    }

    #[test]
    fn rejects_constructor_arguments() {
        let json = format!(
            r#"{{
                "contractName": "SocialFeed",
                "abi": [{{
                    "type": "constructor",
                    "stateMutability": "nonpayable",
                    "inputs": [{{ "name": "owner", "type": "address", "internalType": "address" }}]
                }}],
                "bytecode": "{CREATION_CODE}"
            }}"#
        );
        let artifact: Artifact = serde_json::from_str(&json).unwrap();
        let err = ContractFactory::from_artifact(artifact, SIGNER).unwrap_err();
        assert!(matches!(err, FactoryError::ConstructorArguments { count: 1, .. }));
    }

    #[test]
    fn accepts_empty_constructor() {
        let json = format!(
            r#"{{
                "contractName": "SocialFeed",
                "abi": [{{ "type": "constructor", "stateMutability": "nonpayable", "inputs": [] }}],
                "bytecode": "{CREATION_CODE}"
            }}"#
        );
        let artifact: Artifact = serde_json::from_str(&json).unwrap();
        assert!(ContractFactory::from_artifact(artifact, SIGNER).is_ok());
    }
}
