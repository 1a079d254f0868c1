// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Named networks, read from an optional `Deploy.toml`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use super::{
    artifact::DEFAULT_ARTIFACTS_DIR,
    deployment::{DeploymentConfig, GAS_PRICE_OVERRIDE_GWEI},
};
use crate::utils::{color::Color, gwei_to_wei};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "Deploy.toml";

/// Network used when neither the command line nor the config file picks one.
pub const DEFAULT_NETWORK: &str = "localhost";

/// Endpoint of the built-in `localhost` network.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown network {}, available networks: {available:?}", .name.red())]
    UnknownNetwork {
        name: String,
        available: Vec<String>,
    },
    #[error(
        "network {name} expects chain id {}, but the node reports {}",
        .expected.red(),
        .actual.red(),
    )]
    ChainIdMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },
}

/// Contents of a `Deploy.toml` file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeployConfigFile {
    pub default_network: Option<String>,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct NetworkConfig {
    pub url: String,
    pub chain_id: Option<u64>,
    /// Gas price override in gwei; `0` disables the override.
    #[serde(default = "default_gas_price_gwei")]
    pub gas_price_gwei: u64,
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,
}

fn default_gas_price_gwei() -> u64 {
    GAS_PRICE_OVERRIDE_GWEI
}

fn default_confirmations() -> u64 {
    1
}

fn default_artifacts() -> PathBuf {
    DEFAULT_ARTIFACTS_DIR.into()
}

impl NetworkConfig {
    /// The built-in `localhost` network.
    pub fn localhost() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            chain_id: None,
            gas_price_gwei: default_gas_price_gwei(),
            confirmations: default_confirmations(),
            artifacts: default_artifacts(),
        }
    }

    pub fn gas_price_wei(&self) -> Option<u128> {
        match self.gas_price_gwei {
            0 => None,
            gwei => Some(gwei_to_wei(gwei)),
        }
    }

    pub fn deployment_config(&self) -> DeploymentConfig {
        DeploymentConfig {
            gas_price_wei: self.gas_price_wei(),
            confirmations: self.confirmations,
            ..Default::default()
        }
    }

    /// Checks the node serves the chain this network is pinned to, if any.
    pub fn check_chain_id(&self, name: &str, actual: u64) -> Result<(), NetworkError> {
        match self.chain_id {
            Some(expected) if expected != actual => Err(NetworkError::ChainIdMismatch {
                name: name.to_string(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

impl DeployConfigFile {
    /// Read the config at `path`, or the default file if present.
    ///
    /// A missing default file is not an error; an explicitly requested one is.
    pub fn load(path: Option<&Path>) -> Result<Self, NetworkError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            debug!(@grey, "no {} found, using built-in networks", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path).map_err(|source| NetworkError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| NetworkError::Toml { path, source })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Select a network by name, falling back to the file's default, then `localhost`.
    pub fn network(&self, name: Option<&str>) -> Result<(String, NetworkConfig), NetworkError> {
        let name = name
            .or(self.default_network.as_deref())
            .unwrap_or(DEFAULT_NETWORK);
        if let Some(network) = self.networks.get(name) {
            return Ok((name.to_string(), network.clone()));
        }
        if name == DEFAULT_NETWORK {
            return Ok((name.to_string(), NetworkConfig::localhost()));
        }
        let mut available: Vec<String> = self.networks.keys().cloned().collect();
        if !self.networks.contains_key(DEFAULT_NETWORK) {
            available.push(DEFAULT_NETWORK.to_string());
        }
        Err(NetworkError::UnknownNetwork {
            name: name.to_string(),
            available,
        })
    }
}
