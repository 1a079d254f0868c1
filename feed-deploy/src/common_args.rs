// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    network::EthereumWallet,
    primitives::FixedBytes,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use eyre::{eyre, Context};
use feed_tools::core::network::{DeployConfigFile, NetworkConfig, NetworkError};

use crate::utils::decode0x;

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long, env = "PRIVATE_KEY_PATH")]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long, env = "KEYSTORE_PATH")]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long, env = "KEYSTORE_PASSWORD_PATH")]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    /// Load the deployer's signing key from the first configured source.
    pub fn build_signer(&self) -> eyre::Result<PrivateKeySigner> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                return Err(eyre!("empty private key"));
            }
            return signer_from_hex(key);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return signer_from_hex(key);
        }

        let keystore = self.keystore_path.as_ref().ok_or(eyre!(
            "no signer configured: set PRIVATE_KEY, PRIVATE_KEY_PATH or KEYSTORE_PATH"
        ))?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;

        Ok(LocalSigner::decrypt_keystore(keystore, password)?)
    }
}

fn signer_from_hex(key: impl AsRef<str>) -> eyre::Result<PrivateKeySigner> {
    let bytes = decode0x(key)?;
    if bytes.len() != 32 {
        return Err(eyre!("private key must be 32 bytes, got {}", bytes.len()));
    }
    let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(bytes.as_slice());
    Ok(PrivateKeySigner::from_bytes(&priv_key_bytes)?)
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Network to deploy to, as named in the config file
    #[arg(long, env = "DEPLOY_NETWORK")]
    network: Option<String>,
    /// RPC endpoint, overriding the selected network's url
    #[arg(short, long, env = "DEPLOY_RPC_URL")]
    rpc_url: Option<String>,
    /// Network config file [default: Deploy.toml, if present]
    #[arg(long, env = "DEPLOY_CONFIG")]
    config: Option<PathBuf>,
    /// Directory holding compiled contract artifacts, overriding the network's
    #[arg(long, env = "DEPLOY_ARTIFACTS")]
    artifacts: Option<PathBuf>,
}

impl ProviderArgs {
    /// Resolve the selected network, applying command line overrides.
    pub fn network(&self) -> Result<(String, NetworkConfig), NetworkError> {
        let file = DeployConfigFile::load(self.config.as_deref())?;
        let (name, mut network) = file.network(self.network.as_deref())?;
        if let Some(url) = &self.rpc_url {
            network.url = url.clone();
        }
        if let Some(artifacts) = &self.artifacts {
            network.artifacts = artifacts.clone();
        }
        Ok((name, network))
    }

    pub async fn build_provider(&self, network: &NetworkConfig) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new().connect(&network.url).await?;
        Ok(provider)
    }

    pub async fn build_provider_with_wallet(
        &self,
        network: &NetworkConfig,
        signer: PrivateKeySigner,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        let signer = signer.with_chain_id(network.chain_id);
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::new(signer))
            .connect(&network.url)
            .await?;
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn auth(private_key: Option<&str>) -> AuthArgs {
        AuthArgs {
            private_key_path: None,
            private_key: private_key.map(str::to_string),
            keystore_path: None,
            keystore_password_path: None,
        }
    }

    #[test]
    fn signer_from_private_key() {
        let signer = auth(Some(KEY)).build_signer().unwrap();
        assert_eq!(
            signer.address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn signer_from_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        fs::write(&path, format!("{KEY}\n")).unwrap();
        let args = AuthArgs {
            private_key_path: Some(path),
            ..auth(None)
        };
        assert!(args.build_signer().is_ok());
    }

    #[test]
    fn rejects_bad_keys() {
        assert!(auth(Some("")).build_signer().is_err());
        assert!(auth(Some("0x1234")).build_signer().is_err());
        let err = auth(None).build_signer().unwrap_err();
        assert!(err.to_string().starts_with("no signer configured"));
    }

    #[test]
    fn rpc_url_overrides_network() {
        let args = ProviderArgs {
            network: None,
            rpc_url: Some("http://127.0.0.1:9545".to_string()),
            config: None,
            artifacts: Some("out".into()),
        };
        let (name, network) = args.network().unwrap();
        assert_eq!(name, "localhost");
        assert_eq!(network.url, "http://127.0.0.1:9545");
        assert_eq!(network.artifacts, PathBuf::from("out"));
    }
}
