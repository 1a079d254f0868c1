// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts are the JSON files a Hardhat compilation writes under
//! `artifacts/<source>/<Name>.json`. Only the fields needed for deployment are read.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::json_abi::JsonAbi;
use serde::Deserialize;

use super::factory::FactoryError;

/// Default directory compiled artifacts are written to.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Marker surrounding unlinked library placeholders in bytecode.
const LINK_PLACEHOLDER: &str = "__$";

/// Link references keyed by source, then by library name.
pub type LinkReferences = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: String,
    #[serde(default)]
    pub link_references: LinkReferences,
}

impl Artifact {
    /// Find and load the artifact for `name` under `dir`.
    pub fn resolve(dir: impl AsRef<Path>, name: &str) -> Result<Self, FactoryError> {
        let path = find_artifact(dir.as_ref(), name)?;
        Self::read(path, name)
    }

    /// Read an artifact file, checking it describes `name`.
    pub fn read(path: impl AsRef<Path>, name: &str) -> Result<Self, FactoryError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| FactoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Artifact =
            serde_json::from_str(&contents).map_err(|source| FactoryError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        if artifact.contract_name != name {
            return Err(FactoryError::NameMismatch {
                expected: name.to_string(),
                found: artifact.contract_name,
            });
        }
        Ok(artifact)
    }

    /// Decode the creation bytecode, rejecting anything that cannot be deployed as-is.
    pub fn creation_code(&self) -> Result<Vec<u8>, FactoryError> {
        let code = self.bytecode.trim();
        let code = code.strip_prefix("0x").unwrap_or(code);
        if code.is_empty() {
            return Err(FactoryError::NotDeployable(self.contract_name.clone()));
        }
        if code.contains(LINK_PLACEHOLDER) || !self.link_references.is_empty() {
            return Err(FactoryError::UnlinkedLibraries {
                name: self.contract_name.clone(),
                libraries: self.library_names(),
            });
        }
        hex::decode(code).map_err(|source| FactoryError::InvalidBytecode {
            name: self.contract_name.clone(),
            source,
        })
    }

    /// Fully qualified name, e.g. `contracts/SocialFeed.sol:SocialFeed`.
    pub fn qualified_name(&self) -> String {
        if self.source_name.is_empty() {
            self.contract_name.clone()
        } else {
            format!("{}:{}", self.source_name, self.contract_name)
        }
    }

    fn library_names(&self) -> Vec<String> {
        self.link_references
            .iter()
            .flat_map(|(source, libs)| libs.keys().map(move |lib| format!("{source}:{lib}")))
            .collect()
    }
}

/// Locate `<name>.json` anywhere below `dir`, ignoring debug files.
fn find_artifact(dir: &Path, name: &str) -> Result<PathBuf, FactoryError> {
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&root)
        .join("**")
        .join(format!("{}.json", glob::Pattern::escape(name)));
    let entries = glob::glob(&pattern.to_string_lossy()).map_err(|err| FactoryError::ArtifactNotFound {
        name: name.to_string(),
        dir: dir.to_path_buf(),
        reason: err.to_string(),
    })?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(FactoryError::ArtifactNotFound {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            reason: "no compiled artifact".to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(FactoryError::AmbiguousArtifact {
            name: name.to_string(),
            candidates,
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const CREATION_CODE: &str = "0x6001600c60003960016000f300";

    pub fn artifact_json(name: &str, bytecode: &str) -> String {
        format!(
            r#"{{
                "_format": "hh-sol-artifact-1",
                "contractName": "{name}",
                "sourceName": "contracts/{name}.sol",
                "abi": [],
                "bytecode": "{bytecode}",
                "deployedBytecode": "0x00",
                "linkReferences": {{}},
                "deployedLinkReferences": {{}}
            }}"#
        )
    }

    pub fn write_artifact(root: &Path, name: &str, contents: &str) -> PathBuf {
        let dir = root.join("contracts").join(format!("{name}.sol"));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.json"));
        fs::write(&path, contents).unwrap();
        fs::write(dir.join(format!("{name}.dbg.json")), "{}").unwrap();
        path
    }

    #[test]
    fn resolves_nested_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "SocialFeed", &artifact_json("SocialFeed", CREATION_CODE));

        let artifact = Artifact::resolve(dir.path(), "SocialFeed").unwrap();
        assert_eq!(artifact.qualified_name(), "contracts/SocialFeed.sol:SocialFeed");
        assert_eq!(
            artifact.creation_code().unwrap(),
            hex::decode(&CREATION_CODE[2..]).unwrap()
        );
    }

    #[test]
    fn artifacts_dir_with_glob_characters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build[1]*");
        write_artifact(&root, "SocialFeed", &artifact_json("SocialFeed", CREATION_CODE));

        let artifact = Artifact::resolve(&root, "SocialFeed").unwrap();
        assert_eq!(artifact.contract_name, "SocialFeed");
    }

    #[test]
    fn missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = Artifact::resolve(dir.path(), "SocialFeed").unwrap_err();
        assert!(matches!(err, FactoryError::ArtifactNotFound { .. }));
    }

    #[test]
    fn ambiguous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let contents = artifact_json("SocialFeed", CREATION_CODE);
        write_artifact(dir.path(), "SocialFeed", &contents);
        write_artifact(&dir.path().join("legacy"), "SocialFeed", &contents);

        match Artifact::resolve(dir.path(), "SocialFeed").unwrap_err() {
            FactoryError::AmbiguousArtifact { candidates, .. } => assert_eq!(candidates.len(), 2),
            err => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "SocialFeed", "{ not json");
        let err = Artifact::resolve(dir.path(), "SocialFeed").unwrap_err();
        assert!(matches!(err, FactoryError::Json { .. }));
    }

    #[test]
    fn mismatched_contract_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path(), "SocialFeed", &artifact_json("Other", CREATION_CODE));
        let err = Artifact::read(path, "SocialFeed").unwrap_err();
        assert!(matches!(err, FactoryError::NameMismatch { .. }));
    }

    #[test]
    fn rejects_undeployable_bytecode() {
        let cases = [
            ("0x", "not deployable"),
            ("", "not deployable"),
            ("0x6001__$1234567890abcdef$__6000", "unlinked libraries"),
            ("0xzz", "invalid bytecode"),
        ];
        for (bytecode, expected) in cases {
            let artifact: Artifact =
                serde_json::from_str(&artifact_json("SocialFeed", bytecode)).unwrap();
            let err = artifact.creation_code().unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{bytecode:?}: {err} does not mention {expected:?}"
            );
        }
    }

    #[test]
    fn reports_link_references() {
        let json = r#"{
            "contractName": "SocialFeed",
            "abi": [],
            "bytecode": "0x6000",
            "linkReferences": {
                "contracts/Lib.sol": { "Lib": [{ "length": 20, "start": 1 }] }
            }
        }"#;
        let artifact: Artifact = serde_json::from_str(json).unwrap();
        match artifact.creation_code().unwrap_err() {
            FactoryError::UnlinkedLibraries { libraries, .. } => {
                assert_eq!(libraries, vec!["contracts/Lib.sol:Lib".to_string()])
            }
            err => panic!("unexpected error: {err}"),
        }
    }
}
