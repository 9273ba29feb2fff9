//! Loading of compiled contract artifacts.
//!
//! Both the forge (`out/<Name>.sol/<Name>.json`, bytecode under `bytecode.object`)
//! and hardhat (`<Name>.json`, bytecode as a hex string) layouts are supported

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    constants::{JSON_EXTENSION, SOLIDITY_EXTENSION},
    errors::DeployError,
};

/// The parts of a compilation artifact needed to deploy a contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// The contract ABI
    pub abi: Value,
    /// The creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

/// The bytecode field differs between toolchains
#[derive(Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    /// Hardhat stores the hex string directly
    Hex(Bytes),
    /// Forge nests it under `object`
    Object { object: Bytes },
}

/// The on-disk artifact format
#[derive(Deserialize)]
struct ArtifactFile {
    abi: Value,
    bytecode: BytecodeField,
}

impl Artifact {
    /// Parse an artifact from its JSON contents
    pub fn from_json(contents: &str) -> Result<Self, DeployError> {
        let file: ArtifactFile = serde_json::from_str(contents)
            .map_err(|e| DeployError::ArtifactParsing(e.to_string()))?;

        let bytecode = match file.bytecode {
            BytecodeField::Hex(b) | BytecodeField::Object { object: b } => b,
        };
        if bytecode.is_empty() {
            return Err(DeployError::ArtifactParsing(
                "artifact has no creation bytecode".to_string(),
            ));
        }

        Ok(Self {
            abi: file.abi,
            bytecode,
        })
    }

    /// Find and load the artifact of `name` under `artifacts_dir`
    pub fn load(artifacts_dir: &Path, name: &str) -> Result<Self, DeployError> {
        let path = find_artifact(artifacts_dir, name).ok_or_else(|| {
            DeployError::ArtifactParsing(format!(
                "no artifact for `{}` under {}",
                name,
                artifacts_dir.display()
            ))
        })?;

        let contents = fs::read_to_string(&path)
            .map_err(|e| DeployError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }
}

/// The candidate artifact paths for `name`, forge layout first
fn find_artifact(artifacts_dir: &Path, name: &str) -> Option<PathBuf> {
    let file_name = format!("{name}.{JSON_EXTENSION}");
    [
        artifacts_dir
            .join(format!("{name}.{SOLIDITY_EXTENSION}"))
            .join(&file_name),
        artifacts_dir.join(&file_name),
    ]
    .into_iter()
    .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use crate::errors::DeployError;

    use super::Artifact;

    #[test]
    fn test_forge_and_hardhat_layouts() {
        let dir = tempfile::tempdir().unwrap();

        let forge_dir = dir.path().join("FundMe.sol");
        fs::create_dir_all(&forge_dir).unwrap();
        fs::write(
            forge_dir.join("FundMe.json"),
            json!({ "abi": [], "bytecode": { "object": "0x6080" } }).to_string(),
        )
        .unwrap();
        fs::write(
            dir.path().join("MockV3Aggregator.json"),
            json!({ "abi": [{ "type": "constructor" }], "bytecode": "0x60806040" }).to_string(),
        )
        .unwrap();

        let fund_me = Artifact::load(dir.path(), "FundMe").unwrap();
        assert_eq!(fund_me.bytecode.as_ref(), &[0x60, 0x80]);

        let mock = Artifact::load(dir.path(), "MockV3Aggregator").unwrap();
        assert_eq!(mock.bytecode.len(), 4);
        assert_eq!(mock.abi, json!([{ "type": "constructor" }]));
    }

    #[test]
    fn test_missing_and_empty_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Artifact::load(dir.path(), "FundMe"),
            Err(DeployError::ArtifactParsing(_))
        ));

        let res = Artifact::from_json(&json!({ "abi": [], "bytecode": "0x" }).to_string());
        assert!(matches!(res, Err(DeployError::ArtifactParsing(_))));
    }
}
