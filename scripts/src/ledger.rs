//! The deployments ledger, mapping contract names to their deployment records.
//!
//! A record is only ever written once its creating transaction has been
//! confirmed, so a record present in the ledger can be reused as-is

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{constants::JSON_EXTENSION, errors::DeployError, types::DeploymentRecord};

/// A store of deployment records, keyed by contract name
pub trait DeploymentStore {
    /// Get the record for the given contract, if it has been deployed
    fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, DeployError>;

    /// Persist a record, replacing any existing record of the same name
    fn save(&mut self, record: DeploymentRecord) -> Result<(), DeployError>;

    /// Get the record for the given contract, failing if it is absent
    fn require(&self, name: &str) -> Result<DeploymentRecord, DeployError> {
        self.get(name)?.ok_or_else(|| {
            DeployError::ReadDeployments(format!("no deployment found for `{}`", name))
        })
    }
}

/// A ledger held in memory for the duration of a session
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    /// The records
    records: BTreeMap<String, DeploymentRecord>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DeploymentStore for InMemoryStore {
    fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, DeployError> {
        Ok(self.records.get(name).cloned())
    }

    fn save(&mut self, record: DeploymentRecord) -> Result<(), DeployError> {
        self.records.insert(record.name.clone(), record);
        Ok(())
    }
}

/// A ledger persisted as a single JSON file per network,
/// `<deployments_dir>/<network>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// The path of the ledger file
    path: PathBuf,
    /// The records read from the file, kept in sync with it on every write
    records: BTreeMap<String, DeploymentRecord>,
}

impl JsonFileStore {
    /// Open the ledger of `network` under `deployments_dir`.
    ///
    /// A missing file is an empty ledger; it is created on the first write
    pub fn open(deployments_dir: &Path, network: &str) -> Result<Self, DeployError> {
        let path = deployments_dir.join(format!("{network}.{JSON_EXTENSION}"));
        Self::open_file(path)
    }

    /// Open the ledger at the given file path
    pub fn open_file(path: PathBuf) -> Result<Self, DeployError> {
        let records = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| DeployError::ReadDeployments(format!("{}: {}", path.display(), e)))?;
            serde_json::from_str(&contents)
                .map_err(|e| DeployError::ReadDeployments(format!("{}: {}", path.display(), e)))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, records })
    }

    /// The path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the in-memory records back to disk
    fn flush(&self) -> Result<(), DeployError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DeployError::WriteDeployments(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(&self.records)
            .map_err(|e| DeployError::WriteDeployments(e.to_string()))?;
        fs::write(&self.path, contents)
            .map_err(|e| DeployError::WriteDeployments(format!("{}: {}", self.path.display(), e)))
    }
}

impl DeploymentStore for JsonFileStore {
    fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, DeployError> {
        Ok(self.records.get(name).cloned())
    }

    fn save(&mut self, record: DeploymentRecord) -> Result<(), DeployError> {
        self.records.insert(record.name.clone(), record);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy_primitives::Address;
    use serde_json::json;

    use crate::{errors::DeployError, types::DeploymentRecord};

    use super::{DeploymentStore, InMemoryStore, JsonFileStore};

    fn record(name: &str, last_byte: u8) -> DeploymentRecord {
        DeploymentRecord {
            name: name.to_string(),
            address: Address::with_last_byte(last_byte),
            abi: json!([]),
            args: vec![],
            constructor_args: Default::default(),
            transaction_hash: None,
            confirmations: 1,
        }
    }

    #[test]
    fn test_in_memory_replaces_by_name() {
        let mut store = InMemoryStore::new();
        store.save(record("FundMe", 1)).unwrap();
        store.save(record("FundMe", 2)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.require("FundMe").unwrap().address, Address::with_last_byte(2));
        assert!(matches!(
            store.require("MockV3Aggregator"),
            Err(DeployError::ReadDeployments(_))
        ));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = JsonFileStore::open(dir.path(), "sepolia").unwrap();
        assert!(store.get("FundMe").unwrap().is_none());
        store.save(record("FundMe", 7)).unwrap();
        assert_eq!(store.path(), dir.path().join("sepolia.json"));

        let reopened = JsonFileStore::open(dir.path(), "sepolia").unwrap();
        assert_eq!(reopened.get("FundMe").unwrap(), Some(record("FundMe", 7)));

        // Ledgers are per network
        let other = JsonFileStore::open(dir.path(), "localhost").unwrap();
        assert!(other.get("FundMe").unwrap().is_none());
    }

    #[test]
    fn test_file_store_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deployments").join("nested");

        let mut store = JsonFileStore::open(&nested, "anvil").unwrap();
        store.save(record("MockV3Aggregator", 3)).unwrap();
        assert!(nested.join("anvil.json").exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_ledger() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sepolia.json"), "not json").unwrap();

        let res = JsonFileStore::open(dir.path(), "sepolia");
        assert!(matches!(res, Err(DeployError::ReadDeployments(_))));
    }
}
