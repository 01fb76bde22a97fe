use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use borsh::{BorshDeserialize, BorshSerialize};
use jmt::storage::{LeafNode, Node, NodeBatch, NodeKey, TreeReader};
use jmt::{JellyfishMerkleTree, KeyHash, OwnedValue, Version};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB};
use sha2::Sha256;

use crate::config::Config;
use crate::internal_cache::OrderedReadsAndWrites;
use crate::storage::{Storage, StorageKey, StorageValue};

const DB_PATH_SUFFIX: &str = "state";

/// `NodeKey -> Node`
const JMT_NODES: &str = "jmt_nodes";
/// `(KeyHash, Version) -> Option<Value>`. Versions are big endian so that a
/// reverse seek from `(key_hash, v)` lands on the latest write at or before `v`.
const JMT_VALUES: &str = "jmt_values";
/// `LATEST_VERSION_KEY -> Version`
const METADATA: &str = "metadata";
const LATEST_VERSION_KEY: &[u8] = b"latest_version";

const KEY_HASH_LEN: usize = 32;

fn gen_rocksdb_options() -> Options {
    let mut db_opts = Options::default();
    db_opts.set_max_open_files(5000);
    db_opts.set_max_total_wal_size(1u64 << 30);
    db_opts.set_max_background_jobs(16);
    db_opts.create_if_missing(true);
    db_opts.create_missing_column_families(true);
    db_opts.set_atomic_flush(true);
    db_opts
}

fn table<'a>(db: &'a DB, name: &str) -> anyhow::Result<&'a ColumnFamily> {
    db.cf_handle(name)
        .with_context(|| format!("Column family {name} is missing"))
}

fn value_key(key_hash: KeyHash, version: Version) -> Vec<u8> {
    let mut key = Vec::with_capacity(KEY_HASH_LEN + std::mem::size_of::<Version>());
    key.extend_from_slice(&key_hash.0);
    key.extend_from_slice(&version.to_be_bytes());
    key
}

/// Jellyfish Merkle tree view over the database tables.
struct TreeTables<'a>(&'a DB);

impl<'a> TreeTables<'a> {
    /// Puts the nodes and values of a tree update into `batch`.
    fn stage(&self, node_batch: &NodeBatch, batch: &mut WriteBatch) -> anyhow::Result<()> {
        let nodes = table(self.0, JMT_NODES)?;
        for (node_key, node) in node_batch.nodes() {
            batch.put_cf(nodes, node_key.try_to_vec()?, node.try_to_vec()?);
        }
        let values = table(self.0, JMT_VALUES)?;
        for ((version, key_hash), value) in node_batch.values() {
            batch.put_cf(values, value_key(*key_hash, *version), value.try_to_vec()?);
        }
        Ok(())
    }
}

impl<'a> TreeReader for TreeTables<'a> {
    fn get_node_option(&self, node_key: &NodeKey) -> anyhow::Result<Option<Node>> {
        self.0
            .get_cf(table(self.0, JMT_NODES)?, node_key.try_to_vec()?)?
            .map(|bytes| Node::try_from_slice(&bytes))
            .transpose()
            .map_err(Into::into)
    }

    fn get_value_option(
        &self,
        max_version: Version,
        key_hash: KeyHash,
    ) -> anyhow::Result<Option<OwnedValue>> {
        let seek_key = value_key(key_hash, max_version);
        let mut iter = self.0.iterator_cf(
            table(self.0, JMT_VALUES)?,
            IteratorMode::From(&seek_key, Direction::Reverse),
        );
        match iter.next() {
            Some(entry) => {
                let (found_key, value) = entry?;
                if found_key.len() == seek_key.len() && found_key[..KEY_HASH_LEN] == key_hash.0 {
                    Ok(Option::<OwnedValue>::try_from_slice(&value)?)
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    fn get_rightmost_leaf(&self) -> anyhow::Result<Option<(NodeKey, LeafNode)>> {
        anyhow::bail!("Rightmost leaf lookups are not supported by the ledger storage")
    }
}

#[derive(Debug, Clone, Copy)]
struct Committed {
    version: Version,
    root: [u8; 32],
}

/// A [`Storage`] backed by RocksDB that authenticates the state with a
/// Jellyfish Merkle tree. Every commit creates a new tree version.
///
/// RocksDB locks the directory while it is open, so a second storage on the
/// same directory, in this process or any other, fails to open until every
/// clone of the first one is dropped.
#[derive(Clone)]
pub struct LedgerStorage {
    db: Arc<DB>,
    // Also serializes commits.
    committed: Arc<Mutex<Committed>>,
    // Declared after `db` so that the database closes before its directory is removed.
    #[cfg(any(test, feature = "temp"))]
    _tempdir: Option<Arc<tempfile::TempDir>>,
}

impl std::fmt::Debug for LedgerStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStorage")
            .field("path", &self.db.path())
            .field("committed", &*self.lock_committed())
            .finish()
    }
}

impl LedgerStorage {
    /// Opens the storage kept under the given directory, creating it if needed.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref().join(DB_PATH_SUFFIX);
        let tables = [JMT_NODES, JMT_VALUES, METADATA]
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()));
        let db = DB::open_cf_descriptors(&gen_rocksdb_options(), &path, tables).with_context(
            || {
                format!(
                    "Failed to open ledger storage at {}, is another process using it?",
                    path.display()
                )
            },
        )?;

        let committed = Self::load_committed(&db)?;
        tracing::debug!(
            path = %path.display(),
            version = committed.version,
            root = hex::encode(committed.root),
            "Opened ledger storage"
        );
        Ok(Self {
            db: Arc::new(db),
            committed: Arc::new(Mutex::new(committed)),
            #[cfg(any(test, feature = "temp"))]
            _tempdir: None,
        })
    }

    /// A storage living in a fresh temporary directory, removed when the last
    /// clone is dropped.
    #[cfg(any(test, feature = "temp"))]
    pub fn temporary() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create a temporary directory");
        let mut storage = Self::with_path(dir.path()).expect("Failed to open temporary storage");
        storage._tempdir = Some(Arc::new(dir));
        storage
    }

    fn load_committed(db: &DB) -> anyhow::Result<Committed> {
        let metadata = table(db, METADATA)?;
        let version = match db.get_cf(metadata, LATEST_VERSION_KEY)? {
            Some(bytes) => {
                let bytes: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .context("Corrupted latest version in ledger storage")?;
                Version::from_be_bytes(bytes)
            }
            None => {
                // The tree needs a root node at version 0 before its first update.
                let tables = TreeTables(db);
                let (_, tree_update) = JellyfishMerkleTree::<_, Sha256>::new(&tables)
                    .put_value_set(Vec::<(KeyHash, Option<OwnedValue>)>::new(), 0)?;
                let mut batch = WriteBatch::default();
                tables.stage(&tree_update.node_batch, &mut batch)?;
                batch.put_cf(metadata, LATEST_VERSION_KEY, 0u64.to_be_bytes());
                db.write(batch)?;
                0
            }
        };

        let root = JellyfishMerkleTree::<_, Sha256>::new(&TreeTables(db))
            .get_root_hash(version)
            .with_context(|| format!("Missing state root for version {version}"))?;
        Ok(Committed {
            version,
            root: root.0,
        })
    }

    fn lock_committed(&self) -> MutexGuard<'_, Committed> {
        // `Committed` is replaced in a single assignment after the batch is written.
        self.committed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for LedgerStorage {
    type RuntimeConfig = Config;

    fn with_config(config: Self::RuntimeConfig) -> Result<Self, anyhow::Error> {
        Self::with_path(config.path.as_path())
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        let version = self.lock_committed().version;
        let key_hash = KeyHash::with::<Sha256>(key.as_ref());
        match TreeTables(&self.db).get_value_option(version, key_hash) {
            Ok(value) => value.map(Into::into),
            // It is ok to panic here, we assume the db is available and consistent.
            Err(e) => panic!("Unable to read value from db: {e}"),
        }
    }

    fn get_state_root(&self) -> [u8; 32] {
        self.lock_committed().root
    }

    fn commit(&self, state_accesses: &OrderedReadsAndWrites) -> Result<[u8; 32], anyhow::Error> {
        let mut committed = self.lock_committed();
        let tables = TreeTables(&self.db);

        let mut value_set = Vec::with_capacity(state_accesses.ordered_writes.len());
        for (key, value) in &state_accesses.ordered_writes {
            let key_hash = KeyHash::with::<Sha256>(key.as_ref());
            match value {
                Some(value) => value_set.push((key_hash, Some(value.value().to_vec()))),
                None => {
                    // Deleting a key the tree never held leaves the state unchanged.
                    if tables
                        .get_value_option(committed.version, key_hash)?
                        .is_some()
                    {
                        value_set.push((key_hash, None));
                    }
                }
            }
        }
        if value_set.is_empty() {
            return Ok(committed.root);
        }

        let next_version = committed.version + 1;
        let (root, tree_update) = JellyfishMerkleTree::<_, Sha256>::new(&tables)
            .put_value_set(value_set, next_version)?;

        let mut batch = WriteBatch::default();
        tables.stage(&tree_update.node_batch, &mut batch)?;
        batch.put_cf(
            table(&self.db, METADATA)?,
            LATEST_VERSION_KEY,
            next_version.to_be_bytes(),
        );
        let mut write_options = rocksdb::WriteOptions::default();
        write_options.set_sync(true);
        self.db
            .write_opt(batch, &write_options)
            .context("Failed to write state update")?;

        *committed = Committed {
            version: next_version,
            root: root.0,
        };
        tracing::debug!(
            version = next_version,
            writes = state_accesses.ordered_writes.len(),
            root = hex::encode(root.0),
            "Committed state"
        );
        Ok(root.0)
    }

    fn is_empty(&self) -> bool {
        self.lock_committed().version == 0
    }
}
