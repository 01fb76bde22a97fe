use std::path::PathBuf;

/// Configuration of a [`crate::LedgerStorage`] bound to the file system.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to folder where storage files will be stored
    pub path: PathBuf,
}
