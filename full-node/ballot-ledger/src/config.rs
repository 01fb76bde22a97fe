use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
pub use ballot_state::config::Config as StorageConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// JSON genesis of the module, applied when the storage is empty.
    pub genesis_path: PathBuf,
}

/// Reads a TOML file into `R`.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let path = path.as_ref();
    let mut contents = String::new();
    {
        let mut file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn create_config_from(content: &str) -> NamedTempFile {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(content.as_bytes()).unwrap();
        config_file
    }

    #[test]
    fn test_correct_config() {
        let config = r#"
            genesis_path = "genesis.json"
            [storage]
            path = "/tmp/ballot"
        "#;

        let config_file = create_config_from(config);

        let config: LedgerConfig = from_toml_path(config_file.path()).unwrap();
        let expected = LedgerConfig {
            storage: StorageConfig {
                path: PathBuf::from("/tmp/ballot"),
            },
            genesis_path: PathBuf::from("genesis.json"),
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_missing_storage_section() {
        let config_file = create_config_from("genesis_path = \"genesis.json\"\n");
        let result: anyhow::Result<LedgerConfig> = from_toml_path(config_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: anyhow::Result<LedgerConfig> = from_toml_path(dir.path().join("absent.toml"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to open"));
    }
}
