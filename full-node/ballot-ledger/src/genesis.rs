use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

/// Reads the JSON genesis config of a module.
pub fn read_genesis_json<P: AsRef<Path>, G: DeserializeOwned>(path: P) -> anyhow::Result<G> {
    let path = path.as_ref();
    let genesis = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read genesis configuration {}", path.display()))?;
    debug!("Genesis config size: {} bytes", genesis.len());
    trace!("Genesis config: {}", &genesis);
    serde_json::from_str(&genesis)
        .with_context(|| format!("Invalid genesis configuration {}", path.display()))
}

#[cfg(test)]
mod tests {
    use ballot_modules_api::default_context::DefaultContext;
    use ballot_modules_api::Address;
    use election_registry::ElectionRegistryConfig;

    use super::*;

    #[test]
    fn test_read_registry_genesis() {
        let root = Address::from([5; 32]);
        let admin = Address::from([6; 32]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");
        std::fs::write(
            &path,
            format!(r#"{{ "root_admin": "{root}", "admins": ["{admin}"] }}"#),
        )
        .unwrap();

        let config: ElectionRegistryConfig<DefaultContext> = read_genesis_json(&path).unwrap();
        assert_eq!(config.root_admin, root);
        assert_eq!(config.admins, vec![admin]);
    }

    #[test]
    fn test_admins_default_to_empty() {
        let root = Address::from([5; 32]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");
        std::fs::write(&path, format!(r#"{{ "root_admin": "{root}" }}"#)).unwrap();

        let config: ElectionRegistryConfig<DefaultContext> = read_genesis_json(&path).unwrap();
        assert!(config.admins.is_empty());
    }

    #[test]
    fn test_rejects_raw_bytes_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");
        std::fs::write(&path, r#"{ "root_admin": "0xaaaa" }"#).unwrap();

        let result: anyhow::Result<ElectionRegistryConfig<DefaultContext>> =
            read_genesis_json(&path);
        assert!(result.is_err());
    }
}
