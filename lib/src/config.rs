// lib/src/config.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use models::errors::RepoResult;

use crate::memory::MemoryGraphStore;
use crate::store::GraphStore;

/// Which backing engine to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreEngineKind {
    #[default]
    InMemory,
}

/// Store configuration, deserializable from an application config file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub engine: StoreEngineKind,
}

/// Opens the configured store and returns it behind the shared seam.
pub fn open_store(config: &StoreConfig) -> RepoResult<Arc<dyn GraphStore>> {
    match config.engine {
        StoreEngineKind::InMemory => {
            info!("Opening in-memory graph store");
            Ok(Arc::new(MemoryGraphStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_in_memory_engine() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.engine, StoreEngineKind::InMemory);
        assert!(open_store(&config).is_ok());
    }

    #[test]
    fn should_parse_engine_kind_from_config() {
        let config: StoreConfig = serde_json::from_str(r#"{"engine":"in_memory"}"#).unwrap();
        assert_eq!(config.engine, StoreEngineKind::InMemory);
    }
}
