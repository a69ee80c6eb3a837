//! In-memory storage backend.
//!
//! Keeps values in a map for the lifetime of the process. Used by tests and by
//! configurations that do not need orders to survive a restart.

use crate::{StorageError, StorageFactory, StorageInterface, StorageRegistry};
use async_trait::async_trait;
use couture_types::{ConfigSchema, ImplementationRegistry, Schema, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage implementation.
#[derive(Clone, Default)]
pub struct MemoryStorage {
	/// The in-memory store protected by a read-write lock.
	store: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
	/// Creates a new MemoryStorage instance.
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let store = self.store.read().await;
		store.get(key).cloned().ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.insert(key.to_string(), value);
		Ok(())
	}
}

/// Configuration schema for MemoryStorage. The table must be empty.
pub struct MemoryStorageSchema;

impl ConfigSchema for MemoryStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(vec![], vec![]).validate(config)
	}
}

/// Factory function to create a memory storage backend from configuration.
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	MemoryStorageSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;
	Ok(Box::new(MemoryStorage::new()))
}

/// Registry for the memory storage implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = StorageFactory;

	fn factory() -> Self::Factory {
		create_storage
	}
}

impl StorageRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_basic_operations() {
		let storage = MemoryStorage::new();

		let key = "orders";
		let value = b"[]".to_vec();
		storage.set_bytes(key, value.clone()).await.unwrap();
		assert_eq!(storage.get_bytes(key).await.unwrap(), value);
		assert!(matches!(
			storage.get_bytes("missing").await,
			Err(StorageError::NotFound)
		));
	}

	#[tokio::test]
	async fn test_overwrite_replaces_value() {
		let storage = MemoryStorage::new();
		storage.set_bytes("orders", b"[1]".to_vec()).await.unwrap();
		storage.set_bytes("orders", b"[1,2]".to_vec()).await.unwrap();
		assert_eq!(storage.get_bytes("orders").await.unwrap(), b"[1,2]".to_vec());
	}

	#[tokio::test]
	async fn test_clones_share_state() {
		let storage = MemoryStorage::new();
		let handle = storage.clone();
		storage.set_bytes("orders", b"[]".to_vec()).await.unwrap();
		assert_eq!(handle.get_bytes("orders").await.unwrap(), b"[]".to_vec());
	}

	#[test]
	fn test_factory_rejects_settings() {
		let empty = toml::Value::Table(toml::map::Map::new());
		assert!(create_storage(&empty).is_ok());

		let config: toml::Value = toml::from_str("storage_path = \"/tmp\"").unwrap();
		assert!(matches!(
			create_storage(&config),
			Err(StorageError::Configuration(_))
		));
	}
}
