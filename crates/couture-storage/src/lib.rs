//! Storage module for the couture order system.
//!
//! This module provides a key-value abstraction over the local store that holds
//! the order collection, with in-memory and file-based backends. Each stored
//! value is replaced as a whole, so a write either lands completely or not at all.

use async_trait::async_trait;
use couture_types::{ImplementationRegistry, StorageKey};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested item is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// Backends store opaque bytes under string keys. `set_bytes` must replace the
/// previous value atomically.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes, replacing any previous value.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

/// Type alias for storage factory functions.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// Registry trait for storage implementations.
pub trait StorageRegistry: ImplementationRegistry<Factory = StorageFactory> {}

/// Get all registered storage implementations.
///
/// Returns (name, factory) pairs used to build the configured backend by name.
pub fn get_all_implementations() -> Vec<(&'static str, StorageFactory)> {
	use implementations::{file, memory};

	vec![
		(file::Registry::NAME, file::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}

/// Looks up a registered storage factory by its configuration name.
pub fn find_implementation(name: &str) -> Option<StorageFactory> {
	get_all_implementations()
		.into_iter()
		.find(|(registered, _)| *registered == name)
		.map(|(_, factory)| factory)
}

/// High-level storage service that provides typed operations.
///
/// Wraps a backend and stores values as JSON under typed [`StorageKey`]s.
pub struct StorageService {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageInterface>,
}

impl StorageService {
	/// Creates a new StorageService with the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	/// Serializes a value to JSON and replaces whatever is stored under `key`.
	pub async fn store<T: Serialize + ?Sized>(
		&self,
		key: StorageKey,
		data: &T,
	) -> Result<(), StorageError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(key.as_str(), bytes).await
	}

	/// Retrieves and deserializes the value stored under `key`.
	///
	/// Returns [`StorageError::NotFound`] when nothing is stored and
	/// [`StorageError::Serialization`] when the stored bytes do not decode.
	pub async fn retrieve<T: DeserializeOwned>(&self, key: StorageKey) -> Result<T, StorageError> {
		let bytes = self.backend.get_bytes(key.as_str()).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}
}
