//! Order repository.
//!
//! Orders are kept as one JSON array under the `orders` storage key. Every
//! append loads the array, pushes the new order and writes the whole array
//! back. Reads never fail: an absent or undecodable collection reads as empty,
//! and a single record that does not decode is skipped without hiding the rest.

use async_trait::async_trait;
use couture_storage::{StorageError, StorageService};
use couture_types::{Order, StorageKey};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur while writing to the repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Append-only collection of orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
	/// Adds an order to the end of the collection.
	///
	/// The caller guarantees the order id is not already present.
	async fn append(&self, order: Order) -> Result<(), RepositoryError>;

	/// Adds an order unless one with the same id is already stored.
	///
	/// Returns `false` without writing when the id is taken. The check and the
	/// write happen under the same lock as [`OrderRepository::append`].
	async fn append_if_absent(&self, order: Order) -> Result<bool, RepositoryError>;

	/// Returns every stored order in insertion order.
	async fn load_all(&self) -> Vec<Order>;

	/// Finds the first order whose id matches `id` exactly.
	///
	/// Blank input never matches.
	async fn find_by_id(&self, id: &str) -> Option<Order> {
		if id.trim().is_empty() {
			return None;
		}
		let found = self
			.load_all()
			.await
			.into_iter()
			.find(|order| order.order_id == id);
		tracing::debug!(order_id = %id, found = found.is_some(), "Order lookup");
		found
	}

	/// Returns up to `n` orders, most recently appended first.
	async fn recent(&self, n: usize) -> Vec<Order> {
		if n == 0 {
			return Vec::new();
		}
		self.load_all().await.into_iter().rev().take(n).collect()
	}
}

/// Repository backed by a [`StorageService`].
pub struct StorageOrderRepository {
	storage: Arc<StorageService>,
	/// Serializes the load-push-store sequence of concurrent appends.
	write_lock: Mutex<()>,
}

impl StorageOrderRepository {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self {
			storage,
			write_lock: Mutex::new(()),
		}
	}

	/// Loads the stored records without decoding them into orders.
	///
	/// An absent key or content that is not a JSON array reads as empty.
	/// Backend failures are returned so that an append never overwrites a
	/// collection it could not read.
	async fn load_records(&self) -> Result<Vec<Value>, RepositoryError> {
		match self.storage.retrieve::<Vec<Value>>(StorageKey::Orders).await {
			Ok(records) => Ok(records),
			Err(StorageError::NotFound) => Ok(Vec::new()),
			Err(StorageError::Serialization(e)) => {
				tracing::warn!("Stored order collection is malformed, treating as empty: {}", e);
				Ok(Vec::new())
			},
			Err(e) => Err(e.into()),
		}
	}

	/// Pushes `order` onto the stored records, keeping records that do not
	/// decode exactly as they were.
	async fn push(&self, order: Order, only_if_absent: bool) -> Result<bool, RepositoryError> {
		let _guard = self.write_lock.lock().await;

		let mut records = self.load_records().await?;
		let taken = records
			.iter()
			.any(|record| record_id(record) == Some(order.order_id.as_str()));
		if only_if_absent && taken {
			return Ok(false);
		}

		let record = serde_json::to_value(&order)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;
		records.push(record);
		self.storage.store(StorageKey::Orders, &records).await?;

		tracing::info!(order_id = %order.order_id, total = records.len(), "Stored order");
		Ok(true)
	}
}

fn record_id(record: &Value) -> Option<&str> {
	record.get("orderId").and_then(Value::as_str)
}

/// Decodes each record on its own so one bad record does not hide the others.
fn decode_orders(records: Vec<Value>) -> Vec<Order> {
	records
		.into_iter()
		.enumerate()
		.filter_map(|(index, record)| {
			let order_id = record_id(&record).map(str::to_owned);
			match serde_json::from_value::<Order>(record) {
				Ok(order) => Some(order),
				Err(e) => {
					tracing::warn!(
						index,
						order_id = order_id.as_deref().unwrap_or("<none>"),
						error = %e,
						"Skipping unreadable order record"
					);
					None
				},
			}
		})
		.collect()
}

#[async_trait]
impl OrderRepository for StorageOrderRepository {
	async fn append(&self, order: Order) -> Result<(), RepositoryError> {
		self.push(order, false).await.map(|_| ())
	}

	async fn append_if_absent(&self, order: Order) -> Result<bool, RepositoryError> {
		self.push(order, true).await
	}

	async fn load_all(&self) -> Vec<Order> {
		match self.load_records().await {
			Ok(records) => decode_orders(records),
			Err(e) => {
				tracing::warn!("Failed to load orders, returning none: {}", e);
				Vec::new()
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{DateTime, Duration, TimeZone, Utc};
	use couture_storage::implementations::file::FileStorage;
	use couture_storage::implementations::memory::MemoryStorage;
	use couture_storage::StorageInterface;
	use couture_types::{CostumeType, MeasurementKey, Measurements, OrderStatus};

	fn created(offset_secs: i64) -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap() + Duration::seconds(offset_secs)
	}

	fn order(id: &str, name: &str) -> Order {
		let mut measurements = Measurements::new();
		measurements.set(MeasurementKey::Chest, "40");
		Order {
			order_id: id.to_string(),
			full_name: name.to_string(),
			email: "jane@example.com".to_string(),
			phone: "555-0100".to_string(),
			address: "1 Main St".to_string(),
			costume_type: CostumeType::Suit,
			measurements,
			special_requests: String::new(),
			delivery_date: None,
			sample_image: None,
			status: OrderStatus::Received,
			created_at: created(0),
		}
	}

	fn memory_repository() -> (StorageOrderRepository, Arc<StorageService>) {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		(StorageOrderRepository::new(storage.clone()), storage)
	}

	#[tokio::test]
	async fn test_append_then_find() {
		let (repo, _) = memory_repository();
		let jane = order("EC482193", "Jane Doe");

		repo.append(jane.clone()).await.unwrap();

		let found = repo.find_by_id("EC482193").await.unwrap();
		assert_eq!(found, jane);
		assert_eq!(found.status, OrderStatus::Received);
		assert_eq!(found.costume_type, CostumeType::Suit);
	}

	#[tokio::test]
	async fn test_find_is_exact_and_case_sensitive() {
		let (repo, _) = memory_repository();
		repo.append(order("EC000001", "A")).await.unwrap();

		assert!(repo.find_by_id("ec000001").await.is_none());
		assert!(repo.find_by_id("EC00000").await.is_none());
		assert!(repo.find_by_id(" EC000001").await.is_none());
		assert!(repo.find_by_id("EC999999").await.is_none());
	}

	#[tokio::test]
	async fn test_empty_store_finds_nothing() {
		let (repo, _) = memory_repository();
		for id in ["", "   ", "EC123456", "anything"] {
			assert!(repo.find_by_id(id).await.is_none());
		}
		assert!(repo.load_all().await.is_empty());
	}

	#[tokio::test]
	async fn test_blank_id_never_matches() {
		let (repo, _) = memory_repository();
		repo.append(order("", "No Id")).await.unwrap();
		assert!(repo.find_by_id("").await.is_none());
	}

	#[tokio::test]
	async fn test_find_returns_first_match() {
		let (repo, _) = memory_repository();
		repo.append(order("EC111111", "First")).await.unwrap();
		repo.append(order("EC111111", "Second")).await.unwrap();

		assert_eq!(repo.find_by_id("EC111111").await.unwrap().full_name, "First");
	}

	#[tokio::test]
	async fn test_recent_returns_newest_first() {
		let (repo, _) = memory_repository();
		for i in 1..=7 {
			repo.append(order(&format!("EC00000{}", i), &format!("O{}", i)))
				.await
				.unwrap();
		}

		let names: Vec<_> = repo
			.recent(5)
			.await
			.into_iter()
			.map(|o| o.full_name)
			.collect();
		assert_eq!(names, vec!["O7", "O6", "O5", "O4", "O3"]);
	}

	#[tokio::test]
	async fn test_recent_bounds() {
		let (repo, _) = memory_repository();
		assert!(repo.recent(5).await.is_empty());

		for i in 1..=3 {
			repo.append(order(&format!("EC00000{}", i), &format!("O{}", i)))
				.await
				.unwrap();
		}

		assert!(repo.recent(0).await.is_empty());
		assert_eq!(repo.recent(1).await.len(), 1);
		assert_eq!(repo.recent(3).await.len(), 3);
		let all = repo.recent(10).await;
		assert_eq!(all.len(), 3);
		assert_eq!(all[0].full_name, "O3");
		assert_eq!(all[2].full_name, "O1");
	}

	#[tokio::test]
	async fn test_load_all_is_stable() {
		let (repo, _) = memory_repository();
		repo.append(order("EC000001", "A")).await.unwrap();
		repo.append(order("EC000002", "B")).await.unwrap();

		let first = repo.load_all().await;
		let second = repo.load_all().await;
		assert_eq!(first, second);
		assert_eq!(first.len(), 2);
		assert_eq!(first[0].order_id, "EC000001");
	}

	#[tokio::test]
	async fn test_malformed_store_reads_as_empty() {
		let backend = MemoryStorage::new();
		backend
			.set_bytes("orders", b"{\"orders\": oops".to_vec())
			.await
			.unwrap();
		let repo = StorageOrderRepository::new(Arc::new(StorageService::new(Box::new(
			backend.clone(),
		))));

		assert!(repo.load_all().await.is_empty());
		assert!(repo.find_by_id("EC000001").await.is_none());
		assert!(repo.recent(5).await.is_empty());

		repo.append(order("EC000001", "A")).await.unwrap();
		assert_eq!(repo.load_all().await.len(), 1);
	}

	fn mixed_collection() -> Vec<serde_json::Value> {
		let mut tuxedo = serde_json::to_value(order("EC000003", "Tux")).unwrap();
		tuxedo["costumeType"] = "tuxedo".into();
		let mut undated = serde_json::to_value(order("EC000005", "Undated")).unwrap();
		undated.as_object_mut().unwrap().remove("createdAt");
		let mut odd_date = serde_json::to_value(order("EC000006", "Odd")).unwrap();
		odd_date["deliveryDate"] = "next spring".into();

		vec![
			serde_json::to_value(order("EC000001", "A")).unwrap(),
			serde_json::to_value(order("EC000002", "B")).unwrap(),
			tuxedo,
			undated,
			odd_date,
		]
	}

	#[tokio::test]
	async fn test_undecodable_record_does_not_hide_others() {
		let (repo, storage) = memory_repository();
		storage
			.store(StorageKey::Orders, &mixed_collection())
			.await
			.unwrap();

		let names: Vec<_> = repo
			.load_all()
			.await
			.into_iter()
			.map(|o| o.full_name)
			.collect();
		assert_eq!(names, vec!["A", "B"]);
		assert!(repo.find_by_id("EC000001").await.is_some());
		assert!(repo.find_by_id("EC000003").await.is_none());
		assert_eq!(repo.recent(1).await[0].order_id, "EC000002");
	}

	#[tokio::test]
	async fn test_append_keeps_undecodable_records() {
		let (repo, storage) = memory_repository();
		storage
			.store(StorageKey::Orders, &mixed_collection())
			.await
			.unwrap();

		let new_order = order("EC000004", "D");
		repo.append(new_order.clone()).await.unwrap();

		let raw: Vec<serde_json::Value> = storage.retrieve(StorageKey::Orders).await.unwrap();
		assert_eq!(raw.len(), 6);
		assert_eq!(raw[2]["costumeType"], "tuxedo");
		assert_eq!(raw[4]["deliveryDate"], "next spring");
		assert_eq!(raw[5]["orderId"], "EC000004");

		assert_eq!(repo.find_by_id("EC000004").await, Some(new_order));
		assert!(repo.find_by_id("EC000001").await.is_some());
		assert_eq!(repo.load_all().await.len(), 3);
	}

	#[tokio::test]
	async fn test_append_if_absent_refuses_taken_id() {
		let (repo, storage) = memory_repository();
		storage
			.store(StorageKey::Orders, &mixed_collection())
			.await
			.unwrap();

		assert!(!repo.append_if_absent(order("EC000002", "Again")).await.unwrap());
		assert!(!repo.append_if_absent(order("EC000003", "Tux")).await.unwrap());
		assert!(repo.append_if_absent(order("EC000007", "G")).await.unwrap());

		let raw: Vec<serde_json::Value> = storage.retrieve(StorageKey::Orders).await.unwrap();
		assert_eq!(raw.len(), 6);
		assert_eq!(repo.find_by_id("EC000002").await.unwrap().full_name, "B");
	}

	#[tokio::test]
	async fn test_persisted_layout() {
		let (repo, storage) = memory_repository();
		repo.append(order("EC000001", "A")).await.unwrap();

		let raw: serde_json::Value = storage.retrieve(StorageKey::Orders).await.unwrap();
		let array = raw.as_array().unwrap();
		assert_eq!(array.len(), 1);
		assert_eq!(array[0]["orderId"], "EC000001");
		assert_eq!(array[0]["chest"], "40");
		assert_eq!(array[0]["status"], "received");
	}

	#[tokio::test]
	async fn test_reads_collection_written_by_browser_storefront() {
		let (repo, storage) = memory_repository();
		let legacy = serde_json::json!([{
			"fullName": "Jane Doe", "email": "jane@example.com", "phone": "1",
			"address": "1 Main St", "costumeType": "suit", "chest": "40", "waist": "32",
			"hips": "", "shoulderWidth": "", "sleeveLength": "", "length": "", "neckline": "",
			"inseam": "30", "specialRequests": "", "deliveryDate": "", "sampleImage": null,
			"orderId": "EC482193", "status": "received", "createdAt": "2026-10-19T10:00:00.000Z"
		}]);
		storage.store(StorageKey::Orders, &legacy).await.unwrap();

		let found = repo.find_by_id("EC482193").await.unwrap();
		assert_eq!(found.full_name, "Jane Doe");
		assert_eq!(found.measurements.get(MeasurementKey::Inseam), Some("30"));
		assert_eq!(found.created_at, created(0));
	}

	#[tokio::test]
	async fn test_unknown_status_does_not_hide_collection() {
		let (repo, storage) = memory_repository();
		let mut record = serde_json::to_value(order("EC000009", "A")).unwrap();
		record["status"] = "misplaced".into();
		storage
			.store(StorageKey::Orders, &vec![record])
			.await
			.unwrap();

		let found = repo.find_by_id("EC000009").await.unwrap();
		assert_eq!(found.status, OrderStatus::from("misplaced"));
	}

	#[tokio::test]
	async fn test_file_backed_repository_survives_reopen() {
		let dir = tempfile::tempdir().unwrap();
		let open = || {
			StorageOrderRepository::new(Arc::new(StorageService::new(Box::new(FileStorage::new(
				dir.path(),
			)))))
		};

		open().append(order("EC000001", "A")).await.unwrap();
		open().append(order("EC000002", "B")).await.unwrap();

		let reopened = open();
		assert_eq!(reopened.load_all().await.len(), 2);
		assert_eq!(reopened.recent(1).await[0].order_id, "EC000002");
	}

	#[tokio::test]
	async fn test_concurrent_appends_are_not_lost() {
		let (repo, _) = memory_repository();
		let repo = Arc::new(repo);

		let handles: Vec<_> = (0..20)
			.map(|i| {
				let repo = repo.clone();
				tokio::spawn(async move {
					repo.append(order(&format!("EC{:06}", i), "Concurrent"))
						.await
						.unwrap();
				})
			})
			.collect();
		for handle in handles {
			handle.await.unwrap();
		}

		assert_eq!(repo.load_all().await.len(), 20);
	}

	struct UnreadableStorage;

	#[async_trait]
	impl StorageInterface for UnreadableStorage {
		async fn get_bytes(&self, _key: &str) -> Result<Vec<u8>, StorageError> {
			Err(StorageError::Backend("disk unavailable".into()))
		}

		async fn set_bytes(&self, _key: &str, _value: Vec<u8>) -> Result<(), StorageError> {
			panic!("append must not write after a failed read");
		}
	}

	#[tokio::test]
	async fn test_backend_failure_degrades_reads_and_fails_append() {
		let repo =
			StorageOrderRepository::new(Arc::new(StorageService::new(Box::new(UnreadableStorage))));

		assert!(repo.load_all().await.is_empty());
		assert!(repo.find_by_id("EC000001").await.is_none());

		let result = repo.append(order("EC000001", "A")).await;
		assert!(matches!(
			result,
			Err(RepositoryError::Storage(StorageError::Backend(_)))
		));
		assert!(repo
			.append_if_absent(order("EC000001", "A"))
			.await
			.is_err());
	}
}
