//! Order record types for the couture order system.
//!
//! An order is created once by the intake flow and afterwards only read. Its
//! status moves through a fixed linear lifecycle that is advanced outside of
//! this system; the types here only describe a snapshot of it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{CostumeType, Measurements};

/// A customer's garment request and its fulfillment state.
///
/// Serialized with camelCase field names; measurements sit at the top level of
/// the object next to the customer fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Identifier of the form `EC` followed by six digits.
	pub order_id: String,
	pub full_name: String,
	pub email: String,
	pub phone: String,
	pub address: String,
	pub costume_type: CostumeType,
	#[serde(flatten)]
	pub measurements: Measurements,
	#[serde(default)]
	pub special_requests: String,
	/// Preferred delivery date. Advisory only.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "deserialize_delivery_date"
	)]
	pub delivery_date: Option<NaiveDate>,
	/// Reference image picked during intake. Lives only as long as the process.
	#[serde(skip)]
	pub sample_image: Option<SampleImageRef>,
	pub status: OrderStatus,
	pub created_at: DateTime<Utc>,
}

/// Orders compare equal on their persisted attributes; the session-only
/// sample image reference is ignored.
impl PartialEq for Order {
	fn eq(&self, other: &Self) -> bool {
		self.order_id == other.order_id
			&& self.full_name == other.full_name
			&& self.email == other.email
			&& self.phone == other.phone
			&& self.address == other.address
			&& self.costume_type == other.costume_type
			&& self.measurements == other.measurements
			&& self.special_requests == other.special_requests
			&& self.delivery_date == other.delivery_date
			&& self.status == other.status
			&& self.created_at == other.created_at
	}
}

impl Eq for Order {}

/// Accepts a missing value, `null`, an empty string, or a `YYYY-MM-DD` date.
fn deserialize_delivery_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw: Option<String> = Option::deserialize(deserializer)?;
	match raw.as_deref().map(str::trim) {
		None | Some("") => Ok(None),
		Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
			.map(Some)
			.map_err(serde::de::Error::custom),
	}
}

/// Handle to a locally selected reference image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleImageRef(PathBuf);

impl SampleImageRef {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self(path.into())
	}

	pub fn path(&self) -> &Path {
		&self.0
	}
}

/// Status of an order in its fulfillment lifecycle.
///
/// The five known statuses are totally ordered. A stored value outside that
/// set is kept as [`OrderStatus::Unrecognized`] instead of failing the load so
/// the rest of the collection stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
	/// Order has been received and is being reviewed.
	Received,
	/// Garment is being crafted.
	InProgress,
	/// Garment is finished and waiting to ship.
	Ready,
	/// Order is in transit.
	Shipped,
	/// Order reached the customer.
	Delivered,
	/// A stored value that is not one of the lifecycle statuses.
	Unrecognized(String),
}

impl OrderStatus {
	/// The lifecycle in progression order.
	pub const LIFECYCLE: [OrderStatus; 5] = [
		OrderStatus::Received,
		OrderStatus::InProgress,
		OrderStatus::Ready,
		OrderStatus::Shipped,
		OrderStatus::Delivered,
	];

	pub fn as_str(&self) -> &str {
		match self {
			OrderStatus::Received => "received",
			OrderStatus::InProgress => "in-progress",
			OrderStatus::Ready => "ready",
			OrderStatus::Shipped => "shipped",
			OrderStatus::Delivered => "delivered",
			OrderStatus::Unrecognized(raw) => raw,
		}
	}

	/// Index of this status in [`OrderStatus::LIFECYCLE`].
	pub fn position(&self) -> Option<usize> {
		Self::LIFECYCLE.iter().position(|status| status == self)
	}

	/// Badge text: first dash replaced by a space, upper-cased ("IN PROGRESS").
	pub fn badge_label(&self) -> String {
		self.as_str().replacen('-', " ", 1).to_uppercase()
	}
}

impl From<&str> for OrderStatus {
	fn from(value: &str) -> Self {
		match value {
			"received" => OrderStatus::Received,
			"in-progress" => OrderStatus::InProgress,
			"ready" => OrderStatus::Ready,
			"shipped" => OrderStatus::Shipped,
			"delivered" => OrderStatus::Delivered,
			other => OrderStatus::Unrecognized(other.to_string()),
		}
	}
}

impl From<String> for OrderStatus {
	fn from(value: String) -> Self {
		OrderStatus::from(value.as_str())
	}
}

impl From<OrderStatus> for String {
	fn from(status: OrderStatus) -> Self {
		match status {
			OrderStatus::Unrecognized(raw) => raw,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
