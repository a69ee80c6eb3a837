//! Order identifier generation.
//!
//! Identifiers are `EC` followed by the last six decimal digits of the creation
//! time in Unix milliseconds. They are short enough to read over the phone but
//! repeat every 1000 seconds, so uniqueness is checked by the intake flow, not here.

use chrono::{DateTime, Utc};

pub const ORDER_ID_PREFIX: &str = "EC";

const ID_MODULUS: i64 = 1_000_000;

/// Derives an order id from a point in time.
pub fn generate_order_id(at: DateTime<Utc>) -> String {
	let millis = at.timestamp_millis().rem_euclid(ID_MODULUS);
	format!("{}{:06}", ORDER_ID_PREFIX, millis)
}
