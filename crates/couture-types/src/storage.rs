//! Storage-related types for the couture order system.

/// Storage keys for the collections kept in the local store.
///
/// Replaces string literals at call sites with a typed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Key holding the full order collection as one JSON array.
	Orders,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Orders => "orders",
		}
	}
}
