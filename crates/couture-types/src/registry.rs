//! Registry trait for self-registering implementations.
//!
//! Every pluggable backend declares the name it is configured under and the
//! factory that builds it, so the wiring code never hard-codes a backend list.

/// Base trait for implementation registries.
///
/// Each implementation module provides a `Registry` struct implementing this
/// trait. The `NAME` is the key used in TOML, for example `"file"` for
/// `[storage.implementations.file]`.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
