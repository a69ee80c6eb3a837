//! Common types module for the couture order system.
//!
//! This module defines the domain types shared by every couture crate: the order
//! record and its lifecycle status, garment types and their measurement tables,
//! storage keys, and the configuration validation framework used by pluggable
//! implementations.

/// Garment types and the measurement field table attached to each of them.
pub mod costume;
/// Order record types and the order lifecycle status.
pub mod order;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Storage types for managing persistent data.
pub mod storage;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

pub use costume::*;
pub use order::*;
pub use registry::ImplementationRegistry;
pub use storage::*;
pub use validation::*;
