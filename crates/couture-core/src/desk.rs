//! Order desk: the entry point that wires storage, intake and lookup together.

use crate::clock::{Clock, SystemClock};
use crate::intake::{Intake, IntakeError, IntakeForm, Submission};
use crate::repository::{OrderRepository, StorageOrderRepository};
use crate::tracker::{presentation, status_steps, StatusPresentation, StatusStep};
use couture_config::Config;
use couture_storage::{find_implementation, StorageService};
use couture_types::Order;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building an [`OrderDesk`].
#[derive(Debug, Error)]
pub enum DeskError {
	#[error("Configuration error: {0}")]
	Config(String),
}

/// An order together with what the lookup surface draws for it.
#[derive(Debug, Clone)]
pub struct TrackedOrder {
	pub order: Order,
	pub steps: Vec<StatusStep>,
	pub presentation: StatusPresentation,
}

impl From<Order> for TrackedOrder {
	fn from(order: Order) -> Self {
		Self {
			steps: status_steps(&order.status),
			presentation: presentation(&order.status),
			order,
		}
	}
}

/// Intake and lookup over one order repository.
pub struct OrderDesk {
	repository: Arc<dyn OrderRepository>,
	intake: Intake,
	recent_limit: usize,
}

impl OrderDesk {
	/// Builds a desk over the primary storage implementation named in `config`.
	pub fn from_config(config: &Config) -> Result<Self, DeskError> {
		let primary = &config.storage.primary;
		let factory = find_implementation(primary).ok_or_else(|| {
			DeskError::Config(format!("Unknown storage implementation '{}'", primary))
		})?;
		let backend_config = config.storage.primary_config().ok_or_else(|| {
			DeskError::Config(format!(
				"Primary storage '{}' not found in implementations",
				primary
			))
		})?;

		let backend = factory(backend_config).map_err(|e| {
			tracing::error!(
				component = "storage",
				implementation = %primary,
				error = %e,
				"Failed to create storage implementation"
			);
			DeskError::Config(format!(
				"Failed to create storage implementation '{}': {}",
				primary, e
			))
		})?;
		tracing::info!(component = "storage", implementation = %primary, "Loaded");

		let repository = Arc::new(StorageOrderRepository::new(Arc::new(StorageService::new(
			backend,
		))));
		Ok(Self::with_parts(repository, Arc::new(SystemClock), config))
	}

	/// Builds a desk from an existing repository and clock.
	pub fn with_parts(
		repository: Arc<dyn OrderRepository>,
		clock: Arc<dyn Clock>,
		config: &Config,
	) -> Self {
		Self {
			intake: Intake::new(repository.clone(), clock, config.intake.clone()),
			repository,
			recent_limit: config.tracking.recent_limit,
		}
	}

	/// Validates and stores a new order.
	pub async fn submit(&self, form: IntakeForm) -> Result<Submission, IntakeError> {
		self.intake.submit(form).await
	}

	/// Looks up one order by id.
	pub async fn track(&self, order_id: &str) -> Option<TrackedOrder> {
		self.repository
			.find_by_id(order_id)
			.await
			.map(TrackedOrder::from)
	}

	/// Most recent orders, newest first. Uses the configured limit when `n` is `None`.
	pub async fn recent(&self, n: Option<usize>) -> Vec<TrackedOrder> {
		self.repository
			.recent(n.unwrap_or(self.recent_limit))
			.await
			.into_iter()
			.map(TrackedOrder::from)
			.collect()
	}
}
