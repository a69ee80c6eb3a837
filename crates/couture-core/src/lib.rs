//! Core order handling for the couture order system.
//!
//! This module ties the pieces of the order workflow together: the repository
//! that persists the order collection, the intake flow that turns a measurement
//! form into a stored order, and the status tracker that renders an order's
//! progress. [`OrderDesk`] wires all of them from a [`couture_config::Config`].

pub mod clock;
pub mod desk;
pub mod intake;
pub mod order_id;
pub mod repository;
pub mod tracker;

pub use clock::{Clock, SystemClock};
pub use desk::{DeskError, OrderDesk, TrackedOrder};
pub use intake::{Intake, IntakeError, IntakeForm, Submission, SubmissionReceipt};
pub use order_id::{generate_order_id, ORDER_ID_PREFIX};
pub use repository::{OrderRepository, RepositoryError, StorageOrderRepository};
pub use tracker::{presentation, status_steps, StatusIcon, StatusPresentation, StatusStep};
