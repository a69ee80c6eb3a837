//! Order intake.
//!
//! Checks a submitted measurement form, assigns the order an id, stores it, and
//! returns the confirmation shown to the customer.

use crate::clock::Clock;
use crate::order_id::generate_order_id;
use crate::repository::{OrderRepository, RepositoryError};
use chrono::{Days, Duration, NaiveDate};
use couture_config::IntakeConfig;
use couture_types::{
	measurement_fields, CostumeType, MeasurementKey, Measurements, Order, OrderStatus,
	SampleImageRef,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Errors that reject a submission.
#[derive(Debug, Error)]
pub enum IntakeError {
	#[error("Missing required field: {0}")]
	MissingField(&'static str),
	#[error("Invalid email address: {0}")]
	InvalidEmail(String),
	#[error("Missing measurement '{key}' required for {costume}")]
	MissingMeasurement {
		costume: CostumeType,
		key: MeasurementKey,
	},
	#[error("Delivery date {requested} is before the earliest possible date {earliest}")]
	DeliveryTooSoon {
		requested: NaiveDate,
		earliest: NaiveDate,
	},
	#[error("No free order id after {0} attempts")]
	IdExhausted(u32),
	#[error(transparent)]
	Repository(#[from] RepositoryError),
}

/// A measurement form as the customer filled it in.
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
	pub full_name: String,
	pub email: String,
	pub phone: String,
	pub address: String,
	pub costume_type: Option<CostumeType>,
	/// Everything typed into measurement inputs, including fields that do not
	/// apply to the chosen garment.
	pub measurements: Vec<(MeasurementKey, String)>,
	pub special_requests: String,
	pub delivery_date: Option<NaiveDate>,
	pub sample_image: Option<SampleImageRef>,
}

/// Confirmation shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
	pub order_id: String,
	pub title: String,
	pub message: String,
}

impl SubmissionReceipt {
	fn for_order(order_id: &str) -> Self {
		Self {
			order_id: order_id.to_string(),
			title: "Order Submitted Successfully!".to_string(),
			message: format!(
				"Your order ID is: {}. We'll contact you within 24 hours.",
				order_id
			),
		}
	}
}

/// A stored order together with its receipt.
#[derive(Debug, Clone)]
pub struct Submission {
	pub order: Order,
	pub receipt: SubmissionReceipt,
}

/// Accepts measurement forms and turns them into stored orders.
pub struct Intake {
	repository: Arc<dyn OrderRepository>,
	clock: Arc<dyn Clock>,
	config: IntakeConfig,
}

impl Intake {
	pub fn new(
		repository: Arc<dyn OrderRepository>,
		clock: Arc<dyn Clock>,
		config: IntakeConfig,
	) -> Self {
		Self {
			repository,
			clock,
			config,
		}
	}

	/// Validates and stores a form.
	///
	/// The id is derived from the clock. When it is already taken the next
	/// millisecond is tried, up to `max_id_attempts` candidates; each check
	/// and write is one [`OrderRepository::append_if_absent`] call.
	pub async fn submit(&self, form: IntakeForm) -> Result<Submission, IntakeError> {
		let now = self.clock.now();
		let costume = self.validate(&form, now.date_naive())?;

		let mut order = Order {
			order_id: String::new(),
			full_name: form.full_name,
			email: form.email,
			phone: form.phone,
			address: form.address,
			costume_type: costume,
			measurements: keep_applicable(costume, form.measurements),
			special_requests: form.special_requests,
			delivery_date: form.delivery_date,
			sample_image: form.sample_image,
			status: OrderStatus::Received,
			created_at: now,
		};

		for attempt in 0..self.config.max_id_attempts {
			order.order_id = generate_order_id(now + Duration::milliseconds(i64::from(attempt)));
			if self.repository.append_if_absent(order.clone()).await? {
				tracing::info!(
					order_id = %order.order_id,
					costume = %costume,
					sample_image = ?order.sample_image.as_ref().map(|image| image.path()),
					"Accepted order"
				);
				let receipt = SubmissionReceipt::for_order(&order.order_id);
				return Ok(Submission { order, receipt });
			}
			tracing::warn!(order_id = %order.order_id, attempt, "Order id already taken");
		}

		Err(IntakeError::IdExhausted(self.config.max_id_attempts))
	}

	/// Checks required fields and returns the chosen garment.
	fn validate(&self, form: &IntakeForm, today: NaiveDate) -> Result<CostumeType, IntakeError> {
		require(&form.full_name, "fullName")?;
		require(&form.email, "email")?;
		if !EMAIL_SHAPE.is_match(form.email.trim()) {
			return Err(IntakeError::InvalidEmail(form.email.clone()));
		}
		require(&form.phone, "phone")?;
		require(&form.address, "address")?;

		let costume = form
			.costume_type
			.ok_or(IntakeError::MissingField("costumeType"))?;

		for field in measurement_fields(costume).iter().filter(|f| f.required) {
			let provided = form
				.measurements
				.iter()
				.any(|(key, value)| *key == field.key && !value.trim().is_empty());
			if !provided {
				return Err(IntakeError::MissingMeasurement {
					costume,
					key: field.key,
				});
			}
		}

		if let Some(requested) = form.delivery_date {
			let earliest = today
				.checked_add_days(Days::new(u64::from(self.config.min_lead_days)))
				.unwrap_or(NaiveDate::MAX);
			if requested < earliest {
				return Err(IntakeError::DeliveryTooSoon {
					requested,
					earliest,
				});
			}
		}

		Ok(costume)
	}
}

fn require(value: &str, field: &'static str) -> Result<(), IntakeError> {
	if value.trim().is_empty() {
		Err(IntakeError::MissingField(field))
	} else {
		Ok(())
	}
}

/// Drops blank values and measurements the garment's form does not show.
fn keep_applicable(costume: CostumeType, entered: Vec<(MeasurementKey, String)>) -> Measurements {
	let fields = measurement_fields(costume);
	entered
		.into_iter()
		.filter(|(key, value)| {
			!value.trim().is_empty() && fields.iter().any(|field| field.key == *key)
		})
		.collect()
}
