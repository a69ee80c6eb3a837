//! Plain-text rendering of orders for the terminal.

use couture_core::{StatusStep, SubmissionReceipt, TrackedOrder};
use couture_types::{measurement_fields, CostumeType, Order};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Joins lines into one block with a trailing newline.
fn block(lines: Vec<String>) -> String {
	let mut out = lines.join("\n");
	out.push('\n');
	out
}

pub fn receipt(receipt: &SubmissionReceipt) -> String {
	block(vec![receipt.title.clone(), receipt.message.clone()])
}

pub fn not_found(order_id: &str) -> String {
	block(vec![
		format!("No order found with ID: {}", order_id),
		"Please check your order ID and try again".to_string(),
	])
}

/// Details and progress checklist for a single order.
pub fn order_details(tracked: &TrackedOrder) -> String {
	let order = &tracked.order;
	let mut lines = vec![
		format!(
			"Order Details - {} [{}] ({})",
			order.order_id,
			order.status.badge_label(),
			tracked.presentation.icon
		),
		String::new(),
	];
	lines.extend(customer_section(order));

	if !order.measurements.is_empty() {
		lines.push(String::new());
		lines.push("Measurements".to_string());
		lines.extend(
			order
				.measurements
				.iter()
				.map(|(key, value)| format!("  {}: {}", key.label(), value)),
		);
	}

	let requests = order.special_requests.trim();
	if !requests.is_empty() {
		lines.push(String::new());
		lines.push("Special Requests".to_string());
		lines.push(format!("  {}", requests));
	}

	lines.push(String::new());
	lines.push("Order Progress".to_string());
	lines.extend(tracked.steps.iter().flat_map(checklist_lines));
	block(lines)
}

fn customer_section(order: &Order) -> Vec<String> {
	let mut lines = vec![
		"Customer Information".to_string(),
		format!("  Name:          {}", order.full_name),
		format!("  Email:         {}", order.email),
		format!("  Costume Type:  {}", order.costume_type.display_name()),
		format!("  Order Date:    {}", order.created_at.format(DATE_FORMAT)),
	];
	if let Some(date) = order.delivery_date {
		lines.push(format!("  Expected Delivery: {}", date.format(DATE_FORMAT)));
	}
	lines
}

fn checklist_lines(step: &StatusStep) -> [String; 2] {
	let mark = if step.completed { "x" } else { " " };
	let current = if step.current { "  <- current" } else { "" };
	[
		format!("  [{}] {}{} ({})", mark, step.label, current, step.icon()),
		format!("      {}", step.description),
	]
}

/// One line per order: id, garment, order date and status badge.
pub fn recent_list(orders: &[TrackedOrder]) -> String {
	if orders.is_empty() {
		return block(vec!["No orders yet".to_string()]);
	}

	let mut lines = vec!["Recent Orders".to_string()];
	lines.extend(orders.iter().map(|tracked| {
		let order = &tracked.order;
		format!(
			"  {}  {} \u{2022} {}  [{}]",
			order.order_id,
			order.costume_type.display_name(),
			order.created_at.format(DATE_FORMAT),
			order.status.badge_label()
		)
	}));
	block(lines)
}

/// The measurement inputs the intake form shows for a garment.
pub fn field_table(costume: CostumeType) -> String {
	let mut lines = vec![format!("{} measurements", costume.title())];
	lines.extend(measurement_fields(costume).into_iter().map(|field| {
		let marker = if field.required { " *" } else { "" };
		format!("  {:<14} {}{}", field.key.as_str(), field.label(), marker)
	}));
	block(lines)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{DateTime, NaiveDate};
	use couture_types::{MeasurementKey, Measurements, Order, OrderStatus};

	fn tracked(status: OrderStatus) -> TrackedOrder {
		let measurements: Measurements = [(MeasurementKey::Chest, "36".to_string())]
			.into_iter()
			.collect();
		TrackedOrder::from(Order {
			order_id: "EC482193".to_string(),
			full_name: "Ada Lovelace".to_string(),
			email: "ada@example.com".to_string(),
			phone: "555-0100".to_string(),
			address: "12 St James's Square".to_string(),
			costume_type: CostumeType::WeddingDress,
			measurements,
			special_requests: String::new(),
			delivery_date: NaiveDate::from_ymd_opt(2026, 12, 1),
			sample_image: None,
			status,
			created_at: DateTime::from_timestamp_millis(1_792_403_482_193).unwrap(),
		})
	}

	#[test]
	fn test_receipt_text() {
		let text = receipt(&SubmissionReceipt {
			order_id: "EC000001".to_string(),
			title: "Order Submitted Successfully!".to_string(),
			message: "Your order ID is: EC000001. We'll contact you within 24 hours.".to_string(),
		});
		assert!(text.starts_with("Order Submitted Successfully!\n"));
		assert!(text.contains("EC000001"));
	}

	#[test]
	fn test_not_found_text() {
		assert_eq!(
			not_found("EC999999"),
			"No order found with ID: EC999999\nPlease check your order ID and try again\n"
		);
	}

	#[test]
	fn test_order_details() {
		let text = order_details(&tracked(OrderStatus::InProgress));
		assert!(text.starts_with("Order Details - EC482193 [IN PROGRESS] (package)\n"));
		assert!(text.contains("Costume Type:  wedding dress"));
		assert!(text.contains("Expected Delivery: 2026-12-01"));
		assert!(text.contains("Chest/Bust (inches): 36"));
		assert!(!text.contains("Special Requests"));
		assert!(text.contains("  [x] Order Received (clock)\n"));
		assert!(text.contains("  [x] In Progress  <- current (package)\n"));
		assert!(text.contains("  [ ] Delivered (star)\n"));
		assert!(text.ends_with("Your order has been delivered successfully\n"));
	}

	#[test]
	fn test_unknown_status_has_no_current_step() {
		let text = order_details(&tracked(OrderStatus::from("on-hold")));
		assert!(text.contains("[ON HOLD]"));
		assert!(!text.contains("<- current"));
		assert!(!text.contains("[x]"));
	}

	#[test]
	fn test_recent_list() {
		assert_eq!(recent_list(&[]), "No orders yet\n");

		let text = recent_list(&[tracked(OrderStatus::Shipped)]);
		assert!(text.contains("EC482193  wedding dress \u{2022} "));
		assert!(text.ends_with("[SHIPPED]\n"));
	}

	#[test]
	fn test_field_table_marks_required() {
		let text = field_table(CostumeType::WeddingDress);
		assert!(text.starts_with("Wedding Dress measurements\n"));
		assert!(text.contains("Neckline to Waist (inches) *"));
		assert!(text.contains("Sleeve Length (inches)\n"));
		assert_eq!(text.lines().count(), 8);
	}
}
