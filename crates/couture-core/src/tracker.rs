//! Status tracker.
//!
//! Turns an order status into the five-step progress checklist shown to the
//! customer, and into the icon and color classes used to draw it. Everything
//! here is a pure function of the status.

use couture_types::OrderStatus;
use std::fmt;

/// Icon drawn next to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
	Clock,
	Package,
	CheckCircle,
	Truck,
	Star,
}

impl StatusIcon {
	pub fn as_str(&self) -> &'static str {
		match self {
			StatusIcon::Clock => "clock",
			StatusIcon::Package => "package",
			StatusIcon::CheckCircle => "check-circle",
			StatusIcon::Truck => "truck",
			StatusIcon::Star => "star",
		}
	}
}

impl fmt::Display for StatusIcon {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How a status is drawn: its icon, the icon color, and the badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
	pub icon: StatusIcon,
	pub icon_class: &'static str,
	pub badge_class: &'static str,
}

/// Returns the presentation for a status.
///
/// Unrecognized statuses get a gray clock.
pub fn presentation(status: &OrderStatus) -> StatusPresentation {
	let (icon, icon_class, badge_class) = match status {
		OrderStatus::Received => (StatusIcon::Clock, "text-blue-500", "bg-blue-100 text-blue-800"),
		OrderStatus::InProgress => (
			StatusIcon::Package,
			"text-yellow-500",
			"bg-yellow-100 text-yellow-800",
		),
		OrderStatus::Ready => (
			StatusIcon::CheckCircle,
			"text-green-500",
			"bg-green-100 text-green-800",
		),
		OrderStatus::Shipped => (
			StatusIcon::Truck,
			"text-purple-500",
			"bg-purple-100 text-purple-800",
		),
		OrderStatus::Delivered => (StatusIcon::Star, "text-green-600", "bg-green-100 text-green-800"),
		OrderStatus::Unrecognized(_) => {
			(StatusIcon::Clock, "text-gray-500", "bg-gray-100 text-gray-800")
		},
	};

	StatusPresentation {
		icon,
		icon_class,
		badge_class,
	}
}

struct StepDefinition {
	status: OrderStatus,
	label: &'static str,
	description: &'static str,
}

const STEPS: [StepDefinition; 5] = [
	StepDefinition {
		status: OrderStatus::Received,
		label: "Order Received",
		description: "Your order has been received and is being reviewed",
	},
	StepDefinition {
		status: OrderStatus::InProgress,
		label: "In Progress",
		description: "Your costume is being crafted by our artisans",
	},
	StepDefinition {
		status: OrderStatus::Ready,
		label: "Ready for Pickup",
		description: "Your costume is ready and will be shipped soon",
	},
	StepDefinition {
		status: OrderStatus::Shipped,
		label: "Shipped",
		description: "Your order is on its way to you",
	},
	StepDefinition {
		status: OrderStatus::Delivered,
		label: "Delivered",
		description: "Your order has been delivered successfully",
	},
];

/// One lifecycle stage in the progress checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStep {
	pub status: OrderStatus,
	pub label: &'static str,
	pub description: &'static str,
	pub completed: bool,
	pub current: bool,
}

impl StatusStep {
	pub fn key(&self) -> &str {
		self.status.as_str()
	}

	pub fn icon(&self) -> StatusIcon {
		presentation(&self.status).icon
	}

	/// Completed steps are drawn green, pending ones faded.
	pub fn icon_class(&self) -> &'static str {
		if self.completed {
			"text-green-500"
		} else {
			"text-gray-300"
		}
	}
}

/// Builds the progress checklist for `current`.
///
/// Steps up to and including the current status are completed and exactly one
/// step is current. For an unrecognized status no step is either.
pub fn status_steps(current: &OrderStatus) -> Vec<StatusStep> {
	let current_index = current.position();

	STEPS
		.iter()
		.enumerate()
		.map(|(index, step)| StatusStep {
			status: step.status.clone(),
			label: step.label,
			description: step.description,
			completed: current_index.is_some_and(|i| index <= i),
			current: current_index == Some(index),
		})
		.collect()
}
