//! Garment types and their measurement tables.
//!
//! The intake form asks for a fixed set of body measurements for every garment
//! plus a few extra ones that depend on the garment type. The table here is the
//! single source of truth for which keys belong to which garment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of garment a customer orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostumeType {
	WeddingDress,
	EveningGown,
	Suit,
	CasualDress,
	TraditionalWear,
	Other,
}

impl CostumeType {
	/// Returns the stored, kebab-case identifier.
	pub fn as_str(&self) -> &'static str {
		match self {
			CostumeType::WeddingDress => "wedding-dress",
			CostumeType::EveningGown => "evening-gown",
			CostumeType::Suit => "suit",
			CostumeType::CasualDress => "casual-dress",
			CostumeType::TraditionalWear => "traditional-wear",
			CostumeType::Other => "other",
		}
	}

	/// Label shown in the garment picker.
	pub fn title(&self) -> &'static str {
		match self {
			CostumeType::WeddingDress => "Wedding Dress",
			CostumeType::EveningGown => "Evening Gown",
			CostumeType::Suit => "Formal Suit",
			CostumeType::CasualDress => "Casual Dress",
			CostumeType::TraditionalWear => "Traditional Wear",
			CostumeType::Other => "Other",
		}
	}

	/// Identifier with its first dash turned into a space, e.g. "wedding dress".
	pub fn display_name(&self) -> String {
		self.as_str().replacen('-', " ", 1)
	}

	/// Returns an iterator over all garment types in picker order.
	pub fn all() -> impl Iterator<Item = Self> {
		[
			Self::WeddingDress,
			Self::EveningGown,
			Self::Suit,
			Self::CasualDress,
			Self::TraditionalWear,
			Self::Other,
		]
		.into_iter()
	}
}

impl fmt::Display for CostumeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a garment type string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown costume type: {0}")]
pub struct UnknownCostumeType(pub String);

impl FromStr for CostumeType {
	type Err = UnknownCostumeType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::all()
			.find(|costume| costume.as_str() == s)
			.ok_or_else(|| UnknownCostumeType(s.to_string()))
	}
}

/// A single body measurement the intake form can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeasurementKey {
	Chest,
	Waist,
	Hips,
	ShoulderWidth,
	SleeveLength,
	Length,
	Neckline,
	Inseam,
}

impl MeasurementKey {
	/// Returns the camelCase key used in stored orders.
	pub fn as_str(&self) -> &'static str {
		match self {
			MeasurementKey::Chest => "chest",
			MeasurementKey::Waist => "waist",
			MeasurementKey::Hips => "hips",
			MeasurementKey::ShoulderWidth => "shoulderWidth",
			MeasurementKey::SleeveLength => "sleeveLength",
			MeasurementKey::Length => "length",
			MeasurementKey::Neckline => "neckline",
			MeasurementKey::Inseam => "inseam",
		}
	}

	/// Form label, units included.
	pub fn label(&self) -> &'static str {
		match self {
			MeasurementKey::Chest => "Chest/Bust (inches)",
			MeasurementKey::Waist => "Waist (inches)",
			MeasurementKey::Hips => "Hips (inches)",
			MeasurementKey::ShoulderWidth => "Shoulder Width (inches)",
			MeasurementKey::SleeveLength => "Sleeve Length (inches)",
			MeasurementKey::Length => "Total Length (inches)",
			MeasurementKey::Neckline => "Neckline to Waist (inches)",
			MeasurementKey::Inseam => "Inseam (inches)",
		}
	}

	pub fn all() -> impl Iterator<Item = Self> {
		[
			Self::Chest,
			Self::Waist,
			Self::Hips,
			Self::ShoulderWidth,
			Self::SleeveLength,
			Self::Length,
			Self::Neckline,
			Self::Inseam,
		]
		.into_iter()
	}
}

impl fmt::Display for MeasurementKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MeasurementKey {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::all()
			.find(|key| key.as_str() == s)
			.ok_or_else(|| format!("Unknown measurement: {}", s))
	}
}

/// One row of the measurement table for a garment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementField {
	pub key: MeasurementKey,
	pub required: bool,
}

impl MeasurementField {
	const fn required(key: MeasurementKey) -> Self {
		Self {
			key,
			required: true,
		}
	}

	const fn optional(key: MeasurementKey) -> Self {
		Self {
			key,
			required: false,
		}
	}

	pub fn label(&self) -> &'static str {
		self.key.label()
	}
}

const COMMON_FIELDS: [MeasurementField; 5] = [
	MeasurementField::required(MeasurementKey::Chest),
	MeasurementField::required(MeasurementKey::Waist),
	MeasurementField::required(MeasurementKey::Hips),
	MeasurementField::required(MeasurementKey::ShoulderWidth),
	MeasurementField::required(MeasurementKey::Length),
];

/// Returns the measurement fields the intake form shows for a garment type.
///
/// The five common fields always come first, followed by the extras for the
/// given garment in display order.
pub fn measurement_fields(costume: CostumeType) -> Vec<MeasurementField> {
	use MeasurementKey::*;

	let extra: &[MeasurementField] = match costume {
		CostumeType::WeddingDress => &[
			MeasurementField::required(Neckline),
			MeasurementField::optional(SleeveLength),
		],
		CostumeType::Suit => &[
			MeasurementField::required(Inseam),
			MeasurementField::required(SleeveLength),
		],
		CostumeType::EveningGown => &[MeasurementField::required(Neckline)],
		CostumeType::CasualDress => &[MeasurementField::optional(SleeveLength)],
		CostumeType::TraditionalWear => &[
			MeasurementField::optional(SleeveLength),
			MeasurementField::optional(Neckline),
		],
		CostumeType::Other => &[],
	};

	COMMON_FIELDS.iter().chain(extra.iter()).copied().collect()
}

/// Measurements recorded on an order.
///
/// Values are kept exactly as typed; nothing here parses them as numbers.
/// Stored orders carry each key at the top level of the order object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	chest: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	waist: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	hips: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	shoulder_width: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	sleeve_length: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	length: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	neckline: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	inseam: Option<String>,
}

impl Measurements {
	pub fn new() -> Self {
		Self::default()
	}

	fn slot(&self, key: MeasurementKey) -> &Option<String> {
		match key {
			MeasurementKey::Chest => &self.chest,
			MeasurementKey::Waist => &self.waist,
			MeasurementKey::Hips => &self.hips,
			MeasurementKey::ShoulderWidth => &self.shoulder_width,
			MeasurementKey::SleeveLength => &self.sleeve_length,
			MeasurementKey::Length => &self.length,
			MeasurementKey::Neckline => &self.neckline,
			MeasurementKey::Inseam => &self.inseam,
		}
	}

	fn slot_mut(&mut self, key: MeasurementKey) -> &mut Option<String> {
		match key {
			MeasurementKey::Chest => &mut self.chest,
			MeasurementKey::Waist => &mut self.waist,
			MeasurementKey::Hips => &mut self.hips,
			MeasurementKey::ShoulderWidth => &mut self.shoulder_width,
			MeasurementKey::SleeveLength => &mut self.sleeve_length,
			MeasurementKey::Length => &mut self.length,
			MeasurementKey::Neckline => &mut self.neckline,
			MeasurementKey::Inseam => &mut self.inseam,
		}
	}

	pub fn get(&self, key: MeasurementKey) -> Option<&str> {
		self.slot(key).as_deref()
	}

	/// Sets a measurement, returning the previous value.
	pub fn set(&mut self, key: MeasurementKey, value: impl Into<String>) -> Option<String> {
		self.slot_mut(key).replace(value.into())
	}

	/// Iterates over recorded measurements in table order.
	pub fn iter(&self) -> impl Iterator<Item = (MeasurementKey, &str)> + '_ {
		MeasurementKey::all().filter_map(move |key| self.get(key).map(|value| (key, value)))
	}

	pub fn len(&self) -> usize {
		self.iter().count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl FromIterator<(MeasurementKey, String)> for Measurements {
	fn from_iter<I: IntoIterator<Item = (MeasurementKey, String)>>(iter: I) -> Self {
		let mut measurements = Self::new();
		for (key, value) in iter {
			measurements.set(key, value);
		}
		measurements
	}
}
