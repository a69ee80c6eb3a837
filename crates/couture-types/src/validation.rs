//! Configuration validation utilities.
//!
//! Implementations receive their configuration as a raw TOML table. A [`Schema`]
//! lists the fields a table may carry and checks their types, bounds, and any
//! custom rules before the implementation is constructed.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// Error that occurs when a required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// Error that occurs when a field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// Error that occurs when field type is incorrect.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
	/// Error that occurs when a table carries a field the schema does not know.
	#[error("Unknown field: {0}")]
	UnknownField(String),
}

/// Represents the type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value with optional inclusive bounds.
	Integer { min: Option<i64>, max: Option<i64> },
	/// A boolean value.
	Boolean,
}

impl FieldType {
	fn name(&self) -> &'static str {
		match self {
			FieldType::String => "string",
			FieldType::Integer { .. } => "integer",
			FieldType::Boolean => "boolean",
		}
	}
}

/// Type alias for field validator functions.
///
/// Validators run after the type check and return an error message on failure.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A named field in a configuration schema.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator to this field.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		let mismatch = || ValidationError::TypeMismatch {
			field: self.name.clone(),
			expected: self.field_type.name().to_string(),
			actual: value.type_str().to_string(),
		};

		match &self.field_type {
			FieldType::String => {
				if !value.is_str() {
					return Err(mismatch());
				}
			},
			FieldType::Boolean => {
				if !value.is_bool() {
					return Err(mismatch());
				}
			},
			FieldType::Integer { min, max } => {
				let int_val = value.as_integer().ok_or_else(mismatch)?;
				if let Some(min_val) = min {
					if int_val < *min_val {
						return Err(ValidationError::InvalidValue {
							field: self.name.clone(),
							message: format!("Value {} is less than minimum {}", int_val, min_val),
						});
					}
				}
				if let Some(max_val) = max {
					if int_val > *max_val {
						return Err(ValidationError::InvalidValue {
							field: self.name.clone(),
							message: format!(
								"Value {} is greater than maximum {}",
								int_val, max_val
							),
						});
					}
				}
			},
		}

		if let Some(validator) = &self.validator {
			validator(value).map_err(|message| ValidationError::InvalidValue {
				field: self.name.clone(),
				message,
			})?;
		}

		Ok(())
	}
}

/// Defines a validation schema for a TOML table.
///
/// Tables may only contain fields listed as required or optional; anything
/// else is reported as [`ValidationError::UnknownField`] so typos in backend
/// settings surface at startup instead of being silently ignored.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	/// Creates a new schema with required and optional fields.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			field.check(value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				field.check(value)?;
			}
		}

		if let Some(unknown) = table.keys().find(|key| {
			!self
				.required
				.iter()
				.chain(self.optional.iter())
				.any(|field| &field.name == *key)
		}) {
			return Err(ValidationError::UnknownField(unknown.clone()));
		}

		Ok(())
	}
}

/// Trait defining a configuration schema that can validate TOML values.
///
/// Each storage implementation exposes one so its table can be checked before
/// the backend is constructed.
pub trait ConfigSchema: Send + Sync {
	/// Validates a TOML configuration value against this schema.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(input: &str) -> toml::Value {
		toml::from_str(input).unwrap()
	}

	fn sample_schema() -> Schema {
		Schema::new(
			vec![Field::new("path", FieldType::String)],
			vec![
				Field::new(
					"limit",
					FieldType::Integer {
						min: Some(1),
						max: Some(10),
					},
				),
				Field::new("enabled", FieldType::Boolean),
				Field::new("name", FieldType::String).with_validator(|v| {
					match v.as_str() {
						Some(s) if !s.trim().is_empty() => Ok(()),
						_ => Err("must not be blank".to_string()),
					}
				}),
			],
		)
	}

	#[test]
	fn test_valid_table_passes() {
		let config = parse("path = \"/tmp\"\nlimit = 3\nenabled = true");
		assert!(sample_schema().validate(&config).is_ok());
	}

	#[test]
	fn test_missing_required_field() {
		let config = parse("limit = 3");
		let err = sample_schema().validate(&config).unwrap_err();
		assert!(matches!(err, ValidationError::MissingField(ref f) if f == "path"));
	}

	#[test]
	fn test_type_mismatch() {
		let config = parse("path = 7");
		let err = sample_schema().validate(&config).unwrap_err();
		assert!(matches!(err, ValidationError::TypeMismatch { ref expected, .. } if expected == "string"));
	}

	#[test]
	fn test_integer_bounds() {
		let config = parse("path = \"x\"\nlimit = 11");
		let err = sample_schema().validate(&config).unwrap_err();
		assert!(err.to_string().contains("greater than maximum 10"));

		let config = parse("path = \"x\"\nlimit = 0");
		let err = sample_schema().validate(&config).unwrap_err();
		assert!(err.to_string().contains("less than minimum 1"));
	}

	#[test]
	fn test_custom_validator() {
		let config = parse("path = \"x\"\nname = \"  \"");
		let err = sample_schema().validate(&config).unwrap_err();
		assert!(err.to_string().contains("must not be blank"));
	}

	#[test]
	fn test_unknown_field_rejected() {
		let config = parse("path = \"x\"\nstorage_pth = \"typo\"");
		let err = sample_schema().validate(&config).unwrap_err();
		assert!(matches!(err, ValidationError::UnknownField(ref f) if f == "storage_pth"));
	}

	#[test]
	fn test_non_table_root() {
		let err = Schema::new(vec![], vec![])
			.validate(&toml::Value::Integer(1))
			.unwrap_err();
		assert!(matches!(err, ValidationError::TypeMismatch { ref field, .. } if field == "root"));
	}
}
