//! Form engine settings
//!
//! Defaults match the signup and project pages. Settings can be built in code
//! or deserialized from JSON; every key is optional.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to parse settings: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("Invalid settings: {0}")]
	Invalid(String),
}

/// Tunables for validation, persistence and tech selection.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
	/// Local storage key holding the serialized snapshot
	#[serde(default = "default_storage_key")]
	pub storage_key: String,

	/// Minimum trimmed length of any single-line field
	#[serde(default = "default_text_min_length")]
	pub text_min_length: usize,

	/// Maximum trimmed length of plain text fields without a declared maximum
	#[serde(default = "default_text_max_length")]
	pub text_max_length: usize,

	/// Minimum length of a non-empty textarea
	#[serde(default = "default_textarea_min_length")]
	pub textarea_min_length: usize,

	/// Minimum password length for the strength policy
	#[serde(default = "default_password_min_length")]
	pub password_min_length: usize,

	/// Hidden field name carrying each known tech identifier
	#[serde(default = "default_known_tech_field")]
	pub known_tech_field: String,

	/// Hidden field name carrying the comma-joined custom tech names
	#[serde(default = "default_custom_tech_field")]
	pub custom_tech_field: String,
}

fn default_storage_key() -> String {
	"formData".to_string()
}

fn default_text_min_length() -> usize {
	2
}

fn default_text_max_length() -> usize {
	40
}

fn default_textarea_min_length() -> usize {
	10
}

fn default_password_min_length() -> usize {
	8
}

fn default_known_tech_field() -> String {
	"technologies".to_string()
}

fn default_custom_tech_field() -> String {
	"new_technologies".to_string()
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			storage_key: default_storage_key(),
			text_min_length: default_text_min_length(),
			text_max_length: default_text_max_length(),
			textarea_min_length: default_textarea_min_length(),
			password_min_length: default_password_min_length(),
			known_tech_field: default_known_tech_field(),
			custom_tech_field: default_custom_tech_field(),
		}
	}
}

impl FormSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse settings from JSON and validate them.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::FormSettings;
	///
	/// let settings = FormSettings::from_json(r#"{"text_max_length": 60}"#).unwrap();
	/// assert_eq!(settings.text_max_length, 60);
	/// assert_eq!(settings.storage_key, "formData");
	/// ```
	pub fn from_json(json: &str) -> Result<Self, SettingsError> {
		let settings: Self = serde_json::from_str(json)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.storage_key.trim().is_empty() {
			return Err(SettingsError::Invalid(
				"storage_key must not be empty".to_string(),
			));
		}
		if self.text_min_length > self.text_max_length {
			return Err(SettingsError::Invalid(format!(
				"text_min_length ({}) exceeds text_max_length ({})",
				self.text_min_length, self.text_max_length
			)));
		}
		if self.password_min_length == 0 {
			return Err(SettingsError::Invalid(
				"password_min_length must be at least 1".to_string(),
			));
		}
		if self.known_tech_field == self.custom_tech_field {
			return Err(SettingsError::Invalid(
				"known_tech_field and custom_tech_field must differ".to_string(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = FormSettings::default();

		assert_eq!(settings.storage_key, "formData");
		assert_eq!(settings.text_min_length, 2);
		assert_eq!(settings.text_max_length, 40);
		assert_eq!(settings.textarea_min_length, 10);
		assert_eq!(settings.password_min_length, 8);
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_from_json_empty_object_uses_defaults() {
		// Act
		let settings = FormSettings::from_json("{}").unwrap();

		// Assert
		assert_eq!(settings, FormSettings::default());
	}

	#[rstest]
	#[case(r#"{"storage_key": "  "}"#)]
	#[case(r#"{"text_min_length": 50}"#)]
	#[case(r#"{"password_min_length": 0}"#)]
	#[case(r#"{"custom_tech_field": "technologies"}"#)]
	fn test_from_json_rejects_invalid(#[case] json: &str) {
		assert!(matches!(
			FormSettings::from_json(json),
			Err(SettingsError::Invalid(_))
		));
	}

	#[rstest]
	fn test_from_json_malformed() {
		assert!(matches!(
			FormSettings::from_json("{not json"),
			Err(SettingsError::Parse(_))
		));
	}
}
