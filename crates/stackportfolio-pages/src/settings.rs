//! Page binding settings
//!
//! Class names and selectors the bindings use. Pages may override any of them
//! with a JSON block:
//!
//! ```html
//! <script id="form-settings" type="application/json">
//!   {"classes": {"input_invalid": "border-error"}, "form": {"text_max_length": 60}}
//! </script>
//! ```

use serde::{Deserialize, Serialize};
use stackportfolio_forms::{FormSettings, SettingsError};

/// Id of the optional `<script>` element carrying settings JSON.
pub const SETTINGS_ELEMENT_ID: &str = "form-settings";

/// CSS classes toggled by the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
	pub input_valid: String,
	pub input_invalid: String,
	pub hidden: String,
	pub current_step: String,
	pub btn_primary: String,
	pub btn_disabled: String,
	pub cursor_not_allowed: String,
	pub step_primary: String,
	pub bg_primary: String,
	pub text_white: String,
	pub text_primary: String,
	pub toggle_primary: String,
	pub toggle_secondary: String,
	pub chip: String,
	pub chip_known: String,
	pub chip_custom: String,
}

impl Default for ClassNames {
	fn default() -> Self {
		Self {
			input_valid: "input-valid".to_string(),
			input_invalid: "input-invalid".to_string(),
			hidden: "hidden".to_string(),
			current_step: "current-step".to_string(),
			btn_primary: "btn-primary".to_string(),
			btn_disabled: "btn-disabled".to_string(),
			cursor_not_allowed: "cursor-not-allowed".to_string(),
			step_primary: "step-primary".to_string(),
			bg_primary: "bg-primary".to_string(),
			text_white: "text-white".to_string(),
			text_primary: "text-primary".to_string(),
			toggle_primary: "toggle-primary".to_string(),
			toggle_secondary: "toggle-secondary".to_string(),
			chip: "added-tech-button".to_string(),
			chip_known: "added-tech--known".to_string(),
			chip_custom: "added-tech--custom".to_string(),
		}
	}
}

/// Selectors for the elements the bindings look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
	pub steps: String,
	pub next_buttons: String,
	pub prev_buttons: String,
	pub submit_button: String,
	pub inputs: String,
	pub focusables: String,
	pub mobile_counter: String,
	pub desktop_counter: String,
	pub desktop_number: String,
	pub desktop_label: String,
	pub password_mismatch_error: String,
	pub password_criteria_error: String,
	pub tech_input: String,
	pub tech_dropdown: String,
	pub tech_items: String,
	pub tech_chips: String,
	pub tech_initial: String,
}

impl Default for Selectors {
	fn default() -> Self {
		Self {
			steps: "div[data-step]".to_string(),
			next_buttons: ".next-button".to_string(),
			prev_buttons: ".prev-button".to_string(),
			submit_button: "button[type='submit']".to_string(),
			inputs: "input[name], textarea[name]".to_string(),
			focusables: "input, textarea, select, button".to_string(),
			mobile_counter: ".steps-mobile .step".to_string(),
			desktop_counter: ".steps-desktop .join-item".to_string(),
			desktop_number: ".step-item".to_string(),
			desktop_label: "span:not(.step-item)".to_string(),
			password_mismatch_error: ".password-mismatch-error".to_string(),
			password_criteria_error: ".password-criteria-error".to_string(),
			tech_input: ".tech-input".to_string(),
			tech_dropdown: ".tech-dropdown".to_string(),
			tech_items: "li.tech-list__item".to_string(),
			tech_chips: ".added-tech-container".to_string(),
			tech_initial: "#selectedTechnologies".to_string(),
		}
	}
}

/// Everything the page bindings are configured with.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
	pub form: FormSettings,
	pub classes: ClassNames,
	pub selectors: Selectors,
}

impl PageSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse and validate settings JSON; missing keys keep their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_pages::settings::PageSettings;
	///
	/// let settings = PageSettings::from_json(r#"{"classes": {"hidden": "is-hidden"}}"#).unwrap();
	/// assert_eq!(settings.classes.hidden, "is-hidden");
	/// assert_eq!(settings.classes.input_invalid, "input-invalid");
	/// assert_eq!(settings.form.storage_key, "formData");
	/// ```
	pub fn from_json(json: &str) -> Result<Self, SettingsError> {
		let settings: Self = serde_json::from_str(json)?;
		settings.form.validate()?;
		Ok(settings)
	}

	/// Like [`from_json`](Self::from_json), but falls back to defaults when the
	/// block is absent or unusable.
	pub fn from_optional_json(json: Option<&str>) -> Self {
		let Some(json) = json.filter(|json| !json.trim().is_empty()) else {
			return Self::default();
		};
		match Self::from_json(json) {
			Ok(settings) => settings,
			Err(e) => {
				crate::warn_log!("ignoring #{}: {}", SETTINGS_ELEMENT_ID, e);
				Self::default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_match_markup() {
		let settings = PageSettings::default();

		assert_eq!(settings.classes.input_invalid, "input-invalid");
		assert_eq!(settings.classes.btn_disabled, "btn-disabled");
		assert_eq!(settings.selectors.steps, "div[data-step]");
		assert_eq!(settings.selectors.password_mismatch_error, ".password-mismatch-error");
	}

	#[rstest]
	#[case(None)]
	#[case(Some(""))]
	#[case(Some("{oops"))]
	#[case(Some(r#"{"form": {"storage_key": ""}}"#))]
	fn test_unusable_json_falls_back(#[case] json: Option<&str>) {
		assert_eq!(PageSettings::from_optional_json(json), PageSettings::default());
	}

	#[rstest]
	fn test_nested_form_settings_override() {
		// Act
		let settings = PageSettings::from_optional_json(Some(r#"{"form": {"text_max_length": 60}}"#));

		// Assert
		assert_eq!(settings.form.text_max_length, 60);
		assert_eq!(settings.form.text_min_length, 2);
	}
}
