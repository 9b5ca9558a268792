//! Single-field validation
//!
//! [`FieldValidator`] applies the field rules in a fixed precedence order and
//! stops at the first failure:
//!
//! 1. untouched fields are never reported with a message
//! 2. textareas use their own minimum-length rule
//! 3. trimmed values shorter than the text minimum are rejected
//! 4. trimmed values longer than the maximum are rejected
//! 5. declared constraints (required, minlength, pattern, URL format)
//! 6. domain formats from the rule table (digits-only, email)
//!
//! Cross-field password checks are layered on top by
//! [`FormModel::validate_field`](crate::FormModel::validate_field).

use crate::field::{Field, FieldKind, ValidationVerdict};
use crate::rules::{FieldPattern, FieldRule, FormatCheck, ValidationOptions};
use crate::settings::FormSettings;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("EMAIL_REGEX: invalid regex pattern")
});

static DIGITS_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("DIGITS_REGEX: invalid regex pattern"));

// HTTP/HTTPS URL with optional port, path, query string and fragment.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^https?://[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
	)
	.expect("URL_REGEX: invalid regex pattern")
});

/// Whether `value` is an address the email format accepts.
///
/// # Examples
///
/// ```
/// use stackportfolio_forms::validators::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(!is_valid_email("ada@example.c"));
/// assert!(!is_valid_email("ada example@example.com"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

/// Whether `value` consists of ASCII digits only.
pub fn is_digits(value: &str) -> bool {
	DIGITS_REGEX.is_match(value)
}

/// Stateless single-field validator.
#[derive(Debug, Clone)]
pub struct FieldValidator {
	text_min_length: usize,
	text_max_length: usize,
	textarea_min_length: usize,
}

impl Default for FieldValidator {
	fn default() -> Self {
		Self::new(&FormSettings::default())
	}
}

impl FieldValidator {
	pub fn new(settings: &FormSettings) -> Self {
		Self {
			text_min_length: settings.text_min_length,
			text_max_length: settings.text_max_length,
			textarea_min_length: settings.textarea_min_length,
		}
	}

	/// Validate `field` with per-call overrides.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::{Field, FieldValidator, ValidationOptions};
	///
	/// let validator = FieldValidator::default();
	/// let mut field = Field::text("first_name");
	/// field.set_value("a".repeat(42));
	///
	/// let verdict = validator.validate(&field, &ValidationOptions::new().with_max_length(40));
	/// assert!(!verdict.is_valid);
	/// assert!(verdict.message.contains("40"));
	/// ```
	pub fn validate(&self, field: &Field, options: &ValidationOptions) -> ValidationVerdict {
		self.validate_with_rule(field, &FieldRule::new().with_options(options.clone()))
	}

	/// Validate `field` against a rule descriptor, excluding cross-field checks.
	pub fn validate_with_rule(&self, field: &Field, rule: &FieldRule) -> ValidationVerdict {
		if !field.kind.gates_step() {
			return ValidationVerdict::valid();
		}

		let options = &rule.options;
		let required = options.required.unwrap_or(field.required);
		let message = options
			.message
			.as_deref()
			.or(field.custom_message.as_deref());
		let min_length = options.min_length.or(field.min_length);
		let max_length = options.max_length.or(field.max_length);
		let pattern = options.pattern.as_ref().or(field.pattern.as_ref());

		if !field.touched {
			return if required {
				ValidationVerdict::silent()
			} else {
				ValidationVerdict::valid()
			};
		}

		let value = field.trimmed();
		let len = field.trimmed_len();

		if field.kind == FieldKind::TextArea {
			return self.validate_textarea(len, required, message, min_length, max_length);
		}

		if len < self.text_min_length {
			let min = min_length.unwrap_or(self.text_min_length);
			return ValidationVerdict::invalid(message.map(str::to_string).unwrap_or_else(|| {
				format!("This field must contain at least {} characters.", min)
			}));
		}

		let max_length = max_length.or_else(|| {
			(field.kind == FieldKind::Text).then_some(self.text_max_length)
		});
		if let Some(max) = max_length
			&& len > max
		{
			return ValidationVerdict::invalid(format!(
				"This field must contain fewer than {} characters.",
				max
			));
		}

		if let Some(verdict) =
			check_constraints(field.kind, value, len, required, min_length, pattern, message)
		{
			return verdict;
		}

		if let Some(format) = rule.format
			&& !format_matches(format, value)
		{
			return ValidationVerdict::invalid(format.message());
		}

		ValidationVerdict::valid()
	}

	fn validate_textarea(
		&self,
		len: usize,
		required: bool,
		message: Option<&str>,
		min_length: Option<usize>,
		max_length: Option<usize>,
	) -> ValidationVerdict {
		if len == 0 {
			return if required {
				ValidationVerdict::invalid(message.unwrap_or("Please fill out this field."))
			} else {
				ValidationVerdict::valid()
			};
		}
		let min = min_length.unwrap_or(self.textarea_min_length);
		if len < min {
			return ValidationVerdict::invalid(message.map(str::to_string).unwrap_or_else(|| {
				format!("Bio must be at least {} characters long.", min)
			}));
		}
		if let Some(max) = max_length
			&& len > max
		{
			return ValidationVerdict::invalid(format!(
				"This field must contain fewer than {} characters.",
				max
			));
		}
		ValidationVerdict::valid()
	}
}

/// Emulates the browser's constraint validation for the declared attributes.
fn check_constraints(
	kind: FieldKind,
	value: &str,
	len: usize,
	required: bool,
	min_length: Option<usize>,
	pattern: Option<&FieldPattern>,
	message: Option<&str>,
) -> Option<ValidationVerdict> {
	let fail = |default: String| {
		Some(ValidationVerdict::invalid(
			message.map(str::to_string).unwrap_or(default),
		))
	};

	if required && value.is_empty() {
		return fail("Please fill out this field.".to_string());
	}
	if let Some(min) = min_length
		&& len < min
	{
		return fail(format!(
			"Please lengthen this text to {} characters or more (you are currently using {} characters).",
			min, len
		));
	}
	if value.is_empty() {
		return None;
	}
	if let Some(pattern) = pattern
		&& !pattern.is_match(value)
	{
		return fail("Please match the requested format.".to_string());
	}
	if kind == FieldKind::Url && !URL_REGEX.is_match(value) {
		return fail("Please enter a URL.".to_string());
	}
	None
}

fn format_matches(format: FormatCheck, value: &str) -> bool {
	match format {
		FormatCheck::Digits => value.is_empty() || is_digits(value),
		FormatCheck::Email => is_valid_email(value),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn touched(mut field: Field, value: &str) -> Field {
		field.set_value(value);
		field
	}

	#[rstest]
	fn test_untouched_required_is_silently_invalid() {
		// Arrange
		let validator = FieldValidator::default();
		let field = Field::text("first_name").required();

		// Act
		let verdict = validator.validate(&field, &ValidationOptions::new());

		// Assert
		assert_eq!(verdict, ValidationVerdict::silent());
	}

	#[rstest]
	fn test_untouched_optional_is_valid() {
		let validator = FieldValidator::default();
		let field = Field::text("company");

		assert!(validator.validate(&field, &ValidationOptions::new()).is_valid);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("a")]
	#[case(" a ")]
	fn test_short_values_rejected(#[case] value: &str) {
		// Arrange
		let validator = FieldValidator::default();
		let field = touched(Field::text("first_name").required(), value);

		// Act
		let verdict = validator.validate(&field, &ValidationOptions::new());

		// Assert
		assert!(!verdict.is_valid);
		assert_eq!(verdict.message, "This field must contain at least 2 characters.");
	}

	#[rstest]
	fn test_short_value_uses_declared_minimum_and_custom_message() {
		let validator = FieldValidator::default();
		let field = touched(Field::text("username").with_min_length(5), "a");

		let generic = validator.validate(&field, &ValidationOptions::new());
		let custom = validator.validate(&field, &ValidationOptions::new().with_message("Pick a longer name"));

		assert_eq!(generic.message, "This field must contain at least 5 characters.");
		assert_eq!(custom.message, "Pick a longer name");
	}

	#[rstest]
	#[case(40, true)]
	#[case(41, false)]
	fn test_plain_text_default_maximum(#[case] len: usize, #[case] expected: bool) {
		// Arrange
		let validator = FieldValidator::default();
		let field = touched(Field::text("town_city"), &"a".repeat(len));

		// Act
		let verdict = validator.validate(&field, &ValidationOptions::new());

		// Assert
		assert_eq!(verdict.is_valid, expected);
		if !expected {
			assert_eq!(verdict.message, "This field must contain fewer than 40 characters.");
		}
	}

	#[rstest]
	fn test_default_maximum_only_applies_to_plain_text() {
		let validator = FieldValidator::default();
		let field = touched(
			Field::new("website", FieldKind::Url),
			&format!("https://example.com/{}", "a".repeat(60)),
		);

		assert!(validator.validate(&field, &ValidationOptions::new()).is_valid);
	}

	#[rstest]
	#[case("", true)]
	#[case("   ", true)]
	#[case("Too short", false)]
	#[case("Exactly 10", true)]
	fn test_textarea_rule(#[case] value: &str, #[case] expected: bool) {
		// Arrange
		let validator = FieldValidator::default();
		let field = touched(Field::new("bio", FieldKind::TextArea), value);

		// Act
		let verdict = validator.validate(&field, &ValidationOptions::new());

		// Assert
		assert_eq!(verdict.is_valid, expected);
		if !expected {
			assert_eq!(verdict.message, "Bio must be at least 10 characters long.");
		}
	}

	#[rstest]
	fn test_declared_min_length_constraint() {
		let validator = FieldValidator::default();
		let field = touched(Field::text("project_name").with_min_length(3), "ab");

		let verdict = validator.validate(&field, &ValidationOptions::new());

		assert!(!verdict.is_valid);
		assert!(verdict.message.contains("3 characters or more"));
	}

	#[rstest]
	fn test_pattern_override_takes_precedence() {
		// Arrange
		let validator = FieldValidator::default();
		let field = touched(
			Field::text("project_name").with_pattern(FieldPattern::new(".*").unwrap()),
			"Bad!!",
		);
		let options = ValidationOptions::new()
			.with_pattern(FieldPattern::new(r"[A-Za-z\d\s]{3,100}").unwrap())
			.with_message("No symbols");

		// Act
		let verdict = validator.validate(&field, &options);

		// Assert
		assert_eq!(verdict, ValidationVerdict::invalid("No symbols"));
	}

	#[rstest]
	fn test_required_override_relaxes_field() {
		let validator = FieldValidator::default();
		let field = Field::text("last_name").required();

		let verdict = validator.validate(&field, &ValidationOptions::new().required(false));

		assert!(verdict.is_valid);
	}

	#[rstest]
	#[case("0123456789", true)]
	#[case("07700 900", false)]
	#[case("+447700900", false)]
	fn test_digits_format(#[case] value: &str, #[case] expected: bool) {
		// Arrange
		let validator = FieldValidator::default();
		let field = touched(Field::new("phone_number", FieldKind::Tel), value);
		let rule = FieldRule::new().with_format(FormatCheck::Digits);

		// Act
		let verdict = validator.validate_with_rule(&field, &rule);

		// Assert
		assert_eq!(verdict.is_valid, expected);
		if !expected {
			assert_eq!(verdict.message, "Phone number must only contain numbers.");
		}
	}

	#[rstest]
	#[case("ada@example.com", true)]
	#[case("ada@example.c", false)]
	#[case("ada@@example.com", false)]
	#[case("ada.example.com", false)]
	fn test_email_format(#[case] value: &str, #[case] expected: bool) {
		let validator = FieldValidator::default();
		let field = touched(Field::new("email", FieldKind::Email), value);
		let rule = FieldRule::new().with_format(FormatCheck::Email);

		let verdict = validator.validate_with_rule(&field, &rule);

		assert_eq!(verdict.is_valid, expected);
		if !expected {
			assert_eq!(verdict.message, "Please enter a valid email address.");
		}
	}

	#[rstest]
	fn test_url_kind_constraint() {
		let validator = FieldValidator::default();
		let field = touched(Field::new("deployed_url", FieldKind::Url), "not a url");

		let verdict = validator.validate(&field, &ValidationOptions::new());

		assert_eq!(verdict, ValidationVerdict::invalid("Please enter a URL."));
	}

	#[rstest]
	fn test_checkbox_never_invalid() {
		let validator = FieldValidator::default();
		let field = Field::new("display_email", FieldKind::Checkbox).required();

		assert!(validator.validate(&field, &ValidationOptions::new()).is_valid);
	}
}
