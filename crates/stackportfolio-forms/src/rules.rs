//! Declarative per-field rule table
//!
//! Every field-specific policy lives here as data: a [`FieldRule`] names the
//! overrides, the format check and the cross-field dependency of one field,
//! and a [`RuleTable`] maps field names to rules. The generic validation
//! routine consults the table instead of branching per call site.
//!
//! ```mermaid
//! flowchart LR
//!     Table["RuleTable<br/>name -> FieldRule"] --> Form["FormModel::validate_field"]
//!     Field["Field<br/>(declared constraints)"] --> Form
//!     Form --> Validator["FieldValidator"]
//!     Form --> Password["password::check_passwords"]
//! ```

use crate::field::{Field, FieldKind};
use regex::Regex;
use std::collections::HashMap;

pub const PHONE_NUMBER_FIELD: &str = "phone_number";
pub const PASSWORD1_FIELD: &str = "password1";
pub const PASSWORD2_FIELD: &str = "password2";

/// An HTML-style pattern: each clause must match the whole value.
///
/// The regex engine has no lookaround, so a pattern such as
/// `^(?=.*[A-Za-z])[A-Za-z\d\s]{3,100}$` is written as two clauses,
/// `.*[A-Za-z].*` and `[A-Za-z\d\s]{3,100}`.
#[derive(Debug, Clone)]
pub struct FieldPattern {
	source: String,
	clauses: Vec<Regex>,
}

impl FieldPattern {
	/// Compile a single-clause pattern, anchored like the HTML `pattern` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::rules::FieldPattern;
	///
	/// let pattern = FieldPattern::new(r"\d+").unwrap();
	/// assert!(pattern.is_match("0123"));
	/// assert!(!pattern.is_match("01a3"));
	/// ```
	pub fn new(pattern: &str) -> Result<Self, regex::Error> {
		Self::all_of([pattern])
	}

	/// Compile a conjunction of clauses.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::rules::FieldPattern;
	///
	/// let pattern = FieldPattern::all_of([r".*[A-Za-z].*", r"[A-Za-z\d\s]{3,100}"]).unwrap();
	/// assert!(pattern.is_match("My App 2"));
	/// assert!(!pattern.is_match("123"));
	/// assert!(!pattern.is_match("App!"));
	/// ```
	pub fn all_of<'a>(clauses: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
		let sources: Vec<&str> = clauses.into_iter().collect();
		let compiled = sources
			.iter()
			.map(|clause| Regex::new(&format!("^(?:{})$", clause)))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Self {
			source: sources.join(" && "),
			clauses: compiled,
		})
	}

	pub fn is_match(&self, value: &str) -> bool {
		self.clauses.iter().all(|clause| clause.is_match(value))
	}

	pub fn as_str(&self) -> &str {
		&self.source
	}
}

/// Per-call overrides that take precedence over a field's declared constraints.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
	pub required: Option<bool>,
	pub message: Option<String>,
	pub min_length: Option<usize>,
	pub max_length: Option<usize>,
	pub pattern: Option<FieldPattern>,
}

impl ValidationOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = Some(required);
		self
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_pattern(mut self, pattern: FieldPattern) -> Self {
		self.pattern = Some(pattern);
		self
	}

	/// Overlay `self` on top of `base`; values set in `self` win.
	pub fn merged_over(&self, base: &ValidationOptions) -> ValidationOptions {
		ValidationOptions {
			required: self.required.or(base.required),
			message: self.message.clone().or_else(|| base.message.clone()),
			min_length: self.min_length.or(base.min_length),
			max_length: self.max_length.or(base.max_length),
			pattern: self.pattern.clone().or_else(|| base.pattern.clone()),
		}
	}
}

/// Domain format layered on top of constraint validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCheck {
	/// Digits only (`^\d+$`); an empty value is left to the other rules.
	Digits,
	/// `^[^\s@]+@[^\s@]+\.[^\s@]{2,}$`
	Email,
}

impl FormatCheck {
	pub fn message(self) -> &'static str {
		match self {
			Self::Digits => "Phone number must only contain numbers.",
			Self::Email => "Please enter a valid email address.",
		}
	}
}

/// A dependency on another field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossField {
	/// Two password inputs that must match and satisfy the strength policy.
	PasswordPair { first: String, second: String },
}

impl CrossField {
	pub fn password_pair() -> Self {
		Self::PasswordPair {
			first: PASSWORD1_FIELD.to_string(),
			second: PASSWORD2_FIELD.to_string(),
		}
	}

	/// Names of every field involved in the dependency.
	pub fn fields(&self) -> [&str; 2] {
		match self {
			Self::PasswordPair { first, second } => [first.as_str(), second.as_str()],
		}
	}
}

/// Tagged rule descriptor for one field.
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
	pub options: ValidationOptions,
	pub format: Option<FormatCheck>,
	pub cross_field: Option<CrossField>,
}

impl FieldRule {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(mut self, options: ValidationOptions) -> Self {
		self.options = options;
		self
	}

	pub fn with_format(mut self, format: FormatCheck) -> Self {
		self.format = Some(format);
		self
	}

	pub fn with_cross_field(mut self, cross_field: CrossField) -> Self {
		self.cross_field = Some(cross_field);
		self
	}
}

/// Field name to rule descriptor mapping.
#[derive(Debug, Clone)]
pub struct RuleTable {
	rules: HashMap<String, FieldRule>,
}

impl Default for RuleTable {
	/// Rules shared by every form: digits-only phone numbers and the
	/// `password1`/`password2` pair.
	fn default() -> Self {
		let mut table = Self::empty();
		table.insert(
			PHONE_NUMBER_FIELD,
			FieldRule::new().with_format(FormatCheck::Digits),
		);
		for name in [PASSWORD1_FIELD, PASSWORD2_FIELD] {
			table.insert(
				name,
				FieldRule::new().with_cross_field(CrossField::password_pair()),
			);
		}
		table
	}
}

impl RuleTable {
	pub fn empty() -> Self {
		Self {
			rules: HashMap::new(),
		}
	}

	/// Rules for the account signup stepper.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::rules::RuleTable;
	///
	/// let table = RuleTable::signup();
	/// let first_name = table.get("first_name").unwrap();
	/// assert_eq!(first_name.options.max_length, Some(40));
	/// assert_eq!(first_name.options.required, Some(true));
	/// ```
	pub fn signup() -> Self {
		let mut table = Self::default();
		for name in ["first_name", "last_name"] {
			table.insert(
				name,
				FieldRule::new().with_options(
					ValidationOptions::new()
						.required(true)
						.with_max_length(40),
				),
			);
		}
		table.insert(
			"username",
			FieldRule::new().with_options(
				ValidationOptions::new()
					.with_max_length(20)
					.with_message(
						"Username must contain 5 characters and it can't contain symbols or spaces.",
					),
			),
		);
		table
	}

	/// Rules for the profile edit form; identical policies to signup.
	pub fn user_edit() -> Self {
		Self::signup()
	}

	/// Rules for the project create/edit form.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::rules::RuleTable;
	///
	/// let table = RuleTable::project();
	/// let pattern = table.get("project_name").unwrap().options.pattern.clone().unwrap();
	/// assert!(pattern.is_match("Portfolio 2"));
	/// assert!(!pattern.is_match("2024"));
	/// ```
	pub fn project() -> Self {
		let mut table = Self::default();
		// Both clauses are fixed literals that always compile.
		let pattern = FieldPattern::all_of([r".*[A-Za-z].*", r"[A-Za-z\d\s]{3,100}"]).ok();
		let mut options = ValidationOptions::new()
			.with_min_length(3)
			.with_message("Project name must be at least 3 characters long and can't contain symbols.");
		options.pattern = pattern;
		table.insert("project_name", FieldRule::new().with_options(options));
		table
	}

	pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) {
		self.rules.insert(name.into(), rule);
	}

	pub fn with_rule(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
		self.insert(name, rule);
		self
	}

	pub fn get(&self, name: &str) -> Option<&FieldRule> {
		self.rules.get(name)
	}

	/// Effective rule for `field`: the table entry plus kind-implied formats.
	pub fn rule_for(&self, field: &Field) -> FieldRule {
		let mut rule = self.get(&field.name).cloned().unwrap_or_default();
		if rule.format.is_none() && field.kind == FieldKind::Email {
			rule.format = Some(FormatCheck::Email);
		}
		rule
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("ab1", true)]
	#[case("Hello World", true)]
	#[case("12", false)]
	#[case("123", false)]
	#[case("App!", false)]
	#[case("ab", false)]
	fn test_project_name_pattern(#[case] value: &str, #[case] expected: bool) {
		// Arrange
		let table = RuleTable::project();
		let pattern = table
			.get("project_name")
			.and_then(|rule| rule.options.pattern.clone())
			.unwrap();

		// Act + Assert
		assert_eq!(pattern.is_match(value), expected, "value: {value:?}");
	}

	#[rstest]
	fn test_pattern_is_anchored() {
		// Arrange
		let pattern = FieldPattern::new("abc").unwrap();

		// Act + Assert
		assert!(pattern.is_match("abc"));
		assert!(!pattern.is_match("xabc"));
		assert!(!pattern.is_match("abcx"));
	}

	#[rstest]
	fn test_options_merge_prefers_override() {
		// Arrange
		let base = ValidationOptions::new()
			.with_max_length(80)
			.with_message("base");
		let overrides = ValidationOptions::new().with_max_length(40);

		// Act
		let merged = overrides.merged_over(&base);

		// Assert
		assert_eq!(merged.max_length, Some(40));
		assert_eq!(merged.message.as_deref(), Some("base"));
	}

	#[rstest]
	fn test_rule_for_email_kind_adds_email_format() {
		// Arrange
		let table = RuleTable::empty();
		let field = Field::new("contact", FieldKind::Email);

		// Act
		let rule = table.rule_for(&field);

		// Assert
		assert_eq!(rule.format, Some(FormatCheck::Email));
	}

	#[rstest]
	fn test_default_table_pairs_passwords() {
		let table = RuleTable::default();

		for name in [PASSWORD1_FIELD, PASSWORD2_FIELD] {
			assert_eq!(
				table.get(name).and_then(|rule| rule.cross_field.clone()),
				Some(CrossField::password_pair())
			);
		}
		assert_eq!(
			table.get(PHONE_NUMBER_FIELD).and_then(|rule| rule.format),
			Some(FormatCheck::Digits)
		);
	}
}
