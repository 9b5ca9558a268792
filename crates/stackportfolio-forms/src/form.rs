//! Form model
//!
//! [`FormModel`] owns the field records of one page together with the rule
//! table, and runs the single generic validation routine: the
//! [`FieldValidator`] checks, then any cross-field dependency the table
//! declares for the field.

use crate::field::{Field, FieldDisplay, ValidationVerdict};
use crate::password::{PasswordPolicy, PasswordReport, check_passwords};
use crate::rules::{CrossField, RuleTable};
use crate::settings::FormSettings;
use crate::store::StorageError;
use crate::validators::FieldValidator;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("A stepper needs at least one step")]
	NoSteps,
	#[error("Step {index} is out of range (total {total})")]
	StepOutOfRange { index: usize, total: usize },
	#[error("Step {step} has invalid fields")]
	NavigationBlocked { step: usize },
	#[error("Already at the final step")]
	AtFinalStep,
	#[error("Submit is only allowed from the final step (current step {step})")]
	NotAtFinalStep { step: usize },
	#[error(transparent)]
	Storage(#[from] StorageError),
}

pub type FormResult<T> = Result<T, FormError>;

/// Verdict and display state for one field after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
	pub name: String,
	pub verdict: ValidationVerdict,
	pub display: FieldDisplay,
}

/// Field records plus the rules that govern them.
#[derive(Debug, Clone)]
pub struct FormModel {
	fields: Vec<Field>,
	rules: RuleTable,
	validator: FieldValidator,
	password_policy: PasswordPolicy,
}

impl FormModel {
	/// Create a model with the default rule table and settings.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::{Field, FormModel};
	///
	/// let form = FormModel::new(vec![Field::text("first_name").required()]);
	/// assert_eq!(form.fields().len(), 1);
	/// assert!(!form.is_field_valid("first_name").unwrap());
	/// ```
	pub fn new(fields: Vec<Field>) -> Self {
		Self::with_rules(fields, RuleTable::default(), &FormSettings::default())
	}

	pub fn with_rules(fields: Vec<Field>, rules: RuleTable, settings: &FormSettings) -> Self {
		Self {
			fields,
			rules,
			validator: FieldValidator::new(settings),
			password_policy: PasswordPolicy::from_settings(settings),
		}
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn rules(&self) -> &RuleTable {
		&self.rules
	}

	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
		self.fields.iter_mut().find(|f| f.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.field(name).is_some()
	}

	/// Record a user-initiated change on `name`.
	pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> FormResult<()> {
		let field = self
			.field_mut(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		field.set_value(value);
		Ok(())
	}

	/// Validate one field, including its cross-field dependency.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::{Field, FieldKind, FormModel, Validity};
	///
	/// let mut form = FormModel::new(vec![
	///     Field::new("password1", FieldKind::Password).required(),
	///     Field::new("password2", FieldKind::Password).required(),
	/// ]);
	/// form.set_value("password1", "Abcdefg1!").unwrap();
	/// form.set_value("password2", "different").unwrap();
	///
	/// let report = form.validate_field("password1").unwrap();
	/// assert_eq!(report.verdict.message, "Passwords do not match.");
	/// assert_eq!(report.display.validity, Validity::Invalid);
	/// ```
	pub fn validate_field(&self, name: &str) -> FormResult<FieldReport> {
		let field = self
			.field(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		let verdict = self.verdict_for(field);
		Ok(FieldReport {
			name: field.name.clone(),
			display: FieldDisplay::for_verdict(field, &verdict),
			verdict,
		})
	}

	pub fn is_field_valid(&self, name: &str) -> FormResult<bool> {
		Ok(self.validate_field(name)?.verdict.is_valid)
	}

	/// Validate every field in declaration order.
	pub fn validate_all(&self) -> Vec<FieldReport> {
		self.fields
			.iter()
			.map(|field| {
				let verdict = self.verdict_for(field);
				FieldReport {
					name: field.name.clone(),
					display: FieldDisplay::for_verdict(field, &verdict),
					verdict,
				}
			})
			.collect()
	}

	/// Names of the fields whose display may change when `name` changes.
	///
	/// A field in a cross-field pair affects its partner too.
	pub fn dependents_of(&self, name: &str) -> Vec<String> {
		let mut names = vec![name.to_string()];
		if let Some(cross) = self.rules.get(name).and_then(|rule| rule.cross_field.as_ref()) {
			for other in cross.fields() {
				if other != name && self.contains(other) {
					names.push(other.to_string());
				}
			}
		}
		names
	}

	/// Report for the first password pair present on this form.
	pub fn password_report(&self) -> Option<PasswordReport> {
		self.fields.iter().find_map(|field| {
			let rule = self.rules.get(&field.name)?;
			self.cross_field_report(rule.cross_field.as_ref()?)
		})
	}

	fn cross_field_report(&self, cross: &CrossField) -> Option<PasswordReport> {
		match cross {
			CrossField::PasswordPair { first, second } => {
				let first = self.field(first)?;
				let second = self.field(second)?;
				Some(check_passwords(&self.password_policy, first, second))
			}
		}
	}

	fn verdict_for(&self, field: &Field) -> ValidationVerdict {
		let rule = self.rules.rule_for(field);
		let verdict = self.validator.validate_with_rule(field, &rule);
		if !verdict.is_valid || !field.kind.gates_step() {
			return verdict;
		}
		match rule
			.cross_field
			.as_ref()
			.and_then(|cross| self.cross_field_report(cross))
		{
			Some(report) if !report.is_valid() => ValidationVerdict::invalid(report.message()),
			_ => verdict,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{FieldKind, Validity};
	use rstest::rstest;

	fn signup_fields() -> Vec<Field> {
		vec![
			Field::text("first_name").required(),
			Field::new("phone_number", FieldKind::Tel),
			Field::new("password1", FieldKind::Password).required(),
			Field::new("password2", FieldKind::Password).required(),
		]
	}

	#[rstest]
	fn test_unknown_field_is_an_error() {
		let mut form = FormModel::new(signup_fields());

		assert!(matches!(
			form.set_value("nickname", "x"),
			Err(FormError::UnknownField(name)) if name == "nickname"
		));
		assert!(form.validate_field("nickname").is_err());
	}

	#[rstest]
	fn test_phone_number_rule_from_table() {
		// Arrange
		let mut form = FormModel::new(signup_fields());
		form.set_value("phone_number", "0770-090").unwrap();

		// Act
		let report = form.validate_field("phone_number").unwrap();

		// Assert
		assert_eq!(report.verdict.message, "Phone number must only contain numbers.");
		assert_eq!(report.display.error.as_deref(), Some("Phone number must only contain numbers."));
	}

	#[rstest]
	fn test_matching_strong_passwords_mark_both_valid() {
		// Arrange
		let mut form = FormModel::new(signup_fields());
		form.set_value("password1", "Abcdefg1!").unwrap();
		form.set_value("password2", "Abcdefg1!").unwrap();

		// Act
		let reports: Vec<_> = ["password1", "password2"]
			.iter()
			.map(|name| form.validate_field(name).unwrap())
			.collect();

		// Assert
		for report in reports {
			assert!(report.verdict.is_valid);
			assert_eq!(report.display.validity, Validity::Valid);
		}
		assert_eq!(form.password_report().unwrap().mismatch_error(), None);
	}

	#[rstest]
	fn test_untouched_partner_stays_neutral() {
		// Arrange
		let mut form = FormModel::new(signup_fields());
		form.set_value("password1", "weak").unwrap();

		// Act
		let partner = form.validate_field("password2").unwrap();

		// Assert
		assert!(!partner.verdict.is_valid);
		assert_eq!(partner.display, FieldDisplay::neutral());
	}

	#[rstest]
	fn test_dependents_include_password_partner() {
		let form = FormModel::new(signup_fields());

		assert_eq!(form.dependents_of("password2"), vec!["password2", "password1"]);
		assert_eq!(form.dependents_of("first_name"), vec!["first_name"]);
	}

	#[rstest]
	fn test_password_report_absent_without_pair() {
		let form = FormModel::new(vec![Field::text("first_name")]);

		assert!(form.password_report().is_none());
	}
}
