//! Password pair validation
//!
//! Two independent checks, combined by [`check_passwords`]:
//!
//! - [`check_match`]: evaluated only once both fields are touched
//! - [`PasswordPolicy::is_satisfied_by`]: evaluated on both current values,
//!   whether or not they have been touched
//!
//! The pair is valid only when both checks pass.

use crate::field::Field;
use crate::settings::FormSettings;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";

/// Composite strength policy: minimum length, a digit, an uppercase letter and
/// a non-alphanumeric character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
	pub min_length: usize,
}

impl Default for PasswordPolicy {
	fn default() -> Self {
		Self { min_length: 8 }
	}
}

impl PasswordPolicy {
	pub fn new(min_length: usize) -> Self {
		Self { min_length }
	}

	pub fn from_settings(settings: &FormSettings) -> Self {
		Self::new(settings.password_min_length)
	}

	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::password::PasswordPolicy;
	///
	/// let policy = PasswordPolicy::default();
	/// assert!(policy.is_satisfied_by("Abcdefg1!"));
	/// assert!(!policy.is_satisfied_by("abcdefg1!"));
	/// assert!(!policy.is_satisfied_by("Abcdefgh!"));
	/// assert!(!policy.is_satisfied_by("Abcdefg12"));
	/// assert!(!policy.is_satisfied_by("Abc1!"));
	/// ```
	pub fn is_satisfied_by(&self, password: &str) -> bool {
		password.chars().count() >= self.min_length
			&& password.chars().any(|c| c.is_ascii_digit())
			&& password.chars().any(|c| c.is_ascii_uppercase())
			&& password.chars().any(|c| !c.is_ascii_alphanumeric())
	}

	/// The single message listing every requirement.
	pub fn message(&self) -> String {
		format!(
			"Password must be at least {} characters long, include a number, an uppercase letter, and a special character.",
			self.min_length
		)
	}
}

/// Result of comparing the two password values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCheck {
	/// At least one field is untouched; nothing was compared.
	Pending,
	Matched,
	Mismatched,
}

/// Compare two password fields once both have been touched.
///
/// # Examples
///
/// ```
/// use stackportfolio_forms::{Field, FieldKind};
/// use stackportfolio_forms::password::{check_match, MatchCheck};
///
/// let mut first = Field::new("password1", FieldKind::Password);
/// let mut second = Field::new("password2", FieldKind::Password);
/// first.set_value("Abcdefg1!");
/// assert_eq!(check_match(&first, &second), MatchCheck::Pending);
///
/// second.set_value("different");
/// assert_eq!(check_match(&first, &second), MatchCheck::Mismatched);
/// ```
pub fn check_match(first: &Field, second: &Field) -> MatchCheck {
	if !(first.touched && second.touched) {
		return MatchCheck::Pending;
	}
	if first.raw_value == second.raw_value {
		MatchCheck::Matched
	} else {
		MatchCheck::Mismatched
	}
}

/// Combined outcome for a password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReport {
	pub matched: MatchCheck,
	pub strong: bool,
	/// At least one of the pair has been touched.
	pub touched: bool,
	criteria_message: String,
}

impl PasswordReport {
	pub fn is_valid(&self) -> bool {
		self.matched != MatchCheck::Mismatched && self.strong
	}

	/// Text for the shared mismatch element, `None` when it should be hidden.
	pub fn mismatch_error(&self) -> Option<&str> {
		(self.matched == MatchCheck::Mismatched).then_some(PASSWORD_MISMATCH_MESSAGE)
	}

	/// Text for the shared criteria element, `None` when it should be hidden.
	///
	/// Stays hidden until one of the pair has been touched.
	pub fn criteria_error(&self) -> Option<&str> {
		(self.touched && !self.strong).then_some(self.criteria_message.as_str())
	}

	/// First message to attach to the field verdicts.
	pub fn message(&self) -> &str {
		if let Some(mismatch) = self.mismatch_error() {
			mismatch
		} else if !self.strong {
			&self.criteria_message
		} else {
			""
		}
	}
}

/// Run both checks over the pair.
pub fn check_passwords(policy: &PasswordPolicy, first: &Field, second: &Field) -> PasswordReport {
	PasswordReport {
		matched: check_match(first, second),
		strong: policy.is_satisfied_by(&first.raw_value) && policy.is_satisfied_by(&second.raw_value),
		touched: first.touched || second.touched,
		criteria_message: policy.message(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::FieldKind;
	use rstest::rstest;

	fn pair(first: &str, second: &str) -> (Field, Field) {
		let mut p1 = Field::new("password1", FieldKind::Password);
		let mut p2 = Field::new("password2", FieldKind::Password);
		p1.set_value(first);
		p2.set_value(second);
		(p1, p2)
	}

	#[rstest]
	fn test_matching_strong_passwords_are_valid() {
		// Arrange
		let (p1, p2) = pair("Abcdefg1!", "Abcdefg1!");

		// Act
		let report = check_passwords(&PasswordPolicy::default(), &p1, &p2);

		// Assert
		assert!(report.is_valid());
		assert_eq!(report.matched, MatchCheck::Matched);
		assert_eq!(report.mismatch_error(), None);
		assert_eq!(report.criteria_error(), None);
	}

	#[rstest]
	fn test_mismatch_reports_exact_message() {
		// Arrange
		let (p1, p2) = pair("Abcdefg1!", "different");

		// Act
		let report = check_passwords(&PasswordPolicy::default(), &p1, &p2);

		// Assert
		assert!(!report.is_valid());
		assert_eq!(report.mismatch_error(), Some("Passwords do not match."));
		assert_eq!(report.message(), "Passwords do not match.");
	}

	#[rstest]
	fn test_strength_checked_before_both_touched() {
		// Arrange
		let mut p1 = Field::new("password1", FieldKind::Password);
		let p2 = Field::new("password2", FieldKind::Password);
		p1.set_value("Abcdefg1!");

		// Act
		let report = check_passwords(&PasswordPolicy::default(), &p1, &p2);

		// Assert
		assert_eq!(report.matched, MatchCheck::Pending);
		assert!(!report.strong);
		assert!(!report.is_valid());
	}

	#[rstest]
	fn test_weak_matching_passwords_show_criteria() {
		let (p1, p2) = pair("password", "password");

		let report = check_passwords(&PasswordPolicy::default(), &p1, &p2);

		assert_eq!(report.matched, MatchCheck::Matched);
		assert_eq!(
			report.criteria_error(),
			Some(
				"Password must be at least 8 characters long, include a number, an uppercase letter, and a special character."
			)
		);
	}

	#[rstest]
	fn test_criteria_hidden_before_interaction() {
		// Arrange
		let p1 = Field::new("password1", FieldKind::Password);
		let p2 = Field::new("password2", FieldKind::Password);

		// Act
		let report = check_passwords(&PasswordPolicy::default(), &p1, &p2);

		// Assert
		assert!(!report.is_valid());
		assert_eq!(report.criteria_error(), None);
		assert_eq!(report.mismatch_error(), None);
	}

	#[rstest]
	#[case("Abcdef1!", true)]
	#[case("Abcde1!", false)]
	#[case("Ábcdefg1", false)]
	#[case("Ábcdefg1Z", true)]
	#[case("ABCDEFG1", false)]
	fn test_policy_boundaries(#[case] password: &str, #[case] expected: bool) {
		assert_eq!(PasswordPolicy::default().is_satisfied_by(password), expected);
	}
}
