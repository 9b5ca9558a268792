//! Page classification
//!
//! The hosting page's address decides which workflow is initialized.

use crate::rules::RuleTable;

/// Form workflow served by a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
	/// Multi-step account signup with persisted progress.
	Signup,
	/// Single-page project create or edit form.
	ProjectForm,
	/// Single-page profile edit form.
	UserEdit,
}

impl PageKind {
	/// Classify a page by substrings of its address.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::routing::PageKind;
	///
	/// assert_eq!(PageKind::classify("https://example.com/accounts/signup/"), Some(PageKind::Signup));
	/// assert_eq!(PageKind::classify("/project/create/"), Some(PageKind::ProjectForm));
	/// assert_eq!(PageKind::classify("/project/12/edit/"), Some(PageKind::ProjectForm));
	/// assert_eq!(PageKind::classify("/user/ada/edit/"), Some(PageKind::UserEdit));
	/// assert_eq!(PageKind::classify("/project/12/"), None);
	/// ```
	pub fn classify(url: &str) -> Option<Self> {
		if url.contains("signup") {
			Some(Self::Signup)
		} else if url.contains("project/create") || (url.contains("project/") && url.contains("edit")) {
			Some(Self::ProjectForm)
		} else if url.contains("user/") && url.contains("edit") {
			Some(Self::UserEdit)
		} else {
			None
		}
	}

	pub fn rules(self) -> RuleTable {
		match self {
			Self::Signup => RuleTable::signup(),
			Self::ProjectForm => RuleTable::project(),
			Self::UserEdit => RuleTable::user_edit(),
		}
	}

	pub fn is_multi_step(self) -> bool {
		matches!(self, Self::Signup)
	}

	/// Whether in-progress values are saved across reloads.
	pub fn persists_progress(self) -> bool {
		self.is_multi_step()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/accounts/signup/", Some(PageKind::Signup))]
	#[case("/project/create/", Some(PageKind::ProjectForm))]
	#[case("/project/4/edit/", Some(PageKind::ProjectForm))]
	#[case("/user/grace/edit/", Some(PageKind::UserEdit))]
	#[case("/user/grace/", None)]
	#[case("/", None)]
	fn test_classify(#[case] url: &str, #[case] expected: Option<PageKind>) {
		assert_eq!(PageKind::classify(url), expected);
	}

	#[rstest]
	fn test_only_signup_persists_progress() {
		assert!(PageKind::Signup.persists_progress());
		assert!(!PageKind::ProjectForm.persists_progress());
		assert!(!PageKind::UserEdit.persists_progress());
	}
}
