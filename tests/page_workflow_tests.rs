//! Page workflows driven through the facade prelude.

use rstest::rstest;
use stackportfolio::prelude::*;

#[rstest]
fn test_project_page_rules_apply_to_project_name() {
	// Arrange
	let settings = FormSettings::default();
	let kind = PageKind::classify("/project/42/edit/").unwrap();
	let form = FormModel::with_rules(
		vec![Field::text("project_name").required()],
		kind.rules(),
		&settings,
	);
	let mut stepper = StepperEngine::single_page(form);

	// Act
	let outcome = stepper.on_input("project_name", "2024").unwrap();

	// Assert
	assert!(!outcome.fields[0].verdict.is_valid);
	assert_eq!(
		outcome.fields[0].verdict.message,
		"Project name must be at least 3 characters long and can't contain symbols."
	);
	assert!(!outcome.buttons[0].enabled);

	// Act
	let outcome = stepper.on_input("project_name", "Portfolio 2").unwrap();

	// Assert
	assert!(outcome.buttons[0].enabled);
	assert_eq!(stepper.submit().unwrap(), vec![("project_name".to_string(), "Portfolio 2".to_string())]);
}

#[rstest]
fn test_signup_page_stepper_persists_through_prelude_store() {
	// Arrange
	let storage = stackportfolio::forms::MemoryStorage::new();
	let settings = FormSettings::default();
	let kind = PageKind::classify("/accounts/signup/").unwrap();
	let form = FormModel::with_rules(vec![Field::text("first_name").required()], kind.rules(), &settings);
	let mut stepper = StepperEngine::new(form, vec![Step::new(["first_name"]), Step::empty()])
		.unwrap()
		.with_store(FormDataStore::new(Box::new(storage.clone()), settings.storage_key.clone()));

	// Act
	stepper.on_input("first_name", "Ada").unwrap();

	// Assert
	assert!(kind.persists_progress());
	assert_eq!(storage.len(), 1);
}
