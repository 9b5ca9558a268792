//! End-to-end scenarios for the signup stepper, the project form and the tech
//! selector, driven the way the page glue drives them.

use rstest::*;
use stackportfolio_forms::wizard::{Step, StepMark, StepperEngine};
use stackportfolio_forms::{
	Field, FieldKind, FormDataStore, FormError, FormModel, FormSettings, Key, KeyValueStorage,
	MemoryStorage, PageKind, RuleTable, TechCatalog, TechSelector, Validity,
};

fn signup_fields() -> Vec<Field> {
	vec![
		Field::text("first_name").required(),
		Field::text("last_name").required(),
		Field::text("username").required().with_min_length(5),
		Field::new("email", FieldKind::Email).required(),
		Field::new("phone_number", FieldKind::Tel),
		Field::new("display_email", FieldKind::Checkbox),
		Field::new("password1", FieldKind::Password).required(),
		Field::new("password2", FieldKind::Password).required(),
	]
}

fn signup_steps() -> Vec<Step> {
	vec![
		Step::new(["first_name", "last_name", "username"]),
		Step::new(["email", "phone_number", "display_email"]),
		Step::new(["password1", "password2"]),
		Step::empty(),
	]
}

#[fixture]
fn storage() -> MemoryStorage {
	MemoryStorage::new()
}

fn signup_stepper(storage: &MemoryStorage) -> StepperEngine {
	let settings = FormSettings::default();
	let form = FormModel::with_rules(signup_fields(), PageKind::Signup.rules(), &settings);
	StepperEngine::new(form, signup_steps())
		.unwrap()
		.with_store(FormDataStore::new(Box::new(storage.clone()), settings.storage_key.clone()))
}

#[rstest]
fn test_initial_buttons_all_disabled_except_summary(storage: MemoryStorage) {
	// Arrange
	let stepper = signup_stepper(&storage);

	// Act
	let buttons = stepper.button_states();

	// Assert
	let enabled: Vec<bool> = buttons.iter().map(|b| b.enabled).collect();
	assert_eq!(enabled, vec![false, false, false, true]);
}

#[rstest]
fn test_required_field_cleared_shows_error_and_disables_next(storage: MemoryStorage) {
	// Arrange
	let mut stepper = signup_stepper(&storage);

	// Act
	let outcome = stepper.on_input("first_name", "").unwrap();

	// Assert
	let report = &outcome.fields[0];
	assert!(!report.verdict.is_valid);
	assert_eq!(report.display.validity, Validity::Invalid);
	assert_eq!(
		report.display.error.as_deref(),
		Some("This field must contain at least 2 characters.")
	);
	assert!(!outcome.buttons[0].enabled);
}

#[rstest]
fn test_whitespace_only_is_invalid(storage: MemoryStorage) {
	let mut stepper = signup_stepper(&storage);

	let outcome = stepper.on_input("last_name", "   ").unwrap();

	assert!(!outcome.fields[0].verdict.is_valid);
}

#[rstest]
fn test_first_name_over_forty_characters(storage: MemoryStorage) {
	// Arrange
	let mut stepper = signup_stepper(&storage);

	// Act
	let outcome = stepper.on_input("first_name", "a".repeat(42)).unwrap();

	// Assert
	let verdict = &outcome.fields[0].verdict;
	assert!(!verdict.is_valid);
	assert!(verdict.message.contains("40"));
}

#[rstest]
fn test_username_uses_custom_message(storage: MemoryStorage) {
	let mut stepper = signup_stepper(&storage);

	let outcome = stepper.on_input("username", "ada").unwrap();

	assert_eq!(
		outcome.fields[0].verdict.message,
		"Username must contain 5 characters and it can't contain symbols or spaces."
	);
}

#[rstest]
fn test_password_pair_scenario(storage: MemoryStorage) {
	// Arrange
	let mut stepper = signup_stepper(&storage);
	stepper.on_input("password1", "Abcdefg1!").unwrap();

	// Act
	let matched = stepper.on_input("password2", "Abcdefg1!").unwrap();

	// Assert
	assert!(matched.fields.iter().all(|r| r.display.validity == Validity::Valid));
	assert_eq!(matched.password.as_ref().unwrap().mismatch_error(), None);
	assert!(matched.buttons[2].enabled);

	// Act
	let mismatched = stepper.on_input("password2", "different").unwrap();

	// Assert
	assert_eq!(mismatched.fields.len(), 2);
	assert!(mismatched.fields.iter().all(|r| r.display.validity == Validity::Invalid));
	assert_eq!(
		mismatched.password.as_ref().unwrap().mismatch_error(),
		Some("Passwords do not match.")
	);
	assert!(!mismatched.buttons[2].enabled);
}

#[rstest]
fn test_passwords_never_persisted(storage: MemoryStorage) {
	// Arrange
	let mut stepper = signup_stepper(&storage);

	// Act
	stepper.on_input("first_name", "Ada").unwrap();
	stepper.on_input("password1", "Abcdefg1!").unwrap();
	stepper.on_input("password2", "Abcdefg1!").unwrap();

	// Assert
	let raw = storage.get("formData").unwrap().unwrap();
	assert!(raw.contains("first_name"));
	assert!(!raw.contains("password"));
	assert!(!raw.contains("Abcdefg1!"));
}

#[rstest]
fn test_full_signup_walkthrough(storage: MemoryStorage) {
	// Arrange
	let mut stepper = signup_stepper(&storage);

	// Act
	for (name, value) in [
		("first_name", "Ada"),
		("last_name", "Lovelace"),
		("username", "adalove"),
	] {
		stepper.on_input(name, value).unwrap();
	}
	stepper.next().unwrap();
	stepper.on_input("email", "ada@example.com").unwrap();
	stepper.on_input("phone_number", "07700900123").unwrap();
	stepper.next().unwrap();
	stepper.on_input("password1", "Abcdefg1!").unwrap();
	stepper.on_input("password2", "Abcdefg1!").unwrap();
	let to_summary = stepper.next().unwrap();

	// Assert
	assert_eq!(to_summary.to, 3);
	let summary = to_summary.summary.unwrap();
	assert!(summary.iter().any(|e| e.hook == "phone-number-field" && e.value == "07700900123"));
	assert!(summary.iter().all(|e| !e.name.contains("password")));
	assert_eq!(
		stepper.counter().marks,
		vec![
			StepMark::Complete,
			StepMark::Complete,
			StepMark::Complete,
			StepMark::Active
		]
	);

	// Act
	let payload = stepper.submit().unwrap();

	// Assert
	assert!(payload.contains(&("password1".to_string(), "Abcdefg1!".to_string())));
	assert_eq!(storage.get("formData").unwrap(), None);
}

#[rstest]
fn test_reload_restores_progress(storage: MemoryStorage) {
	// Arrange
	{
		let mut stepper = signup_stepper(&storage);
		stepper.on_input("first_name", "Ada").unwrap();
		stepper.on_input("last_name", "Lovelace").unwrap();
		stepper.on_input("username", "adalove").unwrap();
	}

	// Act
	let reloaded = signup_stepper(&storage);

	// Assert
	assert_eq!(reloaded.form().field("last_name").unwrap().raw_value, "Lovelace");
	assert!(reloaded.button_states()[0].enabled);
	assert_eq!(reloaded.active_index(), 0);
}

#[rstest]
fn test_malformed_progress_starts_fresh(storage: MemoryStorage) {
	// Arrange
	storage.set("formData", "{\"first_name\":").unwrap();

	// Act
	let stepper = signup_stepper(&storage);

	// Assert
	assert!(stepper.snapshot().is_empty());
	assert!(!stepper.form().field("first_name").unwrap().touched);
}

#[rstest]
fn test_previous_does_not_revalidate(storage: MemoryStorage) {
	// Arrange
	let mut stepper = signup_stepper(&storage);
	for (name, value) in [("first_name", "Ada"), ("last_name", "Lovelace"), ("username", "adalove")] {
		stepper.on_input(name, value).unwrap();
	}
	stepper.next().unwrap();

	// Act
	let back = stepper.previous().unwrap();

	// Assert
	assert_eq!((back.from, back.to), (1, 0));
	assert!(stepper.previous().is_none());
	assert!(matches!(stepper.submit(), Err(FormError::NotAtFinalStep { step: 0 })));
}

#[rstest]
#[case("Portfolio 2", true)]
#[case("12345", false)]
#[case("My app!", false)]
fn test_project_form_name_rule(#[case] value: &str, #[case] expected: bool) {
	// Arrange
	let form = FormModel::with_rules(
		vec![
			Field::text("project_name").required(),
			Field::new("description", FieldKind::TextArea),
		],
		RuleTable::project(),
		&FormSettings::default(),
	);
	let mut stepper = StepperEngine::single_page(form);

	// Act
	let outcome = stepper.on_input("project_name", value).unwrap();

	// Assert
	assert_eq!(outcome.buttons[0].enabled, expected);
	if !expected {
		assert_eq!(
			outcome.fields[0].verdict.message,
			"Project name must be at least 3 characters long and can't contain symbols."
		);
	}
}

#[rstest]
fn test_tech_selector_keyboard_scenario() {
	// Arrange
	let catalog = TechCatalog::from_pairs([("10", "JavaScript"), ("11", "Java"), ("12", "Python")]);
	let mut selector = TechSelector::new(catalog);

	// Act
	selector.set_input("jav");
	let shown: Vec<String> = selector.filtered().iter().map(|e| e.name.clone()).collect();
	selector.key(Key::ArrowDown);
	selector.key(Key::ArrowDown);
	selector.key(Key::Enter);

	// Assert
	assert_eq!(shown, vec!["JavaScript", "Java"]);
	assert_eq!(selector.selection().len(), 1);
	assert_eq!(selector.selection()[0].name(), "Java");
	assert!(!selector.dropdown_visible());
	assert_eq!(
		selector.hidden_fields(&FormSettings::default()),
		vec![
			("technologies".to_string(), "11".to_string()),
			("new_technologies".to_string(), String::new()),
		]
	);
}
