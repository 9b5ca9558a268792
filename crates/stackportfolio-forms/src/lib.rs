//! Form interaction engine for StackPortfolio
//!
//! Platform-independent state behind the site's forms:
//! - Per-field validation driven by a declarative rule table
//! - Password match and strength checks
//! - A multi-step stepper with persisted progress and a summary step
//! - A typeahead technology selector with custom tags
//!
//! Everything here operates on plain data records. The `stackportfolio-pages`
//! crate synchronizes those records with the DOM.
//!
//! ## Example
//!
//! ```
//! use stackportfolio_forms::{Field, FieldKind, FormModel, RuleTable, FormSettings};
//! use stackportfolio_forms::wizard::{Step, StepperEngine};
//!
//! let settings = FormSettings::default();
//! let form = FormModel::with_rules(
//!     vec![
//!         Field::text("first_name").required(),
//!         Field::new("email", FieldKind::Email).required(),
//!     ],
//!     RuleTable::signup(),
//!     &settings,
//! );
//! let mut stepper = StepperEngine::new(
//!     form,
//!     vec![Step::new(["first_name", "email"]), Step::empty()],
//! )
//! .unwrap();
//!
//! stepper.on_input("first_name", "Ada").unwrap();
//! let outcome = stepper.on_input("email", "ada@example").unwrap();
//! assert!(!outcome.buttons[0].enabled);
//!
//! let outcome = stepper.on_input("email", "ada@example.com").unwrap();
//! assert!(outcome.buttons[0].enabled);
//! ```

pub mod field;
pub mod form;
pub mod password;
pub mod routing;
pub mod rules;
pub mod settings;
pub mod store;
pub mod tech;
pub mod validators;
pub mod wizard;

pub use field::{Field, FieldDisplay, FieldKind, ValidationVerdict, Validity};
pub use form::{FieldReport, FormError, FormModel, FormResult};
pub use password::{MatchCheck, PasswordPolicy, PasswordReport, check_match, check_passwords};
pub use routing::PageKind;
pub use rules::{CrossField, FieldPattern, FieldRule, FormatCheck, RuleTable, ValidationOptions};
pub use settings::{FormSettings, SettingsError};
pub use store::{
	FormDataStore, FormSnapshot, KeyValueStorage, MemoryStorage, StorageError, StorageResult,
};
pub use tech::{ChipKind, Key, SelectedTech, TechCatalog, TechEntry, TechSelector};
pub use validators::FieldValidator;
pub use wizard::{
	ButtonState, InputOutcome, Step, StepCounter, StepMark, StepView, StepperEngine,
	StepperState, SummaryEntry, Transition,
};
