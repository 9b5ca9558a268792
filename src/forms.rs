//! Form engines: validation, password checks, the stepper and the tech selector
//!
//! This module re-exports `stackportfolio-forms`. Everything in it operates
//! on plain records and runs the same natively and in the browser.
//!
//! ## Example
//!
//! ```
//! use stackportfolio::forms::{Field, FieldValidator, FormSettings, ValidationOptions};
//!
//! let validator = FieldValidator::new(&FormSettings::default());
//! let mut field = Field::text("first_name").required();
//! field.set_value("A");
//!
//! let verdict = validator.validate(&field, &ValidationOptions::new());
//! assert!(!verdict.is_valid);
//! assert_eq!(verdict.message, "This field must contain at least 2 characters.");
//! ```

pub use stackportfolio_forms::*;
