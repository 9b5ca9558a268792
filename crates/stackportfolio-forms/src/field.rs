//! Field records
//!
//! A [`Field`] is the plain data record behind one visual control. The page
//! glue copies values into it from change events; validators and the stepper
//! only ever read the record, and a separate render pass pushes the resulting
//! [`FieldDisplay`] back into the control.

use crate::rules::FieldPattern;
use serde::{Deserialize, Serialize};

/// Kind of input a field was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Text,
	TextArea,
	Email,
	Tel,
	Url,
	Password,
	Checkbox,
	Radio,
	File,
	Hidden,
}

impl FieldKind {
	/// Map an HTML `type` attribute (or `textarea` tag name) to a kind.
	///
	/// Unknown types fall back to [`FieldKind::Text`], mirroring how browsers
	/// treat unrecognised input types.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::FieldKind;
	///
	/// assert_eq!(FieldKind::from_input_type("email"), FieldKind::Email);
	/// assert_eq!(FieldKind::from_input_type("TEXTAREA"), FieldKind::TextArea);
	/// assert_eq!(FieldKind::from_input_type("search"), FieldKind::Text);
	/// ```
	pub fn from_input_type(input_type: &str) -> Self {
		match input_type.to_ascii_lowercase().as_str() {
			"textarea" => Self::TextArea,
			"email" => Self::Email,
			"tel" => Self::Tel,
			"url" => Self::Url,
			"password" => Self::Password,
			"checkbox" => Self::Checkbox,
			"radio" => Self::Radio,
			"file" => Self::File,
			"hidden" => Self::Hidden,
			_ => Self::Text,
		}
	}

	/// Whether a field of this kind takes part in a step's aggregate validity.
	///
	/// Checkbox, radio, file and hidden inputs never block step advance.
	pub fn gates_step(self) -> bool {
		!matches!(self, Self::Checkbox | Self::Radio | Self::File | Self::Hidden)
	}

	/// Whether values of this kind must never be persisted.
	pub fn is_secret(self) -> bool {
		matches!(self, Self::Password)
	}
}

/// A named, typed user input.
#[derive(Debug, Clone)]
pub struct Field {
	pub name: String,
	pub kind: FieldKind,
	pub raw_value: String,
	/// Set by the first user-initiated change and never cleared afterwards.
	pub touched: bool,
	pub required: bool,
	pub min_length: Option<usize>,
	pub max_length: Option<usize>,
	pub pattern: Option<FieldPattern>,
	pub custom_message: Option<String>,
}

impl Field {
	/// Create an empty, untouched, optional field.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::{Field, FieldKind};
	///
	/// let field = Field::new("first_name", FieldKind::Text);
	/// assert_eq!(field.name, "first_name");
	/// assert!(!field.touched);
	/// assert!(!field.required);
	/// assert!(field.raw_value.is_empty());
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			raw_value: String::new(),
			touched: false,
			required: false,
			min_length: None,
			max_length: None,
			pattern: None,
			custom_message: None,
		}
	}

	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Text)
	}

	pub fn required(mut self) -> Self {
		self.required = true;
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

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.custom_message = Some(message.into());
		self
	}

	/// Seed a value without marking the field as touched.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::Field;
	///
	/// let field = Field::text("company").with_value("Acme");
	/// assert_eq!(field.raw_value, "Acme");
	/// assert!(!field.touched);
	/// ```
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.raw_value = value.into();
		self
	}

	/// Record a user-initiated change.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::Field;
	///
	/// let mut field = Field::text("company");
	/// field.set_value("Acme");
	/// assert!(field.touched);
	/// ```
	pub fn set_value(&mut self, value: impl Into<String>) {
		self.raw_value = value.into();
		self.touched = true;
	}

	pub fn trimmed(&self) -> &str {
		self.raw_value.trim()
	}

	/// Length of the trimmed value in characters, not bytes.
	pub fn trimmed_len(&self) -> usize {
		self.trimmed().chars().count()
	}

	/// Whether this field's value may be written to persistent storage.
	pub fn is_persistable(&self) -> bool {
		!self.kind.is_secret() && !self.name.contains("password")
	}
}

/// Outcome of one validation call. Always computed fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
	pub is_valid: bool,
	pub message: String,
}

impl ValidationVerdict {
	pub fn valid() -> Self {
		Self {
			is_valid: true,
			message: String::new(),
		}
	}

	pub fn invalid(message: impl Into<String>) -> Self {
		Self {
			is_valid: false,
			message: message.into(),
		}
	}

	/// Invalid without a user-facing message; gates navigation only.
	pub fn silent() -> Self {
		Self::invalid(String::new())
	}
}

/// Visual validity class of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
	Neutral,
	Valid,
	Invalid,
}

/// Render state for a field and its adjacent error element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDisplay {
	pub validity: Validity,
	/// `Some(text)` shows the error element with `text`; `None` hides it.
	pub error: Option<String>,
}

impl FieldDisplay {
	pub fn neutral() -> Self {
		Self {
			validity: Validity::Neutral,
			error: None,
		}
	}

	/// Derive the display for `field` from its verdict.
	///
	/// An untouched field is always neutral with its error hidden.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::{Field, FieldDisplay, ValidationVerdict, Validity};
	///
	/// let field = Field::text("first_name").required();
	/// let display = FieldDisplay::for_verdict(&field, &ValidationVerdict::silent());
	/// assert_eq!(display.validity, Validity::Neutral);
	/// assert_eq!(display.error, None);
	/// ```
	pub fn for_verdict(field: &Field, verdict: &ValidationVerdict) -> Self {
		if !field.touched {
			return Self::neutral();
		}
		if verdict.is_valid {
			Self {
				validity: Validity::Valid,
				error: None,
			}
		} else {
			Self {
				validity: Validity::Invalid,
				error: Some(verdict.message.clone()),
			}
		}
	}
}
