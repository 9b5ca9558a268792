//! In-memory elements for native tests

use crate::dom::ElementView;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

/// An [`ElementView`] that records its state instead of touching a DOM.
///
/// # Examples
///
/// ```
/// use stackportfolio_pages::dom::ElementView;
/// use stackportfolio_pages::testing::MemoryElement;
///
/// let element = MemoryElement::with_classes(&["hidden"]);
/// element.remove_class("hidden");
/// element.set_text("Passwords do not match.");
///
/// assert!(!element.has_class("hidden"));
/// assert_eq!(element.text(), "Passwords do not match.");
/// ```
#[derive(Debug, Default)]
pub struct MemoryElement {
	classes: RefCell<BTreeSet<String>>,
	attributes: RefCell<BTreeMap<String, String>>,
	text: RefCell<String>,
	focus_count: Cell<usize>,
}

impl MemoryElement {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_classes(classes: &[&str]) -> Self {
		let element = Self::new();
		for class in classes {
			element.add_class(class);
		}
		element
	}

	pub fn classes(&self) -> Vec<String> {
		self.classes.borrow().iter().cloned().collect()
	}

	pub fn is_disabled(&self) -> bool {
		self.attributes.borrow().contains_key("disabled")
	}

	pub fn focus_count(&self) -> usize {
		self.focus_count.get()
	}
}

impl ElementView for MemoryElement {
	fn add_class(&self, class: &str) {
		self.classes.borrow_mut().insert(class.to_string());
	}

	fn remove_class(&self, class: &str) {
		self.classes.borrow_mut().remove(class);
	}

	fn has_class(&self, class: &str) -> bool {
		self.classes.borrow().contains(class)
	}

	fn set_text(&self, text: &str) {
		*self.text.borrow_mut() = text.to_string();
	}

	fn text(&self) -> String {
		self.text.borrow().clone()
	}

	fn set_attribute(&self, name: &str, value: &str) {
		self.attributes
			.borrow_mut()
			.insert(name.to_string(), value.to_string());
	}

	fn remove_attribute(&self, name: &str) {
		self.attributes.borrow_mut().remove(name);
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.attributes.borrow().get(name).cloned()
	}

	fn focus(&self) {
		self.focus_count.set(self.focus_count.get() + 1);
	}
}
