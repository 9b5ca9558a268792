//! Element abstraction
//!
//! Renderers only need a handful of element operations. [`ElementView`]
//! names them so the same render code drives `web_sys::Element` in the
//! browser and [`MemoryElement`](crate::testing::MemoryElement) in tests.
//!
//! Operations never fail: a DOM call that throws is logged and skipped, so a
//! broken element can't stop the rest of an update.

/// Minimal mutable view of one element.
pub trait ElementView {
	fn add_class(&self, class: &str);
	fn remove_class(&self, class: &str);
	fn has_class(&self, class: &str) -> bool;
	fn set_text(&self, text: &str);
	fn text(&self) -> String;
	fn set_attribute(&self, name: &str, value: &str);
	fn remove_attribute(&self, name: &str);
	fn attribute(&self, name: &str) -> Option<String>;
	fn focus(&self);

	fn toggle_class(&self, class: &str, on: bool) {
		if on {
			self.add_class(class);
		} else {
			self.remove_class(class);
		}
	}

	fn set_disabled(&self, disabled: bool) {
		if disabled {
			self.set_attribute("disabled", "");
		} else {
			self.remove_attribute("disabled");
		}
	}
}

impl<T: ElementView + ?Sized> ElementView for &T {
	fn add_class(&self, class: &str) {
		(**self).add_class(class)
	}

	fn remove_class(&self, class: &str) {
		(**self).remove_class(class)
	}

	fn has_class(&self, class: &str) -> bool {
		(**self).has_class(class)
	}

	fn set_text(&self, text: &str) {
		(**self).set_text(text)
	}

	fn text(&self) -> String {
		(**self).text()
	}

	fn set_attribute(&self, name: &str, value: &str) {
		(**self).set_attribute(name, value)
	}

	fn remove_attribute(&self, name: &str) {
		(**self).remove_attribute(name)
	}

	fn attribute(&self, name: &str) -> Option<String> {
		(**self).attribute(name)
	}

	fn focus(&self) {
		(**self).focus()
	}

	fn set_disabled(&self, disabled: bool) {
		(**self).set_disabled(disabled)
	}
}

#[cfg(target_arch = "wasm32")]
mod web {
	use super::ElementView;
	use crate::warn_log;
	use wasm_bindgen::JsCast;

	fn report(op: &str, result: Result<(), wasm_bindgen::JsValue>) {
		if let Err(e) = result {
			warn_log!("element {} failed: {:?}", op, e);
		}
	}

	impl ElementView for web_sys::Element {
		fn add_class(&self, class: &str) {
			report("add_class", self.class_list().add_1(class));
		}

		fn remove_class(&self, class: &str) {
			report("remove_class", self.class_list().remove_1(class));
		}

		fn has_class(&self, class: &str) -> bool {
			self.class_list().contains(class)
		}

		fn set_text(&self, text: &str) {
			self.set_text_content(Some(text));
		}

		fn text(&self) -> String {
			self.text_content().unwrap_or_default()
		}

		fn set_attribute(&self, name: &str, value: &str) {
			report("set_attribute", web_sys::Element::set_attribute(self, name, value));
		}

		fn remove_attribute(&self, name: &str) {
			report("remove_attribute", web_sys::Element::remove_attribute(self, name));
		}

		fn attribute(&self, name: &str) -> Option<String> {
			self.get_attribute(name)
		}

		fn focus(&self) {
			if let Some(element) = self.dyn_ref::<web_sys::HtmlElement>() {
				report("focus", element.focus());
			}
		}

		fn set_disabled(&self, disabled: bool) {
			if let Some(button) = self.dyn_ref::<web_sys::HtmlButtonElement>() {
				button.set_disabled(disabled);
			} else if disabled {
				ElementView::set_attribute(self, "disabled", "");
			} else {
				ElementView::remove_attribute(self, "disabled");
			}
		}
	}
}
