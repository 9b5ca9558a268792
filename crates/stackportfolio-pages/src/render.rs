//! Push engine state into elements
//!
//! Each function takes the computed state from `stackportfolio-forms` and the
//! elements to update. Nothing here decides validity; it only mirrors it.

use crate::dom::ElementView;
use crate::settings::ClassNames;
use stackportfolio_forms::wizard::{StepCounter, StepMark, StepView, SummaryEntry};
use stackportfolio_forms::{FieldDisplay, FieldKind, PasswordReport, TechSelector, Validity};

/// Style a field and its adjacent error element.
///
/// A missing error element only skips the message.
pub fn render_field<E: ElementView>(
	input: &E,
	error: Option<&E>,
	display: &FieldDisplay,
	classes: &ClassNames,
) {
	input.toggle_class(&classes.input_valid, display.validity == Validity::Valid);
	input.toggle_class(&classes.input_invalid, display.validity == Validity::Invalid);
	if let Some(error) = error {
		render_message(error, display.error.as_deref(), classes);
	}
}

/// Style a control after validation.
///
/// Kinds that never gate a step (checkbox, radio, file) keep only their own
/// styling, such as [`render_checkbox`].
pub fn render_control<E: ElementView>(
	input: &E,
	error: Option<&E>,
	kind: FieldKind,
	display: &FieldDisplay,
	classes: &ClassNames,
) {
	if kind.gates_step() {
		render_field(input, error, display, classes);
	}
}

/// Show `message` in `element`, or hide the element when there is none.
pub fn render_message<E: ElementView>(element: &E, message: Option<&str>, classes: &ClassNames) {
	match message {
		Some(text) => {
			element.set_text(text);
			element.remove_class(&classes.hidden);
		}
		None => {
			element.set_text("");
			element.add_class(&classes.hidden);
		}
	}
}

/// Update the shared password mismatch and criteria elements.
pub fn render_password_errors<E: ElementView>(
	mismatch: Option<&E>,
	criteria: Option<&E>,
	report: &PasswordReport,
	classes: &ClassNames,
) {
	if let Some(element) = mismatch {
		render_message(element, report.mismatch_error(), classes);
	}
	if let Some(element) = criteria {
		render_message(element, report.criteria_error(), classes);
	}
}

/// Show or hide one step and fix the tab order of its interactive elements.
pub fn render_step<E: ElementView>(container: &E, focusables: &[E], view: &StepView, classes: &ClassNames) {
	container.toggle_class(&classes.current_step, view.visible);
	container.toggle_class(&classes.hidden, !view.visible);
	for element in focusables {
		if view.focusable {
			element.remove_attribute("tabindex");
		} else {
			element.set_attribute("tabindex", "-1");
		}
	}
}

/// Enable or disable a step's "next" control.
pub fn render_button<E: ElementView>(button: &E, enabled: bool, classes: &ClassNames) {
	button.set_disabled(!enabled);
	button.toggle_class(&classes.btn_primary, enabled);
	button.toggle_class(&classes.btn_disabled, !enabled);
	button.toggle_class(&classes.cursor_not_allowed, !enabled);
}

/// Mobile counter: one `.step` per step, completed ones carry a checkmark.
pub fn render_mobile_counter<E: ElementView>(items: &[E], counter: &StepCounter, classes: &ClassNames) {
	for (item, mark) in items.iter().zip(&counter.marks) {
		item.toggle_class(&classes.step_primary, *mark != StepMark::Pending);
		if *mark == StepMark::Complete {
			item.set_attribute("data-content", StepMark::CHECKMARK);
		} else {
			item.remove_attribute("data-content");
		}
	}
}

/// Desktop counter item: the numbered badge and its label.
#[derive(Debug)]
pub struct DesktopCounterItem<E> {
	pub number: E,
	pub label: E,
}

/// Desktop counter, kept in step with the mobile one from the same marks.
pub fn render_desktop_counter<E: ElementView>(
	items: &[DesktopCounterItem<E>],
	counter: &StepCounter,
	classes: &ClassNames,
) {
	for (index, (item, mark)) in items.iter().zip(&counter.marks).enumerate() {
		let reached = *mark != StepMark::Pending;
		item.number.set_text(&counter.label(index));
		item.number.toggle_class(&classes.bg_primary, reached);
		item.number.toggle_class(&classes.text_white, reached);
		item.label.toggle_class(&classes.text_primary, reached);
	}
}

/// Fill the summary step. `lookup` finds the element carrying a hook class.
pub fn render_summary<E, F>(entries: &[SummaryEntry], lookup: F)
where
	E: ElementView,
	F: Fn(&str) -> Option<E>,
{
	for entry in entries {
		if let Some(element) = lookup(&entry.hook) {
			element.set_text(&entry.value);
		}
	}
}

/// Checkbox toggles switch colour with their state.
pub fn render_checkbox<E: ElementView>(input: &E, checked: bool, classes: &ClassNames) {
	input.toggle_class(&classes.toggle_primary, checked);
	input.toggle_class(&classes.toggle_secondary, !checked);
}

/// One catalog `<li>` and the identifier it carries.
#[derive(Debug)]
pub struct TechItem<E> {
	pub element: E,
	pub id: String,
}

/// Show matching catalog items, highlight the cursor and toggle the dropdown.
pub fn render_tech_dropdown<E: ElementView>(
	dropdown: &E,
	items: &[TechItem<E>],
	selector: &TechSelector,
	classes: &ClassNames,
) {
	let filtered = selector.filtered();
	dropdown.toggle_class(&classes.hidden, filtered.is_empty());
	for item in items {
		let position = filtered.iter().position(|entry| entry.id == item.id);
		let highlighted = position.is_some() && position == selector.cursor();
		item.element.toggle_class(&classes.hidden, position.is_none());
		item.element.toggle_class(&classes.bg_primary, highlighted);
		item.element.toggle_class(&classes.text_white, highlighted);
	}
}
