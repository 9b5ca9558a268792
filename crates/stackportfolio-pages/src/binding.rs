//! DOM wiring for the stepper and the technology selector
//!
//! Bindings read the page once on attach, build the engine records from the
//! markup and then translate browser events into engine calls. Every render
//! goes through [`crate::render`].
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Browser
//!     participant StepperBinding
//!     participant StepperEngine
//!     participant render
//!
//!     Browser->>StepperBinding: input event
//!     StepperBinding->>StepperEngine: on_input(name, value)
//!     StepperEngine-->>StepperBinding: InputOutcome
//!     StepperBinding->>render: fields, password errors, buttons
//!     Browser->>StepperBinding: next click
//!     StepperBinding->>StepperEngine: next() / submit()
//!     StepperBinding->>render: steps, counters, summary
//! ```

use crate::dom::ElementView;
use crate::error::{PageError, PageResult};
use crate::render::{self, DesktopCounterItem, TechItem};
use crate::settings::PageSettings;
use crate::storage::open_storage;
use crate::{debug_log, error_log, info_log, warn_log};
use stackportfolio_forms::wizard::{ButtonState, Step, StepperEngine};
use stackportfolio_forms::{
	ChipKind, Field, FieldKind, FieldPattern, FieldReport, FormDataStore, FormError, FormModel, Key,
	PageKind, TechCatalog, TechEntry, TechSelector,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent,
	NodeList,
};

/// Marks hidden inputs generated for the technology selection.
const TECH_FIELD_MARKER: &str = "data-tech-field";

fn collect(list: NodeList) -> Vec<Element> {
	(0..list.length())
		.filter_map(|index| list.item(index))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

fn query_all(document: &Document, selector: &str) -> PageResult<Vec<Element>> {
	Ok(collect(document.query_selector_all(selector)?))
}

fn query_all_in(root: &Element, selector: &str) -> PageResult<Vec<Element>> {
	Ok(collect(root.query_selector_all(selector)?))
}

fn require(document: &Document, selector: &str) -> PageResult<Element> {
	document
		.query_selector(selector)?
		.ok_or_else(|| PageError::MissingElement(selector.to_string()))
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
///
/// Handler errors are logged; they never reach the browser.
fn listen<F>(target: &EventTarget, event: &str, mut handler: F) -> PageResult<()>
where
	F: FnMut(&Event) -> PageResult<()> + 'static,
{
	let name = event.to_string();
	let closure = Closure::wrap(Box::new(move |event: Event| {
		if let Err(e) = handler(&event) {
			error_log!("{} handler failed: {}", name, e);
		}
	}) as Box<dyn FnMut(_)>);

	target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
	closure.forget();
	Ok(())
}

/// Current value of a control as the engine sees it.
///
/// Checkboxes read as `"on"` when checked and empty otherwise; unchecked
/// radios read as empty.
fn input_value(element: &Element) -> String {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		match input.type_().as_str() {
			"checkbox" if input.checked() => "on".to_string(),
			"checkbox" => String::new(),
			"radio" if !input.checked() => String::new(),
			_ => input.value(),
		}
	} else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
		area.value()
	} else {
		String::new()
	}
}

/// Put a restored value back into its control.
fn write_value(element: &Element, value: &str) {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		match input.type_().as_str() {
			"checkbox" => input.set_checked(!value.is_empty()),
			"radio" => input.set_checked(input.value() == value),
			"file" => {}
			_ => input.set_value(value),
		}
	} else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
		area.set_value(value);
	}
}

fn is_checkbox(element: &Element) -> bool {
	element
		.dyn_ref::<HtmlInputElement>()
		.is_some_and(|input| input.type_() == "checkbox")
}

/// Build a field record from a control's markup.
///
/// Hidden inputs and buttons are not fields.
fn field_from_element(element: &Element) -> Option<Field> {
	let name = element.get_attribute("name").filter(|name| !name.is_empty())?;
	let kind = if element.tag_name().eq_ignore_ascii_case("textarea") {
		FieldKind::TextArea
	} else {
		let input_type = element.get_attribute("type").unwrap_or_default();
		if matches!(input_type.as_str(), "submit" | "button" | "reset" | "image") {
			return None;
		}
		FieldKind::from_input_type(&input_type)
	};
	if kind == FieldKind::Hidden {
		return None;
	}

	let mut field = Field::new(name, kind).with_value(input_value(element));
	field.required = element.has_attribute("required");
	field.min_length = element
		.get_attribute("minlength")
		.and_then(|value| value.parse().ok());
	field.max_length = element
		.get_attribute("maxlength")
		.and_then(|value| value.parse().ok());
	field.pattern = element
		.get_attribute("pattern")
		.and_then(|pattern| match FieldPattern::new(&pattern) {
			Ok(pattern) => Some(pattern),
			Err(e) => {
				warn_log!("ignoring pattern {:?} on {}: {}", pattern, field.name, e);
				None
			}
		});
	field.custom_message = element.get_attribute("data-error-message");
	Some(field)
}

/// A named control.
struct FieldElement {
	name: String,
	kind: FieldKind,
	element: Element,
}

/// One step container with its "next" controls.
struct StepElements {
	container: Option<Element>,
	focusables: Vec<Element>,
	buttons: Vec<Element>,
}

/// Binds a form's controls to a [`StepperEngine`].
pub struct StepperBinding {
	engine: RefCell<StepperEngine>,
	settings: Rc<PageSettings>,
	document: Document,
	inputs: Vec<FieldElement>,
	steps: Vec<StepElements>,
	prev_buttons: Vec<Element>,
	mobile_counter: Vec<Element>,
	desktop_counter: Vec<DesktopCounterItem<Element>>,
	password_mismatch: Option<Element>,
	password_criteria: Option<Element>,
}

impl StepperBinding {
	/// Read the page, build the engine for `kind` and register listeners.
	pub fn attach(document: &Document, kind: PageKind, settings: Rc<PageSettings>) -> PageResult<Rc<Self>> {
		let selectors = &settings.selectors;

		let mut inputs: Vec<FieldElement> = Vec::new();
		let mut fields: Vec<Field> = Vec::new();
		for element in query_all(document, &selectors.inputs)? {
			if element.matches(&selectors.tech_input)? || element.has_attribute(TECH_FIELD_MARKER) {
				continue;
			}
			let Some(field) = field_from_element(&element) else {
				continue;
			};
			if !fields.iter().any(|existing| existing.name == field.name) {
				fields.push(field.clone());
			}
			inputs.push(FieldElement {
				name: field.name,
				kind: field.kind,
				element,
			});
		}
		let form = FormModel::with_rules(fields, kind.rules(), &settings.form);

		let (engine, steps) = if kind.is_multi_step() {
			let containers = query_all(document, &selectors.steps)?;
			let last = containers.len().saturating_sub(1);
			let mut steps = Vec::with_capacity(containers.len());
			let mut elements = Vec::with_capacity(containers.len());
			for (index, container) in containers.into_iter().enumerate() {
				let mut names: Vec<String> = Vec::new();
				for element in query_all_in(&container, &selectors.inputs)? {
					if let Some(name) = element.get_attribute("name")
						&& form.contains(&name)
						&& !names.contains(&name)
					{
						names.push(name);
					}
				}
				steps.push(Step::new(names));

				let mut buttons = query_all_in(&container, &selectors.next_buttons)?;
				if index == last {
					for submit in query_all_in(&container, &selectors.submit_button)? {
						if !buttons.contains(&submit) {
							buttons.push(submit);
						}
					}
				}
				elements.push(StepElements {
					focusables: query_all_in(&container, &selectors.focusables)?,
					container: Some(container),
					buttons,
				});
			}

			let mut engine = StepperEngine::new(form, steps)?;
			if kind.persists_progress() {
				let store = FormDataStore::new(open_storage(), settings.form.storage_key.clone());
				engine = engine.with_store(store);
			}
			(engine, elements)
		} else {
			let elements = vec![StepElements {
				container: None,
				focusables: Vec::new(),
				buttons: query_all(document, &selectors.submit_button)?,
			}];
			(StepperEngine::single_page(form), elements)
		};

		let desktop_counter = query_all(document, &selectors.desktop_counter)?
			.into_iter()
			.filter_map(|item| {
				let number = item.query_selector(&selectors.desktop_number).ok().flatten()?;
				let label = item.query_selector(&selectors.desktop_label).ok().flatten()?;
				Some(DesktopCounterItem { number, label })
			})
			.collect();

		let binding = Rc::new(Self {
			engine: RefCell::new(engine),
			prev_buttons: query_all(document, &selectors.prev_buttons)?,
			mobile_counter: query_all(document, &selectors.mobile_counter)?,
			desktop_counter,
			password_mismatch: document.query_selector(&selectors.password_mismatch_error)?,
			password_criteria: document.query_selector(&selectors.password_criteria_error)?,
			document: document.clone(),
			inputs,
			steps,
			settings,
		});

		binding.write_restored_values();
		binding.render_all();
		for report in binding.engine.borrow().form().validate_all() {
			binding.render_report(&report);
		}
		Self::bind(&binding)?;

		info_log!(
			"stepper bound: {:?}, {} steps, {} controls",
			kind,
			binding.steps.len(),
			binding.inputs.len()
		);
		Ok(binding)
	}

	fn bind(binding: &Rc<Self>) -> PageResult<()> {
		for (index, input) in binding.inputs.iter().enumerate() {
			let event = match input.kind {
				FieldKind::Checkbox | FieldKind::Radio | FieldKind::File => "change",
				_ => "input",
			};
			let this = Rc::clone(binding);
			listen(&input.element, event, move |_event| this.on_input(index))?;
		}
		for step in &binding.steps {
			for button in &step.buttons {
				let this = Rc::clone(binding);
				listen(button, "click", move |event| this.on_next(event))?;
			}
		}
		for button in &binding.prev_buttons {
			let this = Rc::clone(binding);
			listen(button, "click", move |event| {
				event.prevent_default();
				this.on_previous();
				Ok(())
			})?;
		}
		Ok(())
	}

	fn on_input(&self, index: usize) -> PageResult<()> {
		let Some(input) = self.inputs.get(index) else {
			return Ok(());
		};
		let value = input_value(&input.element);
		let outcome = self.engine.borrow_mut().on_input(&input.name, value)?;

		for report in &outcome.fields {
			self.render_report(report);
		}
		if let Some(report) = &outcome.password {
			render::render_password_errors(
				self.password_mismatch.as_ref(),
				self.password_criteria.as_ref(),
				report,
				&self.settings.classes,
			);
		}
		self.render_buttons(&outcome.buttons);
		if is_checkbox(&input.element) {
			let checked = !input_value(&input.element).is_empty();
			render::render_checkbox(&input.element, checked, &self.settings.classes);
		}
		Ok(())
	}

	fn on_next(&self, event: &Event) -> PageResult<()> {
		let mut engine = self.engine.borrow_mut();
		if engine.state().is_last() {
			return match engine.submit() {
				Ok(payload) => {
					debug_log!("submitting {} fields", payload.len());
					Ok(())
				}
				Err(FormError::NavigationBlocked { step }) => {
					event.prevent_default();
					debug_log!("submit blocked on step {}", step);
					Ok(())
				}
				Err(e) => {
					event.prevent_default();
					Err(e.into())
				}
			};
		}

		event.prevent_default();
		let transition = match engine.next() {
			Ok(transition) => transition,
			Err(FormError::NavigationBlocked { step }) => {
				debug_log!("next blocked on step {}", step);
				return Ok(());
			}
			Err(e) => return Err(e.into()),
		};
		drop(engine);

		if let Some(summary) = &transition.summary {
			render::render_summary(summary, |hook| {
				self.document.query_selector(&format!(".{}", hook)).ok().flatten()
			});
		}
		self.render_all();
		self.focus_active_step();
		Ok(())
	}

	fn on_previous(&self) {
		if self.engine.borrow_mut().previous().is_some() {
			self.render_all();
			self.focus_active_step();
		}
	}

	fn write_restored_values(&self) {
		let engine = self.engine.borrow();
		for input in &self.inputs {
			if let Some(value) = engine.snapshot().get(&input.name) {
				write_value(&input.element, value);
				if is_checkbox(&input.element) {
					render::render_checkbox(&input.element, !value.is_empty(), &self.settings.classes);
				}
			}
		}
	}

	fn render_all(&self) {
		let engine = self.engine.borrow();
		let classes = &self.settings.classes;
		for (step, view) in self.steps.iter().zip(engine.step_views()) {
			if let Some(container) = &step.container {
				render::render_step(container, &step.focusables, &view, classes);
			}
		}
		let counter = engine.counter();
		render::render_mobile_counter(&self.mobile_counter, &counter, classes);
		render::render_desktop_counter(&self.desktop_counter, &counter, classes);
		self.render_buttons(&engine.button_states());
	}

	fn render_buttons(&self, states: &[ButtonState]) {
		for state in states {
			if let Some(step) = self.steps.get(state.step) {
				for button in &step.buttons {
					render::render_button(button, state.enabled, &self.settings.classes);
				}
			}
		}
	}

	/// Style every control named by `report`. Text-like controls show their
	/// message in the element right after them.
	fn render_report(&self, report: &FieldReport) {
		for input in self.inputs.iter().filter(|input| input.name == report.name) {
			let error = input
				.kind
				.gates_step()
				.then(|| input.element.next_element_sibling())
				.flatten();
			render::render_control(
				&input.element,
				error.as_ref(),
				input.kind,
				&report.display,
				&self.settings.classes,
			);
		}
	}

	fn focus_active_step(&self) {
		let active = self.engine.borrow().active_index();
		if let Some(first) = self
			.steps
			.get(active)
			.and_then(|step| step.focusables.first())
		{
			first.focus();
		}
	}
}

/// Binds the technology typeahead, its chips and the hidden submission fields.
pub struct TechBinding {
	selector: RefCell<TechSelector>,
	settings: Rc<PageSettings>,
	document: Document,
	input: HtmlInputElement,
	dropdown: Element,
	items: Vec<TechItem<Element>>,
	chips: Option<Element>,
	form: Option<Element>,
}

impl TechBinding {
	/// Attach to the page's technology input; `None` when the page has none.
	pub fn attach(document: &Document, settings: Rc<PageSettings>) -> PageResult<Option<Rc<Self>>> {
		let selectors = &settings.selectors;
		let Some(input) = document.query_selector(&selectors.tech_input)? else {
			return Ok(None);
		};
		let input: HtmlInputElement = input
			.dyn_into()
			.map_err(|_| PageError::MissingElement(selectors.tech_input.clone()))?;
		let dropdown = require(document, &selectors.tech_dropdown)?;

		let items: Vec<TechItem<Element>> = query_all(document, &selectors.tech_items)?
			.into_iter()
			.filter_map(|element| {
				let id = element.get_attribute("data-techid")?;
				Some(TechItem { element, id })
			})
			.collect();
		let catalog = TechCatalog::new(
			items
				.iter()
				.map(|item| TechEntry::new(item.id.clone(), item.element.text().trim()))
				.collect(),
		);

		let mut selector = TechSelector::new(catalog);
		if let Some(initial) = document.query_selector(&selectors.tech_initial)? {
			if let Some(initial) = initial.dyn_ref::<HtmlInputElement>() {
				selector = selector.with_initial(&initial.value());
			}
			// The generated hidden fields carry the selection from here on.
			initial.remove_attribute("name")?;
		}
		let chips = document.query_selector(&selectors.tech_chips)?;
		if selector.selection().is_empty()
			&& let Some(container) = &chips
		{
			for name in query_all_in(container, "strong")? {
				selector.add(&name.text());
			}
		}

		let binding = Rc::new(Self {
			form: input.closest("form")?,
			selector: RefCell::new(selector),
			document: document.clone(),
			settings,
			input,
			dropdown,
			items,
			chips,
		});

		binding.render_dropdown();
		binding.render_chips()?;
		binding.sync_hidden_fields()?;
		Self::bind(&binding)?;

		debug_log!(
			"tech selector bound: {} catalog entries, {} selected",
			binding.items.len(),
			binding.selector.borrow().selection().len()
		);
		Ok(Some(binding))
	}

	fn bind(binding: &Rc<Self>) -> PageResult<()> {
		let this = Rc::clone(binding);
		listen(&binding.input, "input", move |_event| {
			this.selector.borrow_mut().set_input(this.input.value());
			this.render_dropdown();
			Ok(())
		})?;

		let this = Rc::clone(binding);
		listen(&binding.input, "keydown", move |event| {
			let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
				return Ok(());
			};
			let key = Key::from_key_name(&keyboard.key());
			if !this.selector.borrow_mut().key(key) {
				return Ok(());
			}
			event.prevent_default();
			if key == Key::Enter {
				this.after_selection_change()?;
				this.input.focus()?;
			} else {
				this.render_dropdown();
			}
			Ok(())
		})?;

		for item in &binding.items {
			let this = Rc::clone(binding);
			let id = item.id.clone();
			listen(&item.element, "click", move |event| {
				event.prevent_default();
				if this.selector.borrow_mut().click_entry(&id) {
					this.after_selection_change()?;
				}
				this.input.focus()?;
				Ok(())
			})?;
		}

		if let Some(container) = &binding.chips {
			let this = Rc::clone(binding);
			listen(container, "click", move |event| {
				let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
					return Ok(());
				};
				let chip_selector = format!(".{}", this.settings.classes.chip);
				let Some(chip) = target.closest(&chip_selector)? else {
					return Ok(());
				};
				if let Some(name) = chip.get_attribute("data-tech-name")
					&& this.selector.borrow_mut().remove(&name)
				{
					this.after_selection_change()?;
				}
				Ok(())
			})?;
		}

		if let Some(form) = &binding.form {
			let this = Rc::clone(binding);
			listen(form, "submit", move |_event| this.sync_hidden_fields())?;
		}
		Ok(())
	}

	fn after_selection_change(&self) -> PageResult<()> {
		self.input.set_value(self.selector.borrow().input());
		self.render_dropdown();
		self.render_chips()?;
		self.sync_hidden_fields()
	}

	fn render_dropdown(&self) {
		render::render_tech_dropdown(
			&self.dropdown,
			&self.items,
			&self.selector.borrow(),
			&self.settings.classes,
		);
	}

	fn render_chips(&self) -> PageResult<()> {
		let Some(container) = &self.chips else {
			return Ok(());
		};
		let classes = &self.settings.classes;
		container.set_inner_html("");
		for tech in self.selector.borrow().selection() {
			let chip = self.document.create_element("button")?;
			chip.set_attribute("type", "button")?;
			chip.set_attribute("data-tech-name", tech.name())?;
			chip.set_attribute("aria-label", &format!("Remove {}", tech.name()))?;
			chip.add_class(&classes.chip);
			chip.add_class(match tech.kind() {
				ChipKind::Known => classes.chip_known.as_str(),
				ChipKind::Custom => classes.chip_custom.as_str(),
			});

			let label = self.document.create_element("strong")?;
			label.set_text_content(Some(tech.name()));
			chip.append_child(&label)?;
			container.append_child(&chip)?;
		}
		Ok(())
	}

	/// Replace the generated hidden inputs with the current selection.
	fn sync_hidden_fields(&self) -> PageResult<()> {
		let Some(form) = &self.form else {
			return Ok(());
		};
		for stale in query_all_in(form, &format!("input[{}]", TECH_FIELD_MARKER))? {
			stale.remove();
		}
		for (name, value) in self.selector.borrow().hidden_fields(&self.settings.form) {
			let field = self.document.create_element("input")?;
			field.set_attribute("type", "hidden")?;
			field.set_attribute("name", &name)?;
			field.set_attribute("value", &value)?;
			field.set_attribute(TECH_FIELD_MARKER, "")?;
			form.append_child(&field)?;
		}
		Ok(())
	}
}
