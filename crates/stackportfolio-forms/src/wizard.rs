//! Multi-step form engine
//!
//! [`StepperEngine`] owns the ordered steps of a form, the active index, the
//! in-progress [`FormSnapshot`] and, optionally, the [`FormDataStore`] that
//! persists it. Each input event is processed to completion in one call:
//! field validity, password state and every step's "next" control state are
//! recomputed together and returned as one [`InputOutcome`].
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> Step0
//!     Step0 --> Step1: next (step 0 valid)
//!     Step1 --> Step0: previous
//!     Step1 --> Summary: next (step 1 valid)
//!     Summary --> Step1: previous
//!     Summary --> [*]: submit (clears snapshot)
//! ```

use crate::field::FieldKind;
use crate::form::{FieldReport, FormError, FormModel, FormResult};
use crate::password::PasswordReport;
use crate::store::{FormDataStore, FormSnapshot};

/// An ordered container of field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
	pub fields: Vec<String>,
}

impl Step {
	pub fn new<I, S>(fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			fields: fields.into_iter().map(Into::into).collect(),
		}
	}

	/// A step without inputs, such as the read-only summary.
	pub fn empty() -> Self {
		Self { fields: Vec::new() }
	}
}

/// Position within the stepper. `active_index < total_steps` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperState {
	pub active_index: usize,
	pub total_steps: usize,
}

impl StepperState {
	pub fn is_first(&self) -> bool {
		self.active_index == 0
	}

	pub fn is_last(&self) -> bool {
		self.active_index + 1 == self.total_steps
	}
}

/// Visibility of one step container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepView {
	pub index: usize,
	pub visible: bool,
	/// Whether the step's interactive descendants stay in the tab order.
	pub focusable: bool,
}

/// Enabled state of the "next" (or submit) control of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
	pub step: usize,
	pub enabled: bool,
}

/// Progress mark of one step in the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMark {
	Complete,
	Active,
	Pending,
}

impl StepMark {
	pub const CHECKMARK: &'static str = "✓";
}

/// State shared by the mobile and desktop step counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCounter {
	pub marks: Vec<StepMark>,
}

impl StepCounter {
	/// Text shown inside the counter item for step `index`.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::wizard::{StepCounter, StepMark};
	///
	/// let counter = StepCounter { marks: vec![StepMark::Complete, StepMark::Active, StepMark::Pending] };
	/// assert_eq!(counter.label(0), "✓");
	/// assert_eq!(counter.label(1), "2");
	/// assert_eq!(counter.label(2), "3");
	/// ```
	pub fn label(&self, index: usize) -> String {
		match self.marks.get(index) {
			Some(StepMark::Complete) => StepMark::CHECKMARK.to_string(),
			_ => (index + 1).to_string(),
		}
	}
}

/// One row of the read-only summary step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
	pub name: String,
	/// Class of the summary element, `<name with '_' as '-'>-field`.
	pub hook: String,
	pub value: String,
}

impl SummaryEntry {
	pub fn new(name: &str, value: &str) -> Self {
		Self {
			name: name.to_string(),
			hook: format!("{}-field", name.replace('_', "-")),
			value: value.to_string(),
		}
	}
}

/// Everything that changed as a result of one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOutcome {
	pub fields: Vec<FieldReport>,
	pub password: Option<PasswordReport>,
	pub buttons: Vec<ButtonState>,
}

/// A completed move between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
	pub from: usize,
	pub to: usize,
	/// Populated when the move lands on the summary step.
	pub summary: Option<Vec<SummaryEntry>>,
}

/// Step-by-step form state machine.
#[derive(Debug)]
pub struct StepperEngine {
	form: FormModel,
	steps: Vec<Step>,
	state: StepperState,
	snapshot: FormSnapshot,
	store: Option<FormDataStore>,
	has_summary: bool,
}

impl StepperEngine {
	/// Create a multi-step engine; the last step is the summary.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::{Field, FormModel};
	/// use stackportfolio_forms::wizard::{Step, StepperEngine};
	///
	/// let form = FormModel::new(vec![Field::text("first_name").required()]);
	/// let mut stepper = StepperEngine::new(form, vec![Step::new(["first_name"]), Step::empty()]).unwrap();
	///
	/// assert!(stepper.next().is_err());
	/// stepper.on_input("first_name", "Ada").unwrap();
	/// assert_eq!(stepper.next().unwrap().to, 1);
	/// ```
	pub fn new(form: FormModel, steps: Vec<Step>) -> FormResult<Self> {
		if steps.is_empty() {
			return Err(FormError::NoSteps);
		}
		if let Some(missing) = steps
			.iter()
			.flat_map(|step| step.fields.iter())
			.find(|name| !form.contains(name))
		{
			return Err(FormError::UnknownField(missing.clone()));
		}
		let has_summary = steps.len() > 1;
		Ok(Self {
			state: StepperState {
				active_index: 0,
				total_steps: steps.len(),
			},
			form,
			steps,
			snapshot: FormSnapshot::new(),
			store: None,
			has_summary,
		})
	}

	/// A one-step engine over every field; its "next" control is the submit button.
	pub fn single_page(form: FormModel) -> Self {
		let step = Step::new(form.fields().iter().map(|f| f.name.clone()));
		Self {
			state: StepperState {
				active_index: 0,
				total_steps: 1,
			},
			form,
			steps: vec![step],
			snapshot: FormSnapshot::new(),
			store: None,
			has_summary: false,
		}
	}

	/// Attach persistence and load any saved progress back into the fields.
	///
	/// Restored non-empty values count as touched.
	pub fn with_store(mut self, store: FormDataStore) -> Self {
		let restored = store.restore();
		for (name, value) in restored.iter() {
			if let Some(field) = self.form.field_mut(name)
				&& field.is_persistable()
			{
				field.raw_value = value.to_string();
				field.touched = !value.is_empty();
				self.snapshot.record(field);
			}
		}
		tracing::debug!(restored = self.snapshot.len(), "restored form progress");
		self.store = Some(store);
		self
	}

	pub fn form(&self) -> &FormModel {
		&self.form
	}

	pub fn state(&self) -> StepperState {
		self.state
	}

	pub fn active_index(&self) -> usize {
		self.state.active_index
	}

	pub fn total_steps(&self) -> usize {
		self.state.total_steps
	}

	pub fn steps(&self) -> &[Step] {
		&self.steps
	}

	pub fn snapshot(&self) -> &FormSnapshot {
		&self.snapshot
	}

	/// Index of the step containing `name`.
	pub fn step_of(&self, name: &str) -> Option<usize> {
		self.steps
			.iter()
			.position(|step| step.fields.iter().any(|f| f == name))
	}

	/// Apply a user change and recompute all dependent state.
	pub fn on_input(&mut self, name: &str, value: impl Into<String>) -> FormResult<InputOutcome> {
		self.form.set_value(name, value)?;

		let fields = self
			.form
			.dependents_of(name)
			.iter()
			.map(|dependent| self.form.validate_field(dependent))
			.collect::<FormResult<Vec<_>>>()?;

		if fields.first().is_some_and(|report| report.verdict.is_valid)
			&& let Some(field) = self.form.field(name)
			&& self.snapshot.record(field)
		{
			self.persist();
		}

		Ok(InputOutcome {
			fields,
			password: self.form.password_report(),
			buttons: self.button_states(),
		})
	}

	/// Aggregate validity of step `index`.
	pub fn is_step_valid(&self, index: usize) -> FormResult<bool> {
		let step = self.steps.get(index).ok_or(FormError::StepOutOfRange {
			index,
			total: self.state.total_steps,
		})?;
		for name in &step.fields {
			if !self.form.is_field_valid(name)? {
				return Ok(false);
			}
		}
		Ok(true)
	}

	/// State of every step's "next" control.
	pub fn button_states(&self) -> Vec<ButtonState> {
		(0..self.steps.len())
			.map(|step| ButtonState {
				step,
				enabled: self.is_step_valid(step).unwrap_or(false),
			})
			.collect()
	}

	/// Advance to the next step if the active one is valid.
	pub fn next(&mut self) -> FormResult<Transition> {
		let from = self.state.active_index;
		if self.state.is_last() {
			return Err(FormError::AtFinalStep);
		}
		if !self.is_step_valid(from)? {
			tracing::debug!(step = from, "next blocked by invalid step");
			return Err(FormError::NavigationBlocked { step: from });
		}

		for name in &self.steps[from].fields {
			if let Some(field) = self.form.field(name) {
				self.snapshot.record(field);
			}
		}
		self.persist();

		let to = from + 1;
		self.state.active_index = to;
		tracing::debug!(from, to, "advanced step");

		let summary = (self.has_summary && self.state.is_last()).then(|| self.summary());
		Ok(Transition { from, to, summary })
	}

	/// Go back one step. A no-op on the first step.
	pub fn previous(&mut self) -> Option<Transition> {
		let from = self.state.active_index;
		if from == 0 {
			return None;
		}
		let to = from - 1;
		self.state.active_index = to;
		tracing::debug!(from, to, "returned to step");
		Some(Transition {
			from,
			to,
			summary: None,
		})
	}

	/// Finish the form from the final step.
	///
	/// Clears persisted progress and returns the native submission payload.
	pub fn submit(&mut self) -> FormResult<Vec<(String, String)>> {
		let step = self.state.active_index;
		if !self.state.is_last() {
			return Err(FormError::NotAtFinalStep { step });
		}
		if !self.is_step_valid(step)? {
			return Err(FormError::NavigationBlocked { step });
		}
		self.snapshot.reset();
		if let Some(store) = &self.store {
			store.clear()?;
		}
		tracing::debug!(step, "form submitted");
		Ok(self.payload())
	}

	/// Drop saved progress and return to the first step.
	pub fn reset(&mut self) -> FormResult<()> {
		self.snapshot.reset();
		if let Some(store) = &self.store {
			store.clear()?;
		}
		self.state.active_index = 0;
		Ok(())
	}

	/// Visibility of every step; only the active one is shown and focusable.
	pub fn step_views(&self) -> Vec<StepView> {
		(0..self.steps.len())
			.map(|index| {
				let active = index == self.state.active_index;
				StepView {
					index,
					visible: active,
					focusable: active,
				}
			})
			.collect()
	}

	pub fn counter(&self) -> StepCounter {
		let active = self.state.active_index;
		StepCounter {
			marks: (0..self.steps.len())
				.map(|index| match index.cmp(&active) {
					std::cmp::Ordering::Less => StepMark::Complete,
					std::cmp::Ordering::Equal => StepMark::Active,
					std::cmp::Ordering::Greater => StepMark::Pending,
				})
				.collect(),
		}
	}

	/// Share of the form reached, counting the active step as reached.
	pub fn progress_percentage(&self) -> u8 {
		let reached = (self.state.active_index + 1) * 100 / self.state.total_steps;
		u8::try_from(reached).unwrap_or(100)
	}

	/// Snapshot values in field declaration order.
	pub fn summary(&self) -> Vec<SummaryEntry> {
		self.form
			.fields()
			.iter()
			.filter_map(|field| {
				self.snapshot
					.get(&field.name)
					.map(|value| SummaryEntry::new(&field.name, value))
			})
			.collect()
	}

	/// Named values for the native submission, secrets included.
	pub fn payload(&self) -> Vec<(String, String)> {
		self.form
			.fields()
			.iter()
			.filter(|field| field.kind != FieldKind::File)
			.map(|field| (field.name.clone(), field.raw_value.clone()))
			.collect()
	}

	fn persist(&self) {
		if let Some(store) = &self.store
			&& let Err(e) = store.save(&self.snapshot)
		{
			tracing::warn!(error = %e, "failed to persist form progress");
		}
	}
}
