//! Technology tag selector
//!
//! A typeahead multi-select over a fixed [`TechCatalog`]. Typed text filters
//! the catalog, arrow keys move a cursor through the filtered entries, and
//! `Enter` commits either the highlighted entry or the free text as a custom
//! tag. The selection never holds two tags that differ only by case.
//!
//! ## Example
//!
//! ```
//! use stackportfolio_forms::tech::{Key, TechCatalog, TechSelector};
//!
//! let catalog = TechCatalog::from_pairs([("1", "JavaScript"), ("2", "Java"), ("3", "Rust")]);
//! let mut selector = TechSelector::new(catalog);
//!
//! selector.set_input("jav");
//! assert_eq!(selector.filtered().len(), 2);
//!
//! selector.key(Key::ArrowDown);
//! selector.key(Key::ArrowDown);
//! selector.key(Key::Enter);
//!
//! assert_eq!(selector.selection()[0].name(), "Java");
//! assert_eq!(selector.input(), "");
//! ```

use crate::settings::FormSettings;

/// One catalog entry with its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechEntry {
	pub id: String,
	pub name: String,
}

impl TechEntry {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
		}
	}
}

/// The fixed list of known technologies, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechCatalog {
	entries: Vec<TechEntry>,
}

impl TechCatalog {
	pub fn new(entries: Vec<TechEntry>) -> Self {
		Self { entries }
	}

	pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		Self::new(
			pairs
				.into_iter()
				.map(|(id, name)| TechEntry::new(id, name))
				.collect(),
		)
	}

	pub fn entries(&self) -> &[TechEntry] {
		&self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Case-insensitive lookup by display name.
	pub fn find_by_name(&self, name: &str) -> Option<&TechEntry> {
		let name = name.to_lowercase();
		self.entries
			.iter()
			.find(|entry| entry.name.to_lowercase() == name)
	}

	pub fn find_by_id(&self, id: &str) -> Option<&TechEntry> {
		self.entries.iter().find(|entry| entry.id == id)
	}
}

/// Whether a chip came from the catalog or from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
	Known,
	Custom,
}

/// One selected tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedTech {
	Known { id: String, name: String },
	Custom { name: String },
}

impl SelectedTech {
	pub fn name(&self) -> &str {
		match self {
			Self::Known { name, .. } | Self::Custom { name } => name,
		}
	}

	pub fn kind(&self) -> ChipKind {
		match self {
			Self::Known { .. } => ChipKind::Known,
			Self::Custom { .. } => ChipKind::Custom,
		}
	}
}

/// Keys the selector reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	ArrowDown,
	ArrowUp,
	Enter,
	Other,
}

impl Key {
	/// Map a `KeyboardEvent.key` value.
	pub fn from_key_name(name: &str) -> Self {
		match name {
			"ArrowDown" => Self::ArrowDown,
			"ArrowUp" => Self::ArrowUp,
			"Enter" => Self::Enter,
			_ => Self::Other,
		}
	}
}

/// Typeahead state plus the current selection.
#[derive(Debug, Clone)]
pub struct TechSelector {
	catalog: TechCatalog,
	selection: Vec<SelectedTech>,
	input: String,
	cursor: Option<usize>,
}

impl TechSelector {
	pub fn new(catalog: TechCatalog) -> Self {
		Self {
			catalog,
			selection: Vec::new(),
			input: String::new(),
			cursor: None,
		}
	}

	/// Seed the selection from a comma-joined list, skipping empty segments.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::tech::{ChipKind, TechCatalog, TechSelector};
	///
	/// let catalog = TechCatalog::from_pairs([("7", "Rust")]);
	/// let selector = TechSelector::new(catalog).with_initial("rust, , Leptos");
	///
	/// let kinds: Vec<_> = selector.selection().iter().map(|t| (t.name(), t.kind())).collect();
	/// assert_eq!(kinds, vec![("Rust", ChipKind::Known), ("Leptos", ChipKind::Custom)]);
	/// ```
	pub fn with_initial(mut self, csv: &str) -> Self {
		for name in csv.split(',') {
			self.add(name);
		}
		self
	}

	pub fn catalog(&self) -> &TechCatalog {
		&self.catalog
	}

	pub fn selection(&self) -> &[SelectedTech] {
		&self.selection
	}

	pub fn input(&self) -> &str {
		&self.input
	}

	/// Index into [`filtered`](Self::filtered) of the highlighted entry.
	pub fn cursor(&self) -> Option<usize> {
		self.cursor
	}

	fn is_selected(&self, name: &str) -> bool {
		self.selection
			.iter()
			.any(|tech| tech.name().to_lowercase() == name.to_lowercase())
	}

	/// Catalog entries containing the typed text, excluding selected ones.
	pub fn filtered(&self) -> Vec<&TechEntry> {
		let query = self.input.trim().to_lowercase();
		if query.is_empty() {
			return Vec::new();
		}
		self.catalog
			.entries()
			.iter()
			.filter(|entry| entry.name.to_lowercase().contains(&query) && !self.is_selected(&entry.name))
			.collect()
	}

	/// Whether the dropdown has anything to show.
	pub fn dropdown_visible(&self) -> bool {
		!self.filtered().is_empty()
	}

	/// Replace the typed text; resets the cursor.
	pub fn set_input(&mut self, text: impl Into<String>) {
		self.input = text.into();
		self.cursor = None;
	}

	/// Handle a key press. Returns `true` when the key was consumed and the
	/// browser default (such as form submission on `Enter`) should be prevented.
	pub fn key(&mut self, key: Key) -> bool {
		match key {
			Key::ArrowDown | Key::ArrowUp => {
				let len = self.filtered().len();
				if len == 0 {
					return false;
				}
				self.cursor = Some(match (key, self.cursor) {
					(Key::ArrowDown, Some(i)) => (i + 1) % len,
					(Key::ArrowDown, None) => 0,
					(_, Some(i)) if i > 0 && i < len => i - 1,
					_ => len - 1,
				});
				true
			}
			Key::Enter => {
				self.commit();
				true
			}
			Key::Other => false,
		}
	}

	/// Add the highlighted entry, or else the free text.
	pub fn commit(&mut self) -> bool {
		let highlighted = self
			.cursor
			.and_then(|i| self.filtered().get(i).map(|entry| entry.name.clone()));
		let added = match highlighted {
			Some(name) => self.add(&name),
			None => {
				let text = self.input.clone();
				self.add(&text)
			}
		};
		self.set_input(String::new());
		added
	}

	/// Add the catalog entry with `id`, as a click on the dropdown does.
	pub fn click_entry(&mut self, id: &str) -> bool {
		let Some(name) = self.catalog.find_by_id(id).map(|entry| entry.name.clone()) else {
			return false;
		};
		let added = self.add(&name);
		self.set_input(String::new());
		added
	}

	/// Add `name`, normalized to catalog casing; returns `false` when empty or
	/// already selected.
	pub fn add(&mut self, name: &str) -> bool {
		let name = name.trim();
		if name.is_empty() {
			return false;
		}
		let tech = match self.catalog.find_by_name(name) {
			Some(entry) => SelectedTech::Known {
				id: entry.id.clone(),
				name: entry.name.clone(),
			},
			None => SelectedTech::Custom {
				name: name.to_string(),
			},
		};
		if self.is_selected(tech.name()) {
			return false;
		}
		tracing::debug!(tech = tech.name(), kind = ?tech.kind(), "added technology");
		self.selection.push(tech);
		true
	}

	/// Remove the chip named `name`.
	pub fn remove(&mut self, name: &str) -> bool {
		let before = self.selection.len();
		self.selection.retain(|tech| tech.name() != name);
		before != self.selection.len()
	}

	/// Hidden fields for the native submission: one per known tag carrying its
	/// identifier, then exactly one comma-joined field of custom names.
	///
	/// # Examples
	///
	/// ```
	/// use stackportfolio_forms::FormSettings;
	/// use stackportfolio_forms::tech::{TechCatalog, TechSelector};
	///
	/// let mut selector = TechSelector::new(TechCatalog::from_pairs([("3", "Rust")]));
	/// selector.add("Rust");
	/// selector.add("Leptos");
	/// selector.add("Axum");
	///
	/// assert_eq!(
	///     selector.hidden_fields(&FormSettings::default()),
	///     vec![
	///         ("technologies".to_string(), "3".to_string()),
	///         ("new_technologies".to_string(), "Leptos,Axum".to_string()),
	///     ]
	/// );
	/// ```
	pub fn hidden_fields(&self, settings: &FormSettings) -> Vec<(String, String)> {
		let mut fields: Vec<(String, String)> = self
			.selection
			.iter()
			.filter_map(|tech| match tech {
				SelectedTech::Known { id, .. } => Some((settings.known_tech_field.clone(), id.clone())),
				SelectedTech::Custom { .. } => None,
			})
			.collect();
		let custom = self
			.selection
			.iter()
			.filter(|tech| tech.kind() == ChipKind::Custom)
			.map(SelectedTech::name)
			.collect::<Vec<_>>()
			.join(",");
		fields.push((settings.custom_tech_field.clone(), custom));
		fields
	}
}
