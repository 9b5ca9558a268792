//! Persisted form progress
//!
//! [`FormDataStore`] keeps a [`FormSnapshot`] (field name to trimmed value) in a
//! [`KeyValueStorage`] under a single key. Every write serializes the whole
//! mapping, so there are no partial updates to interleave.
//!
//! ## Example
//!
//! ```
//! use stackportfolio_forms::{Field, FieldKind};
//! use stackportfolio_forms::store::{FormDataStore, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! let store = FormDataStore::new(Box::new(storage.clone()), "formData");
//!
//! let fields = vec![
//!     Field::text("first_name").with_value("  Ada "),
//!     Field::new("password1", FieldKind::Password).with_value("Secret1!"),
//! ];
//! store.snapshot(&fields).unwrap();
//!
//! let restored = store.restore();
//! assert_eq!(restored.get("first_name"), Some("Ada"));
//! assert_eq!(restored.get("password1"), None);
//! ```

use crate::field::Field;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
	#[error("Storage backend error: {0}")]
	Backend(String),
	#[error("Failed to serialize form snapshot: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value storage, the shape of the browser's `localStorage`.
pub trait KeyValueStorage {
	fn get(&self, key: &str) -> StorageResult<Option<String>>;
	fn set(&self, key: &str, value: &str) -> StorageResult<()>;
	fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-memory storage for native use and tests.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.data.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.read().is_empty()
	}
}

impl KeyValueStorage for MemoryStorage {
	fn get(&self, key: &str) -> StorageResult<Option<String>> {
		Ok(self.data.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> StorageResult<()> {
		self.data.write().insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> StorageResult<()> {
		self.data.write().remove(key);
		Ok(())
	}
}

/// Flat mapping of field name to trimmed value, never holding secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
	values: BTreeMap<String, String>,
}

impl FormSnapshot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a snapshot from the persistable fields in `fields`.
	pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Self {
		let mut snapshot = Self::new();
		for field in fields {
			snapshot.record(field);
		}
		snapshot
	}

	/// Record the trimmed value of `field`; returns `false` for secret fields.
	pub fn record(&mut self, field: &Field) -> bool {
		if !field.is_persistable() {
			return false;
		}
		self.values
			.insert(field.name.clone(), field.trimmed().to_string());
		true
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn reset(&mut self) {
		self.values.clear();
	}
}

/// Snapshot persistence over a [`KeyValueStorage`] backend.
pub struct FormDataStore {
	storage: Box<dyn KeyValueStorage>,
	key: String,
}

impl std::fmt::Debug for FormDataStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormDataStore")
			.field("key", &self.key)
			.finish_non_exhaustive()
	}
}

impl FormDataStore {
	pub fn new(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
		Self {
			storage,
			key: key.into(),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Replace the persisted mapping with the persistable values of `fields`.
	pub fn snapshot<'a>(
		&self,
		fields: impl IntoIterator<Item = &'a Field>,
	) -> StorageResult<FormSnapshot> {
		let snapshot = FormSnapshot::from_fields(fields);
		self.save(&snapshot)?;
		Ok(snapshot)
	}

	/// Persist `snapshot` as the complete mapping.
	pub fn save(&self, snapshot: &FormSnapshot) -> StorageResult<()> {
		let json = serde_json::to_string(snapshot)?;
		self.storage.set(&self.key, &json)
	}

	/// Read the persisted mapping; absent or unreadable state is empty.
	pub fn restore(&self) -> FormSnapshot {
		let raw = match self.storage.get(&self.key) {
			Ok(Some(raw)) => raw,
			Ok(None) => return FormSnapshot::new(),
			Err(e) => {
				tracing::warn!(key = %self.key, error = %e, "failed to read form snapshot");
				return FormSnapshot::new();
			}
		};
		match serde_json::from_str(&raw) {
			Ok(snapshot) => snapshot,
			Err(e) => {
				tracing::warn!(key = %self.key, error = %e, "discarding malformed form snapshot");
				FormSnapshot::new()
			}
		}
	}

	pub fn clear(&self) -> StorageResult<()> {
		self.storage.remove(&self.key)
	}
}
