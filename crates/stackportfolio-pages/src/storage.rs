//! Browser `localStorage` backend for saved form progress

use stackportfolio_forms::{KeyValueStorage, MemoryStorage};

/// `window.localStorage` as a [`KeyValueStorage`].
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
	storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
	/// Open the window's local storage; `None` when the browser denies access.
	pub fn open() -> Option<Self> {
		let storage = web_sys::window()?.local_storage().ok().flatten()?;
		Some(Self { storage })
	}
}

#[cfg(target_arch = "wasm32")]
fn backend_error(value: wasm_bindgen::JsValue) -> stackportfolio_forms::StorageError {
	stackportfolio_forms::StorageError::Backend(
		value.as_string().unwrap_or_else(|| format!("{:?}", value)),
	)
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for LocalStorage {
	fn get(&self, key: &str) -> stackportfolio_forms::StorageResult<Option<String>> {
		self.storage.get_item(key).map_err(backend_error)
	}

	fn set(&self, key: &str, value: &str) -> stackportfolio_forms::StorageResult<()> {
		self.storage.set_item(key, value).map_err(backend_error)
	}

	fn remove(&self, key: &str) -> stackportfolio_forms::StorageResult<()> {
		self.storage.remove_item(key).map_err(backend_error)
	}
}

/// The best storage available: `localStorage` in the browser, otherwise an
/// in-memory map that lasts as long as the page.
pub fn open_storage() -> Box<dyn KeyValueStorage> {
	#[cfg(target_arch = "wasm32")]
	let local = LocalStorage::open();
	#[cfg(not(target_arch = "wasm32"))]
	let local: Option<MemoryStorage> = None;

	if let Some(storage) = local {
		return Box::new(storage);
	}
	crate::warn_log!("localStorage unavailable; form progress will not survive a reload");
	Box::new(MemoryStorage::new())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_native_fallback_is_usable() {
		// Arrange
		let storage = open_storage();

		// Act
		storage.set("formData", "{}").unwrap();

		// Assert
		assert_eq!(storage.get("formData").unwrap().as_deref(), Some("{}"));
	}
}
