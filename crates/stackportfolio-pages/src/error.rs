use stackportfolio_forms::{FormError, SettingsError};

#[derive(Debug, thiserror::Error)]
pub enum PageError {
	#[error("Missing element: {0}")]
	MissingElement(String),
	#[error("JavaScript error: {0}")]
	Js(String),
	#[error(transparent)]
	Form(#[from] FormError),
	#[error(transparent)]
	Settings(#[from] SettingsError),
}

pub type PageResult<T> = Result<T, PageError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PageError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}
