//! WASM entry point
//!
//! Runs once the document is parsed: reads optional settings, classifies the
//! page by its address and attaches whichever bindings the page needs.

use crate::binding::{StepperBinding, TechBinding};
use crate::error::{PageError, PageResult};
use crate::settings::{PageSettings, SETTINGS_ELEMENT_ID};
use crate::{error_log, info_log};
use stackportfolio_forms::PageKind;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();

	let document = document().map_err(|e| JsValue::from_str(&e.to_string()))?;
	if document.ready_state() == "loading" {
		let closure = Closure::once(launch);
		document.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
		closure.forget();
	} else {
		launch();
	}
	Ok(())
}

fn document() -> PageResult<Document> {
	web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| PageError::MissingElement("document".to_string()))
}

/// Attach the page bindings, logging instead of failing.
pub fn launch() {
	if let Err(e) = try_launch() {
		error_log!("form bindings not attached: {}", e);
	}
}

fn try_launch() -> PageResult<()> {
	let document = document()?;
	let json = document
		.get_element_by_id(SETTINGS_ELEMENT_ID)
		.and_then(|element| element.text_content());
	let settings = Rc::new(PageSettings::from_optional_json(json.as_deref()));

	let href = document.location().map(|location| location.href()).transpose()?.unwrap_or_default();
	match PageKind::classify(&href) {
		Some(kind) => {
			StepperBinding::attach(&document, kind, Rc::clone(&settings))?;
		}
		None => info_log!("no form workflow for {}", href),
	}

	TechBinding::attach(&document, settings)?;
	Ok(())
}
