//! Browser bindings for the form engines
//!
//! This module re-exports `stackportfolio-pages`. On `wasm32` the crate's
//! start function attaches the bindings as soon as the document is parsed;
//! pages only need to load the module.
//!
//! Class names and selectors can be overridden per page:
//!
//! ```html
//! <script id="form-settings" type="application/json">
//!   {"selectors": {"steps": "section[data-step]"}}
//! </script>
//! ```

pub use stackportfolio_pages::*;
