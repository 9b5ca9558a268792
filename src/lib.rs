//! # StackPortfolio Web
//!
//! Client-side form interaction for the StackPortfolio site.
//!
//! The site's forms are rendered by the server; this crate adds the
//! interactive layer on top:
//!
//! - **Field validation** driven by a declarative rule table
//! - **Password checks** for matching and strength
//! - **Multi-step signup** with saved progress and a summary step
//! - **Technology tagging** with typeahead and free-text tags
//!
//! ## Crates
//!
//! - [`forms`]: The platform-independent engines (`stackportfolio-forms`)
//! - [`pages`]: Browser bindings and the WASM entry point (`stackportfolio-pages`)
//!
//! ## Feature Flags
//!
//! - `pages` (default) - Browser bindings
//! - `console_error_panic_hook` - Readable panic messages in the console
//! - `debug-hooks` - Debug-level console logging in debug builds
//!
//! ## Example
//!
//! ```
//! use stackportfolio::prelude::*;
//!
//! let mut selector = TechSelector::new(TechCatalog::from_pairs([("1", "Rust"), ("2", "Ruby")]));
//! selector.set_input("ru");
//! selector.key(Key::ArrowDown);
//! selector.key(Key::Enter);
//!
//! assert_eq!(selector.selection()[0].name(), "Rust");
//! ```

pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;

/// Commonly used types.
pub mod prelude {
	pub use crate::forms::{
		Field, FieldKind, FormDataStore, FormError, FormModel, FormSettings, Key, PageKind,
		PasswordPolicy, RuleTable, Step, StepperEngine, TechCatalog, TechSelector,
		ValidationVerdict,
	};

	#[cfg(feature = "pages")]
	pub use crate::pages::{ElementView, PageError, PageSettings};
}
