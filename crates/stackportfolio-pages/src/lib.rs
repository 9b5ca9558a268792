//! StackPortfolio Pages - browser bindings for the site's forms
//!
//! Connects the platform-independent engines in `stackportfolio-forms` to the
//! server-rendered markup. Built as a `cdylib` for the browser; the render
//! layer also builds natively so it can be tested without a DOM.
//!
//! ## Architecture
//!
//! - [`settings`]: Class names, selectors and form settings, overridable from the page
//! - [`dom`]: The [`ElementView`] abstraction the renderers write through
//! - [`render`]: Mirrors engine state into elements
//! - [`storage`]: `localStorage` backend for saved progress
//! - [`logging`]: Console logging macros
//! - [`testing`]: In-memory elements for native tests
//! - `binding` and `launcher` (WASM only): Event wiring and the entry point
//!
//! ## Page workflows
//!
//! | Address contains | Workflow |
//! |------------------|----------|
//! | `signup` | Multi-step stepper with saved progress and a summary step |
//! | `project/create`, `project/…/edit` | Single-page project form |
//! | `user/…/edit` | Single-page profile form |
//!
//! Any page with a `.tech-input` also gets the technology selector.
//!
//! ## Example
//!
//! ```
//! use stackportfolio_pages::render::render_button;
//! use stackportfolio_pages::settings::ClassNames;
//! use stackportfolio_pages::{ElementView, MemoryElement};
//!
//! let button = MemoryElement::new();
//! render_button(&button, false, &ClassNames::default());
//!
//! assert!(button.is_disabled());
//! assert!(button.has_class("btn-disabled"));
//! ```

pub mod dom;
pub mod error;
pub mod logging;
pub mod render;
pub mod settings;
pub mod storage;
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod binding;
#[cfg(target_arch = "wasm32")]
pub mod launcher;

pub use dom::ElementView;
pub use error::{PageError, PageResult};
pub use settings::{ClassNames, PageSettings, Selectors};
pub use testing::MemoryElement;

#[cfg(target_arch = "wasm32")]
pub use binding::{StepperBinding, TechBinding};
