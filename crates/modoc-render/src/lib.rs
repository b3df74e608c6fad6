//! # Modoc Render - Markdown documentation for infrastructure modules
//!
//! `modoc-render` turns a structured description of an infrastructure module
//! (its inputs, outputs, resources, providers, requirements and module calls)
//! into a single canonical Markdown document.
//!
//! This crate is the rendering core of the `modoc` command-line tool. Parsing
//! module sources and writing files are left to the caller.
//!
//! ## Pipeline
//!
//! ```text
//! Module + Settings -> FragmentRegistry (with the function library) -> raw text -> sanitize -> document
//! ```
//!
//! - [`template`]: named, composable fragments expanded by a small interpreter
//! - [`template::functions`]: pure helpers for code fences, anchors, labels and defaults
//! - [`sanitize`]: idempotent whitespace normalization of the raw text
//! - [`FormatTable`]: output formats by name, each yielding a [`Printer`]
//!
//! ## Quick Start
//!
//! ```rust
//! use modoc_render::{FormatTable, Input, Module, Settings};
//!
//! let module = Module {
//!     inputs: vec![Input::optional("region", "string", "AWS region", "us-east-1")],
//!     ..Default::default()
//! };
//! let settings = Settings {
//!     show_inputs: true,
//!     show_required: false,
//!     ..Settings::none()
//! };
//!
//! let table = FormatTable::builtin();
//! let doc = table
//!     .get("markdown compact", &settings)
//!     .unwrap()
//!     .print(&module, &settings)
//!     .unwrap();
//!
//! assert!(doc.contains("- `region` - (Optional) AWS region"));
//! assert!(doc.contains("Default: `\"us-east-1\"`"));
//! ```
//!
//! ## Concurrency
//!
//! Rendering is synchronous and in-memory. Registries and printers are
//! immutable once built and can be shared between threads; every render call
//! brings its own module and settings.

mod error;
pub mod format;
pub mod model;
pub mod sanitize;
pub mod settings;
pub mod template;

// Error type
pub use error::RenderError;

// Data model
pub use model::{Input, Module, ModuleCall, Output, Provider, Requirement, Resource};
pub use settings::{Section, Settings, DEFAULT_INDENT_LEVEL};

// Formats
pub use format::{Constructor, FormatTable, MarkdownCompact, Printer};

// Sanitizer
pub use sanitize::sanitize;

/// Renders `module` with the `markdown compact` format.
pub fn render_markdown_compact(module: &Module, settings: &Settings) -> Result<String, RenderError> {
    MarkdownCompact::new()?.print(module, settings)
}
