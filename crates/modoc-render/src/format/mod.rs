//! Output formats and the table that names them.
//!
//! A format is anything implementing [`Printer`]: it turns a module and its
//! settings into a finished document. Formats are looked up by name in a
//! [`FormatTable`], which is built once at startup and then only read.
//!
//! ```rust
//! use modoc_render::{FormatTable, Module, Settings};
//!
//! let table = FormatTable::builtin();
//! let settings = Settings::default();
//! let printer = table.get("md compact", &settings).unwrap();
//! let doc = printer.print(&Module::default(), &settings).unwrap();
//! assert!(doc.contains("No resources."));
//! ```

mod markdown_compact;

pub use markdown_compact::{compact_fragments, MarkdownCompact};

use std::collections::HashMap;

use crate::error::RenderError;
use crate::model::Module;
use crate::settings::Settings;

/// Renders a module into a complete document.
pub trait Printer: Send + Sync {
    fn print(&self, module: &Module, settings: &Settings) -> Result<String, RenderError>;
}

/// Builds a printer for the given settings.
pub type Constructor = fn(&Settings) -> Result<Box<dyn Printer>, RenderError>;

/// Immutable mapping from format names to printer constructors.
#[derive(Default)]
pub struct FormatTable {
    entries: HashMap<&'static str, Constructor>,
}

impl FormatTable {
    /// The table of formats shipped with this crate.
    ///
    /// `markdown compact` is registered under two interchangeable keys:
    /// `"markdown compact"` and `"md compact"`.
    pub fn builtin() -> Self {
        Self::from_entries([
            ("markdown compact", MarkdownCompact::constructor as Constructor),
            ("md compact", MarkdownCompact::constructor as Constructor),
        ])
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (&'static str, Constructor)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Constructs the printer registered under `name`.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownFormat`] if nothing is registered under `name`,
    /// or whatever error the constructor reports.
    pub fn get(&self, name: &str, settings: &Settings) -> Result<Box<dyn Printer>, RenderError> {
        let constructor = self
            .entries
            .get(name)
            .ok_or_else(|| RenderError::UnknownFormat(name.to_string()))?;
        constructor(settings)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for FormatTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatTable")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let table = FormatTable::builtin();
        assert_eq!(table.names(), vec!["markdown compact", "md compact"]);
        assert!(table.contains("md compact"));
        assert!(!table.contains("markdown"));
    }

    #[test]
    fn test_aliases_render_identically() {
        let table = FormatTable::builtin();
        let settings = Settings::default();
        let module = Module {
            header: "Usage".into(),
            ..Default::default()
        };

        let long = table.get("markdown compact", &settings).unwrap();
        let short = table.get("md compact", &settings).unwrap();
        assert_eq!(
            long.print(&module, &settings).unwrap(),
            short.print(&module, &settings).unwrap()
        );
    }

    #[test]
    fn test_unknown_format() {
        let table = FormatTable::builtin();
        let err = table.get("asciidoc", &Settings::default()).err().unwrap();
        assert_eq!(err, RenderError::UnknownFormat("asciidoc".into()));
    }

    #[test]
    fn test_custom_table() {
        struct Fixed;
        impl Printer for Fixed {
            fn print(&self, _: &Module, _: &Settings) -> Result<String, RenderError> {
                Ok("fixed".into())
            }
        }
        fn fixed(_: &Settings) -> Result<Box<dyn Printer>, RenderError> {
            Ok(Box::new(Fixed))
        }

        let table = FormatTable::from_entries([("fixed", fixed as Constructor)]);
        let printer = table.get("fixed", &Settings::default()).unwrap();
        assert_eq!(
            printer
                .print(&Module::default(), &Settings::default())
                .unwrap(),
            "fixed"
        );
    }
}
