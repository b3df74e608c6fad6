//! Per-render configuration.
//!
//! [`Settings`] controls which sections appear and how much detail each one
//! carries. A value is built once per render and never mutated while the
//! render runs; rendering functions that depend on it receive it explicitly.

use serde::{Deserialize, Serialize};

/// Heading depth used when nothing else is configured.
pub const DEFAULT_INDENT_LEVEL: usize = 2;

/// Visibility and detail flags for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub show_header: bool,
    pub show_resources: bool,
    pub show_requirements: bool,
    pub show_providers: bool,
    pub show_inputs: bool,
    pub show_outputs: bool,
    pub show_module_calls: bool,
    /// Group inputs into required and optional lists.
    pub show_required: bool,
    /// Print a `Sensitive:` line for each output (needs `output_values`).
    pub show_sensitivity: bool,
    /// Print the value of each output.
    pub output_values: bool,
    /// Wrap input and output names in HTML anchors.
    pub show_anchor: bool,
    /// Number of `#` characters in a section heading.
    pub indent_level: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_header: true,
            show_resources: true,
            show_requirements: true,
            show_providers: true,
            show_inputs: true,
            show_outputs: true,
            show_module_calls: true,
            show_required: true,
            show_sensitivity: true,
            output_values: false,
            show_anchor: false,
            indent_level: DEFAULT_INDENT_LEVEL,
        }
    }
}

impl Settings {
    /// Settings with every section hidden. Useful as a starting point when
    /// only one section is wanted.
    pub fn none() -> Self {
        Self {
            show_header: false,
            show_resources: false,
            show_requirements: false,
            show_providers: false,
            show_inputs: false,
            show_outputs: false,
            show_module_calls: false,
            ..Self::default()
        }
    }

    /// Returns the flag gating the given section.
    pub fn shows(&self, section: Section) -> bool {
        match section {
            Section::Header => self.show_header,
            Section::Requirements => self.show_requirements,
            Section::Providers => self.show_providers,
            Section::ModuleCalls => self.show_module_calls,
            Section::Resources => self.show_resources,
            Section::Inputs => self.show_inputs,
            Section::Outputs => self.show_outputs,
        }
    }

    /// Sets the flag gating the given section.
    pub fn set_section(&mut self, section: Section, shown: bool) {
        let flag = match section {
            Section::Header => &mut self.show_header,
            Section::Requirements => &mut self.show_requirements,
            Section::Providers => &mut self.show_providers,
            Section::ModuleCalls => &mut self.show_module_calls,
            Section::Resources => &mut self.show_resources,
            Section::Inputs => &mut self.show_inputs,
            Section::Outputs => &mut self.show_outputs,
        };
        *flag = shown;
    }
}

/// Top-level document sections, each gated by one settings flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Header,
    Requirements,
    Providers,
    ModuleCalls,
    Resources,
    Inputs,
    Outputs,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Header,
        Section::Requirements,
        Section::Providers,
        Section::ModuleCalls,
        Section::Resources,
        Section::Inputs,
        Section::Outputs,
    ];
}
