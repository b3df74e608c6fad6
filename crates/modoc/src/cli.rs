//! Command-line definition and settings layering.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use modoc_render::{Section, Settings};

/// Format key used by the `markdown compact` subcommand.
pub const MARKDOWN_COMPACT: &str = "markdown compact";

#[derive(Parser, Debug)]
#[command(
    name = "modoc",
    version,
    about = "Generate Markdown reference documentation for infrastructure modules"
)]
pub struct Cli {
    /// Configuration file (defaults to .modoc.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Markdown documents
    #[command(alias = "md")]
    Markdown {
        #[command(subcommand)]
        command: MarkdownCommands,
    },
    /// Render with any registered format
    Render {
        /// Format name, e.g. "md compact"
        #[arg(short, long)]
        format: Option<String>,
        #[command(flatten)]
        args: RenderArgs,
    },
    /// List registered formats
    Formats,
}

#[derive(Subcommand, Debug)]
pub enum MarkdownCommands {
    /// Generate Markdown document of inputs and outputs as compact lists
    #[command(alias = "doc")]
    Compact(RenderArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Module snapshot (.json, .yml, .yaml) or a directory containing module.{json,yml,yaml}
    pub path: PathBuf,

    /// Write the document to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Sections to show (repeatable)
    #[arg(long, value_enum, value_name = "SECTION")]
    pub show: Vec<SectionArg>,

    /// Sections to hide (repeatable, wins over --show)
    #[arg(long, value_enum, value_name = "SECTION")]
    pub hide: Vec<SectionArg>,

    /// List all inputs together instead of grouping required and optional
    #[arg(long)]
    pub no_required: bool,

    /// Omit the `Sensitive:` line of outputs
    #[arg(long)]
    pub no_sensitive: bool,

    /// Print output values
    #[arg(long)]
    pub output_values: bool,

    /// Wrap input and output names in HTML anchors
    #[arg(long)]
    pub anchor: bool,

    /// Heading depth of section titles
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=6))]
    pub indent: Option<u8>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionArg {
    Header,
    Requirements,
    Providers,
    Modules,
    Resources,
    Inputs,
    Outputs,
    All,
}

impl SectionArg {
    fn sections(self) -> Vec<Section> {
        match self {
            SectionArg::Header => vec![Section::Header],
            SectionArg::Requirements => vec![Section::Requirements],
            SectionArg::Providers => vec![Section::Providers],
            SectionArg::Modules => vec![Section::ModuleCalls],
            SectionArg::Resources => vec![Section::Resources],
            SectionArg::Inputs => vec![Section::Inputs],
            SectionArg::Outputs => vec![Section::Outputs],
            SectionArg::All => Section::ALL.to_vec(),
        }
    }
}

impl RenderArgs {
    /// Applies the command-line flags on top of `settings`.
    ///
    /// Only flags that were given change anything, so values from the
    /// configuration file survive unless overridden.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        for arg in &self.show {
            for section in arg.sections() {
                settings.set_section(section, true);
            }
        }
        for arg in &self.hide {
            for section in arg.sections() {
                settings.set_section(section, false);
            }
        }
        if self.no_required {
            settings.show_required = false;
        }
        if self.no_sensitive {
            settings.show_sensitivity = false;
        }
        if self.output_values {
            settings.output_values = true;
        }
        if self.anchor {
            settings.show_anchor = true;
        }
        if let Some(indent) = self.indent {
            settings.indent_level = usize::from(indent);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_args(argv: &[&str]) -> RenderArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Markdown {
                command: MarkdownCommands::Compact(args),
            } => args,
            Commands::Render { args, .. } => args,
            Commands::Formats => panic!("no render args"),
        }
    }

    #[test]
    fn test_parse_markdown_compact() {
        let args = render_args(&["modoc", "markdown", "compact", "module.json"]);
        assert_eq!(args.path, PathBuf::from("module.json"));
        assert!(args.output_file.is_none());
    }

    #[test]
    fn test_md_alias() {
        let args = render_args(&["modoc", "md", "compact", "module.yml"]);
        assert_eq!(args.path, PathBuf::from("module.yml"));
    }

    #[test]
    fn test_compact_doc_alias() {
        let args = render_args(&["modoc", "markdown", "doc", "--anchor", "module.json"]);
        assert_eq!(args.path, PathBuf::from("module.json"));
        assert!(args.anchor);
    }

    #[test]
    fn test_render_with_format() {
        let cli =
            Cli::try_parse_from(["modoc", "render", "--format", "md compact", "m.json"]).unwrap();
        match cli.command {
            Commands::Render { format, args } => {
                assert_eq!(format.as_deref(), Some("md compact"));
                assert_eq!(args.path, PathBuf::from("m.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_hide_wins_over_show() {
        let args = render_args(&[
            "modoc", "md", "compact", "--show", "all", "--hide", "outputs", "m.json",
        ]);
        let settings = args.apply(Settings::none());
        assert!(settings.show_inputs);
        assert!(settings.show_module_calls);
        assert!(!settings.show_outputs);
    }

    #[test]
    fn test_flags_override_settings() {
        let args = render_args(&[
            "modoc",
            "md",
            "compact",
            "--no-required",
            "--no-sensitive",
            "--output-values",
            "--anchor",
            "--indent",
            "3",
            "m.json",
        ]);
        let settings = args.apply(Settings::default());
        assert!(!settings.show_required);
        assert!(!settings.show_sensitivity);
        assert!(settings.output_values);
        assert!(settings.show_anchor);
        assert_eq!(settings.indent_level, 3);
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let args = render_args(&["modoc", "md", "compact", "m.json"]);
        let base = Settings {
            output_values: true,
            show_required: false,
            indent_level: 4,
            ..Settings::default()
        };
        assert_eq!(args.apply(base.clone()), base);
    }

    #[test]
    fn test_indent_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["modoc", "md", "compact", "--indent", "9", "m.json"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["modoc", "formats", "--verbose", "--config", "c.yml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.yml")));
        assert!(matches!(cli.command, Commands::Formats));
    }
}
