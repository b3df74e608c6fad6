//! Configuration file and module snapshot loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use modoc_render::{Module, Settings};
use serde::Deserialize;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".modoc.yml";

/// File names probed when the module path is a directory.
const SNAPSHOT_NAMES: [&str; 3] = ["module.json", "module.yml", "module.yaml"];

/// Contents of a `.modoc.yml` file. Every key is optional.
///
/// ```yaml
/// formatter: markdown compact
/// output_file: README.md
/// settings:
///   show_providers: false
///   output_values: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub formatter: Option<String>,
    pub output_file: Option<PathBuf>,
    pub settings: Settings,
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, `.modoc.yml` in `dir` is
    /// used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no {} in {}", DEFAULT_CONFIG_FILE, dir.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };
        tracing::debug!("loading config from {}", path.display());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Reads a module snapshot from a `.json`, `.yml` or `.yaml` file, or from a
/// directory holding one of `module.json`, `module.yml`, `module.yaml`.
pub fn load_module(path: &Path) -> Result<Module> {
    let file = resolve_snapshot(path)?;
    tracing::debug!("loading module from {}", file.display());
    let content = fs::read_to_string(&file)
        .with_context(|| format!("failed to read module {}", file.display()))?;
    parse_module(&file, &content).with_context(|| format!("invalid module {}", file.display()))
}

fn resolve_snapshot(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }
    SNAPSHOT_NAMES
        .iter()
        .map(|name| path.join(name))
        .find(|candidate| candidate.is_file())
        .with_context(|| {
            format!(
                "no {} found in {}",
                SNAPSHOT_NAMES.join(", "),
                path.display()
            )
        })
}

fn parse_module(file: &Path, content: &str) -> Result<Module> {
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(serde_json::from_str(content)?),
        Some("yml") | Some("yaml") => Ok(serde_yaml::from_str(content)?),
        _ => bail!(
            "unsupported module format {} (expected .json, .yml or .yaml)",
            file.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_default_config_file_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "formatter: md compact\nsettings:\n  show_outputs: false\n",
        )
        .unwrap();

        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.formatter.as_deref(), Some("md compact"));
        assert!(!config.settings.show_outputs);
        assert!(config.settings.show_inputs);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yml");
        assert!(Config::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_unknown_config_key_rejected() {
        assert!(Config::parse("formater: md compact\n").is_err());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("\n").unwrap(), Config::default());
    }

    #[test]
    fn test_load_json_module() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{"inputs": [{"name": "region", "type": "string", "has_default": true, "value": "us-east-1"}]}"#,
        )
        .unwrap();

        let module = load_module(&path).unwrap();
        assert_eq!(module.inputs.len(), 1);
        assert_eq!(module.inputs[0].name, "region");
        assert!(module.inputs[0].has_default);
    }

    #[test]
    fn test_load_module_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("module.yml"),
            "outputs:\n  - name: id\n    description: The id\n",
        )
        .unwrap();

        let module = load_module(dir.path()).unwrap();
        assert_eq!(module.outputs.len(), 1);
        assert_eq!(module.outputs[0].name, "id");
    }

    #[test]
    fn test_directory_without_snapshot_fails() {
        let dir = TempDir::new().unwrap();
        let err = load_module(dir.path()).unwrap_err();
        assert!(err.to_string().contains("module.json"));
    }

    #[test]
    fn test_unsupported_extension_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module.toml");
        fs::write(&path, "").unwrap();
        let err = load_module(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported module format"));
    }
}
