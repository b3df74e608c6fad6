//! Module records consumed by the renderer.
//!
//! These types describe an immutable snapshot of an infrastructure module as
//! handed over by the parsing layer. The renderer only ever reads them.
//!
//! Every record derives `Deserialize`, so a snapshot can be loaded from JSON
//! or YAML. Optional fields that are missing in the source come back as
//! absent values rather than errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregate of everything a module declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub header: String,
    pub resources: Vec<Resource>,
    pub requirements: Vec<Requirement>,
    pub providers: Vec<Provider>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub module_calls: Vec<ModuleCall>,
}

impl Module {
    /// Inputs that must be supplied by the caller, in declaration order.
    pub fn required_inputs(&self) -> impl Iterator<Item = &Input> {
        self.inputs.iter().filter(|input| !input.has_default)
    }

    /// Inputs that carry a default value, in declaration order.
    pub fn optional_inputs(&self) -> impl Iterator<Item = &Input> {
        self.inputs.iter().filter(|input| input.has_default)
    }
}

/// An input variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    pub name: String,
    /// Type expression, possibly spanning several lines.
    #[serde(rename = "type")]
    pub type_expr: String,
    pub description: Option<String>,
    pub has_default: bool,
    pub value: Option<Value>,
}

impl Input {
    /// Creates an input without a default value.
    pub fn required(
        name: impl Into<String>,
        type_expr: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_expr: type_expr.into(),
            description: Some(description.into()),
            has_default: false,
            value: None,
        }
    }

    /// Creates an input with a default value.
    pub fn optional(
        name: impl Into<String>,
        type_expr: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            type_expr: type_expr.into(),
            description: Some(description.into()),
            has_default: true,
            value: Some(value.into()),
        }
    }

    /// The default value as display text. Empty when there is none.
    pub fn display_value(&self) -> String {
        display_json(self.value.as_ref())
    }
}

/// An output value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub name: String,
    pub description: Option<String>,
    pub sensitive: bool,
    pub value: Option<Value>,
}

impl Output {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            sensitive: false,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// The output value as display text. Empty when there is none.
    pub fn display_value(&self) -> String {
        display_json(self.value.as_ref())
    }
}

/// A managed or data resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub full_type: String,
    pub url: Option<String>,
}

impl Resource {
    pub fn new(full_type: impl Into<String>) -> Self {
        Self {
            full_type: full_type.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A version constraint on the tool or a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirement {
    pub name: String,
    pub version: Option<String>,
}

impl Requirement {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version.map(str::to_string),
        }
    }
}

/// A provider used by the module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub name: String,
    pub alias: Option<String>,
    pub version: Option<String>,
}

impl Provider {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            version: version.map(str::to_string),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// `name`, or `name.alias` for aliased provider configurations.
    pub fn full_name(&self) -> String {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => format!("{}.{}", self.name, alias),
            _ => self.name.clone(),
        }
    }
}

/// A call to a child module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleCall {
    pub name: String,
    pub source: String,
    pub version: String,
}

impl ModuleCall {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            version: version.into(),
        }
    }
}

// Pretty JSON with two-space indentation; null renders as nothing.
fn display_json(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_and_optional_inputs_keep_order() {
        let module = Module {
            inputs: vec![
                Input::optional("b", "string", "", "x"),
                Input::required("a", "string", ""),
                Input::optional("c", "number", "", 1),
                Input::required("d", "bool", ""),
            ],
            ..Default::default()
        };

        let required: Vec<_> = module.required_inputs().map(|i| i.name.as_str()).collect();
        let optional: Vec<_> = module.optional_inputs().map(|i| i.name.as_str()).collect();
        assert_eq!(required, vec!["a", "d"]);
        assert_eq!(optional, vec!["b", "c"]);
    }

    #[test]
    fn test_display_value_string_is_quoted() {
        let input = Input::optional("region", "string", "", "us-east-1");
        assert_eq!(input.display_value(), "\"us-east-1\"");
    }

    #[test]
    fn test_display_value_object_is_multiline() {
        let input = Input::optional("tags", "map(string)", "", json!({"env": "dev"}));
        assert_eq!(input.display_value(), "{\n  \"env\": \"dev\"\n}");
    }

    #[test]
    fn test_display_value_absent_and_null() {
        assert_eq!(Input::required("a", "string", "").display_value(), "");
        let output = Output::new("id", "").with_value(Value::Null);
        assert_eq!(output.display_value(), "");
    }

    #[test]
    fn test_provider_full_name() {
        assert_eq!(Provider::new("aws", None).full_name(), "aws");
        assert_eq!(
            Provider::new("aws", None).with_alias("ident").full_name(),
            "aws.ident"
        );
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let module: Module = serde_json::from_value(json!({
            "inputs": [{"name": "region", "type": "string"}],
            "providers": [{"name": "aws"}]
        }))
        .unwrap();

        assert_eq!(module.header, "");
        assert_eq!(module.inputs[0].type_expr, "string");
        assert_eq!(module.inputs[0].description, None);
        assert!(!module.inputs[0].has_default);
        assert_eq!(module.providers[0].version, None);
    }
}
