//! The `markdown compact` format.
//!
//! Sections are emitted in this order, each behind its settings flag:
//! header, requirements, providers, module calls, resources, inputs,
//! outputs. Inputs and outputs are rendered as bullet lists with indented
//! detail lines; everything else is a table. An empty sequence renders a
//! one-line "No ..." placeholder instead of an empty table.
//!
//! Fragments emit generous whitespace and rely on [`sanitize`] to bring the
//! document into canonical form.

use crate::error::RenderError;
use crate::format::Printer;
use crate::model::Module;
use crate::sanitize::sanitize;
use crate::settings::Settings;
use crate::template::functions::{
    anchored_code, choose, code_block, description_text, detail_indent, header_text, heading,
    json_value_block, or_default, required_label, required_mode_enabled, AnchorKind, HCL,
    NOT_AVAILABLE,
};
use crate::template::{
    each, invoke, lit, text, when, when_else, Fragment, FragmentRegistry, Node, Scope, Sequence,
};

/// Name of the fragment a document render starts from.
pub const ROOT_FRAGMENT: &str = "document";

/// Markdown document listing inputs and outputs as compact bullet lists.
#[derive(Debug)]
pub struct MarkdownCompact {
    registry: FragmentRegistry,
}

impl MarkdownCompact {
    pub fn new() -> Result<Self, RenderError> {
        let registry = FragmentRegistry::new(compact_fragments())?;
        registry.validate()?;
        Ok(Self { registry })
    }

    /// Format table entry point.
    pub fn constructor(_settings: &Settings) -> Result<Box<dyn Printer>, RenderError> {
        Ok(Box::new(Self::new()?))
    }

    pub fn registry(&self) -> &FragmentRegistry {
        &self.registry
    }
}

impl Printer for MarkdownCompact {
    fn print(&self, module: &Module, settings: &Settings) -> Result<String, RenderError> {
        let rendered = self
            .registry
            .render(ROOT_FRAGMENT, &Scope::root(module, settings))?;
        Ok(sanitize(&rendered))
    }
}

/// The complete fragment set of the format.
pub fn compact_fragments() -> Vec<Fragment> {
    vec![
        Fragment::new(
            ROOT_FRAGMENT,
            vec![
                invoke("header"),
                invoke("requirements"),
                invoke("providers"),
                invoke("modulecalls"),
                invoke("resources"),
                invoke("inputs"),
                invoke("outputs"),
            ],
        ),
        header(),
        requirements(),
        providers(),
        modulecalls(),
        resources(),
        inputs(),
        input(),
        outputs(),
    ]
}

fn section_heading(title: &'static str) -> Node {
    text(move |scope| Ok(format!("{} {}\n\n", heading(scope.settings, 0), title)))
}

fn placeholder_or(over: Sequence, placeholder: &'static str, body: Vec<Node>) -> Node {
    when_else(
        move |scope| Ok(over.is_empty(scope.module)),
        vec![lit(placeholder), lit("\n\n")],
        body,
    )
}

// Version columns fall back to "n/a".
fn version_cell(version: Option<&str>) -> String {
    or_default(NOT_AVAILABLE, version).to_string()
}

fn header() -> Fragment {
    Fragment::new(
        "header",
        vec![when(
            |scope| Ok(scope.settings.show_header && !scope.module.header.trim().is_empty()),
            vec![
                text(|scope| Ok(header_text(Some(scope.module.header.as_str())))),
                lit("\n\n"),
            ],
        )],
    )
}

fn requirements() -> Fragment {
    Fragment::new(
        "requirements",
        vec![when(
            |scope| Ok(scope.settings.show_requirements),
            vec![
                section_heading("Requirements"),
                placeholder_or(
                    Sequence::Requirements,
                    "No requirements.",
                    vec![
                        lit("| Name | Version |\n|------|---------|\n"),
                        each(
                            Sequence::Requirements,
                            vec![text(|scope| {
                                let requirement = scope.requirement()?;
                                Ok(format!(
                                    "| {} | {} |\n",
                                    requirement.name,
                                    version_cell(requirement.version.as_deref())
                                ))
                            })],
                        ),
                        lit("\n"),
                    ],
                ),
            ],
        )],
    )
}

fn providers() -> Fragment {
    Fragment::new(
        "providers",
        vec![when(
            |scope| Ok(scope.settings.show_providers),
            vec![
                section_heading("Providers"),
                placeholder_or(
                    Sequence::Providers,
                    "No provider.",
                    vec![
                        lit("| Name | Version |\n|------|---------|\n"),
                        each(
                            Sequence::Providers,
                            vec![text(|scope| {
                                let provider = scope.provider()?;
                                Ok(format!(
                                    "| {} | {} |\n",
                                    provider.full_name(),
                                    version_cell(provider.version.as_deref())
                                ))
                            })],
                        ),
                        lit("\n"),
                    ],
                ),
            ],
        )],
    )
}

fn modulecalls() -> Fragment {
    Fragment::new(
        "modulecalls",
        vec![when(
            |scope| Ok(scope.settings.show_module_calls),
            vec![
                section_heading("Modules"),
                placeholder_or(
                    Sequence::ModuleCalls,
                    "No Modules.",
                    vec![
                        lit("| Name | Source | Version |\n|------|--------|---------|\n"),
                        each(
                            Sequence::ModuleCalls,
                            vec![text(|scope| {
                                let call = scope.module_call()?;
                                Ok(format!(
                                    "| {} | {} | {} |\n",
                                    call.name, call.source, call.version
                                ))
                            })],
                        ),
                        lit("\n"),
                    ],
                ),
            ],
        )],
    )
}

fn resources() -> Fragment {
    Fragment::new(
        "resources",
        vec![when(
            |scope| Ok(scope.settings.show_resources),
            vec![
                section_heading("Resources"),
                placeholder_or(
                    Sequence::Resources,
                    "No resources.",
                    vec![
                        lit("| Name |\n|------|\n"),
                        each(
                            Sequence::Resources,
                            vec![text(|scope| {
                                let resource = scope.resource()?;
                                Ok(match resource.url.as_deref() {
                                    Some(url) if !url.is_empty() => {
                                        format!("| [{}]({}) |\n", resource.full_type, url)
                                    }
                                    _ => format!("| {} |\n", resource.full_type),
                                })
                            })],
                        ),
                        lit("\n"),
                    ],
                ),
            ],
        )],
    )
}

fn inputs() -> Fragment {
    Fragment::new(
        "inputs",
        vec![when(
            |scope| Ok(scope.settings.show_inputs),
            vec![
                section_heading("Argument Reference"),
                placeholder_or(
                    Sequence::Inputs,
                    "No argument.",
                    vec![when_else(
                        |scope| Ok(required_mode_enabled(scope.settings)),
                        vec![
                            input_group(
                                Sequence::RequiredInputs,
                                "The following arguments are required:\n",
                            ),
                            input_group(
                                Sequence::OptionalInputs,
                                "The following arguments are optional:\n",
                            ),
                        ],
                        vec![
                            lit("The following input variables are supported:\n"),
                            each(Sequence::Inputs, vec![invoke("input")]),
                            lit("\n"),
                        ],
                    )],
                ),
            ],
        )],
    )
}

fn input_group(over: Sequence, intro: &'static str) -> Node {
    when(
        move |scope| Ok(!over.is_empty(scope.module)),
        vec![lit(intro), each(over, vec![invoke("input")]), lit("\n")],
    )
}

/// One input. Shared by the grouped and the combined listing.
fn input() -> Fragment {
    Fragment::new(
        "input",
        vec![
            lit("\n- "),
            text(|scope| {
                let name = Some(scope.input()?.name.as_str());
                Ok(choose(
                    scope.settings.show_anchor,
                    anchored_code(name, AnchorKind::Input),
                    code_block(name, HCL),
                ))
            }),
            lit(" - "),
            text(|scope| Ok(required_label(scope.input()?.has_default).to_string())),
            lit(" "),
            text(|scope| Ok(description_text(scope.input()?.description.as_deref()))),
            lit("\n\n"),
            text(|scope| Ok(detail_indent(scope.settings))),
            lit("Type: "),
            text(|scope| Ok(code_block(Some(scope.input()?.type_expr.as_str()), HCL))),
            lit("\n"),
            when(
                |scope| Ok(scope.input()?.has_default || !required_mode_enabled(scope.settings)),
                vec![
                    lit("\n"),
                    text(|scope| Ok(detail_indent(scope.settings))),
                    lit("Default: "),
                    text(|scope| {
                        let value = scope.input()?.display_value();
                        Ok(json_value_block(Some(or_default(
                            NOT_AVAILABLE,
                            Some(value.as_str()),
                        ))))
                    }),
                    lit("\n"),
                ],
            ),
        ],
    )
}

fn outputs() -> Fragment {
    Fragment::new(
        "outputs",
        vec![when(
            |scope| Ok(scope.settings.show_outputs),
            vec![
                section_heading("Attributes Reference"),
                placeholder_or(
                    Sequence::Outputs,
                    "No output.",
                    vec![
                        lit("In addition to arguments above, the following attributes are exported:\n"),
                        each(Sequence::Outputs, output_item()),
                        lit("\n"),
                    ],
                ),
            ],
        )],
    )
}

fn output_item() -> Vec<Node> {
    vec![
        lit("\n- "),
        text(|scope| {
            let name = Some(scope.output()?.name.as_str());
            Ok(choose(
                scope.settings.show_anchor,
                anchored_code(name, AnchorKind::Output),
                code_block(name, HCL),
            ))
        }),
        lit(" - "),
        text(|scope| Ok(description_text(scope.output()?.description.as_deref()))),
        lit("\n"),
        when(
            |scope| Ok(scope.settings.output_values),
            vec![
                lit("\n"),
                text(|scope| Ok(detail_indent(scope.settings))),
                lit("Value: "),
                text(|scope| {
                    let output = scope.output()?;
                    // A sensitive value is never read, only replaced.
                    let value = if output.sensitive {
                        "<sensitive>".to_string()
                    } else {
                        or_default(NOT_AVAILABLE, Some(output.display_value().as_str())).to_string()
                    };
                    Ok(json_value_block(Some(value.as_str())))
                }),
                lit("\n"),
                when(
                    |scope| Ok(scope.settings.show_sensitivity),
                    vec![
                        lit("\n"),
                        text(|scope| Ok(detail_indent(scope.settings))),
                        lit("Sensitive: "),
                        text(|scope| Ok(choose(scope.output()?.sensitive, "yes", "no").to_string())),
                        lit("\n"),
                    ],
                ),
            ],
        ),
    ]
}
