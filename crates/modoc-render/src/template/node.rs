//! Render nodes and the scope they are evaluated in.
//!
//! A fragment body is a tree of [`Node`]s. The tree is interpreted by
//! [`FragmentRegistry`](super::FragmentRegistry): literals are copied,
//! expressions are evaluated against the current [`Scope`], conditionals pick
//! a branch, loops re-evaluate their body once per record and invocations
//! expand another fragment by name.
//!
//! ```rust
//! use modoc_render::template::{each, invoke, lit, text, Sequence};
//!
//! let body = vec![
//!     lit("| Name |\n"),
//!     each(Sequence::Resources, vec![invoke("resource")]),
//! ];
//! let row = vec![text(|scope| Ok(format!("| {} |\n", scope.resource()?.full_type)))];
//! # let _ = (body, row);
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::error::RenderError;
use crate::model::{Input, Module, ModuleCall, Output, Provider, Requirement, Resource};
use crate::settings::Settings;

/// Evaluates to text in a scope.
pub type Expr = Box<dyn Fn(&Scope<'_>) -> Result<String, RenderError> + Send + Sync>;

/// Evaluates to a condition in a scope.
pub type Predicate = Box<dyn Fn(&Scope<'_>) -> Result<bool, RenderError> + Send + Sync>;

/// One element of a fragment body.
pub enum Node {
    /// Text copied verbatim.
    Literal(Cow<'static, str>),
    /// Text computed from the scope.
    Text(Expr),
    /// Renders `then` when the predicate holds, `otherwise` when it does not.
    Conditional {
        when: Predicate,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    /// Renders `body` once per record of a module sequence.
    Loop { over: Sequence, body: Vec<Node> },
    /// Expands the fragment registered under the given name.
    Invoke(String),
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Node::Text(_) => f.write_str("Text(..)"),
            Node::Conditional {
                then, otherwise, ..
            } => f
                .debug_struct("Conditional")
                .field("then", then)
                .field("otherwise", otherwise)
                .finish(),
            Node::Loop { over, body } => f
                .debug_struct("Loop")
                .field("over", over)
                .field("body", body)
                .finish(),
            Node::Invoke(name) => f.debug_tuple("Invoke").field(name).finish(),
        }
    }
}

/// Literal text node.
pub fn lit(text: impl Into<Cow<'static, str>>) -> Node {
    Node::Literal(text.into())
}

/// Computed text node.
pub fn text<F>(expr: F) -> Node
where
    F: Fn(&Scope<'_>) -> Result<String, RenderError> + Send + Sync + 'static,
{
    Node::Text(Box::new(expr))
}

/// Conditional node without an else branch.
pub fn when<F>(predicate: F, then: Vec<Node>) -> Node
where
    F: Fn(&Scope<'_>) -> Result<bool, RenderError> + Send + Sync + 'static,
{
    when_else(predicate, then, Vec::new())
}

/// Conditional node with both branches.
pub fn when_else<F>(predicate: F, then: Vec<Node>, otherwise: Vec<Node>) -> Node
where
    F: Fn(&Scope<'_>) -> Result<bool, RenderError> + Send + Sync + 'static,
{
    Node::Conditional {
        when: Box::new(predicate),
        then,
        otherwise,
    }
}

/// Loop node.
pub fn each(over: Sequence, body: Vec<Node>) -> Node {
    Node::Loop { over, body }
}

/// Fragment invocation node.
pub fn invoke(name: impl Into<String>) -> Node {
    Node::Invoke(name.into())
}

/// Record sequences a loop can iterate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Resources,
    Requirements,
    Providers,
    ModuleCalls,
    Inputs,
    RequiredInputs,
    OptionalInputs,
    Outputs,
}

impl Sequence {
    /// The records of this sequence in their original order.
    pub fn items<'a>(self, module: &'a Module) -> Vec<Item<'a>> {
        match self {
            Sequence::Resources => module.resources.iter().map(Item::Resource).collect(),
            Sequence::Requirements => module.requirements.iter().map(Item::Requirement).collect(),
            Sequence::Providers => module.providers.iter().map(Item::Provider).collect(),
            Sequence::ModuleCalls => module.module_calls.iter().map(Item::ModuleCall).collect(),
            Sequence::Inputs => module.inputs.iter().map(Item::Input).collect(),
            Sequence::RequiredInputs => module.required_inputs().map(Item::Input).collect(),
            Sequence::OptionalInputs => module.optional_inputs().map(Item::Input).collect(),
            Sequence::Outputs => module.outputs.iter().map(Item::Output).collect(),
        }
    }

    pub fn is_empty(self, module: &Module) -> bool {
        match self {
            Sequence::Resources => module.resources.is_empty(),
            Sequence::Requirements => module.requirements.is_empty(),
            Sequence::Providers => module.providers.is_empty(),
            Sequence::ModuleCalls => module.module_calls.is_empty(),
            Sequence::Inputs => module.inputs.is_empty(),
            Sequence::RequiredInputs => module.required_inputs().next().is_none(),
            Sequence::OptionalInputs => module.optional_inputs().next().is_none(),
            Sequence::Outputs => module.outputs.is_empty(),
        }
    }
}

/// The record a loop body is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item<'a> {
    /// Outside of any loop.
    Root,
    Input(&'a Input),
    Output(&'a Output),
    Resource(&'a Resource),
    Requirement(&'a Requirement),
    Provider(&'a Provider),
    ModuleCall(&'a ModuleCall),
}

impl Item<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Item::Root => "module",
            Item::Input(_) => "input",
            Item::Output(_) => "output",
            Item::Resource(_) => "resource",
            Item::Requirement(_) => "requirement",
            Item::Provider(_) => "provider",
            Item::ModuleCall(_) => "module call",
        }
    }
}

/// Everything an expression can read: the module, the settings and the
/// record of the innermost loop.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub module: &'a Module,
    pub settings: &'a Settings,
    pub item: Item<'a>,
}

macro_rules! item_accessor {
    ($(#[$doc:meta])* $fn_name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        $(#[$doc])*
        pub fn $fn_name(&self) -> Result<&'a $ty, RenderError> {
            match self.item {
                Item::$variant(record) => Ok(record),
                other => Err(RenderError::evaluation(format!(
                    concat!("expected ", $expected, " record, found {}"),
                    other.kind()
                ))),
            }
        }
    };
}

impl<'a> Scope<'a> {
    /// The scope a document render starts in.
    pub fn root(module: &'a Module, settings: &'a Settings) -> Self {
        Self {
            module,
            settings,
            item: Item::Root,
        }
    }

    /// The same scope focused on another record.
    pub fn with_item(self, item: Item<'a>) -> Self {
        Self { item, ..self }
    }

    item_accessor!(
        /// The current input, or an evaluation error outside an input loop.
        input, Input, Input, "an input"
    );
    item_accessor!(output, Output, Output, "an output");
    item_accessor!(resource, Resource, Resource, "a resource");
    item_accessor!(requirement, Requirement, Requirement, "a requirement");
    item_accessor!(provider, Provider, Provider, "a provider");
    item_accessor!(module_call, ModuleCall, ModuleCall, "a module call");
}
