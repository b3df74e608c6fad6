//! Fragment registry and the interpreter that expands fragments.
//!
//! This module provides [`FragmentRegistry`], a fixed set of named
//! [`Fragment`]s. A document is produced by expanding a root fragment: its
//! node tree is walked, and every [`Node::Invoke`] is resolved by exact name
//! against the registry and expanded in place, recursively.
//!
//! # Design
//!
//! The registry is built once from its complete fragment set and is immutable
//! afterwards. It holds no per-render state, so one registry can serve any
//! number of concurrent renders; the module, the settings and the recursion
//! depth all travel with the call.
//!
//! # Resolution
//!
//! - Names are matched exactly; there is no fallback or prefix search.
//! - An unknown name fails the render with [`RenderError::UndefinedFragment`].
//! - [`FragmentRegistry::validate`] reports the same failure up front,
//!   without rendering anything.
//! - Expansion deeper than [`MAX_FRAGMENT_DEPTH`] fails with
//!   [`RenderError::TemplateEvaluation`], which stops self-recursive fragments.
//!
//! # Example
//!
//! ```rust
//! use modoc_render::template::{each, invoke, lit, text, Fragment, FragmentRegistry, Scope, Sequence};
//! use modoc_render::{Module, Resource, Settings};
//!
//! let registry = FragmentRegistry::new(vec![
//!     Fragment::new("list", vec![each(Sequence::Resources, vec![invoke("row")])]),
//!     Fragment::new("row", vec![
//!         lit("- "),
//!         text(|scope| Ok(scope.resource()?.full_type.clone())),
//!         lit("\n"),
//!     ]),
//! ])
//! .unwrap();
//!
//! let module = Module {
//!     resources: vec![Resource::new("aws_s3_bucket.logs")],
//!     ..Default::default()
//! };
//! let settings = Settings::default();
//! let out = registry.render("list", &Scope::root(&module, &settings)).unwrap();
//! assert_eq!(out, "- aws_s3_bucket.logs\n");
//! ```

use std::collections::HashMap;

use super::node::{Node, Scope};
use crate::error::RenderError;

/// Maximum number of nested fragment invocations in one render.
pub const MAX_FRAGMENT_DEPTH: usize = 32;

/// A named unit of render logic.
#[derive(Debug)]
pub struct Fragment {
    name: String,
    body: Vec<Node>,
}

impl Fragment {
    pub fn new(name: impl Into<String>, body: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &[Node] {
        &self.body
    }
}

/// An immutable set of fragments keyed by name.
#[derive(Debug, Default)]
pub struct FragmentRegistry {
    fragments: HashMap<String, Fragment>,
}

impl FragmentRegistry {
    /// Builds a registry from its complete fragment set.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DuplicateFragment`] if two fragments share a name.
    pub fn new(fragments: impl IntoIterator<Item = Fragment>) -> Result<Self, RenderError> {
        let mut map = HashMap::new();
        for fragment in fragments {
            if map.contains_key(&fragment.name) {
                return Err(RenderError::DuplicateFragment(fragment.name));
            }
            map.insert(fragment.name.clone(), fragment);
        }
        Ok(Self { fragments: map })
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Registered fragment names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fragments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Checks that every invocation in every fragment resolves.
    ///
    /// Fragments are checked in name order, so the reported name is stable.
    pub fn validate(&self) -> Result<(), RenderError> {
        for name in self.names() {
            if let Some(fragment) = self.fragments.get(name) {
                self.validate_nodes(&fragment.body)?;
            }
        }
        Ok(())
    }

    fn validate_nodes(&self, nodes: &[Node]) -> Result<(), RenderError> {
        for node in nodes {
            match node {
                Node::Literal(_) | Node::Text(_) => {}
                Node::Conditional {
                    then, otherwise, ..
                } => {
                    self.validate_nodes(then)?;
                    self.validate_nodes(otherwise)?;
                }
                Node::Loop { body, .. } => self.validate_nodes(body)?,
                Node::Invoke(name) => {
                    if !self.contains(name) {
                        return Err(RenderError::UndefinedFragment(name.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Expands the named root fragment into raw text.
    ///
    /// # Errors
    ///
    /// - [`RenderError::UndefinedFragment`] when the root or any invoked
    ///   fragment is not registered.
    /// - [`RenderError::TemplateEvaluation`] when an expression fails or the
    ///   expansion nests deeper than [`MAX_FRAGMENT_DEPTH`].
    pub fn render(&self, root: &str, scope: &Scope<'_>) -> Result<String, RenderError> {
        tracing::debug!(root, fragments = self.len(), "expanding fragment tree");
        let mut out = String::new();
        self.expand(root, scope, 0, &mut out)?;
        Ok(out)
    }

    fn expand(
        &self,
        name: &str,
        scope: &Scope<'_>,
        depth: usize,
        out: &mut String,
    ) -> Result<(), RenderError> {
        if depth >= MAX_FRAGMENT_DEPTH {
            return Err(RenderError::evaluation(format!(
                "fragment '{}' exceeds the maximum nesting depth of {}",
                name, MAX_FRAGMENT_DEPTH
            )));
        }
        let fragment = self
            .fragments
            .get(name)
            .ok_or_else(|| RenderError::UndefinedFragment(name.to_string()))?;
        tracing::trace!(fragment = name, depth, "invoke");
        self.eval(&fragment.body, scope, depth, out)
    }

    fn eval(
        &self,
        nodes: &[Node],
        scope: &Scope<'_>,
        depth: usize,
        out: &mut String,
    ) -> Result<(), RenderError> {
        for node in nodes {
            match node {
                Node::Literal(text) => out.push_str(text),
                Node::Text(expr) => out.push_str(&expr(scope)?),
                Node::Conditional {
                    when,
                    then,
                    otherwise,
                } => {
                    let branch = if when(scope)? { then } else { otherwise };
                    self.eval(branch, scope, depth, out)?;
                }
                Node::Loop { over, body } => {
                    for item in over.items(scope.module) {
                        self.eval(body, &scope.with_item(item), depth, out)?;
                    }
                }
                Node::Invoke(name) => self.expand(name, scope, depth + 1, out)?,
            }
        }
        Ok(())
    }
}
