//! Fragment-based document composition.
//!
//! A document is described as a set of small named fragments. Each fragment
//! is a tree of render nodes:
//!
//! | Node | Renders |
//! |------|---------|
//! | [`Node::Literal`] | fixed text |
//! | [`Node::Text`] | text computed from the current [`Scope`] |
//! | [`Node::Conditional`] | one of two branches |
//! | [`Node::Loop`] | its body once per record of a [`Sequence`] |
//! | [`Node::Invoke`] | another fragment, looked up by name |
//!
//! Fragments are registered together in a [`FragmentRegistry`], which expands
//! a root fragment into raw text. Expressions draw on the pure helpers in
//! [`functions`].
//!
//! Because sections are separate fragments, a format can reuse or replace
//! one section without restating the whole document, and a per-record
//! fragment such as `input` can be invoked from several loops.
//!
//! ## Key Types
//!
//! - [`Fragment`]: a named node tree
//! - [`FragmentRegistry`]: the immutable fragment set and its interpreter
//! - [`Scope`]: module, settings and current record seen by expressions

pub mod functions;
mod node;
mod registry;

pub use node::{
    each, invoke, lit, text, when, when_else, Expr, Item, Node, Predicate, Scope, Sequence,
};
pub use registry::{Fragment, FragmentRegistry, MAX_FRAGMENT_DEPTH};
