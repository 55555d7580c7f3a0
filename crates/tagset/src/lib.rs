//! Simple and powerful tagging with set-algebra expressions.
//!
//! This crate associates arbitrary values with named tags, lets tags be
//! defined either as explicit value sets or as boolean expressions composed
//! from other tags, and evaluates such expressions into deterministically
//! sorted result sets.
//!
//! # Tag kinds
//!
//! - **Simple tags** store their objects directly (via
//!   [`Scope::add_object`] or [`Scope::define`] with values).
//! - **Composite tags** carry an expression and always reflect the current
//!   state of the tags they reference.
//! - **The default tag** `all` matches every tagged object, computed on
//!   demand.
//!
//! # Expression Syntax
//!
//! - `&` — intersection
//! - `|` — union
//! - `-` — difference
//! - `^` — symmetric difference
//! - `( … )` — grouping
//!
//! Tag names are free-form; they are normalized for lookup, so `"Web
//! servers!"` and `"web-servers"` name the same tag.
//!
//! # Example
//!
//! ```
//! use tagset_rs::Scope;
//!
//! let mut scope = Scope::new();
//! scope.add_object(1, &["a", "b"]).unwrap();
//! scope.add_object(2, &["b", "c"]).unwrap();
//! scope.add_object(3, &["c", "d"]).unwrap();
//!
//! assert_eq!(scope.evaluate("c").unwrap(), vec![2, 3]);
//! assert_eq!(scope.evaluate("all - c").unwrap(), vec![1]);
//! ```
//!
//! Evaluation results are sorted in natural order for text values
//! ("server-2" before "server-10") and in their total order otherwise.

mod error;
mod ident;
mod registry;
mod scope;
mod tag;
mod value;

pub mod expr;

pub use error::{TagError, TagResult};
pub use ident::{generate_id, IdentError};
pub use registry::TagRegistry;
pub use scope::{Scope, TagDefinition};
pub use tag::Tag;
pub use value::{natural_compare, TagValue};

/// The identifier of the default tag that matches all tagged objects.
pub const DEFAULT_TAG_NAME: &str = "all";
