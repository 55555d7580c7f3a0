//! The top-level tagging façade.

use std::collections::HashSet;

use crate::error::TagResult;
use crate::expr::{ExprParser, ObjectResolver};
use crate::registry::TagRegistry;
use crate::tag::Tag;
use crate::value::TagValue;

/// Everything starts with a [`Scope`]: it groups related tags together and
/// provides methods to define new tags and evaluate tag expressions.
///
/// A scope owns exactly one [`TagRegistry`]; tags and objects accumulate
/// through [`define`](Self::define) and [`add_object`](Self::add_object).
/// Evaluation reads the registry but never mutates it.
///
/// # Example
///
/// ```
/// use tagset_rs::Scope;
///
/// let mut scope = Scope::new();
/// scope.define("staging", vec!["server-1".to_string(), "server-5".to_string()]).unwrap();
/// scope.define("production", vec!["server-11".to_string()]).unwrap();
/// scope.define("fleet", "staging | production").unwrap();
///
/// let fleet = scope.evaluate("fleet").unwrap();
/// assert_eq!(fleet, vec!["server-1", "server-5", "server-11"]);
/// ```
#[derive(Debug, Clone)]
pub struct Scope<T> {
    registry: TagRegistry<T>,
}

/// The value of a tag definition: an expression over other tags, or an
/// explicit list of objects.
///
/// [`Scope::define`] accepts anything convertible into a definition:
/// string types convert to [`Expression`](Self::Expression), vectors and
/// arrays convert to [`Objects`](Self::Objects).
#[derive(Debug, Clone)]
pub enum TagDefinition<T> {
    /// A set-algebra expression referencing other tags.
    Expression(String),

    /// Explicit objects replacing the tag's stored set.
    Objects(Vec<T>),
}

impl<T> From<&str> for TagDefinition<T> {
    fn from(expression: &str) -> Self {
        TagDefinition::Expression(expression.to_string())
    }
}

impl<T> From<String> for TagDefinition<T> {
    fn from(expression: String) -> Self {
        TagDefinition::Expression(expression)
    }
}

impl<T> From<Vec<T>> for TagDefinition<T> {
    fn from(objects: Vec<T>) -> Self {
        TagDefinition::Objects(objects)
    }
}

impl<T, const N: usize> From<[T; N]> for TagDefinition<T> {
    fn from(objects: [T; N]) -> Self {
        TagDefinition::Objects(objects.into())
    }
}

impl<T: TagValue> Scope<T> {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self {
            registry: TagRegistry::new(),
        }
    }

    /// Read access to the scope's tag registry.
    pub fn tags(&self) -> &TagRegistry<T> {
        &self.registry
    }

    /// Adds an object to the scope, tagging it with each of the given tag
    /// names. Tags are created on first use.
    ///
    /// Inserting materializes the named tag's stored set, so a composite
    /// tag named here loses its expression.
    ///
    /// # Errors
    ///
    /// Fails with [`TagError::Ident`](crate::TagError::Ident) when a name
    /// normalizes to nothing.
    pub fn add_object(&mut self, value: T, tags: &[&str]) -> TagResult<()> {
        for name in tags {
            self.registry.get_or_create(name)?.insert_object(value.clone());
        }
        Ok(())
    }

    /// Defines the value of a tag: an expression (any string type) or
    /// explicit objects (a vector or array), replacing any prior content.
    ///
    /// Returns a snapshot of the tag, usable for composition; resolution of
    /// the snapshot goes back through the scope, so it never serves stale
    /// data.
    ///
    /// # Example
    ///
    /// ```
    /// use tagset_rs::Scope;
    ///
    /// let mut scope = Scope::new();
    /// let a = scope.define("a", [1, 2, 3, 4]).unwrap();
    /// let b = scope.define("b", [3, 4, 5, 6]).unwrap();
    ///
    /// let objects = scope.resolve(&(&a & &b)).unwrap();
    /// assert_eq!(objects, [3, 4].into_iter().collect());
    /// ```
    pub fn define(&mut self, name: &str, value: impl Into<TagDefinition<T>>) -> TagResult<Tag<T>> {
        let tag = self.registry.get_or_create(name)?;
        match value.into() {
            TagDefinition::Expression(expression) => tag.set_expression(expression),
            TagDefinition::Objects(objects) => tag.set_objects(objects),
        }
        Ok(tag.clone())
    }

    /// Parses an expression string into an anonymous composite tag without
    /// evaluating it.
    ///
    /// The tag's expression is the canonical rendering of the parsed text,
    /// so `parse("(a | b)")` yields a tag whose expression is `"a | b"`.
    /// Useful for validating expression syntax up front.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Expression`](crate::TagError::Expression) when
    /// the text fails to parse.
    pub fn parse(&self, expression: &str) -> TagResult<Tag<T>> {
        let parsed = ExprParser::parse(expression)?;
        Ok(Tag::from_expression(parsed.to_string()))
    }

    /// Evaluates a tag expression into a deterministically sorted list of
    /// matching objects.
    ///
    /// This is [`evaluate_raw`](Self::evaluate_raw) followed by
    /// [`sort_objects`](Self::sort_objects).
    pub fn evaluate(&self, expression: &str) -> TagResult<Vec<T>> {
        Ok(self.sort_objects(self.evaluate_raw(expression)?))
    }

    /// Evaluates a tag expression into the set of matching objects.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Expression`](crate::TagError::Expression) for
    /// malformed syntax,
    /// [`TagError::EmptyTag`](crate::TagError::EmptyTag) when a referenced
    /// tag resolves to an empty set, and
    /// [`TagError::CircularExpression`](crate::TagError::CircularExpression)
    /// for reference cycles.
    pub fn evaluate_raw(&self, expression: &str) -> TagResult<HashSet<T>> {
        ObjectResolver::new(&self.registry).evaluate(expression)
    }

    /// All objects stored by simple tags in this scope.
    ///
    /// Composite tags are skipped; their objects are reachable through the
    /// simple tags their expressions reference.
    pub fn all_objects(&self) -> HashSet<T> {
        ObjectResolver::new(&self.registry).all_objects()
    }

    /// Resolves a tag handle to its current object set.
    ///
    /// Named handles re-resolve against the registry, anonymous composite
    /// handles evaluate their expression. Unlike expression variables, an
    /// empty result here is not an error.
    pub fn resolve(&self, tag: &Tag<T>) -> TagResult<HashSet<T>> {
        let resolver = ObjectResolver::new(&self.registry);
        let mut active = Vec::new();
        if let Some(name) = tag.name() {
            if let Some(current) = self.registry.lookup(name)? {
                return resolver.tag_objects(current, &mut active);
            }
        }
        resolver.tag_objects(tag, &mut active)
    }

    /// Resolves a tag handle into a deterministically sorted list of its
    /// objects, recomputed per call so it reflects current scope state.
    pub fn resolve_sorted(&self, tag: &Tag<T>) -> TagResult<Vec<T>> {
        Ok(self.sort_objects(self.resolve(tag)?))
    }

    /// Sorts objects deterministically: natural order for text values,
    /// total order otherwise (see [`TagValue::natural_cmp`]).
    pub fn sort_objects(&self, objects: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut sorted: Vec<T> = objects.into_iter().collect();
        sorted.sort_by(|left, right| left.natural_cmp(right));
        sorted
    }
}

impl<T: TagValue> Default for Scope<T> {
    fn default() -> Self {
        Self::new()
    }
}
