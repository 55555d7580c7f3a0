//! Expression evaluation against a tag registry.

use std::collections::HashSet;

use strsim::levenshtein;

use crate::error::{TagError, TagResult};
use crate::ident::generate_id;
use crate::registry::TagRegistry;
use crate::tag::Tag;
use crate::value::TagValue;
use crate::DEFAULT_TAG_NAME;

use super::ast::Expr;
use super::parser::ExprParser;

/// Maximum Levenshtein distance to consider a tag name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Resolves tag names referenced by expressions to their object sets.
///
/// The resolver is the only gateway from expression identifiers to data:
/// names resolve against the registry (without creating entries) and a name
/// whose resolved set is empty fails with [`TagError::EmptyTag`], decorated
/// with a did-you-mean suggestion when a close registered name exists.
///
/// Resolution follows the tag data model: the default tag evaluates to the
/// union of all simple tags, composite tags recursively evaluate their
/// expression, and simple tags return their stored set. Recursive
/// evaluation tracks the in-progress tags, so reference cycles fail with
/// [`TagError::CircularExpression`] instead of recursing forever.
#[derive(Debug)]
pub struct ObjectResolver<'a, T> {
    registry: &'a TagRegistry<T>,
}

impl<'a, T: TagValue> ObjectResolver<'a, T> {
    /// Creates a resolver over the given registry.
    pub fn new(registry: &'a TagRegistry<T>) -> Self {
        Self { registry }
    }

    /// Parses and evaluates a tag expression.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Expression`] for malformed syntax,
    /// [`TagError::EmptyTag`] when a referenced tag resolves to an empty
    /// set, and [`TagError::CircularExpression`] for reference cycles.
    pub fn evaluate(&self, expression: &str) -> TagResult<HashSet<T>> {
        let parsed = ExprParser::parse(expression)?;
        self.eval(&parsed, &mut Vec::new())
    }

    /// Resolves the objects of a single named tag.
    ///
    /// # Errors
    ///
    /// Fails with [`TagError::EmptyTag`] when the resolved set is empty.
    pub fn lookup_objects(&self, name: &str) -> TagResult<HashSet<T>> {
        self.resolve(name, &mut Vec::new())
    }

    /// The union of the stored objects of every simple tag.
    ///
    /// Composite tags are skipped: their objects are reachable through the
    /// simple tags their expressions reference.
    pub fn all_objects(&self) -> HashSet<T> {
        self.registry
            .iter()
            .filter(|tag| !tag.is_default() && !tag.is_composite())
            .flat_map(|tag| tag.objects().into_iter().flatten().cloned())
            .collect()
    }

    /// Evaluates a parsed expression, threading the active-tag stack.
    fn eval(&self, expr: &Expr, active: &mut Vec<String>) -> TagResult<HashSet<T>> {
        match expr {
            Expr::Tag(name) => self.resolve(name, active),
            Expr::Binary { op, left, right } => {
                let left = self.eval(left, active)?;
                let right = self.eval(right, active)?;
                Ok(op.apply(left, right))
            }
        }
    }

    /// Resolves one expression variable to a non-empty object set.
    fn resolve(&self, name: &str, active: &mut Vec<String>) -> TagResult<HashSet<T>> {
        let key = generate_id(name, true)?;
        if active.iter().any(|seen| seen == &key) {
            return Err(TagError::CircularExpression {
                name: name.to_string(),
            });
        }

        let objects = match self.registry.lookup_key(&key) {
            Some(tag) => {
                active.push(key);
                let resolved = self.tag_objects(tag, active);
                active.pop();
                resolved?
            }
            // The default tag needs no registry entry to resolve.
            None if key == DEFAULT_TAG_NAME => self.all_objects(),
            None => HashSet::new(),
        };

        if objects.is_empty() {
            return Err(TagError::EmptyTag {
                name: name.to_string(),
                suggestion: self.find_similar_name(name),
            });
        }
        Ok(objects)
    }

    /// Resolves a tag's objects per the data-model rule: the default tag is
    /// the union of all simple tags, composite tags evaluate their
    /// expression, simple tags return their stored set (empty when nothing
    /// has been stored yet).
    pub(crate) fn tag_objects(&self, tag: &Tag<T>, active: &mut Vec<String>) -> TagResult<HashSet<T>> {
        if tag.is_default() {
            return Ok(self.all_objects());
        }
        if let Some(expression) = tag.expression() {
            let parsed = ExprParser::parse(expression)?;
            return self.eval(&parsed, active);
        }
        Ok(tag.objects().cloned().unwrap_or_default())
    }

    /// Finds the closest registered tag name within the suggestion
    /// threshold, excluding exact matches.
    fn find_similar_name(&self, query: &str) -> Option<String> {
        let query_lower = query.to_lowercase();

        let (best_match, best_distance) = self
            .registry
            .names()
            .map(|name| {
                let distance = levenshtein(&query_lower, &name.to_lowercase());
                (name.to_string(), distance)
            })
            .min_by_key(|(_, distance)| *distance)?;

        if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
            Some(best_match)
        } else {
            None
        }
    }
}
