//! Tag entities and composition.

use std::cell::OnceCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Sub};

use crate::expr::SetOp;
use crate::ident::{generate_id, IdentError};
use crate::DEFAULT_TAG_NAME;

/// A named or anonymous collection of tagged objects.
///
/// There are three kinds of tags:
///
/// - **Simple tags** store their objects directly. Defining a tag with
///   explicit values, or tagging objects with [`Scope::add_object`], makes
///   it simple.
/// - **Composite tags** carry an expression and compute their objects by
///   evaluating it against the owning scope, so they always reflect the
///   current state of the tags they reference.
/// - **The default tag** — identifier [`DEFAULT_TAG_NAME`] — evaluates to
///   the union of every simple tag's objects, computed on demand and never
///   stored.
///
/// `objects` and `expression` are mutually exclusive: each setter clears the
/// other and invalidates the cached composition key.
///
/// Tags handed out by a scope are snapshot values; resolving one through
/// [`Scope::resolve`] goes back to the registry, so results always reflect
/// current scope state.
///
/// [`Scope::add_object`]: crate::Scope::add_object
/// [`Scope::resolve`]: crate::Scope::resolve
#[derive(Debug, Clone)]
pub struct Tag<T> {
    name: Option<String>,
    identifier: Option<String>,
    expression: Option<String>,
    objects: Option<HashSet<T>>,
    /// Cached composition key, rebuilt on demand after mutation.
    id_or_expr: OnceCell<String>,
}

impl<T: Eq + Hash> Tag<T> {
    /// Creates a tag carrying a user supplied name.
    ///
    /// The readable identifier is derived from the name once, at
    /// construction.
    pub(crate) fn named(name: &str) -> Result<Self, IdentError> {
        let identifier = generate_id(name, false)?;
        Ok(Self {
            name: Some(name.to_string()),
            identifier: Some(identifier),
            expression: None,
            objects: None,
            id_or_expr: OnceCell::new(),
        })
    }

    /// Creates an anonymous composite tag from an expression.
    pub(crate) fn from_expression(expression: impl Into<String>) -> Self {
        Self {
            name: None,
            identifier: None,
            expression: Some(expression.into()),
            objects: None,
            id_or_expr: OnceCell::new(),
        }
    }

    /// The user supplied name, if the tag was created through definition.
    ///
    /// Tags produced purely by composition have no name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The readable identifier derived from [`name`](Self::name).
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// The expression this tag evaluates, when it is composite.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// The stored object set, when the tag is simple and has been populated.
    pub fn objects(&self) -> Option<&HashSet<T>> {
        self.objects.as_ref()
    }

    /// Whether this tag is the reserved default tag.
    pub fn is_default(&self) -> bool {
        self.identifier.as_deref() == Some(DEFAULT_TAG_NAME)
    }

    /// Whether this tag computes its objects from an expression.
    pub fn is_composite(&self) -> bool {
        self.expression.is_some()
    }

    /// Replaces the stored objects with a fresh set.
    ///
    /// Clears any expression and invalidates the composition key.
    pub fn set_objects(&mut self, values: impl IntoIterator<Item = T>) {
        self.objects = Some(values.into_iter().collect());
        self.expression = None;
        self.id_or_expr.take();
    }

    /// Replaces the expression this tag evaluates.
    ///
    /// Clears any stored objects and invalidates the composition key.
    pub fn set_expression(&mut self, expression: impl Into<String>) {
        self.expression = Some(expression.into());
        self.objects = None;
        self.id_or_expr.take();
    }

    /// Inserts a single object into the stored set, materializing an empty
    /// set first when none exists. Materializing goes through
    /// [`set_objects`](Self::set_objects), so a composite tag loses its
    /// expression here.
    pub(crate) fn insert_object(&mut self, value: T) {
        if self.objects.is_none() {
            self.set_objects(std::iter::empty());
        }
        if let Some(objects) = self.objects.as_mut() {
            objects.insert(value);
        }
    }

    /// The key used when this tag participates in composing a new
    /// expression: the identifier when the tag is named, otherwise its
    /// expression — parenthesized unless it is a single identifier-like run
    /// or already one balanced group.
    pub fn id_or_expr(&self) -> &str {
        self.id_or_expr.get_or_init(|| {
            if let Some(identifier) = &self.identifier {
                identifier.clone()
            } else if let Some(expression) = &self.expression {
                parenthesize(expression)
            } else {
                // An anonymous tag stripped of its expression has no key;
                // the empty operand is rejected by the parser downstream.
                String::new()
            }
        })
    }

    /// Creates an anonymous composite tag combining `self` and `other`.
    ///
    /// The new tag's expression is built from both composition keys, so
    /// compound operands stay parenthesized and chained compositions keep
    /// their grouping.
    pub fn compose(&self, op: SetOp, other: &Tag<T>) -> Tag<T> {
        Tag::from_expression(format!(
            "{} {} {}",
            self.id_or_expr(),
            op.symbol(),
            other.id_or_expr()
        ))
    }

    /// Composite tag selecting objects in both `self` and `other` (`&`).
    pub fn intersect(&self, other: &Tag<T>) -> Tag<T> {
        self.compose(SetOp::Intersection, other)
    }

    /// Composite tag selecting objects in either `self` or `other` (`|`).
    pub fn union(&self, other: &Tag<T>) -> Tag<T> {
        self.compose(SetOp::Union, other)
    }

    /// Composite tag selecting objects in `self` but not `other` (`-`).
    pub fn difference(&self, other: &Tag<T>) -> Tag<T> {
        self.compose(SetOp::Difference, other)
    }

    /// Composite tag selecting objects in exactly one of the two (`^`).
    pub fn symmetric_difference(&self, other: &Tag<T>) -> Tag<T> {
        self.compose(SetOp::SymmetricDifference, other)
    }
}

/// Wraps an expression in parentheses unless it is a single identifier-like
/// run or already enclosed in one balanced pair.
fn parenthesize(expression: &str) -> String {
    if is_single_run(expression) || is_enclosed(expression) {
        expression.to_string()
    } else {
        format!("({expression})")
    }
}

/// True for a run of alphanumerics/underscores — an operand that binds
/// tighter than any operator and needs no parentheses.
fn is_single_run(expression: &str) -> bool {
    !expression.is_empty() && expression.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// True when the opening parenthesis matches the final closing one, so the
/// whole expression is already a single group. `(a) | (b)` is not enclosed.
fn is_enclosed(expression: &str) -> bool {
    if !expression.starts_with('(') || !expression.ends_with(')') {
        return false;
    }
    let mut depth = 1usize;
    for (index, c) in expression.char_indices().skip(1) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return index == expression.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

impl<'a, 'b, T: Eq + Hash> BitAnd<&'b Tag<T>> for &'a Tag<T> {
    type Output = Tag<T>;

    fn bitand(self, other: &'b Tag<T>) -> Tag<T> {
        self.intersect(other)
    }
}

impl<'a, 'b, T: Eq + Hash> BitOr<&'b Tag<T>> for &'a Tag<T> {
    type Output = Tag<T>;

    fn bitor(self, other: &'b Tag<T>) -> Tag<T> {
        self.union(other)
    }
}

impl<'a, 'b, T: Eq + Hash> Sub<&'b Tag<T>> for &'a Tag<T> {
    type Output = Tag<T>;

    fn sub(self, other: &'b Tag<T>) -> Tag<T> {
        self.difference(other)
    }
}

impl<'a, 'b, T: Eq + Hash> BitXor<&'b Tag<T>> for &'a Tag<T> {
    type Output = Tag<T>;

    fn bitxor(self, other: &'b Tag<T>) -> Tag<T> {
        self.symmetric_difference(other)
    }
}

impl<T: Eq + Hash> BitAnd for Tag<T> {
    type Output = Tag<T>;

    fn bitand(self, other: Tag<T>) -> Tag<T> {
        self.intersect(&other)
    }
}

impl<T: Eq + Hash> BitOr for Tag<T> {
    type Output = Tag<T>;

    fn bitor(self, other: Tag<T>) -> Tag<T> {
        self.union(&other)
    }
}

impl<T: Eq + Hash> Sub for Tag<T> {
    type Output = Tag<T>;

    fn sub(self, other: Tag<T>) -> Tag<T> {
        self.difference(&other)
    }
}

impl<T: Eq + Hash> BitXor for Tag<T> {
    type Output = Tag<T>;

    fn bitxor(self, other: Tag<T>) -> Tag<T> {
        self.symmetric_difference(&other)
    }
}
