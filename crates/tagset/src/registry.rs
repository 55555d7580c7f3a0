//! Name-indexed storage for tags.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::ident::{generate_id, IdentError};
use crate::tag::Tag;

/// A mapping of tag names to [`Tag`] values.
///
/// Names are keyed by their collapsed identifiers, so distinct raw names
/// that normalize to the same key ("Foo Bar", "foo-bar") resolve to the
/// same entry. [`get_or_create`](Self::get_or_create) creates tags on first
/// access; the non-creating lookups exist for the evaluation path, which
/// must never mutate the registry. Iteration yields tags in creation order.
#[derive(Debug, Clone)]
pub struct TagRegistry<T> {
    tags: Vec<Tag<T>>,
    index: HashMap<String, usize>,
}

impl<T> TagRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Iterates over the registered tags in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag<T>> {
        self.tags.iter()
    }

    /// The number of registered tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if no tags have been registered.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<T: Eq + Hash> TagRegistry<T> {
    /// Gets or creates the tag registered under `name`.
    ///
    /// A tag created here carries the raw name as supplied; the collapsed
    /// identifier is only used as the registry key.
    ///
    /// # Errors
    ///
    /// Returns [`IdentError`] when the name normalizes to nothing.
    pub fn get_or_create(&mut self, name: &str) -> Result<&mut Tag<T>, IdentError> {
        let key = generate_id(name, true)?;
        let slot = match self.index.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let tag = Tag::named(name)?;
                let slot = self.tags.len();
                self.tags.push(tag);
                entry.insert(slot);
                slot
            }
        };
        Ok(&mut self.tags[slot])
    }

    /// Looks up the tag registered under `name` without creating it.
    ///
    /// # Errors
    ///
    /// Returns [`IdentError`] when the name normalizes to nothing.
    pub fn lookup(&self, name: &str) -> Result<Option<&Tag<T>>, IdentError> {
        let key = generate_id(name, true)?;
        Ok(self.lookup_key(&key))
    }

    /// Looks up a tag by its already-collapsed registry key.
    pub fn lookup_key(&self, key: &str) -> Option<&Tag<T>> {
        self.index.get(key).map(|&slot| &self.tags[slot])
    }

    /// The raw names of all registered tags, in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(|tag| tag.name())
    }
}

impl<T> Default for TagRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
