//! Module with the state shared by all matchers of one scan.
use std::any::Any;

use rustc_hash::FxHashMap;

/// A mutable key/value map that is handed to every matcher and to the `on_match` hook of a
/// scan.
///
/// The scanner itself never looks into the context. Matchers use it to keep state across
/// tokens, e.g. the type of the last token or a nesting depth. Values can be of any
/// `'static` type and are retrieved by key and type.
#[derive(Default)]
pub struct Context {
    values: FxHashMap<String, Box<dyn Any>>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `key`.
    /// Returns the previous value if there was one of the same type.
    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        self.values
            .insert(key.into(), Box::new(value))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Returns a reference to the value under `key` if it exists and has type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Returns a mutable reference to the value under `key` if it exists and has type `T`.
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key).and_then(|v| v.downcast_mut::<T>())
    }

    /// Returns a mutable reference to the value under `key`, inserting the result of `init`
    /// first if the key is missing or holds a value of another type.
    pub fn get_or_insert_with<T: Any>(&mut self, key: &str, init: impl FnOnce() -> T) -> &mut T {
        if !self.values.get(key).is_some_and(|v| v.is::<T>()) {
            self.values.insert(key.to_string(), Box::new(init()));
        }
        // The slot holds a `T` at this point.
        self.values
            .get_mut(key)
            .and_then(|v| v.downcast_mut::<T>())
            .expect("context slot holds the requested type")
    }

    /// Removes the value under `key` and returns it if it had type `T`.
    pub fn remove<T: Any>(&mut self, key: &str) -> Option<T> {
        self.values
            .remove(key)
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| *v)
    }

    /// Check if a value exists under `key`, regardless of its type.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the context is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys = self.values.keys().collect::<Vec<_>>();
        keys.sort();
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}
