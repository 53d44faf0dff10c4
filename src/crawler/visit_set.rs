use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

/// Set shared between crawl tasks. `insert` is the single synchronization point
/// deciding which task gets to expand a URL.
pub struct ConcurrentSet<T> {
    inner: RwLock<HashSet<T>>,
}

impl<T: Eq + Hash + Clone> ConcurrentSet<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashSet::new()),
        }
    }

    /// Adds `value`, returning `true` if it was not present before.
    /// Of any number of concurrent callers inserting the same value exactly one sees `true`.
    pub fn insert(&self, value: T) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(value)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> HashSet<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T: Eq + Hash + Clone> Default for ConcurrentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
