use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Memoizes one compiled value per Rust type. Entries are never evicted.
///
/// Compilation runs under the write lock, so concurrent first uses of a type
/// compile it exactly once.
#[derive(Default)]
pub(crate) struct TypeCache {
    entries: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,

    /// Number of compilations performed
    compilations: AtomicUsize,
}

impl TypeCache {
    pub(crate) fn get_or_compile<V>(&self, compile: impl FnOnce() -> V) -> Arc<V>
    where
        V: Any + Send + Sync,
    {
        let key = TypeId::of::<V>();

        if let Some(entry) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return downcast(entry.clone());
        }

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have compiled it while we waited for the lock
        if let Some(entry) = entries.get(&key) {
            return downcast(entry.clone());
        }

        let compiled = Arc::new(compile());
        self.compilations.fetch_add(1, Ordering::Relaxed);
        entries.insert(key, compiled.clone());
        compiled
    }

    pub(crate) fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn downcast<V: Any + Send + Sync>(entry: Arc<dyn Any + Send + Sync>) -> Arc<V> {
    entry
        .downcast::<V>()
        .unwrap_or_else(|_| unreachable!("cache entries are keyed by their own type"))
}

impl core::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeCache")
            .field("entries", &self.len())
            .field("compilations", &self.compilations())
            .finish()
    }
}
