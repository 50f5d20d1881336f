//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::domain::Timestamp;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

/// Port for obtaining the current click timestamp.
///
/// Click timestamps are supplied by the caller in most cases; this port is
/// used when the registry stamps clicks itself. Infrastructure provides
/// concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}

/// Port for concurrent key-value storage.
///
/// This abstraction allows the application layer to store and retrieve values
/// without depending on specific concurrent data structure implementations.
/// Infrastructure provides concrete implementations (ShardedStorage).
///
/// Values are only ever reached through closures so that no borrow of a
/// stored value outlives the lock protecting it.
pub trait Storage<K, V>: Send + Sync + Debug
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Insert a value if the key is absent.
    ///
    /// The check and the insert happen atomically with respect to other
    /// writers of the same key.
    ///
    /// # Returns
    /// `Err(value)` handing the value back if the key is already present.
    fn insert_new(&self, key: K, value: V) -> Result<(), V>;

    /// Access an existing entry immutably.
    ///
    /// # Returns
    /// The result of the accessor, or `None` if the key is absent.
    fn with_entry<Q, F, R>(&self, key: &Q, accessor: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R;

    /// Access an existing entry mutably.
    ///
    /// # Returns
    /// The result of the accessor, or `None` if the key is absent.
    fn with_entry_mut<Q, F, R>(&self, key: &Q, accessor: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&mut V) -> R;

    /// Check if a key exists.
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Get the number of entries in the storage.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Iterate over all entries, providing access to both key and value.
    ///
    /// Iteration order is unspecified.
    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V);
}
