//! Configuration for an in-memory flyer registry.
//!
//! Spam policies are configured per flyer; the builder only covers the
//! registry's own runtime concerns (clock and storage sizing).

use crate::application::ports::Clock;
use crate::application::registry::FlyerRegistry;
use crate::domain::flyer::Flyer;
use crate::domain::flyer_id::FlyerId;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::ShardedStorage;
use std::fmt;
use std::sync::Arc;

/// Registry backed by the default sharded in-memory storage.
pub type InMemoryRegistry = FlyerRegistry<Arc<ShardedStorage<FlyerId, Flyer>>>;

/// Error returned when building a registry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Shard amount must be a power of two greater than 1
    InvalidShardAmount(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidShardAmount(n) => {
                write!(f, "shard amount must be a power of two greater than 1, got {}", n)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Builder for constructing an `InMemoryRegistry`.
///
/// # Example
/// ```
/// use flyer_clicks::{InMemoryRegistry, SystemClock};
/// use std::sync::Arc;
///
/// let registry = InMemoryRegistry::builder()
///     .with_clock(Arc::new(SystemClock::new()))
///     .with_capacity(1_000)
///     .with_shard_amount(16)
///     .build()
///     .unwrap();
///
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct FlyerRegistryBuilder {
    clock: Option<Arc<dyn Clock>>,
    capacity: usize,
    shard_amount: Option<usize>,
}

impl FlyerRegistryBuilder {
    /// Use a custom clock for `record_click_now`.
    ///
    /// Defaults to `SystemClock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Pre-allocate room for this many flyers.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the number of storage shards.
    ///
    /// Must be a power of two greater than 1. Defaults to DashMap's choice,
    /// which scales with the number of CPUs.
    pub fn with_shard_amount(mut self, shard_amount: usize) -> Self {
        self.shard_amount = Some(shard_amount);
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    /// Returns `BuildError` if the configuration is invalid.
    pub fn build(self) -> Result<InMemoryRegistry, BuildError> {
        let storage = match self.shard_amount {
            Some(n) if n <= 1 || !n.is_power_of_two() => {
                return Err(BuildError::InvalidShardAmount(n));
            }
            Some(n) => ShardedStorage::with_capacity_and_shards(self.capacity, n),
            None if self.capacity > 0 => {
                ShardedStorage::with_capacity_and_shards(self.capacity, default_shard_amount())
            }
            None => ShardedStorage::new(),
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        Ok(FlyerRegistry::new(Arc::new(storage), clock))
    }
}

impl InMemoryRegistry {
    /// Create a builder for configuring the registry.
    pub fn builder() -> FlyerRegistryBuilder {
        FlyerRegistryBuilder::default()
    }

    /// Create a registry with the system clock and default sharding.
    pub fn in_memory() -> Self {
        FlyerRegistry::new(Arc::new(ShardedStorage::new()), Arc::new(SystemClock::new()))
    }
}

/// Four shards per available CPU, rounded up to a power of two.
fn default_shard_amount() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, usize::from);
    (cpus * 4).next_power_of_two().max(2)
}
