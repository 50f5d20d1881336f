//! Central registry of flyers.
//!
//! The registry owns every registered flyer, enforces id uniqueness, routes
//! clicks to the right ledger and answers cross-flyer windowed queries.

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, Storage};
use crate::domain::flyer::{ClickError, Flyer};
use crate::domain::flyer_id::FlyerId;
use crate::domain::Timestamp;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Error returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A flyer with this id is already registered
    FlyerAlreadyExists(FlyerId),
    /// No flyer with this id is registered
    FlyerNotFound(FlyerId),
    /// No flyer has a click in the queried range
    NoQualifyingFlyer,
    /// The flyer rejected the click
    Click(ClickError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::FlyerAlreadyExists(id) => {
                write!(f, "flyer with id {} already stored in the registry", id)
            }
            RegistryError::FlyerNotFound(id) => write!(f, "flyer with id {} was not found", id),
            RegistryError::NoQualifyingFlyer => {
                write!(f, "no flyer has clicks in the requested interval")
            }
            RegistryError::Click(e) => write!(f, "click rejected: {}", e),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Click(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClickError> for RegistryError {
    fn from(e: ClickError) -> Self {
        RegistryError::Click(e)
    }
}

/// A flyer's click count within a queried range.
///
/// Returned by windowed queries as a handle: pass `id` back to
/// `with_flyer`/`with_flyer_mut` to reach the flyer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickLeader {
    pub id: FlyerId,
    pub clicks: usize,
}

/// Registry managing all flyers.
///
/// Generic over the storage implementation. In production, use
/// `Arc<ShardedStorage>` (see `InMemoryRegistry::builder`).
///
/// # Consistency
///
/// Writes to distinct flyers only contend when they share a storage shard.
/// Windowed scans (`most_clicked`, `ranking`) read each flyer under its
/// shard's read lock but do not take a registry-wide snapshot: with
/// concurrent writers the result reflects a point-in-time mix of updates.
#[derive(Debug, Clone)]
pub struct FlyerRegistry<S>
where
    S: Storage<FlyerId, Flyer> + Clone,
{
    storage: S,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
}

impl<S> FlyerRegistry<S>
where
    S: Storage<FlyerId, Flyer> + Clone,
{
    /// Create an empty registry over the given storage and clock.
    pub fn new(storage: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            metrics: Metrics::new(),
        }
    }

    /// Register a flyer, taking ownership of it.
    ///
    /// # Errors
    /// Returns `RegistryError::FlyerAlreadyExists` if the id is taken. The
    /// stored flyer is left untouched and the rejected one is dropped.
    pub fn add_flyer(&self, flyer: Flyer) -> Result<(), RegistryError> {
        let id = flyer.id().clone();
        match self.storage.insert_new(id.clone(), flyer) {
            Ok(()) => {
                self.metrics.record_registration();
                debug!(flyer_id = %id, "flyer registered");
                Ok(())
            }
            Err(_rejected) => {
                warn!(flyer_id = %id, "flyer already registered");
                Err(RegistryError::FlyerAlreadyExists(id))
            }
        }
    }

    /// Read a registered flyer.
    ///
    /// # Errors
    /// Returns `RegistryError::FlyerNotFound` if the id is unknown.
    pub fn with_flyer<F, R>(&self, id: &str, f: F) -> Result<R, RegistryError>
    where
        F: FnOnce(&Flyer) -> R,
    {
        self.storage
            .with_entry(id, f)
            .ok_or_else(|| RegistryError::FlyerNotFound(FlyerId::from(id)))
    }

    /// Mutate a registered flyer in place.
    ///
    /// The closure works on the registry's own flyer, not a copy. It runs
    /// under the flyer's shard lock, so keep it short and do not call back
    /// into the registry from inside it.
    ///
    /// # Errors
    /// Returns `RegistryError::FlyerNotFound` if the id is unknown.
    pub fn with_flyer_mut<F, R>(&self, id: &str, f: F) -> Result<R, RegistryError>
    where
        F: FnOnce(&mut Flyer) -> R,
    {
        self.storage
            .with_entry_mut(id, f)
            .ok_or_else(|| RegistryError::FlyerNotFound(FlyerId::from(id)))
    }

    /// Get a point-in-time copy of a registered flyer.
    ///
    /// # Errors
    /// Returns `RegistryError::FlyerNotFound` if the id is unknown.
    pub fn get_flyer(&self, id: &str) -> Result<Flyer, RegistryError> {
        self.with_flyer(id, Flyer::clone)
    }

    /// Route a click to a registered flyer.
    ///
    /// # Errors
    /// Returns `RegistryError::FlyerNotFound` for an unknown id, or
    /// `RegistryError::Click` if the flyer's spam gate rejects the click.
    pub fn record_click(&self, id: &str, timestamp: Timestamp) -> Result<(), RegistryError> {
        let outcome = self.with_flyer_mut(id, |flyer| flyer.add_click(timestamp))?;

        match outcome {
            Ok(()) => {
                self.metrics.record_accepted();
                debug!(flyer_id = id, timestamp, "click recorded");
                Ok(())
            }
            Err(err) => {
                self.metrics.record_rejected();
                match err {
                    ClickError::SpamLimitExceeded {
                        attempted,
                        interval,
                    } => warn!(
                        flyer_id = id,
                        timestamp, attempted, interval, "click rejected as spam"
                    ),
                }
                Err(err.into())
            }
        }
    }

    /// Route a click stamped with the registry clock's current time.
    ///
    /// # Returns
    /// The timestamp the click was recorded at.
    pub fn record_click_now(&self, id: &str) -> Result<Timestamp, RegistryError> {
        let now = self.clock.now();
        self.record_click(id, now)?;
        Ok(now)
    }

    /// Find the flyer with the most clicks in `[start, end]`.
    ///
    /// Ties go to the lexicographically smallest id. A flyer with no clicks
    /// in range is never selected.
    ///
    /// # Errors
    /// Returns `RegistryError::NoQualifyingFlyer` if the registry is empty or
    /// no flyer has a click in range.
    pub fn most_clicked(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<ClickLeader, RegistryError> {
        let mut leader: Option<ClickLeader> = None;

        self.storage.for_each(|id, flyer| {
            let clicks = flyer.clicks_during_interval(start, end);
            if clicks == 0 {
                return;
            }
            let takes_lead = match &leader {
                None => true,
                Some(current) => {
                    clicks > current.clicks || (clicks == current.clicks && *id < current.id)
                }
            };
            if takes_lead {
                leader = Some(ClickLeader {
                    id: id.clone(),
                    clicks,
                });
            }
        });

        match leader {
            Some(leader) => {
                trace!(
                    flyer_id = %leader.id,
                    clicks = leader.clicks,
                    start,
                    end,
                    "most clicked flyer"
                );
                Ok(leader)
            }
            None => Err(RegistryError::NoQualifyingFlyer),
        }
    }

    /// Every flyer's click count in `[start, end]`.
    ///
    /// Sorted by count descending, then id ascending, so the first entry (if
    /// its count is non-zero) matches `most_clicked`. Flyers with no clicks
    /// in range are included.
    pub fn ranking(&self, start: Timestamp, end: Timestamp) -> Vec<ClickLeader> {
        let mut ranking = Vec::with_capacity(self.storage.len());
        self.storage.for_each(|id, flyer| {
            ranking.push(ClickLeader {
                id: id.clone(),
                clicks: flyer.clicks_during_interval(start, end),
            });
        });
        ranking.sort_by(|a, b| b.clicks.cmp(&a.clicks).then_with(|| a.id.cmp(&b.id)));
        ranking
    }

    /// Check if a flyer is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.storage.contains_key(id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<FlyerId> {
        let mut ids = Vec::with_capacity(self.storage.len());
        self.storage.for_each(|id, _| ids.push(id.clone()));
        ids.sort();
        ids
    }

    /// Get the number of registered flyers.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get the registry's metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get the clock used by `record_click_now`.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
