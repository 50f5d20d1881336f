//! Per-flyer click ledger with online spam rejection.
//!
//! A flyer owns its own click history and spam policy and has no knowledge
//! of the registry it may live in.

use crate::domain::flyer_id::FlyerId;
use crate::domain::policy::{PolicyError, SpamPolicy};
use crate::domain::Timestamp;
use std::fmt;

/// Error returned when a click cannot be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickError {
    /// The click would exceed the flyer's spam rate limit
    SpamLimitExceeded {
        /// Number of clicks the window would have held had the click been accepted
        attempted: usize,
        /// Length of the trailing window that was checked
        interval: u64,
    },
}

impl fmt::Display for ClickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickError::SpamLimitExceeded {
                attempted,
                interval,
            } => write!(
                f,
                "too many clicks: attempting to add {} clicks during an interval of {}",
                attempted, interval
            ),
        }
    }
}

impl std::error::Error for ClickError {}

/// A tracked advertisement and its click history.
///
/// Clicks are appended as they are accepted. Callers are expected to supply
/// non-decreasing timestamps; out-of-order input is stored as given and
/// never causes a panic, but the spam check only sees history that exists
/// at insertion time.
///
/// # Example
/// ```
/// use flyer_clicks::{ClickError, Flyer};
///
/// let mut flyer = Flyer::new("summer-sale", 5, 3).unwrap();
///
/// flyer.add_click(1).unwrap();
/// flyer.add_click(2).unwrap();
/// flyer.add_click(3).unwrap();
///
/// // Window [0, 4] already holds 3 clicks
/// assert_eq!(
///     flyer.add_click(4),
///     Err(ClickError::SpamLimitExceeded { attempted: 4, interval: 5 })
/// );
/// assert_eq!(flyer.clicks(), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flyer {
    id: FlyerId,
    clicks: Vec<Timestamp>,
    policy: SpamPolicy,
}

impl Flyer {
    /// Create a flyer with an empty history.
    ///
    /// # Arguments
    /// * `id` - Unique flyer id
    /// * `spam_interval` - Trailing window length for the spam check
    /// * `spam_rate_limit` - Maximum clicks tolerated within one window
    ///
    /// # Errors
    /// Returns `PolicyError` if `spam_rate_limit` is 0.
    pub fn new(
        id: impl Into<FlyerId>,
        spam_interval: u64,
        spam_rate_limit: usize,
    ) -> Result<Self, PolicyError> {
        let policy = SpamPolicy::new(spam_interval, spam_rate_limit)?;
        Ok(Self::with_policy(id, policy))
    }

    /// Create a flyer from an already validated policy.
    pub fn with_policy(id: impl Into<FlyerId>, policy: SpamPolicy) -> Self {
        Self {
            id: id.into(),
            clicks: Vec::new(),
            policy,
        }
    }

    pub fn id(&self) -> &FlyerId {
        &self.id
    }

    pub fn policy(&self) -> &SpamPolicy {
        &self.policy
    }

    /// Recorded click timestamps in insertion order.
    pub fn clicks(&self) -> &[Timestamp] {
        &self.clicks
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }

    /// Count clicks with `start <= t <= end`.
    ///
    /// Returns 0 when `start > end`.
    pub fn clicks_during_interval(&self, start: Timestamp, end: Timestamp) -> usize {
        if start > end {
            return 0;
        }
        self.clicks
            .iter()
            .filter(|&&t| start <= t && t <= end)
            .count()
    }

    /// Record a click unless it would exceed the spam rate limit.
    ///
    /// The check counts clicks already recorded in the window ending at
    /// `timestamp`. It never revisits earlier acceptances.
    ///
    /// # Errors
    /// Returns `ClickError::SpamLimitExceeded` if the window is full. The
    /// history is left untouched in that case.
    pub fn add_click(&mut self, timestamp: Timestamp) -> Result<(), ClickError> {
        let window_start = self.policy.window_start(timestamp);
        let in_window = self.clicks_during_interval(window_start, timestamp);

        if self.policy.evaluate(in_window).is_reject() {
            return Err(ClickError::SpamLimitExceeded {
                attempted: in_window + 1,
                interval: self.policy.interval(),
            });
        }

        self.clicks.push(timestamp);
        Ok(())
    }
}
