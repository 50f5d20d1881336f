//! Spam rate-limit policy attached to each flyer.
//!
//! Flyers can be hosted on platforms with different ideas of what a spam
//! burst looks like, so the policy is a per-flyer value rather than a
//! process-wide setting.

use crate::domain::Timestamp;
use std::fmt;

/// Error returned when a spam policy is constructed with invalid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// Rate limit must be greater than zero
    ZeroRateLimit,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::ZeroRateLimit => write!(f, "spam rate limit must be greater than 0"),
        }
    }
}

impl std::error::Error for PolicyError {}

/// Decision made by a spam policy for a candidate click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Record the click
    Accept,
    /// Drop the click as spam
    Reject,
}

impl PolicyDecision {
    /// Check if this decision is Accept.
    pub fn is_accept(&self) -> bool {
        matches!(self, PolicyDecision::Accept)
    }

    /// Check if this decision is Reject.
    pub fn is_reject(&self) -> bool {
        matches!(self, PolicyDecision::Reject)
    }
}

/// Trailing-window spam policy.
///
/// A click at `t` is rejected when `rate_limit` or more clicks are already
/// recorded in `[max(0, t - interval), t]`.
///
/// # Example
/// ```
/// use flyer_clicks::SpamPolicy;
///
/// let policy = SpamPolicy::new(5, 3).unwrap();
///
/// assert_eq!(policy.window_start(4), 0);
/// assert_eq!(policy.window_start(12), 7);
///
/// assert!(policy.evaluate(2).is_accept());
/// assert!(policy.evaluate(3).is_reject());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSpamPolicy"))]
pub struct SpamPolicy {
    interval: u64,
    rate_limit: usize,
}

impl SpamPolicy {
    /// Create a new spam policy.
    ///
    /// # Arguments
    /// * `interval` - Length of the trailing window, in timestamp units
    /// * `rate_limit` - Maximum clicks tolerated within one window
    ///
    /// # Errors
    /// Returns `PolicyError::ZeroRateLimit` if `rate_limit` is 0.
    pub fn new(interval: u64, rate_limit: usize) -> Result<Self, PolicyError> {
        if rate_limit == 0 {
            return Err(PolicyError::ZeroRateLimit);
        }
        Ok(Self {
            interval,
            rate_limit,
        })
    }

    /// Length of the trailing window.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Maximum clicks tolerated within one window.
    pub fn rate_limit(&self) -> usize {
        self.rate_limit
    }

    /// First timestamp of the window ending at `timestamp`, clamped at 0.
    pub fn window_start(&self, timestamp: Timestamp) -> Timestamp {
        timestamp.saturating_sub(self.interval)
    }

    /// Decide on a candidate click given how many clicks its window already holds.
    pub fn evaluate(&self, clicks_in_window: usize) -> PolicyDecision {
        if clicks_in_window < self.rate_limit {
            PolicyDecision::Accept
        } else {
            PolicyDecision::Reject
        }
    }
}

/// Unvalidated wire form, so deserialized policies go through `SpamPolicy::new`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSpamPolicy {
    interval: u64,
    rate_limit: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSpamPolicy> for SpamPolicy {
    type Error = PolicyError;

    fn try_from(raw: RawSpamPolicy) -> Result<Self, Self::Error> {
        SpamPolicy::new(raw.interval, raw.rate_limit)
    }
}
