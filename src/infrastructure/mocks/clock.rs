//! Mock clock for testing.

use crate::application::ports::Clock;
use crate::domain::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Mock clock for testing.
///
/// Allows tests to control time progression explicitly, enabling deterministic
/// testing of spam windows.
///
/// # Examples
///
/// ```
/// use flyer_clicks::infrastructure::mocks::MockClock;
/// use flyer_clicks::application::ports::Clock;
///
/// let clock = MockClock::new(100);
/// assert_eq!(clock.now(), 100);
///
/// clock.advance(10);
/// assert_eq!(clock.now(), 110);
///
/// clock.set(5);
/// assert_eq!(clock.now(), 5);
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying time value, so advancing time in
/// one clone affects all clones.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_time: Arc<AtomicU64>,
}

impl MockClock {
    /// Create a mock clock starting at a specific timestamp.
    pub fn new(start: Timestamp) -> Self {
        Self {
            current_time: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Advance the clock.
    pub fn advance(&self, by: u64) {
        self.current_time.fetch_add(by, Ordering::SeqCst);
    }

    /// Set the clock to a specific timestamp.
    pub fn set(&self, timestamp: Timestamp) {
        self.current_time.store(timestamp, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Timestamp {
        self.current_time.load(Ordering::SeqCst)
    }
}
