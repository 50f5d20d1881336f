//! # flyer-clicks
//!
//! Click tracking for advertising flyers, with per-flyer spam rate limiting
//! and windowed "most clicked" queries.
//!
//! Each [`Flyer`] keeps its own click ledger and its own [`SpamPolicy`]. A
//! [`FlyerRegistry`] owns a set of flyers keyed by id, refuses duplicate ids,
//! and answers which flyer received the most clicks in a time range.
//!
//! ## Quick Start
//!
//! ```rust
//! use flyer_clicks::{Flyer, InMemoryRegistry, RegistryError};
//!
//! let registry = InMemoryRegistry::in_memory();
//!
//! // 5-unit trailing window, at most 3 clicks inside it
//! registry.add_flyer(Flyer::new("1", 5, 3).unwrap()).unwrap();
//! registry.add_flyer(Flyer::new("2", 5, 3).unwrap()).unwrap();
//!
//! registry.record_click("1", 1).unwrap();
//! registry.record_click("2", 1).unwrap();
//! registry.record_click("2", 3).unwrap();
//!
//! let leader = registry.most_clicked(1, 4).unwrap();
//! assert_eq!(leader.id.as_str(), "2");
//! assert_eq!(leader.clicks, 2);
//!
//! // Ids are unique
//! assert!(matches!(
//!     registry.add_flyer(Flyer::new("1", 5, 3).unwrap()),
//!     Err(RegistryError::FlyerAlreadyExists(_))
//! ));
//! ```
//!
//! ## Spam Gate
//!
//! A click at `t` is checked against the clicks already recorded in
//! `[max(0, t - interval), t]`. If that window already holds `rate_limit`
//! clicks, the click is rejected with [`ClickError::SpamLimitExceeded`] and
//! nothing is recorded.
//!
//! The check is online: it only looks at history that exists when the click
//! arrives and never revisits earlier acceptances. Timestamps are expected to
//! be non-decreasing. Out-of-order clicks are accepted or rejected by the
//! same rule and never cause a panic, but a late click with a small
//! timestamp can land in a window that was already "full" from the point of
//! view of a later click.
//!
//! ```rust
//! use flyer_clicks::Flyer;
//!
//! let mut flyer = Flyer::new("promo", 5, 3).unwrap();
//! for t in [1, 2, 3] {
//!     flyer.add_click(t).unwrap();
//! }
//! assert!(flyer.add_click(4).is_err());
//! assert!(flyer.add_click(5).is_err());
//! assert_eq!(flyer.total_clicks(), 3);
//! ```
//!
//! ## Most Clicked
//!
//! [`FlyerRegistry::most_clicked`] counts each flyer's clicks in
//! `[start, end]` (both ends inclusive) and returns a [`ClickLeader`]:
//!
//! - Ties are broken by the lexicographically smallest id.
//! - A flyer with zero clicks in range is never selected. If the registry is
//!   empty or every flyer has zero clicks in range, the query fails with
//!   [`RegistryError::NoQualifyingFlyer`].
//!
//! [`FlyerRegistry::ranking`] returns every flyer's count in the same order.
//!
//! ## Concurrency
//!
//! The default storage is a sharded concurrent map. Clicks to distinct
//! flyers only contend when the flyers share a shard, and registration is an
//! atomic check-and-insert. Windowed scans are not a registry-wide snapshot:
//! with concurrent writers, a result can mix states from different moments.
//!
//! Flyers are reached through closures (`with_flyer`, `with_flyer_mut`) so a
//! borrow of a stored flyer never outlives its lock.
//!
//! ## Logging
//!
//! The registry emits `tracing` events: `debug` for registrations and
//! accepted clicks, `warn` for duplicate registrations and spam rejections.
//! Install any `tracing` subscriber to see them.
//!
//! ## Observability
//!
//! ```rust
//! # use flyer_clicks::{Flyer, InMemoryRegistry};
//! # let registry = InMemoryRegistry::in_memory();
//! # registry.add_flyer(Flyer::new("1", 5, 1).unwrap()).unwrap();
//! # let _ = registry.record_click("1", 1);
//! # let _ = registry.record_click("1", 2);
//! let snapshot = registry.metrics().snapshot();
//! println!("Clicks accepted: {}", snapshot.clicks_accepted);
//! println!("Rejection rate: {:.2}%", snapshot.rejection_rate() * 100.0);
//! ```

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    flyer::{ClickError, Flyer},
    flyer_id::FlyerId,
    policy::{PolicyDecision, PolicyError, SpamPolicy},
    Timestamp,
};

pub use application::{
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, Storage},
    registry::{ClickLeader, FlyerRegistry, RegistryError},
};

pub use infrastructure::{
    builder::{BuildError, FlyerRegistryBuilder, InMemoryRegistry},
    clock::SystemClock,
    storage::ShardedStorage,
};
