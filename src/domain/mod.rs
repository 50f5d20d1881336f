//! Domain layer - pure business logic with no external dependencies.
//!
//! This layer contains the core concepts of click tracking:
//! - Flyer identity
//! - Per-flyer spam policies
//! - The per-flyer click ledger and its spam gate
//!
//! All types in this layer are pure and easily testable.

pub mod flyer;
pub mod flyer_id;
pub mod policy;

/// Click timestamp. Intervals use the same unit.
pub type Timestamp = u64;
