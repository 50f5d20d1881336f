//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and manages runtime state:
//! - Flyer registry (ownership, uniqueness, windowed queries)
//! - Click metrics
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod metrics;
pub mod ports;
pub mod registry;
