//! Registry lifecycle and process-level setup.

pub mod tour_system;
pub mod tracing;

pub use tour_system::TourSystem;
