//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered
//! by the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Registry lifecycle**: startup and shutdown, with the final tour count
//! - **Registration**: every register/unregister with the tour name and new size
//! - **Sequencing**: next-active-tour and name lookups at `debug`
//! - **Bulk end**: the number of tours ended, and a `warn` per failed end
//! - **Status changes** of [`BasicTour`](crate::tour::BasicTour) at `debug`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Registrations and bulk operations
//! RUST_LOG=info cargo run
//!
//! # Include lookups and status changes
//! RUST_LOG=debug cargo run
//!
//! # Only the registry
//! RUST_LOG=tour_engine::registry=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` the demo prints something like:
//!
//! ```text
//! INFO Tour registry started
//! INFO Registered tour=Some("welcome") size=1
//! INFO Registered tour=Some("settings") size=2
//! INFO Ending all tours count=2
//! INFO end_all_tours: All tours ended count=2
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
