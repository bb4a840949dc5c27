#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Tour Engine
//!
//! > **Registry and sequencing for in-application guided tours.**
//!
//! A guided tour walks the user through highlighted UI elements one step at a
//! time. Applications often run several tours in a row: when one switches
//! itself off, the next one registered picks up. This crate tracks every live
//! tour, works out those hand-offs, and tears all tours down at once.
//!
//! Rendering, element positioning and step content belong to the tours
//! themselves; the engine sees a tour only through the [`Tour`] trait.
//!
//! ## 🏗️ Design
//!
//! ### Registry as an actor
//! The ordered tour list lives inside a [`RegistryActor`](registry::RegistryActor)
//! that handles one request at a time. Registration, lookups, and sequencing
//! scans are all messages, so a scan can never race a mutation and the list
//! needs no lock.
//!
//! ### Explicit instances
//! There is no global registry. A [`TourSystem`] owns one registry and exposes
//! its [`TourService`]; pass that service to whatever needs it. Independent
//! systems can coexist, which keeps tests isolated.
//!
//! ### Errors
//! Lookups that find nothing return `None`. [`TourError`] is reserved for real
//! failures: a missing tour name, a rejected end, or a closed registry.
//!
//! ## 🗺️ Module Tour
//!
//! - [`tour`]: the collaborator contract ([`Tour`], [`TourController`],
//!   [`TourAnchor`]), tour options, and the [`BasicTour`](tour::BasicTour)
//!   reference implementation.
//! - [`registry`]: the actor and the pure [`sequencer`](registry::sequencer)
//!   functions it runs.
//! - [`service`]: the cloneable client used by tours and application code.
//! - [`lifecycle`]: [`TourSystem`] startup/shutdown and tracing setup.
//! - [`mock`]: test doubles for tours and UI elements.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use tour_engine::tour::BasicTourController;
//! use tour_engine::{Tour, TourStatus, TourSystem};
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = TourSystem::new();
//!     let controller = BasicTourController;
//!
//!     let first = controller
//!         .init_basic(tour_engine::TourConfig::named("welcome"), system.service.clone())
//!         .await
//!         .unwrap();
//!     let second = controller
//!         .init_basic(tour_engine::TourConfig::named("settings"), system.service.clone())
//!         .await
//!         .unwrap();
//!
//!     // "welcome" hands off to "settings".
//!     second.start();
//!     let next = system.service.get_next_active_tour().await.unwrap().unwrap();
//!     assert_eq!(next.name(), Some("settings"));
//!     assert_eq!(first.status(), TourStatus::Off);
//!
//!     system.service.end_all_tours().await.unwrap();
//!     system.shutdown().await.unwrap();
//! }
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod error;
pub mod lifecycle;
pub mod mock;
pub mod registry;
pub mod service;
pub mod tour;

pub use error::TourError;
pub use lifecycle::TourSystem;
pub use service::{TourService, WeakTourService};
pub use tour::{Tour, TourAnchor, TourConfig, TourController, TourKey, TourStatus};
