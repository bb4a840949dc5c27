//! # Tour Collaborator Contract
//!
//! A tour is a guided sequence of UI highlights with its own step state
//! machine. The registry never looks inside that machine; it only needs the
//! surface defined here:
//!
//! - [`Tour`]: status query, asynchronous end, and identifying options.
//! - [`TourController`]: constructs and initializes a tour. Initialization is
//!   where a tour registers itself with the [`TourService`](crate::TourService).
//! - [`TourAnchor`]: a UI element's own binding to the tour controlling it.
//!
//! [`BasicTour`] is a small reference implementation used by the demo binary
//! and the integration tests.

pub mod basic;
pub mod config;

pub use basic::{BasicTour, BasicTourController};
pub use config::TourConfig;

use crate::error::TourError;
use crate::service::TourService;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// Lifecycle status reported by a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TourStatus {
    Off,
    On,
    Waiting,
    Ended,
}

impl Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TourStatus::Off => "OFF",
            TourStatus::On => "ON",
            TourStatus::Waiting => "WAITING",
            TourStatus::Ended => "ENDED",
        };
        f.write_str(s)
    }
}

/// A single guided-tour instance as seen by the registry.
///
/// # End semantics
/// `end` is split in two: calling it performs whatever the tour does
/// synchronously to begin ending (hiding the popover, flipping status) and
/// returns the pending completion. The registry relies on this to issue end
/// requests in registration order while letting them settle in any order.
pub trait Tour: Send + Sync + Debug {
    /// Options the tour was initialized with.
    fn options(&self) -> &TourConfig;

    /// The tour's identifying name, if it was given one.
    fn name(&self) -> Option<&str> {
        self.options().name.as_deref()
    }

    /// Queries the current status.
    fn status(&self) -> TourStatus;

    /// Requests the tour to end.
    fn end(&self) -> BoxFuture<'static, Result<(), TourError>>;
}

/// Builds initialized tours.
///
/// Implementations are expected to call
/// [`TourService::register_tour`](crate::TourService::register_tour) during
/// `init`; callers do not register the returned tour again.
#[async_trait]
pub trait TourController: Send + Sync {
    async fn init(
        &self,
        config: TourConfig,
        service: TourService,
    ) -> Result<Arc<dyn Tour>, TourError>;
}

/// A UI element that may carry a binding to the tour controlling it.
pub trait TourAnchor {
    fn bound_tour(&self) -> Option<Arc<dyn Tour>>;
}

/// Identifies a tour for next-tour lookups: either the instance itself or its
/// name.
#[derive(Debug, Clone)]
pub enum TourKey {
    Name(String),
    Instance(Arc<dyn Tour>),
}

impl TourKey {
    pub(crate) fn matches(&self, tour: &Arc<dyn Tour>) -> bool {
        match self {
            TourKey::Name(name) => tour.name() == Some(name.as_str()),
            TourKey::Instance(instance) => same_tour(instance, tour),
        }
    }
}

impl From<&str> for TourKey {
    fn from(name: &str) -> Self {
        TourKey::Name(name.to_string())
    }
}

impl From<String> for TourKey {
    fn from(name: String) -> Self {
        TourKey::Name(name)
    }
}

impl From<Arc<dyn Tour>> for TourKey {
    fn from(tour: Arc<dyn Tour>) -> Self {
        TourKey::Instance(tour)
    }
}

impl From<&Arc<dyn Tour>> for TourKey {
    fn from(tour: &Arc<dyn Tour>) -> Self {
        TourKey::Instance(Arc::clone(tour))
    }
}

/// Identity comparison. Compares allocation addresses only, ignoring vtables.
pub fn same_tour(a: &Arc<dyn Tour>, b: &Arc<dyn Tour>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
