//! # Test Doubles
//!
//! [`MockTour`] implements [`Tour`] entirely in memory. Its status is set
//! directly by the test and its end operation follows a scripted
//! [`EndBehavior`], which makes fan-out ordering and failure paths easy to
//! exercise without a real tour controller.
//!
//! ```rust
//! use tour_engine::mock::{EndBehavior, MockTour};
//! use tour_engine::{TourStatus, TourSystem};
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = TourSystem::new();
//!     let intro = MockTour::new("intro", TourStatus::On);
//!     intro.set_end_behavior(EndBehavior::Fail("stuck".into()));
//!
//!     system.service.register_tour(MockTour::as_tour(&intro)).await.unwrap();
//!     assert!(system.service.end_all_tours().await.is_err());
//!     assert_eq!(intro.end_calls(), 1);
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```
//!
//! [`MockAnchor`] stands in for a UI element with (or without) a tour bound
//! to it.

use crate::error::TourError;
use crate::tour::{Tour, TourAnchor, TourConfig, TourStatus};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Shared, ordered record of tour names. Several mocks can write into one.
pub type EventLog = Arc<Mutex<Vec<String>>>;

/// What a [`MockTour`] does once asked to end.
#[derive(Debug, Clone)]
pub enum EndBehavior {
    /// Settle successfully right away.
    Succeed,
    /// Reject right away with [`TourError::EndFailed`].
    Fail(String),
    /// Settle successfully after the delay.
    Delay(Duration),
    /// Settle successfully once the gate is notified.
    Gate(Arc<Notify>),
}

/// In-memory [`Tour`] with a settable status and a scripted end.
#[derive(Debug)]
pub struct MockTour {
    options: TourConfig,
    status: Mutex<TourStatus>,
    end_behavior: Mutex<EndBehavior>,
    status_queries: AtomicUsize,
    end_calls: AtomicUsize,
    issued: Mutex<Option<EventLog>>,
    settled: Mutex<Option<EventLog>>,
}

impl MockTour {
    pub fn new(name: &str, status: TourStatus) -> Arc<Self> {
        Self::with_config(TourConfig::named(name), status)
    }

    pub fn with_config(options: TourConfig, status: TourStatus) -> Arc<Self> {
        Arc::new(Self {
            options,
            status: Mutex::new(status),
            end_behavior: Mutex::new(EndBehavior::Succeed),
            status_queries: AtomicUsize::new(0),
            end_calls: AtomicUsize::new(0),
            issued: Mutex::new(None),
            settled: Mutex::new(None),
        })
    }

    /// The same allocation as a trait object, so identity is preserved.
    pub fn as_tour(this: &Arc<Self>) -> Arc<dyn Tour> {
        this.clone()
    }

    pub fn set_status(&self, status: TourStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }

    pub fn set_end_behavior(&self, behavior: EndBehavior) {
        *self.end_behavior.lock().unwrap_or_else(|e| e.into_inner()) = behavior;
    }

    /// Records this tour's name in `issued` when `end` is called, and in
    /// `settled` when the end operation completes (successfully or not).
    pub fn record_into(&self, issued: &EventLog, settled: &EventLog) {
        *self.issued.lock().unwrap_or_else(|e| e.into_inner()) = Some(issued.clone());
        *self.settled.lock().unwrap_or_else(|e| e.into_inner()) = Some(settled.clone());
    }

    pub fn status_queries(&self) -> usize {
        self.status_queries.load(Ordering::SeqCst)
    }

    pub fn end_calls(&self) -> usize {
        self.end_calls.load(Ordering::SeqCst)
    }

    fn label(&self) -> String {
        self.options.name.clone().unwrap_or_default()
    }
}

impl Tour for MockTour {
    fn options(&self) -> &TourConfig {
        &self.options
    }

    fn status(&self) -> TourStatus {
        self.status_queries.fetch_add(1, Ordering::SeqCst);
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn end(&self) -> BoxFuture<'static, Result<(), TourError>> {
        self.end_calls.fetch_add(1, Ordering::SeqCst);
        let name = self.label();
        if let Some(log) = self.issued.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            log.lock().unwrap_or_else(|e| e.into_inner()).push(name.clone());
        }
        let settled = self.settled.lock().unwrap_or_else(|e| e.into_inner()).clone();
        let behavior = self.end_behavior.lock().unwrap_or_else(|e| e.into_inner()).clone();

        Box::pin(async move {
            let result = match behavior {
                EndBehavior::Succeed => Ok(()),
                EndBehavior::Fail(reason) => Err(TourError::EndFailed {
                    tour: name.clone(),
                    reason,
                }),
                EndBehavior::Delay(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(())
                }
                EndBehavior::Gate(gate) => {
                    gate.notified().await;
                    Ok(())
                }
            };
            if let Some(log) = settled {
                log.lock().unwrap_or_else(|e| e.into_inner()).push(name);
            }
            result
        })
    }
}

/// A UI element double.
#[derive(Debug, Default, Clone)]
pub struct MockAnchor {
    bound: Option<Arc<dyn Tour>>,
}

impl MockAnchor {
    pub fn bound_to(tour: Arc<dyn Tour>) -> Self {
        Self { bound: Some(tour) }
    }

    pub fn unbound() -> Self {
        Self::default()
    }
}

impl TourAnchor for MockAnchor {
    fn bound_tour(&self) -> Option<Arc<dyn Tour>> {
        self.bound.clone()
    }
}
