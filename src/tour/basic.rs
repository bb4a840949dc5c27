//! Reference tour collaborator.
//!
//! `BasicTour` tracks nothing but its status; it stands in for a real
//! step-driven tour in the demo binary and in tests that need a live tour
//! registered through a controller.

use super::{Tour, TourConfig, TourController, TourStatus};
use crate::error::TourError;
use crate::service::{TourService, WeakTourService};
use async_trait::async_trait;
use futures::future::{self, BoxFuture};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// A minimal tour whose status is driven directly by the caller.
///
/// Holds only a weak handle to the registry so that registered tours never
/// keep the registry actor alive.
#[derive(Debug)]
pub struct BasicTour {
    options: TourConfig,
    status: Mutex<TourStatus>,
    service: WeakTourService,
}

impl BasicTour {
    fn new(options: TourConfig, service: WeakTourService) -> Self {
        Self {
            options,
            status: Mutex::new(TourStatus::Off),
            service,
        }
    }

    fn set_status(&self, status: TourStatus) {
        let mut current = self.status.lock().unwrap_or_else(|e| e.into_inner());
        debug!(tour = ?self.options.name, from = %*current, to = %status, "Status change");
        *current = status;
    }

    pub fn start(&self) {
        self.set_status(TourStatus::On);
    }

    pub fn pause(&self) {
        self.set_status(TourStatus::Off);
    }

    /// Marks the tour as waiting for navigation to land on its next step.
    pub fn wait(&self) {
        self.set_status(TourStatus::Waiting);
    }

    pub fn resume(&self) {
        self.set_status(TourStatus::On);
    }

    /// Tears the tour down and removes it from the registry.
    pub async fn destroy(self: &Arc<Self>) -> Result<(), TourError> {
        let Some(service) = self.service.upgrade() else {
            debug!(tour = ?self.options.name, "Registry gone; nothing to unregister");
            return Ok(());
        };
        let tour: Arc<dyn Tour> = self.clone();
        service.unregister_tour(tour).await
    }
}

impl Tour for BasicTour {
    fn options(&self) -> &TourConfig {
        &self.options
    }

    fn status(&self) -> TourStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn end(&self) -> BoxFuture<'static, Result<(), TourError>> {
        self.set_status(TourStatus::Ended);
        Box::pin(future::ready(Ok(())))
    }
}

/// Builds [`BasicTour`]s and registers them on init.
#[derive(Debug, Default, Clone)]
pub struct BasicTourController;

impl BasicTourController {
    /// Same as [`TourController::init`] but keeps the concrete type, so callers
    /// can drive the tour's status.
    pub async fn init_basic(
        &self,
        config: TourConfig,
        service: TourService,
    ) -> Result<Arc<BasicTour>, TourError> {
        let tour = Arc::new(BasicTour::new(config, service.downgrade()));
        service.register_tour(tour.clone()).await?;
        info!(tour = ?tour.options.name, "Tour initialized");
        Ok(tour)
    }
}

#[async_trait]
impl TourController for BasicTourController {
    async fn init(
        &self,
        config: TourConfig,
        service: TourService,
    ) -> Result<Arc<dyn Tour>, TourError> {
        let tour: Arc<dyn Tour> = self.init_basic(config, service).await?;
        Ok(tour)
    }
}
