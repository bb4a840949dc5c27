use crate::registry::{self, RegistryConfig};
use crate::service::TourService;
use tracing::{error, info, warn};

/// Owns a running tour registry for one application session.
///
/// `TourSystem` is responsible for:
/// - **Startup**: spawning the registry actor on the current Tokio runtime
/// - **Wiring**: handing out the [`TourService`] that tours and navigation code share
/// - **Shutdown**: closing the registry and waiting for its task to finish
///
/// Each `TourSystem` is independent; tests can run several side by side.
///
/// # Example
///
/// ```ignore
/// let system = TourSystem::new();
///
/// let tour = system
///     .service
///     .create_detached_tour(&BasicTourController, "welcome", None)
///     .await?;
///
/// system.service.end_all_tours().await?;
/// system.shutdown().await?;
/// ```
pub struct TourSystem {
    /// Client for the registry actor
    pub service: TourService,

    /// Task handle for the registry actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl TourSystem {
    /// Starts a registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Starts a registry with `config`. A zero `buffer_size` is raised to 1.
    pub fn with_config(config: RegistryConfig) -> Self {
        let (actor, service) = registry::new(config.buffer_size);
        let handle = tokio::spawn(actor.run());
        Self { service, handle }
    }

    /// Gracefully shuts down the registry.
    ///
    /// Sends an explicit close, so service clones still held elsewhere do not
    /// keep the actor alive; their later requests fail with
    /// [`TourError::RegistryClosed`](crate::TourError::RegistryClosed). The
    /// actor answers anything already queued, then exits.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down tour registry...");

        if let Err(e) = self.service.close().await {
            warn!(error = %e, "Registry already closed");
        }
        drop(self.service);

        if let Err(e) = self.handle.await {
            error!("Registry task failed: {:?}", e);
            return Err(format!("Registry task failed: {:?}", e));
        }

        info!("Tour registry shutdown complete.");
        Ok(())
    }
}

impl Default for TourSystem {
    fn default() -> Self {
        Self::new()
    }
}
