//! # Tour Engine Demo
//!
//! Walks a two-tour hand-off end to end:
//! 1.  Start a [`TourSystem`].
//! 2.  Create two detached tours through [`BasicTourController`].
//! 3.  Switch the first off and the second on, then ask the registry which tour is next.
//! 4.  End everything and shut down.

use tour_engine::lifecycle::tracing::setup_tracing;
use tour_engine::tour::BasicTourController;
use tour_engine::{Tour, TourConfig, TourSystem};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting tour engine demo");

    let system = TourSystem::new();
    let controller = BasicTourController;

    let welcome = controller
        .init_basic(TourConfig::named("welcome"), system.service.clone())
        .await
        .map_err(|e| e.to_string())?;
    let settings = controller
        .init_basic(
            TourConfig {
                backdrop: true,
                ..TourConfig::named("settings")
            },
            system.service.clone(),
        )
        .await
        .map_err(|e| e.to_string())?;

    // A detached tour created through the generic entry point.
    let _help = system
        .service
        .create_detached_tour(&controller, "help", None)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("hand_off");
    async {
        welcome.start();
        welcome.pause();
        settings.start();

        match system.service.get_next_active_tour().await {
            Ok(Some(next)) => info!(next = ?next.options().name, "Next active tour"),
            Ok(None) => warn!("No tour picked up the hand-off"),
            Err(e) => warn!(error = %e, "Registry unavailable"),
        }

        let next_after_welcome = system
            .service
            .get_next_tour("welcome")
            .await
            .map_err(|e| e.to_string())?;
        info!(
            next = ?next_after_welcome.and_then(|t| t.options().name.clone()),
            "Registered after welcome"
        );
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    settings.wait();
    let waiting = system
        .service
        .is_tour_waiting()
        .await
        .map_err(|e| e.to_string())?;
    info!(waiting, "Navigation is tour-driven");

    system
        .service
        .end_all_tours()
        .await
        .map_err(|e| e.to_string())?;

    welcome.destroy().await.map_err(|e| e.to_string())?;
    settings.destroy().await.map_err(|e| e.to_string())?;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
