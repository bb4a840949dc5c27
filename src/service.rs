//! # Tour Service
//!
//! [`TourService`] is the client half of the registry. It is cheap to clone;
//! tours keep a (weak) handle to register and unregister themselves, and
//! application code keeps one for lookups, sequencing, and bulk teardown.
//!
//! Not-found results are `None`. Errors are reserved for real failures: a
//! closed registry, a rejected end operation, or a missing tour name.

use crate::error::TourError;
use crate::registry::{RegistryRequest, Response};
use crate::tour::{Tour, TourAnchor, TourConfig, TourController, TourKey};
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Client for the tour registry actor.
#[derive(Clone, Debug)]
pub struct TourService {
    sender: mpsc::Sender<RegistryRequest>,
}

/// A handle that does not keep the registry alive.
#[derive(Clone, Debug)]
pub struct WeakTourService {
    sender: mpsc::WeakSender<RegistryRequest>,
}

impl WeakTourService {
    /// Returns a usable service if the registry is still running.
    pub fn upgrade(&self) -> Option<TourService> {
        self.sender.upgrade().map(TourService::new)
    }
}

impl TourService {
    pub fn new(sender: mpsc::Sender<RegistryRequest>) -> Self {
        Self { sender }
    }

    pub fn downgrade(&self) -> WeakTourService {
        WeakTourService {
            sender: self.sender.downgrade(),
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> RegistryRequest,
    ) -> Result<T, TourError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| TourError::RegistryClosed)?;
        response.await.map_err(|_| TourError::RegistryDropped)
    }

    // --- Registration ---

    /// Appends `tour` to the sequence. Duplicates are not detected.
    pub async fn register_tour(&self, tour: Arc<dyn Tour>) -> Result<(), TourError> {
        self.request(|respond_to| RegistryRequest::Register { tour, respond_to })
            .await
    }

    /// Removes the first occurrence of `tour` by identity. Unknown tours are
    /// ignored.
    pub async fn unregister_tour(&self, tour: Arc<dyn Tour>) -> Result<(), TourError> {
        self.request(|respond_to| RegistryRequest::Unregister { tour, respond_to })
            .await
            .map(|_removed| ())
    }

    // --- Lookup ---

    /// The first registered tour, for apps that run exactly one.
    pub async fn get_tour(&self) -> Result<Option<Arc<dyn Tour>>, TourError> {
        self.request(|respond_to| RegistryRequest::First { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_tour_by_name(&self, name: &str) -> Result<Option<Arc<dyn Tour>>, TourError> {
        let name = name.to_owned();
        self.request(|respond_to| RegistryRequest::ByName { name, respond_to })
            .await
    }

    /// Resolves the tour bound to a UI element through the element's own
    /// binding. The registry is not consulted.
    pub fn get_tour_by_element(&self, element: &dyn TourAnchor) -> Option<Arc<dyn Tour>> {
        element.bound_tour()
    }

    /// All registered tours, in order.
    pub async fn tours(&self) -> Result<Vec<Arc<dyn Tour>>, TourError> {
        self.request(|respond_to| RegistryRequest::Snapshot { respond_to })
            .await
    }

    pub async fn len(&self) -> Result<usize, TourError> {
        Ok(self.tours().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, TourError> {
        Ok(self.len().await? == 0)
    }

    // --- Sequencing ---

    /// The `ON` tour that follows the first `OFF` tour in registration order.
    #[instrument(skip(self))]
    pub async fn get_next_active_tour(&self) -> Result<Option<Arc<dyn Tour>>, TourError> {
        self.request(|respond_to| RegistryRequest::NextActive { respond_to })
            .await
    }

    pub async fn has_next_tour(&self, key: impl Into<TourKey>) -> Result<bool, TourError> {
        let key = key.into();
        self.request(|respond_to| RegistryRequest::HasNext { key, respond_to })
            .await
    }

    /// The tour registered right after `key`; `None` if `key` is last or not
    /// registered at all.
    pub async fn get_next_tour(
        &self,
        key: impl Into<TourKey>,
    ) -> Result<Option<Arc<dyn Tour>>, TourError> {
        let key = key.into();
        self.request(|respond_to| RegistryRequest::Next { key, respond_to })
            .await
    }

    /// Whether any tour is waiting, i.e. whether a pending navigation was
    /// started by a tour rather than by the user.
    pub async fn is_tour_waiting(&self) -> Result<bool, TourError> {
        self.request(|respond_to| RegistryRequest::IsWaiting { respond_to })
            .await
    }

    // --- Lifecycle ---

    /// Ends every registered tour.
    ///
    /// End requests are issued in registration order and run concurrently.
    /// Resolves once all have succeeded, or with the first failure as soon as
    /// it happens. Ends still in flight after a failure keep running. Tours
    /// stay registered; unregistering is each tour's own teardown.
    #[instrument(skip(self))]
    pub async fn end_all_tours(&self) -> Result<(), TourError> {
        let pending = self
            .request(|respond_to| RegistryRequest::EndAll { respond_to })
            .await?;
        let count = pending.len();

        let settled = pending.into_iter().map(|(name, handle)| async move {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(TourError::from(e)),
            };
            if let Err(e) = &result {
                warn!(tour = %name, error = %e, "Tour end failed");
            }
            result
        });
        try_join_all(settled).await?;

        info!(count, "All tours ended");
        Ok(())
    }

    /// Stops the registry even while other clones are still alive. Later
    /// requests from any clone fail with [`TourError::RegistryClosed`].
    pub async fn close(&self) -> Result<(), TourError> {
        self.request(|respond_to| RegistryRequest::Close { respond_to })
            .await
    }

    /// Builds a tour that is not attached to any UI element.
    ///
    /// `name` overrides any name already present in `config`. The controller
    /// registers the tour while initializing it.
    #[instrument(skip(self, controller, config))]
    pub async fn create_detached_tour<C>(
        &self,
        controller: &C,
        name: &str,
        config: Option<TourConfig>,
    ) -> Result<Arc<dyn Tour>, TourError>
    where
        C: TourController + ?Sized,
    {
        if name.is_empty() {
            warn!("Detached tour requested without a name");
            return Err(TourError::missing_name());
        }

        let mut config = config.unwrap_or_default();
        config.name = Some(name.to_owned());
        debug!(?config, "Creating detached tour");

        controller.init(config, self.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{EndBehavior, EventLog, MockAnchor, MockTour};
    use crate::registry;
    use crate::tour::{BasicTourController, TourStatus};
    use std::time::Duration;

    fn spawn_registry() -> TourService {
        let (actor, service) = registry::new(16);
        tokio::spawn(actor.run());
        service
    }

    async fn register(service: &TourService, tour: &Arc<MockTour>) {
        service.register_tour(MockTour::as_tour(tour)).await.unwrap();
    }

    #[tokio::test]
    async fn get_tour_returns_first_still_present() {
        let service = spawn_registry();
        assert!(service.get_tour().await.unwrap().is_none());

        let a = MockTour::new("a", TourStatus::Off);
        let b = MockTour::new("b", TourStatus::Off);
        register(&service, &a).await;
        register(&service, &b).await;
        assert_eq!(service.get_tour().await.unwrap().unwrap().name(), Some("a"));

        service.unregister_tour(MockTour::as_tour(&a)).await.unwrap();
        assert_eq!(service.get_tour().await.unwrap().unwrap().name(), Some("b"));
    }

    #[tokio::test]
    async fn unregister_unknown_tour_is_noop() {
        let service = spawn_registry();
        let a = MockTour::new("a", TourStatus::Off);
        let b = MockTour::new("b", TourStatus::Off);
        register(&service, &a).await;
        register(&service, &b).await;

        let stranger = MockTour::new("c", TourStatus::Off);
        service
            .unregister_tour(MockTour::as_tour(&stranger))
            .await
            .unwrap();
        assert_eq!(service.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unregistered_name_is_gone() {
        let service = spawn_registry();
        let a = MockTour::new("a", TourStatus::Off);
        register(&service, &a).await;
        service.unregister_tour(MockTour::as_tour(&a)).await.unwrap();
        assert!(service.get_tour_by_name("a").await.unwrap().is_none());
        assert!(service.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn element_lookup_uses_anchor_binding() {
        let service = spawn_registry();
        let a = MockTour::new("a", TourStatus::On);
        let anchored = MockAnchor::bound_to(MockTour::as_tour(&a));

        let found = service.get_tour_by_element(&anchored).unwrap();
        assert_eq!(found.name(), Some("a"));
        assert!(service.get_tour_by_element(&MockAnchor::unbound()).is_none());
    }

    #[tokio::test]
    async fn end_all_on_empty_registry_resolves() {
        let service = spawn_registry();
        service.end_all_tours().await.unwrap();
    }

    #[tokio::test]
    async fn end_all_issues_in_order_and_waits_for_all() {
        let service = spawn_registry();
        let issued = EventLog::default();
        let settled = EventLog::default();

        let a = MockTour::new("a", TourStatus::On);
        let b = MockTour::new("b", TourStatus::On);
        let c = MockTour::new("c", TourStatus::On);
        a.set_end_behavior(EndBehavior::Delay(Duration::from_millis(30)));
        b.set_end_behavior(EndBehavior::Delay(Duration::from_millis(10)));
        for tour in [&a, &b, &c] {
            tour.record_into(&issued, &settled);
            register(&service, tour).await;
        }

        service.end_all_tours().await.unwrap();

        assert_eq!(*issued.lock().unwrap(), vec!["a", "b", "c"]);
        let mut done = settled.lock().unwrap().clone();
        assert_eq!(done.len(), 3);
        done.sort();
        assert_eq!(done, vec!["a", "b", "c"]);
        // Ending does not unregister.
        assert_eq!(service.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn end_all_fails_fast() {
        let service = spawn_registry();
        let gate = Arc::new(tokio::sync::Notify::new());

        let a = MockTour::new("a", TourStatus::On);
        let b = MockTour::new("b", TourStatus::On);
        let c = MockTour::new("c", TourStatus::On);
        a.set_end_behavior(EndBehavior::Gate(gate.clone()));
        b.set_end_behavior(EndBehavior::Fail("popover stuck".into()));
        c.set_end_behavior(EndBehavior::Gate(gate.clone()));
        for tour in [&a, &b, &c] {
            register(&service, tour).await;
        }

        let result = tokio::time::timeout(Duration::from_secs(1), service.end_all_tours())
            .await
            .expect("end_all_tours should reject without waiting for gated tours");
        assert_eq!(
            result,
            Err(TourError::EndFailed {
                tour: "b".into(),
                reason: "popover stuck".into()
            })
        );
        assert_eq!(a.end_calls(), 1);
        assert_eq!(c.end_calls(), 1);
    }

    #[tokio::test]
    async fn detached_tour_requires_a_name() {
        let service = spawn_registry();
        let err = service
            .create_detached_tour(&BasicTourController, "", Some(TourConfig::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "ParameterMissingError");
        assert!(service.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn detached_tour_accepts_whitespace_name() {
        let service = spawn_registry();
        let tour = service
            .create_detached_tour(&BasicTourController, " ", None)
            .await
            .unwrap();
        assert_eq!(tour.name(), Some(" "));
        assert!(service.get_tour_by_name(" ").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn detached_tour_name_overrides_config() {
        let service = spawn_registry();
        let tour = service
            .create_detached_tour(&BasicTourController, "x", Some(TourConfig::named("y")))
            .await
            .unwrap();
        assert_eq!(tour.name(), Some("x"));

        let registered = service.get_tour_by_name("x").await.unwrap().unwrap();
        assert!(crate::tour::same_tour(&tour, &registered));
        assert!(service.get_tour_by_name("y").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn detached_tour_defaults_config() {
        let service = spawn_registry();
        let tour = service
            .create_detached_tour(&BasicTourController, "solo", None)
            .await
            .unwrap();
        let expected = TourConfig::named("solo");
        assert_eq!(tour.options(), &expected);
    }
}
