//! # Tour Registry Actor
//!
//! The registry is the "server" half of the engine. [`RegistryActor`] owns the
//! ordered list of live tours and answers requests one at a time from its
//! channel. Because every read and every mutation is a message, a sequencing
//! scan can never observe a half-applied registration, and no lock guards the
//! list.
//!
//! The client half is [`TourService`]; see [`new`] for how the two are paired.

pub mod sequencer;

use crate::error::TourError;
use crate::service::TourService;
use crate::tour::{Tour, TourKey};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<T>;

/// An end operation that has been issued and is running on the runtime.
pub type PendingEnd = (String, JoinHandle<Result<(), TourError>>);

/// Registry tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Capacity of the request channel. A full channel makes callers wait.
    pub buffer_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

/// Requests understood by the registry actor.
#[derive(Debug)]
pub enum RegistryRequest {
    Register {
        tour: Arc<dyn Tour>,
        respond_to: Response<()>,
    },
    Unregister {
        tour: Arc<dyn Tour>,
        respond_to: Response<bool>,
    },
    First {
        respond_to: Response<Option<Arc<dyn Tour>>>,
    },
    ByName {
        name: String,
        respond_to: Response<Option<Arc<dyn Tour>>>,
    },
    NextActive {
        respond_to: Response<Option<Arc<dyn Tour>>>,
    },
    Next {
        key: TourKey,
        respond_to: Response<Option<Arc<dyn Tour>>>,
    },
    HasNext {
        key: TourKey,
        respond_to: Response<bool>,
    },
    IsWaiting {
        respond_to: Response<bool>,
    },
    EndAll {
        respond_to: Response<Vec<PendingEnd>>,
    },
    Snapshot {
        respond_to: Response<Vec<Arc<dyn Tour>>>,
    },
    /// Stops accepting requests. Already-queued requests are still answered.
    Close {
        respond_to: Response<()>,
    },
}

/// Owns the ordered tour list.
pub struct RegistryActor {
    receiver: mpsc::Receiver<RegistryRequest>,
    tours: Vec<Arc<dyn Tour>>,
}

/// Creates a registry actor and its client.
///
/// The actor does nothing until [`RegistryActor::run`] is spawned. It stops
/// after [`TourService::close`], or once every strong [`TourService`] clone
/// has been dropped. A `buffer_size` of 0 is raised to 1.
pub fn new(buffer_size: usize) -> (RegistryActor, TourService) {
    let (sender, receiver) = mpsc::channel(buffer_size.max(1));
    let actor = RegistryActor {
        receiver,
        tours: Vec::new(),
    };
    (actor, TourService::new(sender))
}

impl RegistryActor {
    /// Processes requests until the channel closes and drains.
    pub async fn run(mut self) {
        info!("Tour registry started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }

        info!(size = self.tours.len(), "Tour registry shutdown");
    }

    fn handle(&mut self, msg: RegistryRequest) {
        match msg {
            RegistryRequest::Register { tour, respond_to } => {
                let name = tour.name().map(str::to_owned);
                self.tours.push(tour);
                info!(tour = ?name, size = self.tours.len(), "Registered");
                let _ = respond_to.send(());
            }
            RegistryRequest::Unregister { tour, respond_to } => {
                let removed = sequencer::remove_first(&mut self.tours, &tour);
                if removed {
                    info!(tour = ?tour.name(), size = self.tours.len(), "Unregistered");
                } else {
                    debug!(tour = ?tour.name(), "Unregister of unknown tour ignored");
                }
                let _ = respond_to.send(removed);
            }
            RegistryRequest::First { respond_to } => {
                let _ = respond_to.send(sequencer::first_tour(&self.tours));
            }
            RegistryRequest::ByName { name, respond_to } => {
                let tour = sequencer::tour_by_name(&self.tours, &name);
                debug!(%name, found = tour.is_some(), "Lookup by name");
                let _ = respond_to.send(tour);
            }
            RegistryRequest::NextActive { respond_to } => {
                let tour = sequencer::next_active_tour(&self.tours);
                debug!(next = ?tour.as_ref().and_then(|t| t.name()), "Next active tour");
                let _ = respond_to.send(tour);
            }
            RegistryRequest::Next { key, respond_to } => {
                let _ = respond_to.send(sequencer::next_tour(&self.tours, &key));
            }
            RegistryRequest::HasNext { key, respond_to } => {
                let _ = respond_to.send(sequencer::has_next_tour(&self.tours, &key));
            }
            RegistryRequest::IsWaiting { respond_to } => {
                let _ = respond_to.send(sequencer::is_tour_waiting(&self.tours));
            }
            RegistryRequest::EndAll { respond_to } => {
                // Issued in registration order; each settles on its own task.
                let pending: Vec<PendingEnd> = self
                    .tours
                    .iter()
                    .map(|tour| {
                        let name = tour.name().unwrap_or_default().to_owned();
                        (name, tokio::spawn(tour.end()))
                    })
                    .collect();
                info!(count = pending.len(), "Ending all tours");
                let _ = respond_to.send(pending);
            }
            RegistryRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.tours.clone());
            }
            RegistryRequest::Close { respond_to } => {
                info!(size = self.tours.len(), "Closing tour registry");
                self.receiver.close();
                let _ = respond_to.send(());
            }
        }
    }
}
