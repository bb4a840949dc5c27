//! # Tour Sequencing
//!
//! Pure functions over the registry's ordered tour list. Registration order is
//! the sequencing order; nothing here keeps state between calls.
//!
//! ## Hand-off
//! When one tour in a sequence turns itself off, the tour registered right
//! after it is expected to be the one now on. [`next_active_tour`] finds that
//! pair so navigation code can follow the hand-off.

use crate::tour::{same_tour, Tour, TourKey, TourStatus};
use std::sync::Arc;

/// Returns the first tour; the usual lookup when an app runs a single tour.
pub fn first_tour(tours: &[Arc<dyn Tour>]) -> Option<Arc<dyn Tour>> {
    tours.first().cloned()
}

/// First tour, in registration order, whose name is `name`.
pub fn tour_by_name(tours: &[Arc<dyn Tour>], name: &str) -> Option<Arc<dyn Tour>> {
    tours.iter().find(|tour| tour.name() == Some(name)).cloned()
}

/// Finds the first adjacent `(OFF, ON)` pair and returns its `ON` member.
///
/// Statuses are queried live on every call. The lowest qualifying index wins.
pub fn next_active_tour(tours: &[Arc<dyn Tour>]) -> Option<Arc<dyn Tour>> {
    tours
        .windows(2)
        .find(|pair| pair[0].status() == TourStatus::Off && pair[1].status() == TourStatus::On)
        .map(|pair| Arc::clone(&pair[1]))
}

/// Index of the first tour matching `key`.
pub fn position(tours: &[Arc<dyn Tour>], key: &TourKey) -> Option<usize> {
    tours.iter().position(|tour| key.matches(tour))
}

/// The tour registered right after the one identified by `key`.
///
/// An unknown key has no next tour.
pub fn next_tour(tours: &[Arc<dyn Tour>], key: &TourKey) -> Option<Arc<dyn Tour>> {
    let index = position(tours, key)?;
    let next = index + 1;
    if next < tours.len() {
        Some(Arc::clone(&tours[next]))
    } else {
        None
    }
}

pub fn has_next_tour(tours: &[Arc<dyn Tour>], key: &TourKey) -> bool {
    next_tour(tours, key).is_some()
}

/// True if any tour reports `WAITING`.
///
/// Every tour's status is queried exactly once, even after a match.
pub fn is_tour_waiting(tours: &[Arc<dyn Tour>]) -> bool {
    tours
        .iter()
        .fold(false, |waiting, tour| (tour.status() == TourStatus::Waiting) | waiting)
}

/// Removes the first occurrence of `tour` by identity. Returns whether
/// anything was removed.
pub fn remove_first(tours: &mut Vec<Arc<dyn Tour>>, tour: &Arc<dyn Tour>) -> bool {
    match tours.iter().position(|t| same_tour(t, tour)) {
        Some(index) => {
            tours.remove(index);
            true
        }
        None => false,
    }
}
