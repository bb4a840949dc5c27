//! Tour options.
//!
//! A tour is initialized from a [`TourConfig`]. Callers usually start from
//! [`TourConfig::default`] and override a handful of fields, either in code or
//! from a partial JSON document.

use crate::error::TourError;
use serde::{Deserialize, Serialize};

/// Options a tour is initialized with.
///
/// The registry itself only reads `name`; the rest is passed through to the
/// tour controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Unique name within one registry. Uniqueness is not enforced.
    pub name: Option<String>,
    pub backdrop: bool,
    pub backdrop_z_index: u32,
    pub scroll_into_view: bool,
    pub scroll_offset: u32,
    pub use_hotkeys: bool,
    pub placement: String,
    pub autoplay: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            name: None,
            backdrop: false,
            backdrop_z_index: 10000,
            scroll_into_view: true,
            scroll_offset: 100,
            use_hotkeys: false,
            placement: "top".to_string(),
            autoplay: false,
        }
    }
}

impl TourConfig {
    /// Default options with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parses a (possibly partial) JSON override document. Missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, TourError> {
        Ok(serde_json::from_str(json)?)
    }
}
