use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::track::Track;

/// Event-level inputs shared by every candidate of one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventContext {
    /// Reconstructed primary vertex, the reference point of all topology.
    pub vertex: Vector3<f64>,
    /// Signed magnetic field along z in kilogauss.
    pub b_field: f64,
}

impl EventContext {
    pub fn new(vertex: [f64; 3], b_field: f64) -> Self {
        Self {
            vertex: Vector3::from(vertex),
            b_field,
        }
    }
}

/// One event: its context and track collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub vertex: [f64; 3],
    pub b_field: f64,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Event {
    pub fn context(&self) -> EventContext {
        EventContext::new(self.vertex, self.b_field)
    }

    #[inline]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}
