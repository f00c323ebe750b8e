//! Flat, serializable records of pair and triplet candidates.
//!
//! Records keep the persisted convention of marking a rejected candidate by
//! setting every participant index to [`INVALID_INDEX`]. In memory the
//! topology types never take that state; they are only built when valid.

use serde::{Deserialize, Serialize};

use super::pair::ClosePair;
use super::triplet::Triplet;

/// Participant index written for a rejected candidate.
pub const INVALID_INDEX: u16 = u16::MAX;

/// Persisted form of a [`ClosePair`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePairRecord {
    pub particle1_idx: u16,
    pub particle2_idx: u16,
    pub particle1_id: i32,
    pub particle2_id: i32,
    pub mass1: f64,
    pub mass2: f64,
    pub particle1_dca: f64,
    pub particle2_dca: f64,
    pub dca_daughters: f64,
    pub p1_at_dca_to_p2: [f64; 3],
    pub p2_at_dca_to_p1: [f64; 3],
}

impl ClosePairRecord {
    /// Record of a rejected pair.
    pub fn invalid() -> Self {
        Self {
            particle1_idx: INVALID_INDEX,
            particle2_idx: INVALID_INDEX,
            particle1_id: 0,
            particle2_id: 0,
            mass1: f64::NAN,
            mass2: f64::NAN,
            particle1_dca: f64::NAN,
            particle2_dca: f64::NAN,
            dca_daughters: f64::MAX,
            p1_at_dca_to_p2: [0.0; 3],
            p2_at_dca_to_p1: [0.0; 3],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.particle1_idx != INVALID_INDEX && self.particle2_idx != INVALID_INDEX
    }
}

impl From<&ClosePair> for ClosePairRecord {
    fn from(pair: &ClosePair) -> Self {
        pair.record()
    }
}

/// Persisted form of a [`Triplet`], flattened to the scalars a selection
/// layer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripletRecord {
    pub particle1_idx: u16,
    pub particle2_idx: u16,
    pub particle3_idx: u16,
    pub m: f64,
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub v0x: f64,
    pub v0y: f64,
    pub v0z: f64,
    pub pointing_angle: f64,
    pub decay_length: f64,
    pub dca_to_primary_vertex: f64,
    pub particle1_dca: f64,
    pub particle2_dca: f64,
    pub particle3_dca: f64,
    pub dca_daughters12: f64,
    pub dca_daughters23: f64,
    pub dca_daughters31: f64,
    pub max_vertex_spread: f64,
}

impl TripletRecord {
    /// Record of a rejected triplet.
    pub fn invalid() -> Self {
        Self {
            particle1_idx: INVALID_INDEX,
            particle2_idx: INVALID_INDEX,
            particle3_idx: INVALID_INDEX,
            m: 0.0,
            pt: 0.0,
            eta: 0.0,
            phi: 0.0,
            px: 0.0,
            py: 0.0,
            pz: 0.0,
            v0x: 0.0,
            v0y: 0.0,
            v0z: 0.0,
            pointing_angle: f64::NAN,
            decay_length: f64::NAN,
            dca_to_primary_vertex: f64::NAN,
            particle1_dca: f64::NAN,
            particle2_dca: f64::NAN,
            particle3_dca: f64::NAN,
            dca_daughters12: f64::MAX,
            dca_daughters23: f64::MAX,
            dca_daughters31: f64::MAX,
            max_vertex_spread: f64::NAN,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.particle1_idx != INVALID_INDEX
            && self.particle2_idx != INVALID_INDEX
            && self.particle3_idx != INVALID_INDEX
    }
}

impl From<&Triplet> for TripletRecord {
    fn from(t: &Triplet) -> Self {
        let v = t.decay_vertex();
        Self {
            particle1_idx: t.particle1_idx(),
            particle2_idx: t.particle2_idx(),
            particle3_idx: t.particle3_idx(),
            m: t.m(),
            pt: t.pt(),
            eta: t.eta(),
            phi: t.phi(),
            px: t.px(),
            py: t.py(),
            pz: t.pz(),
            v0x: v.x,
            v0y: v.y,
            v0z: v.z,
            pointing_angle: t.pointing_angle(),
            decay_length: t.decay_length(),
            dca_to_primary_vertex: t.dca_to_primary_vertex(),
            particle1_dca: t.particle1_dca(),
            particle2_dca: t.particle2_dca(),
            particle3_dca: t.particle3_dca(),
            dca_daughters12: t.dca_daughters12(),
            dca_daughters23: t.dca_daughters23(),
            dca_daughters31: t.dca_daughters31(),
            max_vertex_spread: t.max_vertex_spread(),
        }
    }
}

impl<E> From<Result<Triplet, E>> for TripletRecord {
    fn from(result: Result<Triplet, E>) -> Self {
        match result {
            Ok(t) => TripletRecord::from(&t),
            Err(_) => TripletRecord::invalid(),
        }
    }
}
