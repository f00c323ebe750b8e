//! Pair and triplet decay topologies.
//!
//! A [`ClosePair`] finds where two tracks pass closest to each other. A
//! [`Triplet`] extends a pair with a third track, averages the three pairwise
//! closest-approach midpoints into a decay vertex, and assembles the
//! candidate's four-momentum at that vertex.
//!
//! Construction returns `Result`: [`Error::is_rejection`] separates the
//! frequent "not a candidate" outcomes from contract violations that abort a
//! single candidate.

mod combine;
mod config;
mod error;
mod pair;
mod record;
mod triplet;

pub use combine::{Candidates, pairs, triplets};
pub use config::{ClosestApproach, TopologyConfig};
pub use error::{Error, Rejection};
pub use pair::ClosePair;
pub use record::{ClosePairRecord, INVALID_INDEX, TripletRecord};
pub use triplet::Triplet;

use nalgebra::Vector3;

use crate::geometry::{GeometryError, Helix, SolverOptions, Trajectory};
use crate::model::event::EventContext;
use crate::model::track::Track;

/// A track taking part in a candidate, with its position in the event's
/// track collection and its mass hypothesis in GeV/c².
#[derive(Debug, Clone, Copy)]
pub struct Daughter<'a> {
    pub track: &'a Track,
    pub index: u16,
    pub mass: f64,
}

impl<'a> Daughter<'a> {
    pub fn new(track: &'a Track, index: u16, mass: f64) -> Self {
        Self { track, index, mass }
    }
}

/// Builds the track's helix and moves its origin to the point closest to
/// the event's reference point.
fn rebased_helix(
    track: &Track,
    event: &EventContext,
    solver: SolverOptions,
) -> Result<Helix, GeometryError> {
    if !event.vertex.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::NonFinite("reference point"));
    }
    let helix = track.helix(event.b_field)?.with_solver(solver);
    let s = helix.path_length_to(&event.vertex);
    Ok(helix.moved_to(s))
}

/// Points of closest approach on `a` and `b`, in that order.
fn closest_points<T: Trajectory>(a: &T, b: &T) -> (Vector3<f64>, Vector3<f64>) {
    let (sa, sb) = a.path_lengths(b);
    (a.at(sa), b.at(sb))
}

/// Angle between two vectors; zero when either has no length.
fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let norm = (a.norm_squared() * b.norm_squared()).sqrt();
    if norm > 0.0 {
        (a.dot(b) / norm).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    }
}
