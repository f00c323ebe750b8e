use nalgebra::Vector3;

use super::config::{ClosestApproach, TopologyConfig};
use super::error::{Error, Rejection};
use super::record::ClosePairRecord;
use super::{Daughter, closest_points, rebased_helix};
use crate::geometry::{Helix, StraightLine, Trajectory};
use crate::model::event::EventContext;

/// Trajectories retained by a freshly built pair for reuse by triplets.
#[derive(Debug, Clone, PartialEq)]
struct PairGeometry {
    helix1: Helix,
    helix2: Helix,
    line1: StraightLine,
    line2: StraightLine,
}

/// Closest approach of two tracks near the event's reference point.
///
/// Each track's helix is re-based at the path length closest to the
/// reference point before the closest-approach solve, so the per-track DCAs
/// are measured from the primary vertex rather than from wherever the
/// track was seeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosePair {
    particle1_idx: u16,
    particle2_idx: u16,
    particle1_id: i32,
    particle2_id: i32,
    mass1: f64,
    mass2: f64,
    particle1_dca: f64,
    particle2_dca: f64,
    dca_daughters: f64,
    p1_at_dca_to_p2: Vector3<f64>,
    p2_at_dca_to_p1: Vector3<f64>,
    geometry: Option<PairGeometry>,
}

impl ClosePair {
    /// Builds the pair topology of two daughters.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCombination`] if a daughter is missing, both share
    ///   an index, or both are the same track.
    /// - [`Error::Geometry`] if a track's helix cannot be built.
    pub fn new(
        daughter1: Option<Daughter<'_>>,
        daughter2: Option<Daughter<'_>>,
        event: &EventContext,
        config: &TopologyConfig,
    ) -> Result<Self, Error> {
        let (Some(d1), Some(d2)) = (daughter1, daughter2) else {
            return Err(Rejection::MissingParticipant.into());
        };
        if d1.index == d2.index {
            return Err(Rejection::DuplicateIndex(d1.index).into());
        }
        if d1.track.id == d2.track.id {
            return Err(Rejection::DuplicateTrack(d1.track.id).into());
        }

        let helix1 = rebased_helix(d1.track, event, config.solver)?;
        let helix2 = rebased_helix(d2.track, event, config.solver)?;
        let line1 = helix1.straight_line();
        let line2 = helix2.straight_line();

        let (p1_at_dca_to_p2, p2_at_dca_to_p1) = match config.closest_approach {
            ClosestApproach::StraightLine => closest_points(&line1, &line2),
            ClosestApproach::Helix => closest_points(&helix1, &helix2),
        };

        Ok(Self {
            particle1_idx: d1.index,
            particle2_idx: d2.index,
            particle1_id: d1.track.id,
            particle2_id: d2.track.id,
            mass1: d1.mass,
            mass2: d2.mass,
            particle1_dca: (helix1.origin() - event.vertex).norm(),
            particle2_dca: (helix2.origin() - event.vertex).norm(),
            dca_daughters: (p1_at_dca_to_p2 - p2_at_dca_to_p1).norm(),
            p1_at_dca_to_p2,
            p2_at_dca_to_p1,
            geometry: Some(PairGeometry {
                helix1,
                helix2,
                line1,
                line2,
            }),
        })
    }

    /// Restores a pair from its persisted record.
    ///
    /// The restored pair carries no trajectories, so it cannot seed a
    /// [`Triplet`](super::Triplet).
    pub fn from_record(record: &ClosePairRecord) -> Result<Self, Error> {
        if !record.is_valid() {
            return Err(Rejection::InvalidRecord.into());
        }
        Ok(Self {
            particle1_idx: record.particle1_idx,
            particle2_idx: record.particle2_idx,
            particle1_id: record.particle1_id,
            particle2_id: record.particle2_id,
            mass1: record.mass1,
            mass2: record.mass2,
            particle1_dca: record.particle1_dca,
            particle2_dca: record.particle2_dca,
            dca_daughters: record.dca_daughters,
            p1_at_dca_to_p2: Vector3::from(record.p1_at_dca_to_p2),
            p2_at_dca_to_p1: Vector3::from(record.p2_at_dca_to_p1),
            geometry: None,
        })
    }

    pub fn record(&self) -> ClosePairRecord {
        ClosePairRecord {
            particle1_idx: self.particle1_idx,
            particle2_idx: self.particle2_idx,
            particle1_id: self.particle1_id,
            particle2_id: self.particle2_id,
            mass1: self.mass1,
            mass2: self.mass2,
            particle1_dca: self.particle1_dca,
            particle2_dca: self.particle2_dca,
            dca_daughters: self.dca_daughters,
            p1_at_dca_to_p2: self.p1_at_dca_to_p2.into(),
            p2_at_dca_to_p1: self.p2_at_dca_to_p1.into(),
        }
    }

    #[inline]
    pub fn particle1_idx(&self) -> u16 {
        self.particle1_idx
    }

    #[inline]
    pub fn particle2_idx(&self) -> u16 {
        self.particle2_idx
    }

    #[inline]
    pub fn particle1_id(&self) -> i32 {
        self.particle1_id
    }

    #[inline]
    pub fn particle2_id(&self) -> i32 {
        self.particle2_id
    }

    #[inline]
    pub fn p1_mass_hypothesis(&self) -> f64 {
        self.mass1
    }

    #[inline]
    pub fn p2_mass_hypothesis(&self) -> f64 {
        self.mass2
    }

    /// Distance from particle 1's re-based origin to the reference point.
    #[inline]
    pub fn particle1_dca(&self) -> f64 {
        self.particle1_dca
    }

    /// Distance from particle 2's re-based origin to the reference point.
    #[inline]
    pub fn particle2_dca(&self) -> f64 {
        self.particle2_dca
    }

    /// Distance between the two closest-approach points.
    #[inline]
    pub fn dca_daughters(&self) -> f64 {
        self.dca_daughters
    }

    #[inline]
    pub fn p1_at_dca_to_p2(&self) -> Vector3<f64> {
        self.p1_at_dca_to_p2
    }

    #[inline]
    pub fn p2_at_dca_to_p1(&self) -> Vector3<f64> {
        self.p2_at_dca_to_p1
    }

    /// Midpoint of the two closest-approach points.
    pub fn decay_vertex(&self) -> Vector3<f64> {
        (self.p1_at_dca_to_p2 + self.p2_at_dca_to_p1) / 2.0
    }

    pub fn helix1(&self) -> Option<&Helix> {
        self.geometry.as_ref().map(|g| &g.helix1)
    }

    pub fn helix2(&self) -> Option<&Helix> {
        self.geometry.as_ref().map(|g| &g.helix2)
    }

    pub fn straight_line1(&self) -> Option<&StraightLine> {
        self.geometry.as_ref().map(|g| &g.line1)
    }

    pub fn straight_line2(&self) -> Option<&StraightLine> {
        self.geometry.as_ref().map(|g| &g.line2)
    }
}
