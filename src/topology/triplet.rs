use nalgebra::Vector3;
use tracing::error;

use super::config::TopologyConfig;
use super::error::{Error, Rejection};
use super::pair::ClosePair;
use super::record::TripletRecord;
use super::{Daughter, angle_between, closest_points, rebased_helix};
use crate::geometry::Trajectory;
use crate::model::event::EventContext;
use crate::model::lorentz::LorentzVector;

/// Three-track decay candidate.
///
/// The decay vertex is the mean of the three pairwise closest-approach
/// midpoints; it is not a least-squares fit. Pairs (2,3) and (3,1) are
/// always solved on straight-line approximations, while daughter momenta
/// are taken from the exact helices at the decay vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Triplet {
    lorentz_vector: LorentzVector,
    decay_vertex: Vector3<f64>,
    pointing_angle: f64,
    decay_length: f64,
    particle1_dca: f64,
    particle2_dca: f64,
    particle3_dca: f64,
    particle1_idx: u16,
    particle2_idx: u16,
    particle3_idx: u16,
    dca_daughters12: f64,
    dca_daughters23: f64,
    dca_daughters31: f64,
    max_vertex_spread: f64,
}

impl Triplet {
    /// Builds a triplet directly from three daughters.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCombination`] if a daughter is missing or any two
    ///   share a track identity or an index.
    /// - [`Error::Geometry`] if a track's helix cannot be built.
    pub fn new(
        daughter1: Option<Daughter<'_>>,
        daughter2: Option<Daughter<'_>>,
        daughter3: Option<Daughter<'_>>,
        event: &EventContext,
        config: &TopologyConfig,
    ) -> Result<Self, Error> {
        let (Some(d1), Some(d2), Some(d3)) = (daughter1, daughter2, daughter3) else {
            return Err(Rejection::MissingParticipant.into());
        };
        for (a, b) in [(&d1, &d2), (&d1, &d3), (&d2, &d3)] {
            if a.index == b.index {
                return Err(Rejection::DuplicateIndex(a.index).into());
            }
            if a.track.id == b.track.id {
                return Err(Rejection::DuplicateTrack(a.track.id).into());
            }
        }

        let pair = ClosePair::new(Some(d1), Some(d2), event, config)?;
        Self::calculate_topology(&pair, d3, event, config)
    }

    /// Builds a triplet from an existing (1,2) pair and a third daughter,
    /// reusing the pair's closest approach and cached trajectories.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCombination`] if the pair or daughter is missing, or
    ///   the daughter repeats a track or index of the pair.
    /// - [`Error::Geometry`] if the third track's helix cannot be built.
    /// - [`Error::MissingGeometry`] if the pair carries no cached
    ///   trajectories.
    pub fn from_pair(
        pair: Option<&ClosePair>,
        daughter3: Option<Daughter<'_>>,
        event: &EventContext,
        config: &TopologyConfig,
    ) -> Result<Self, Error> {
        let (Some(pair), Some(d3)) = (pair, daughter3) else {
            return Err(Rejection::MissingParticipant.into());
        };
        if d3.index == pair.particle1_idx() || d3.index == pair.particle2_idx() {
            return Err(Rejection::DuplicateIndex(d3.index).into());
        }
        if d3.track.id == pair.particle1_id() || d3.track.id == pair.particle2_id() {
            return Err(Rejection::DuplicateTrack(d3.track.id).into());
        }

        Self::calculate_topology(pair, d3, event, config)
    }

    fn calculate_topology(
        pair: &ClosePair,
        d3: Daughter<'_>,
        event: &EventContext,
        config: &TopologyConfig,
    ) -> Result<Self, Error> {
        let helix3 = rebased_helix(d3.track, event, config.solver)?;
        let line3 = helix3.straight_line();

        let (Some(line1), Some(line2)) = (pair.straight_line1(), pair.straight_line2()) else {
            error!(
                particle1_idx = pair.particle1_idx(),
                particle2_idx = pair.particle2_idx(),
                "close pair has no cached straight lines"
            );
            return Err(Error::missing_geometry(
                "straight lines",
                pair.particle1_idx(),
                pair.particle2_idx(),
            ));
        };

        let (p2_at_dca_to_p3, p3_at_dca_to_p2) = closest_points(line2, &line3);
        let (p1_at_dca_to_p3, p3_at_dca_to_p1) = closest_points(line1, &line3);

        let dca_daughters23 = (p2_at_dca_to_p3 - p3_at_dca_to_p2).norm();
        let dca_daughters31 = (p3_at_dca_to_p1 - p1_at_dca_to_p3).norm();

        let decay_vertex12 = pair.decay_vertex();
        let decay_vertex23 = (p2_at_dca_to_p3 + p3_at_dca_to_p2) / 2.0;
        let decay_vertex31 = (p3_at_dca_to_p1 + p1_at_dca_to_p3) / 2.0;

        let decay_vertex = (decay_vertex12 + decay_vertex23 + decay_vertex31) / 3.0;

        let max_vertex_spread = (decay_vertex12 - decay_vertex23)
            .norm()
            .max((decay_vertex23 - decay_vertex31).norm())
            .max((decay_vertex31 - decay_vertex12).norm());

        let (Some(helix1), Some(helix2)) = (pair.helix1(), pair.helix2()) else {
            error!(
                particle1_idx = pair.particle1_idx(),
                particle2_idx = pair.particle2_idx(),
                "close pair has no cached helices"
            );
            return Err(Error::missing_geometry(
                "helices",
                pair.particle1_idx(),
                pair.particle2_idx(),
            ));
        };

        let p1_mom = helix1.momentum_at(helix1.path_length_to(&decay_vertex));
        let p2_mom = helix2.momentum_at(helix2.path_length_to(&decay_vertex));
        let p3_mom = helix3.momentum_at(helix3.path_length_to(&decay_vertex));

        let lorentz_vector = LorentzVector::from_mass_hypothesis(p1_mom, pair.p1_mass_hypothesis())
            + LorentzVector::from_mass_hypothesis(p2_mom, pair.p2_mass_hypothesis())
            + LorentzVector::from_mass_hypothesis(p3_mom, d3.mass);

        let vtx_to_decay = decay_vertex - event.vertex;

        Ok(Self {
            lorentz_vector,
            decay_vertex,
            pointing_angle: angle_between(&vtx_to_decay, &lorentz_vector.vect()),
            decay_length: vtx_to_decay.norm(),
            particle1_dca: pair.particle1_dca(),
            particle2_dca: pair.particle2_dca(),
            particle3_dca: (helix3.origin() - event.vertex).norm(),
            particle1_idx: pair.particle1_idx(),
            particle2_idx: pair.particle2_idx(),
            particle3_idx: d3.index,
            dca_daughters12: pair.dca_daughters(),
            dca_daughters23,
            dca_daughters31,
            max_vertex_spread,
        })
    }

    /// Flattens the candidate into its persisted form.
    pub fn record(&self) -> TripletRecord {
        TripletRecord::from(self)
    }

    #[inline]
    pub fn lorentz_vector(&self) -> &LorentzVector {
        &self.lorentz_vector
    }

    #[inline]
    pub fn decay_vertex(&self) -> Vector3<f64> {
        self.decay_vertex
    }

    /// Invariant mass of the candidate.
    #[inline]
    pub fn m(&self) -> f64 {
        self.lorentz_vector.m()
    }

    #[inline]
    pub fn pt(&self) -> f64 {
        self.lorentz_vector.perp()
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.lorentz_vector.pseudo_rapidity()
    }

    #[inline]
    pub fn phi(&self) -> f64 {
        self.lorentz_vector.phi()
    }

    #[inline]
    pub fn px(&self) -> f64 {
        self.lorentz_vector.px()
    }

    #[inline]
    pub fn py(&self) -> f64 {
        self.lorentz_vector.py()
    }

    #[inline]
    pub fn pz(&self) -> f64 {
        self.lorentz_vector.pz()
    }

    #[inline]
    pub fn v0x(&self) -> f64 {
        self.decay_vertex.x
    }

    #[inline]
    pub fn v0y(&self) -> f64 {
        self.decay_vertex.y
    }

    #[inline]
    pub fn v0z(&self) -> f64 {
        self.decay_vertex.z
    }

    /// Angle between the primary-to-decay-vertex vector and the candidate
    /// momentum.
    #[inline]
    pub fn pointing_angle(&self) -> f64 {
        self.pointing_angle
    }

    /// Distance from the reference point to the decay vertex.
    #[inline]
    pub fn decay_length(&self) -> f64 {
        self.decay_length
    }

    /// Distance of the candidate's momentum line from the reference point.
    pub fn dca_to_primary_vertex(&self) -> f64 {
        self.decay_length * self.pointing_angle.sin()
    }

    #[inline]
    pub fn particle1_dca(&self) -> f64 {
        self.particle1_dca
    }

    #[inline]
    pub fn particle2_dca(&self) -> f64 {
        self.particle2_dca
    }

    #[inline]
    pub fn particle3_dca(&self) -> f64 {
        self.particle3_dca
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
    pub fn particle3_idx(&self) -> u16 {
        self.particle3_idx
    }

    #[inline]
    pub fn dca_daughters12(&self) -> f64 {
        self.dca_daughters12
    }

    #[inline]
    pub fn dca_daughters23(&self) -> f64 {
        self.dca_daughters23
    }

    #[inline]
    pub fn dca_daughters31(&self) -> f64 {
        self.dca_daughters31
    }

    /// Largest distance between the three pairwise vertices; small values
    /// mean the three tracks converge on one point.
    #[inline]
    pub fn max_vertex_spread(&self) -> f64 {
        self.max_vertex_spread
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Helix;
    use crate::model::track::Track;
    use crate::topology::ClosestApproach;

    const PION: f64 = 0.13957;
    const KAON: f64 = 0.493677;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    /// Straight track whose line passes through `through`, seeded 10 cm
    /// upstream of it.
    fn straight_track(id: i32, charge: i8, momentum: [f64; 3], through: [f64; 3]) -> Track {
        let p = Vector3::from(momentum);
        let origin = Vector3::from(through) - p.normalize() * 10.0;
        Track::new(id, charge, momentum, origin.into())
    }

    fn invariant_mass(momenta: &[[f64; 3]], masses: &[f64]) -> f64 {
        momenta
            .iter()
            .zip(masses)
            .map(|(p, m)| LorentzVector::from_mass_hypothesis(Vector3::from(*p), *m))
            .sum::<LorentzVector>()
            .m()
    }

    fn daughters(tracks: &[Track; 3], masses: [f64; 3]) -> [Option<Daughter<'_>>; 3] {
        [
            Some(Daughter::new(&tracks[0], 0, masses[0])),
            Some(Daughter::new(&tracks[1], 1, masses[1])),
            Some(Daughter::new(&tracks[2], 2, masses[2])),
        ]
    }

    fn coincident_tracks(point: [f64; 3]) -> [Track; 3] {
        [
            straight_track(10, -1, [1.0, 0.2, 0.4], point),
            straight_track(20, 1, [-0.3, 0.9, 0.5], point),
            straight_track(30, 1, [0.1, -0.7, 0.9], point),
        ]
    }

    #[test]
    fn coincident_tracks_give_exact_vertex() {
        let tracks = coincident_tracks([1.0, 2.0, 5.0]);
        let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
        let [d1, d2, d3] = daughters(&tracks, [KAON, PION, PION]);

        let t = Triplet::new(d1, d2, d3, &event, &TopologyConfig::default()).unwrap();

        assert!((t.decay_vertex() - Vector3::new(1.0, 2.0, 5.0)).norm() < 1e-9);
        assert!(t.max_vertex_spread() < 1e-9);
        assert!(t.dca_daughters12() < 1e-9);
        assert!(t.dca_daughters23() < 1e-9);
        assert!(t.dca_daughters31() < 1e-9);
        assert!(approx_eq(t.decay_length(), 30.0f64.sqrt(), 1e-9));
        assert_eq!(
            (t.particle1_idx(), t.particle2_idx(), t.particle3_idx()),
            (0, 1, 2)
        );
    }

    #[test]
    fn direct_and_pair_based_construction_agree() {
        let tracks = coincident_tracks([0.3, -0.2, 2.0]);
        let event = EventContext::new([0.01, 0.02, -0.05], 0.0);
        let config = TopologyConfig::default();
        let [d1, d2, d3] = daughters(&tracks, [KAON, PION, PION]);

        let direct = Triplet::new(d1, d2, d3, &event, &config).unwrap();
        let pair = ClosePair::new(d1, d2, &event, &config).unwrap();
        let via_pair = Triplet::from_pair(Some(&pair), d3, &event, &config).unwrap();

        assert!((direct.decay_vertex() - via_pair.decay_vertex()).norm() < 1e-12);
        assert!(approx_eq(direct.dca_daughters12(), via_pair.dca_daughters12(), 1e-12));
        assert!(approx_eq(direct.dca_daughters23(), via_pair.dca_daughters23(), 1e-12));
        assert!(approx_eq(direct.dca_daughters31(), via_pair.dca_daughters31(), 1e-12));
        assert!((direct.lorentz_vector().p - via_pair.lorentz_vector().p).norm() < 1e-12);
        assert!(approx_eq(direct.lorentz_vector().e, via_pair.lorentz_vector().e, 1e-12));
    }

    #[test]
    fn direct_and_pair_based_construction_agree_in_field() {
        let tracks = coincident_tracks([0.3, -0.2, 2.0]);
        let event = EventContext::new([0.01, 0.02, -0.05], -4.98);
        let config = TopologyConfig {
            closest_approach: ClosestApproach::Helix,
            ..Default::default()
        };
        let [d1, d2, d3] = daughters(&tracks, [KAON, PION, PION]);

        let direct = Triplet::new(d1, d2, d3, &event, &config).unwrap();
        let pair = ClosePair::new(d1, d2, &event, &config).unwrap();
        let via_pair = Triplet::from_pair(Some(&pair), d3, &event, &config).unwrap();

        assert_eq!(direct, via_pair);
        assert_eq!(direct.m().to_bits(), via_pair.m().to_bits());
        assert_eq!(direct.dca_daughters12(), pair.dca_daughters());
    }

    #[test]
    fn candidate_along_its_momentum_has_zero_dca_to_vertex() {
        let point = [0.0, 0.0, 10.0];
        let tracks = [
            straight_track(1, 1, [1.0, 0.0, 2.0], point),
            straight_track(2, -1, [-0.5, 0.75f64.sqrt(), 2.0], point),
            straight_track(3, 1, [-0.5, -(0.75f64.sqrt()), 2.0], point),
        ];
        let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
        let [d1, d2, d3] = daughters(&tracks, [PION, PION, PION]);

        let t = Triplet::new(d1, d2, d3, &event, &TopologyConfig::default()).unwrap();

        assert!(t.pointing_angle() < 1e-6);
        assert!(t.dca_to_primary_vertex() >= 0.0);
        assert!(t.dca_to_primary_vertex() < 1e-6);
        assert!(approx_eq(t.decay_length(), 10.0, 1e-9));
    }

    #[test]
    fn dca_to_vertex_is_non_negative_for_displaced_candidates() {
        let tracks = coincident_tracks([2.0, -1.0, 3.0]);
        let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
        let [d1, d2, d3] = daughters(&tracks, [KAON, PION, PION]);

        let t = Triplet::new(d1, d2, d3, &event, &TopologyConfig::default()).unwrap();
        let expected = t.decay_length() * t.pointing_angle().sin();
        assert!(t.dca_to_primary_vertex() > 0.0);
        assert_eq!(t.dca_to_primary_vertex(), expected);
    }

    #[test]
    fn repeated_construction_is_bit_reproducible() {
        let tracks = coincident_tracks([0.5, 0.5, 1.0]);
        let event = EventContext::new([0.0, 0.0, 0.0], -4.98);
        let config = TopologyConfig {
            closest_approach: ClosestApproach::Helix,
            ..Default::default()
        };
        let [d1, d2, d3] = daughters(&tracks, [KAON, PION, PION]);

        let a = Triplet::new(d1, d2, d3, &event, &config).unwrap();
        let b = Triplet::new(d1, d2, d3, &event, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.m().to_bits(), b.m().to_bits());
    }

    #[test]
    fn near_common_point_reports_vertex_and_mass() {
        let point = Vector3::new(0.0, 0.0, 10.0);
        let momenta = [[0.9, 0.1, 1.5], [-0.4, 0.8, 1.1], [-0.3, -0.7, 2.0]];
        let offsets = [
            Vector3::new(0.0, 0.005, 0.0),
            Vector3::new(0.004, 0.0, -0.003),
            Vector3::new(-0.003, 0.0, 0.004),
        ];
        let masses = [KAON, PION, PION];

        let tracks: [Track; 3] = std::array::from_fn(|i| {
            straight_track(i as i32 + 1, 1, momenta[i], (point + offsets[i]).into())
        });
        let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
        let [d1, d2, d3] = daughters(&tracks, masses);

        let t = Triplet::new(d1, d2, d3, &event, &TopologyConfig::default()).unwrap();

        assert!((t.decay_vertex() - point).norm() < 0.02);
        assert!(t.max_vertex_spread() < 0.02);
        assert!(approx_eq(t.m(), invariant_mass(&momenta, &masses), 1e-12));
    }

    #[test]
    fn curved_tracks_from_a_displaced_vertex() {
        let b_field = -4.98;
        let decay_point = Vector3::new(0.04, 0.03, 0.02);
        let momenta = [[0.9, 0.3, 0.2], [0.5, -0.4, 0.1], [0.7, 0.6, -0.3]];
        let charges = [-1i8, 1, 1];
        let masses = [KAON, PION, PION];

        let tracks: [Track; 3] = std::array::from_fn(|i| {
            let at_decay = Helix::new(
                Vector3::from(momenta[i]),
                decay_point,
                b_field,
                f64::from(charges[i]),
            )
            .unwrap();
            let seed = at_decay.moved_to(2.0);
            Track::new(
                100 + i as i32,
                charges[i],
                seed.momentum_at(0.0).into(),
                seed.origin().into(),
            )
        });
        let event = EventContext::new([0.0, 0.0, 0.0], b_field);
        let [d1, d2, d3] = daughters(&tracks, masses);

        let t = Triplet::new(d1, d2, d3, &event, &TopologyConfig::default()).unwrap();

        assert!((t.decay_vertex() - decay_point).norm() < 1e-3);
        assert!(t.max_vertex_spread() < 1e-3);
        assert!(approx_eq(t.m(), invariant_mass(&momenta, &masses), 1e-3));
        assert!(approx_eq(
            t.decay_length(),
            (t.decay_vertex() - event.vertex).norm(),
            1e-15
        ));
    }

    #[test]
    fn shared_track_is_not_a_candidate() {
        let tracks = coincident_tracks([0.0, 0.0, 1.0]);
        let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
        let config = TopologyConfig::default();

        let err = Triplet::new(
            Some(Daughter::new(&tracks[0], 0, PION)),
            Some(Daughter::new(&tracks[1], 1, PION)),
            Some(Daughter::new(&tracks[0], 2, PION)),
            &event,
            &config,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidCombination(Rejection::DuplicateTrack(10)));

        let err = Triplet::new(
            Some(Daughter::new(&tracks[0], 0, PION)),
            Some(Daughter::new(&tracks[1], 1, PION)),
            Some(Daughter::new(&tracks[2], 1, PION)),
            &event,
            &config,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidCombination(Rejection::DuplicateIndex(1)));
    }

    #[test]
    fn third_track_repeating_a_pair_member_is_not_a_candidate() {
        let tracks = coincident_tracks([0.0, 0.0, 1.0]);
        let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
        let config = TopologyConfig::default();
        let [d1, d2, _] = daughters(&tracks, [PION; 3]);
        let pair = ClosePair::new(d1, d2, &event, &config).unwrap();

        let err = Triplet::from_pair(
            Some(&pair),
            Some(Daughter::new(&tracks[1], 7, PION)),
            &event,
            &config,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidCombination(Rejection::DuplicateTrack(20)));

        let err = Triplet::from_pair(
            Some(&pair),
            Some(Daughter::new(&tracks[2], 0, PION)),
            &event,
            &config,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidCombination(Rejection::DuplicateIndex(0)));

        let err = Triplet::from_pair(
            None,
            Some(Daughter::new(&tracks[2], 2, PION)),
            &event,
            &config,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidCombination(Rejection::MissingParticipant));
    }

    #[test]
    fn restored_pair_cannot_seed_a_triplet() {
        let tracks = coincident_tracks([0.0, 0.0, 1.0]);
        let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
        let config = TopologyConfig::default();
        let [d1, d2, d3] = daughters(&tracks, [PION; 3]);
        let pair = ClosePair::new(d1, d2, &event, &config).unwrap();
        let restored = ClosePair::from_record(&pair.record()).unwrap();

        let err = Triplet::from_pair(Some(&restored), d3, &event, &config).unwrap_err();
        assert!(matches!(err, Error::MissingGeometry { .. }));
        assert!(!err.is_rejection());
    }
}
