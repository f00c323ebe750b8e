//! Exact helical trajectory of a charged particle.
//!
//! The helix is parametrized by its 3D arc length `s`. With azimuth
//! `ψ(s) = ψ₀ + h·κ·cos λ·s` of the momentum, the position is
//!
//! ```text
//! x(s) = x₀ + (sin ψ(s) − sin ψ₀) / (h·κ)
//! y(s) = y₀ − (cos ψ(s) − cos ψ₀) / (h·κ)
//! z(s) = z₀ + s·sin λ
//! ```
//!
//! where `κ` is the curvature, `λ` the dip angle and `h = −sign(q·B)` the
//! sense of rotation in the transverse plane. A helix with `q·B = 0` is a
//! straight line that still carries its momentum.

use std::f64::consts::{PI, TAU};

use nalgebra::{Vector2, Vector3};
use tracing::debug;

use super::{
    CURVATURE_CONSTANT, GeometryError, SolverOptions, StraightLine, Trajectory, line_path_lengths,
};

/// Physical helix built from momentum, origin, field and charge.
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    origin: Vector3<f64>,
    momentum: Vector3<f64>,
    b_field: f64,
    charge: f64,
    curvature: f64,
    helicity: f64,
    dip: f64,
    phase: f64,
    solver: SolverOptions,
}

impl Helix {
    /// Creates the helix of a particle with `charge` (units of e) and
    /// `momentum` (GeV/c) at `origin` (cm) in a field of `b_field` kilogauss.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] for non-finite inputs, a zero momentum, or a
    /// charged particle without transverse momentum in a non-zero field.
    pub fn new(
        momentum: Vector3<f64>,
        origin: Vector3<f64>,
        b_field: f64,
        charge: f64,
    ) -> Result<Self, GeometryError> {
        if !momentum.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("momentum"));
        }
        if !origin.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("origin"));
        }
        if !b_field.is_finite() {
            return Err(GeometryError::NonFinite("field"));
        }
        if !charge.is_finite() {
            return Err(GeometryError::NonFinite("charge"));
        }
        if momentum.norm() == 0.0 {
            return Err(GeometryError::ZeroMomentum);
        }

        let pt = momentum.x.hypot(momentum.y);
        let qb = charge * b_field;
        let curvature = if qb == 0.0 {
            0.0
        } else if pt == 0.0 {
            return Err(GeometryError::InfiniteCurvature { charge, b_field });
        } else {
            CURVATURE_CONSTANT * qb.abs() / pt
        };

        Ok(Self {
            origin,
            momentum,
            b_field,
            charge,
            curvature,
            helicity: if qb > 0.0 { -1.0 } else { 1.0 },
            dip: momentum.z.atan2(pt),
            phase: momentum.y.atan2(momentum.x),
            solver: SolverOptions::default(),
        })
    }

    /// Replaces the settings used by the iterative solves.
    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    #[inline]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    #[inline]
    pub fn helicity(&self) -> f64 {
        self.helicity
    }

    #[inline]
    pub fn dip(&self) -> f64 {
        self.dip
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    #[inline]
    pub fn b_field(&self) -> f64 {
        self.b_field
    }

    #[inline]
    pub fn is_straight(&self) -> bool {
        self.curvature == 0.0
    }

    /// Radius of the transverse circle; infinite for a straight helix.
    pub fn radius(&self) -> f64 {
        if self.is_straight() {
            f64::INFINITY
        } else {
            1.0 / self.curvature
        }
    }

    /// Zero-curvature approximation sharing this helix's origin, momentum
    /// and charge.
    pub fn straight_line(&self) -> StraightLine {
        StraightLine::from_validated(self.momentum, self.origin, self.charge)
    }

    fn phase_at(&self, s: f64) -> f64 {
        self.phase + self.helicity * self.curvature * self.dip.cos() * s
    }

    fn direction_at(&self, s: f64) -> Vector3<f64> {
        let psi = self.phase_at(s);
        let cos_dip = self.dip.cos();
        Vector3::new(cos_dip * psi.cos(), cos_dip * psi.sin(), self.dip.sin())
    }

    fn direction_derivative_at(&self, s: f64) -> Vector3<f64> {
        let psi = self.phase_at(s);
        let cos_dip = self.dip.cos();
        let rate = self.helicity * self.curvature * cos_dip;
        Vector3::new(-rate * cos_dip * psi.sin(), rate * cos_dip * psi.cos(), 0.0)
    }

    fn center_xy(&self) -> Vector2<f64> {
        let hk = self.helicity * self.curvature;
        Vector2::new(
            self.origin.x - self.phase.sin() / hk,
            self.origin.y + self.phase.cos() / hk,
        )
    }

    /// Path length along one turn, measured in 3D arc length.
    fn period(&self) -> f64 {
        TAU / (self.curvature * self.dip.cos())
    }

    /// Transverse-plane path length to the azimuth of `point` around the
    /// circle centre, within half a turn of the origin.
    fn path_length_xy(&self, point: &Vector2<f64>) -> f64 {
        let d = point - self.center_xy();
        if d.norm() == 0.0 {
            return 0.0;
        }
        let psi = (self.helicity * d.x).atan2(-self.helicity * d.y);
        let delta = wrap_angle(psi - self.phase);
        delta / (self.helicity * self.curvature * self.dip.cos())
    }

    fn refine_path_length(&self, point: &Vector3<f64>, mut s: f64) -> f64 {
        for _ in 0..self.solver.max_iterations {
            let d = self.at(s) - point;
            let f = d.dot(&self.direction_at(s));
            let df = 1.0 + d.dot(&self.direction_derivative_at(s));
            if df <= 0.0 {
                debug!(s, "helix path length solve left the convex region");
                return s;
            }
            let step = f / df;
            s -= step;
            if step.abs() < self.solver.tolerance {
                return s;
            }
        }
        debug!(s, "helix path length solve did not converge");
        s
    }

    fn refine_pair(&self, other: &Helix, mut s1: f64, mut s2: f64) -> (f64, f64) {
        let tolerance = self.solver.tolerance;
        for _ in 0..self.solver.max_iterations {
            let d = self.at(s1) - other.at(s2);
            let t1 = self.direction_at(s1);
            let t2 = other.direction_at(s2);

            let g1 = d.dot(&t1);
            let g2 = -d.dot(&t2);
            let a11 = 1.0 + d.dot(&self.direction_derivative_at(s1));
            let a22 = 1.0 - d.dot(&other.direction_derivative_at(s2));
            let a12 = -t1.dot(&t2);
            let det = a11 * a22 - a12 * a12;

            if a11 <= 0.0 || det <= 1e-12 {
                debug!(s1, s2, det, "helix pair solve has no local minimum ahead");
                return (s1, s2);
            }

            let ds1 = (g1 * a22 - a12 * g2) / det;
            let ds2 = (a11 * g2 - a12 * g1) / det;
            s1 -= ds1;
            s2 -= ds2;

            if ds1.abs() < tolerance && ds2.abs() < tolerance {
                return (s1, s2);
            }
        }
        debug!(s1, s2, "helix pair solve did not converge");
        (s1, s2)
    }

    fn separation(&self, other: &Helix, (s1, s2): (f64, f64)) -> f64 {
        (self.at(s1) - other.at(s2)).norm()
    }
}

impl Trajectory for Helix {
    fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    fn at(&self, s: f64) -> Vector3<f64> {
        if self.is_straight() {
            return self.origin + self.direction_at(0.0) * s;
        }
        let hk = self.helicity * self.curvature;
        let psi = self.phase_at(s);
        Vector3::new(
            self.origin.x + (psi.sin() - self.phase.sin()) / hk,
            self.origin.y - (psi.cos() - self.phase.cos()) / hk,
            self.origin.z + s * self.dip.sin(),
        )
    }

    fn momentum_at(&self, s: f64) -> Vector3<f64> {
        if self.is_straight() {
            return self.momentum;
        }
        self.direction_at(s) * self.momentum.norm()
    }

    fn path_length_to(&self, point: &Vector3<f64>) -> f64 {
        if self.is_straight() {
            return (point - self.origin).dot(&self.direction_at(0.0));
        }

        let mut s = self.path_length_xy(&point.xy());

        let sin_dip = self.dip.sin();
        if sin_dip.abs() > 1e-12 {
            let period = self.period();
            let s_z = (point.z - self.origin.z) / sin_dip;
            s += ((s_z - s) / period).round() * period;
        }

        self.refine_path_length(point, s)
    }

    fn path_lengths(&self, other: &Self) -> (f64, f64) {
        let linear = line_path_lengths(
            &self.origin,
            &self.direction_at(0.0),
            &other.origin,
            &other.direction_at(0.0),
        );
        if self.is_straight() && other.is_straight() {
            return linear;
        }

        let mut starts = vec![linear];
        if !self.is_straight() && !other.is_straight() {
            let approaches = circle_approach_points(
                self.center_xy(),
                self.radius(),
                other.center_xy(),
                other.radius(),
            );
            starts.extend(
                approaches
                    .iter()
                    .map(|(q1, q2)| (self.path_length_xy(q1), other.path_length_xy(q2))),
            );
        }

        starts
            .into_iter()
            .map(|(s1, s2)| self.refine_pair(other, s1, s2))
            .min_by(|a, b| {
                self.separation(other, *a)
                    .total_cmp(&self.separation(other, *b))
            })
            .unwrap_or(linear)
    }

    fn moved_to(&self, s: f64) -> Self {
        if s == 0.0 {
            return self.clone();
        }
        Self {
            origin: self.at(s),
            momentum: self.momentum_at(s),
            phase: self.phase_at(s),
            ..self.clone()
        }
    }
}

fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Transverse points where two circles intersect, or where they come
/// closest when they do not intersect.
fn circle_approach_points(
    c1: Vector2<f64>,
    r1: f64,
    c2: Vector2<f64>,
    r2: f64,
) -> Vec<(Vector2<f64>, Vector2<f64>)> {
    let delta = c2 - c1;
    let dist = delta.norm();
    if dist == 0.0 {
        return Vec::new();
    }
    let u = delta / dist;

    if dist <= r1 + r2 && dist >= (r1 - r2).abs() {
        let a = (r1 * r1 - r2 * r2 + dist * dist) / (2.0 * dist);
        let h = (r1 * r1 - a * a).max(0.0).sqrt();
        let base = c1 + u * a;
        let perp = Vector2::new(-u.y, u.x);
        let p = base + perp * h;
        let q = base - perp * h;
        vec![(p, p), (q, q)]
    } else if dist > r1 + r2 {
        vec![(c1 + u * r1, c2 - u * r2)]
    } else if r1 > r2 {
        vec![(c1 + u * r1, c2 + u * r2)]
    } else {
        vec![(c1 - u * r1, c2 - u * r2)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helix(p: [f64; 3], o: [f64; 3], b: f64, q: f64) -> Helix {
        Helix::new(Vector3::from(p), Vector3::from(o), b, q).unwrap()
    }

    #[test]
    fn curvature_follows_field_and_transverse_momentum() {
        let h = helix([0.6, 0.8, 0.5], [0.0, 0.0, 0.0], 5.0, 1.0);
        assert!((h.curvature() - CURVATURE_CONSTANT * 5.0).abs() < 1e-15);
        assert_eq!(h.helicity(), -1.0);

        let negative = helix([0.6, 0.8, 0.5], [0.0, 0.0, 0.0], 5.0, -1.0);
        assert_eq!(negative.helicity(), 1.0);
    }

    #[test]
    fn positive_track_turns_clockwise_in_positive_field() {
        let h = helix([1.0, 0.0, 0.0], [0.0, 0.0, 0.0], 5.0, 1.0);
        let r = h.radius();

        let half_turn = h.at(PI * r);
        assert!((half_turn - Vector3::new(0.0, -2.0 * r, 0.0)).norm() < 1e-6);

        let p = h.momentum_at(PI * r);
        assert!((p - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-9);

        assert!(h.at(1.0).y < 0.0);
    }

    #[test]
    fn points_stay_on_transverse_circle() {
        let h = helix([0.3, -0.4, 0.2], [1.0, 2.0, -3.0], -4.98, 1.0);
        let c = h.center_xy();
        for s in [-50.0, -3.0, 0.0, 12.5, 200.0] {
            let p = h.at(s);
            assert!(((p.xy() - c).norm() - h.radius()).abs() < 1e-6);
        }
    }

    #[test]
    fn momentum_magnitude_and_pz_are_conserved() {
        let h = helix([0.3, -0.4, 0.2], [0.0, 0.0, 0.0], -4.98, -1.0);
        let p0 = h.momentum_at(0.0);
        let p1 = h.momentum_at(137.0);
        assert!((p0.norm() - p1.norm()).abs() < 1e-12);
        assert!((p0.z - p1.z).abs() < 1e-12);
        assert!((p0 - Vector3::new(0.3, -0.4, 0.2)).norm() < 1e-12);
    }

    #[test]
    fn path_length_to_point_on_helix() {
        let h = helix([0.5, 0.2, 0.3], [0.0, 0.0, 0.0], 5.0, -1.0);
        let target = h.at(25.0);
        assert!((h.path_length_to(&target) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn path_length_to_point_off_helix_along_normal() {
        let h = helix([0.5, 0.2, 0.0], [0.0, 0.0, 0.0], 5.0, 1.0);
        let normal = h.direction_derivative_at(25.0).normalize();
        let target = h.at(25.0) + normal * 0.5;
        assert!((h.path_length_to(&target) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn path_length_to_point_behind_origin() {
        let h = helix([0.5, 0.2, 0.3], [0.0, 0.0, 0.0], 5.0, 1.0);
        let target = h.at(-40.0);
        assert!((h.path_length_to(&target) + 40.0).abs() < 1e-6);
    }

    #[test]
    fn moved_helix_describes_the_same_curve() {
        let h = helix([0.5, 0.2, 0.3], [0.1, -0.1, 2.0], 5.0, 1.0);
        let moved = h.moved_to(30.0);
        assert!((moved.origin() - h.at(30.0)).norm() < 1e-12);
        for s in [-10.0, 0.0, 15.0] {
            assert!((moved.at(s) - h.at(30.0 + s)).norm() < 1e-9);
            assert!((moved.momentum_at(s) - h.momentum_at(30.0 + s)).norm() < 1e-9);
        }
    }

    #[test]
    fn crossing_helices_meet_at_their_intersection() {
        let h1 = helix([1.0, 0.0, 0.2], [0.0, 0.0, 0.0], 5.0, 1.0);
        let crossing = h1.at(10.0);
        let h2 = helix(
            [0.3, 0.8, -0.1],
            [crossing.x, crossing.y, crossing.z],
            5.0,
            -1.0,
        )
        .moved_to(-8.0);

        let (s1, s2) = h1.path_lengths(&h2);
        assert!((h1.at(s1) - h2.at(s2)).norm() < 1e-5);
        assert!((h1.at(s1) - crossing).norm() < 1e-4);
    }

    #[test]
    fn helix_solve_is_close_to_straight_line_solve_for_stiff_tracks() {
        let h1 = helix([3.0, 1.0, 0.5], [0.0, 0.0, 0.0], 5.0, 1.0);
        let h2 = helix([2.0, -1.5, 0.2], [0.0, 0.1, 0.05], 5.0, -1.0);

        let (s1, s2) = h1.path_lengths(&h2);
        let curved = (h1.at(s1) - h2.at(s2)).norm();

        let l1 = h1.straight_line();
        let l2 = h2.straight_line();
        let (t1, t2) = l1.path_lengths(&l2);
        let straight = (l1.at(t1) - l2.at(t2)).norm();

        assert!((curved - straight).abs() < 1e-3);
    }

    #[test]
    fn zero_field_helix_matches_straight_line() {
        let h = helix([0.0, 1.0, 1.0], [1.0, 0.0, 0.0], 0.0, 1.0);
        let l = h.straight_line();
        assert!(h.is_straight());
        for s in [-2.0, 0.0, 7.5] {
            assert!((h.at(s) - l.at(s)).norm() < 1e-12);
        }
        assert_eq!(h.momentum_at(100.0), Vector3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let zero = Helix::new(Vector3::zeros(), Vector3::zeros(), 5.0, 1.0);
        assert_eq!(zero.unwrap_err(), GeometryError::ZeroMomentum);

        let along_z = Helix::new(Vector3::new(0.0, 0.0, 1.0), Vector3::zeros(), 5.0, 1.0);
        assert!(matches!(
            along_z.unwrap_err(),
            GeometryError::InfiniteCurvature { .. }
        ));

        let nan = Helix::new(Vector3::new(f64::NAN, 0.0, 1.0), Vector3::zeros(), 5.0, 1.0);
        assert_eq!(nan.unwrap_err(), GeometryError::NonFinite("momentum"));
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-15);
    }
}
