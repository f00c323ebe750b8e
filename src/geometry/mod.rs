//! Charged-particle trajectories in a uniform magnetic field along z.
//!
//! Two representations implement the common [`Trajectory`] capability:
//!
//! - [`Helix`]: the exact path of a charged particle, parametrized by 3D arc
//!   length. Closest-approach solves are iterative.
//! - [`StraightLine`]: a zero-curvature stand-in sharing the origin and
//!   momentum of a helix. Closest-approach solves are closed form.
//!
//! Callers pick the representation per call site; both answer the same
//! questions with the same units (cm, GeV/c, kilogauss).

mod error;
mod helix;
mod line;

pub use error::GeometryError;
pub use helix::Helix;
pub use line::StraightLine;

use nalgebra::Vector3;

/// Curvature constant: `κ [1/cm] = C · |q · B [kG]| / pT [GeV/c]`.
pub const CURVATURE_CONSTANT: f64 = 2.997_924_58e-4;

/// Capability shared by every trajectory representation.
pub trait Trajectory: Sized {
    /// Position at path length zero.
    fn origin(&self) -> Vector3<f64>;

    /// Position at path length `s`.
    fn at(&self, s: f64) -> Vector3<f64>;

    /// Momentum at path length `s`.
    fn momentum_at(&self, s: f64) -> Vector3<f64>;

    /// Path length of the point on the trajectory closest to `point`.
    fn path_length_to(&self, point: &Vector3<f64>) -> f64;

    /// Path lengths `(s_self, s_other)` at which the two trajectories pass
    /// closest to each other.
    fn path_lengths(&self, other: &Self) -> (f64, f64);

    /// The same trajectory re-based so that path length `s` becomes its origin.
    fn moved_to(&self, s: f64) -> Self;
}

/// Settings for the iterative helix solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Convergence threshold on the path-length update, in cm.
    pub tolerance: f64,
    /// Maximum Newton iterations per solve.
    pub max_iterations: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// Closest-approach path lengths of two straight lines `o + s·t` with unit
/// directions. Parallel lines project the first origin onto the second line.
pub(crate) fn line_path_lengths(
    o1: &Vector3<f64>,
    t1: &Vector3<f64>,
    o2: &Vector3<f64>,
    t2: &Vector3<f64>,
) -> (f64, f64) {
    let w = o1 - o2;
    let b = t1.dot(t2);
    let d = t1.dot(&w);
    let e = t2.dot(&w);
    let denom = 1.0 - b * b;

    if denom < 1e-12 {
        return (0.0, e);
    }

    ((b * e - d) / denom, (e - b * d) / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skew_lines_closest_points() {
        let o1 = Vector3::new(0.0, 0.0, 0.0);
        let t1 = Vector3::new(1.0, 0.0, 0.0);
        let o2 = Vector3::new(3.0, -2.0, 1.0);
        let t2 = Vector3::new(0.0, 1.0, 0.0);

        let (s1, s2) = line_path_lengths(&o1, &t1, &o2, &t2);
        assert!((s1 - 3.0).abs() < 1e-12);
        assert!((s2 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_lines_project_first_origin() {
        let o1 = Vector3::new(1.0, 1.0, 0.0);
        let t = Vector3::new(0.0, 0.0, 1.0);
        let o2 = Vector3::new(0.0, 0.0, -4.0);

        let (s1, s2) = line_path_lengths(&o1, &t, &o2, &t);
        assert_eq!(s1, 0.0);
        assert!((s2 - 4.0).abs() < 1e-12);
    }
}
