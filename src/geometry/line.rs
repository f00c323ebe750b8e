use nalgebra::Vector3;

use super::{GeometryError, Trajectory, line_path_lengths};

/// Zero-curvature trajectory through `origin` along `momentum`.
///
/// Path length is the distance travelled along the unit direction.
#[derive(Debug, Clone, PartialEq)]
pub struct StraightLine {
    origin: Vector3<f64>,
    momentum: Vector3<f64>,
    direction: Vector3<f64>,
    charge: f64,
}

impl StraightLine {
    pub fn new(
        momentum: Vector3<f64>,
        origin: Vector3<f64>,
        charge: f64,
    ) -> Result<Self, GeometryError> {
        if !momentum.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("momentum"));
        }
        if !origin.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("origin"));
        }
        let p = momentum.norm();
        if p == 0.0 {
            return Err(GeometryError::ZeroMomentum);
        }

        Ok(Self {
            origin,
            momentum,
            direction: momentum / p,
            charge,
        })
    }

    /// Builds a line from an already validated, non-zero momentum.
    pub(super) fn from_validated(momentum: Vector3<f64>, origin: Vector3<f64>, charge: f64) -> Self {
        Self {
            origin,
            momentum,
            direction: momentum.normalize(),
            charge,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }
}

impl Trajectory for StraightLine {
    fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    fn at(&self, s: f64) -> Vector3<f64> {
        self.origin + self.direction * s
    }

    fn momentum_at(&self, _s: f64) -> Vector3<f64> {
        self.momentum
    }

    fn path_length_to(&self, point: &Vector3<f64>) -> f64 {
        (point - self.origin).dot(&self.direction)
    }

    fn path_lengths(&self, other: &Self) -> (f64, f64) {
        line_path_lengths(
            &self.origin,
            &self.direction,
            &other.origin,
            &other.direction,
        )
    }

    fn moved_to(&self, s: f64) -> Self {
        Self {
            origin: self.at(s),
            ..self.clone()
        }
    }
}
