use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryError, Helix};

/// A reconstructed charged-particle track.
///
/// The momentum is the global momentum at `origin`, the first point of the
/// track used to seed its helix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: i32,
    pub charge: i8,
    pub momentum: [f64; 3],
    pub origin: [f64; 3],
}

impl Track {
    pub fn new(id: i32, charge: i8, momentum: [f64; 3], origin: [f64; 3]) -> Self {
        Self {
            id,
            charge,
            momentum,
            origin,
        }
    }

    #[inline]
    pub fn momentum_vector(&self) -> Vector3<f64> {
        Vector3::from(self.momentum)
    }

    #[inline]
    pub fn origin_vector(&self) -> Vector3<f64> {
        Vector3::from(self.origin)
    }

    /// Builds the track's helix in a field of `b_field` kilogauss.
    pub fn helix(&self, b_field: f64) -> Result<Helix, GeometryError> {
        Helix::new(
            self.momentum_vector(),
            self.origin_vector(),
            b_field,
            f64::from(self.charge),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Trajectory;

    #[test]
    fn helix_starts_at_track_origin() {
        let track = Track::new(7, -1, [0.4, 0.3, 0.1], [0.1, -0.2, 3.0]);
        let helix = track.helix(-4.98).unwrap();

        assert!((helix.origin() - track.origin_vector()).norm() < 1e-12);
        assert!((helix.momentum_at(0.0) - track.momentum_vector()).norm() < 1e-9);
    }

    #[test]
    fn neutral_track_in_field_is_straight() {
        let track = Track::new(1, 0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let helix = track.helix(5.0).unwrap();
        assert_eq!(helix.curvature(), 0.0);
    }

    #[test]
    fn zero_momentum_track_cannot_build_helix() {
        let track = Track::new(1, 1, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        assert!(track.helix(5.0).is_err());
    }
}
