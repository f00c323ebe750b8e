//! Configuration for topology construction.

use crate::geometry::SolverOptions;

/// Trajectory representation used for the pair closest-approach solve.
///
/// Both choices fill the same fields; the helix solve is exact and
/// iterative, the straight-line solve is closed form and cheaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosestApproach {
    /// Zero-curvature approximations at the re-based origins.
    #[default]
    StraightLine,

    /// Exact helices.
    Helix,
}

/// Settings shared by pair and triplet construction.
///
/// # Examples
///
/// ```
/// use hf_vertex::{ClosestApproach, TopologyConfig};
///
/// let exact = TopologyConfig {
///     closest_approach: ClosestApproach::Helix,
///     ..Default::default()
/// };
/// assert_eq!(exact.solver.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyConfig {
    /// Representation used to solve the first pair's closest approach.
    pub closest_approach: ClosestApproach,

    /// Iterative solver settings for exact helices.
    pub solver: SolverOptions,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            closest_approach: ClosestApproach::StraightLine,
            solver: SolverOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = TopologyConfig::default();
        assert_eq!(config.closest_approach, ClosestApproach::StraightLine);
        assert_eq!(config.solver.tolerance, 1e-6);
        assert_eq!(config.solver.max_iterations, 100);
    }

    #[test]
    fn closest_approach_default() {
        assert_eq!(ClosestApproach::default(), ClosestApproach::StraightLine);
    }
}
