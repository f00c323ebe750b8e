use thiserror::Error;

/// Errors raised while building a trajectory from track parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// An input component is NaN or infinite.
    #[error("non-finite {0} in trajectory input")]
    NonFinite(&'static str),

    /// The momentum vector has zero length, so no direction can be defined.
    #[error("trajectory momentum has zero magnitude")]
    ZeroMomentum,

    /// A charged track without transverse momentum in a non-zero field.
    #[error("infinite curvature: charge {charge} in field {b_field} kG with zero transverse momentum")]
    InfiniteCurvature {
        /// Track charge in units of e.
        charge: f64,
        /// Field strength in kilogauss.
        b_field: f64,
    },
}
