//! Error types for pair and triplet construction.
//!
//! Most track combinations in a dense event are not decays, so rejection is
//! the common outcome and carries no logging. Only a pair that lost its
//! cached trajectories is a contract violation.

use thiserror::Error;

use crate::geometry::GeometryError;

/// Why a track combination is not a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A participant track or pair is absent.
    #[error("a participant is missing")]
    MissingParticipant,

    /// The same track-collection index appears twice.
    #[error("track index {0} is used twice")]
    DuplicateIndex(u16),

    /// The same track identity appears twice.
    #[error("track id {0} is used twice")]
    DuplicateTrack(i32),

    /// A persisted record carries the invalid-index sentinel.
    #[error("record is marked invalid")]
    InvalidRecord,
}

/// Errors raised while building a [`ClosePair`](super::ClosePair) or a
/// [`Triplet`](super::Triplet).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The tracks do not form a candidate.
    #[error("not a candidate: {0}")]
    InvalidCombination(#[from] Rejection),

    /// A track's trajectory could not be constructed.
    #[error("degenerate track geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// A close pair lacks the cached trajectories a triplet needs.
    ///
    /// Pairs restored from a persisted record carry no trajectories.
    #[error("close pair ({particle1_idx}, {particle2_idx}) has no cached {what}")]
    MissingGeometry {
        /// Which cached trajectories are missing.
        what: &'static str,
        /// Index of the pair's first track.
        particle1_idx: u16,
        /// Index of the pair's second track.
        particle2_idx: u16,
    },
}

impl Error {
    /// Returns `true` for the expected "not a candidate" outcomes, `false`
    /// for contract violations.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Error::MissingGeometry { .. })
    }

    /// Creates a [`MissingGeometry`](Error::MissingGeometry) error.
    pub fn missing_geometry(what: &'static str, particle1_idx: u16, particle2_idx: u16) -> Self {
        Self::MissingGeometry {
            what,
            particle1_idx,
            particle2_idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_tiers() {
        assert!(Error::from(Rejection::DuplicateIndex(3)).is_rejection());
        assert!(Error::from(GeometryError::ZeroMomentum).is_rejection());
        assert!(!Error::missing_geometry("helices", 1, 2).is_rejection());
    }

    #[test]
    fn messages() {
        let err = Error::from(Rejection::DuplicateTrack(42));
        assert_eq!(err.to_string(), "not a candidate: track id 42 is used twice");

        let err = Error::missing_geometry("straight lines", 4, 9);
        assert_eq!(err.to_string(), "close pair (4, 9) has no cached straight lines");
    }
}
