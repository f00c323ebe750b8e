//! Core data structures flowing into and out of the vertex reconstruction.
//!
//! - [`track`] – Charged-particle track as delivered by the reconstruction.
//! - [`event`] – Per-event context: primary vertex and magnetic field.
//! - [`lorentz`] – Energy-momentum four-vectors used for candidate kinematics.
//! - [`types`] – Common mass hypotheses for daughter species.
//!
//! Tracks are raw input; the [`crate::topology`] module turns combinations of
//! them into pair and triplet candidates.

pub mod event;
pub mod lorentz;
pub mod track;
pub mod types;
