//! Secondary decay-vertex topology for heavy-flavour candidates reconstructed
//! from charged-particle tracks.
//!
//! Each track is modelled as a helix in a uniform axial magnetic field. Two
//! tracks form a [`ClosePair`] at their point of closest approach; a third
//! track extends the pair into a [`Triplet`], whose decay vertex, combined
//! four-momentum and topological discriminators (pointing angle, decay
//! length, daughter DCAs) feed a candidate selection.
//!
//! # Features
//!
//! - **Trajectories** — [`Helix`] and [`StraightLine`] behind one
//!   [`Trajectory`] trait, with point and trajectory closest-approach solves
//! - **Pairs and triplets** — validated construction returning `Result`, with
//!   rejections kept apart from contract violations
//! - **Combinatorics** — [`pairs`] and [`triplets`] enumerate an event's tracks
//!   for a set of mass hypotheses
//! - **Flat records** — [`ClosePairRecord`] and [`TripletRecord`] for
//!   persistence, using the [`INVALID_INDEX`] sentinel for rejected entries
//! - **I/O** — TOML event files in, tab-separated candidate tables out
//!
//! # Units
//!
//! Lengths are in cm, momenta in GeV/c, masses and energies in GeV and the
//! field in kilogauss.
//!
//! # Quick Start
//!
//! ```
//! use hf_vertex::{Daughter, EventContext, Species, TopologyConfig, Track, Triplet};
//! use hf_vertex::TopologyError;
//!
//! // Three tracks that pass exactly through (0, 0, 10) in a field-free event.
//! let through = |p: [f64; 3]| {
//!     let n = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
//!     [-p[0] / n, -p[1] / n, 10.0 - p[2] / n]
//! };
//! let momenta = [[0.9, 0.1, 1.5], [-0.4, 0.8, 1.1], [-0.3, -0.7, 2.0]];
//! let tracks: Vec<Track> = momenta
//!     .iter()
//!     .enumerate()
//!     .map(|(i, p)| Track::new(i as i32 + 1, 1, *p, through(*p)))
//!     .collect();
//!
//! let event = EventContext::new([0.0, 0.0, 0.0], 0.0);
//! let config = TopologyConfig::default();
//!
//! let triplet = Triplet::new(
//!     Some(Daughter::new(&tracks[0], 0, Species::Kaon.mass())),
//!     Some(Daughter::new(&tracks[1], 1, Species::Pion.mass())),
//!     Some(Daughter::new(&tracks[2], 2, Species::Pion.mass())),
//!     &event,
//!     &config,
//! )?;
//!
//! assert!((triplet.v0z() - 10.0).abs() < 1e-9);
//! assert!(triplet.max_vertex_spread() < 1e-9);
//! assert!((triplet.decay_length() - 10.0).abs() < 1e-9);
//! assert!(triplet.m() > Species::Kaon.mass() + 2.0 * Species::Pion.mass());
//! # Ok::<(), TopologyError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Event file reading and candidate table writing
//! - [`pairs`] / [`triplets`] — Candidate enumeration over one event
//!
//! # Data Types
//!
//! ## Inputs
//!
//! - [`Track`] — Charge, momentum and first point of a reconstructed track
//! - [`Event`] — Primary vertex, field and track collection of one event
//! - [`EventContext`] — Primary vertex and field shared by all candidates
//! - [`Daughter`] — A track with its collection index and mass hypothesis
//! - [`Species`] — Common daughter species and their masses
//!
//! ## Geometry
//!
//! - [`Helix`] — Charged-track trajectory in an axial field
//! - [`StraightLine`] — Tangent-line approximation of a track
//! - [`SolverOptions`] — Tolerance and iteration cap of helix solves
//!
//! ## Candidates
//!
//! - [`ClosePair`] — Two tracks at their closest approach
//! - [`Triplet`] — Three-track decay vertex and four-momentum
//! - [`LorentzVector`] — Energy-momentum four-vector
//! - [`Candidates`] — Accepted candidates with rejection counts
//!
//! ## Configuration
//!
//! - [`TopologyConfig`] — Closest-approach mode and solver settings
//! - [`ClosestApproach`] — Straight-line or helix pair solve

mod geometry;
mod model;
mod topology;

pub mod io;

pub use model::event::{Event, EventContext};
pub use model::lorentz::{BEAM_AXIS_ETA, LorentzVector};
pub use model::track::Track;
pub use model::types::{ParseSpeciesError, Species};

pub use geometry::{
    CURVATURE_CONSTANT, GeometryError, Helix, SolverOptions, StraightLine, Trajectory,
};

pub use topology::{
    Candidates, ClosePair, ClosePairRecord, ClosestApproach, Daughter, INVALID_INDEX, Rejection,
    TopologyConfig, Triplet, TripletRecord, pairs, triplets,
};

pub use topology::Error as TopologyError;
