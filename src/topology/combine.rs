//! Candidate enumeration over one event's track collection.

use tracing::{debug, warn};

use super::config::TopologyConfig;
use super::error::Error;
use super::pair::ClosePair;
use super::record::INVALID_INDEX;
use super::triplet::Triplet;
use super::Daughter;
use crate::model::event::{Event, EventContext};
use crate::model::track::Track;

/// Outcome of enumerating one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidates<T> {
    /// Candidates that were built.
    pub accepted: Vec<T>,
    /// Combinations that were not candidates.
    pub rejected: usize,
    /// Combinations aborted by a contract violation.
    pub failed: usize,
}

impl<T> Default for Candidates<T> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: 0,
            failed: 0,
        }
    }
}

impl<T> Candidates<T> {
    /// Number of combinations evaluated.
    pub fn attempted(&self) -> usize {
        self.accepted.len() + self.rejected + self.failed
    }

    /// Contract violations are logged where they are raised, so this only
    /// counts them.
    fn record(&mut self, result: Result<T, Error>) {
        match result {
            Ok(candidate) => self.accepted.push(candidate),
            Err(e) if e.is_rejection() => self.rejected += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Builds every two-track candidate of `event` for the role masses
/// `[m1, m2]`.
///
/// Tracks are assigned to roles in every order; when both roles carry the
/// same mass only the index-ordered assignment is kept.
pub fn pairs(event: &Event, masses: [f64; 2], config: &TopologyConfig) -> Candidates<ClosePair> {
    let context = event.context();
    let tracks = indexed_tracks(event);
    let mut out = Candidates::default();

    for &(i, t1) in &tracks {
        for &(j, t2) in &tracks {
            if !ordered(i, j, masses[0], masses[1]) {
                continue;
            }
            out.record(build_pair(t1, i, t2, j, masses, &context, config));
        }
    }

    debug!(
        accepted = out.accepted.len(),
        rejected = out.rejected,
        failed = out.failed,
        "pair enumeration finished"
    );
    out
}

/// Builds every three-track candidate of `event` for the role masses
/// `[m1, m2, m3]`.
///
/// Each (1,2) pair is constructed once and extended with every eligible
/// third track. Roles sharing a mass hypothesis are index-ordered, so three
/// equal masses enumerate `i < j < k`.
pub fn triplets(event: &Event, masses: [f64; 3], config: &TopologyConfig) -> Candidates<Triplet> {
    let context = event.context();
    let tracks = indexed_tracks(event);
    let mut out = Candidates::default();

    for &(i, t1) in &tracks {
        for &(j, t2) in &tracks {
            if !ordered(i, j, masses[0], masses[1]) {
                continue;
            }
            let pair = build_pair(t1, i, t2, j, [masses[0], masses[1]], &context, config);

            for &(k, t3) in &tracks {
                if k == i
                    || k == j
                    || !ordered(i, k, masses[0], masses[2])
                    || !ordered(j, k, masses[1], masses[2])
                {
                    continue;
                }
                // A failed pair fails every combination built on it.
                let triplet = match &pair {
                    Ok(pair) => {
                        let d3 = Daughter::new(t3, k, masses[2]);
                        Triplet::from_pair(Some(pair), Some(d3), &context, config)
                    }
                    Err(e) => Err(e.clone()),
                };
                out.record(triplet);
            }
        }
    }

    debug!(
        accepted = out.accepted.len(),
        rejected = out.rejected,
        failed = out.failed,
        "triplet enumeration finished"
    );
    out
}

fn build_pair(
    t1: &Track,
    i: u16,
    t2: &Track,
    j: u16,
    masses: [f64; 2],
    context: &EventContext,
    config: &TopologyConfig,
) -> Result<ClosePair, Error> {
    ClosePair::new(
        Some(Daughter::new(t1, i, masses[0])),
        Some(Daughter::new(t2, j, masses[1])),
        context,
        config,
    )
}

/// Whether tracks `a` and `b` may fill roles with masses `ma` and `mb`.
fn ordered(a: u16, b: u16, ma: f64, mb: f64) -> bool {
    if a == b {
        return false;
    }
    ma != mb || a < b
}

fn indexed_tracks(event: &Event) -> Vec<(u16, &Track)> {
    if event.tracks.len() > usize::from(INVALID_INDEX) {
        warn!(
            tracks = event.tracks.len(),
            limit = INVALID_INDEX,
            "event has more tracks than can be indexed; ignoring the rest"
        );
    }
    (0..INVALID_INDEX).zip(event.tracks.iter()).collect()
}
