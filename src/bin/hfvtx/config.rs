use anyhow::{Result, bail};
use hf_vertex::{ClosestApproach, SolverOptions, Species, TopologyConfig};

use crate::cli::{ApproachMode, TopologyOptions};

impl From<ApproachMode> for ClosestApproach {
    fn from(mode: ApproachMode) -> Self {
        match mode {
            ApproachMode::StraightLine => ClosestApproach::StraightLine,
            ApproachMode::Helix => ClosestApproach::Helix,
        }
    }
}

pub fn build_topology_config(opts: &TopologyOptions) -> Result<TopologyConfig> {
    if !(opts.tolerance.is_finite() && opts.tolerance > 0.0) {
        bail!(
            "Solver tolerance must be a positive length, got {}",
            opts.tolerance
        );
    }
    if opts.max_iterations == 0 {
        bail!("Solver iteration cap must be at least 1");
    }

    Ok(TopologyConfig {
        closest_approach: opts.closest_approach.into(),
        solver: SolverOptions {
            tolerance: opts.tolerance,
            max_iterations: opts.max_iterations,
        },
    })
}

/// Resolves exactly `N` species into their masses.
pub fn resolve_masses<const N: usize>(species: &[Species]) -> Result<[f64; N]> {
    let Ok(species) = <[Species; N]>::try_from(species) else {
        bail!(
            "Expected {} mass hypotheses, got {} ({})",
            N,
            species.len(),
            species_list(species)
        );
    };
    Ok(species.map(|s| s.mass()))
}

pub fn species_list(species: &[Species]) -> String {
    species
        .iter()
        .map(Species::name)
        .collect::<Vec<_>>()
        .join(", ")
}
