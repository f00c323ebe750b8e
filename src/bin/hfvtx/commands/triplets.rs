use anyhow::{Context, Result};
use hf_vertex::io::write_triplets;
use hf_vertex::{Triplet, TripletRecord, triplets};

use super::{ensure_input, read_details, read_input, write_details};
use crate::cli::TripletArgs;
use crate::config::{build_topology_config, resolve_masses, species_list};
use crate::display::{
    CandidateSummary, Context as DisplayContext, Progress, print_candidate_summary,
    print_event_summary,
};
use crate::io::create_output;

const TOTAL_STEPS: u8 = 3;

pub fn run_triplets(args: TripletArgs, ctx: DisplayContext) -> Result<()> {
    ensure_input(&args.io, "triplets")?;

    let masses = resolve_masses::<3>(&args.masses)?;
    let config = build_topology_config(&args.topology)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading events");
    let events = read_input(&args.io)?;
    progress.complete_step("Reading events", &read_details(&args.io, &events));

    if ctx.interactive {
        print_event_summary(&events);
    }

    progress.step("Building triplet candidates");
    let mut summary = CandidateSummary::default();
    let mut records: Vec<Vec<TripletRecord>> = Vec::with_capacity(events.len());
    for (n, event) in events.iter().enumerate() {
        let candidates = triplets(event, masses, &config);
        summary.add(n, &candidates);
        records.push(candidates.accepted.iter().map(Triplet::record).collect());
    }
    progress.complete_step(
        "Building triplet candidates",
        &[
            format!("Mass hypotheses: {}", species_list(&args.masses)),
            format!("Closest approach: {:?}", config.closest_approach),
        ],
    );

    if ctx.interactive {
        print_candidate_summary("Triplet Candidates", &summary);
    }

    progress.step("Writing table");
    let output = create_output(args.io.output.as_deref())?;
    write_triplets(output, &records).context("Failed to write triplet table")?;
    progress.complete_step("Writing table", &write_details(&args.io, summary.accepted));

    progress.finish();

    Ok(())
}
