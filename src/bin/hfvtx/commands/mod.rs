mod pairs;
mod triplets;

use pairs::run_pairs;
use triplets::run_triplets;

use anyhow::{Context, Result, bail};
use hf_vertex::Event;
use hf_vertex::io::read_events;

use crate::cli::{Command, IoOptions};
use crate::display::Context as DisplayContext;
use crate::io::{open_input, stdin_is_tty};

pub fn dispatch(command: Command, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Triplets(args) => run_triplets(args, ctx),
        Command::Pairs(args) => run_pairs(args, ctx),
    }
}

fn ensure_input(io: &IoOptions, command: &str) -> Result<()> {
    if io.input.is_none() && stdin_is_tty() {
        bail!(
            "No event file specified and stdin is a terminal.\n\nUsage: hfvtx {} -i <EVENTS.toml> or pipe events via stdin.",
            command
        );
    }
    Ok(())
}

fn read_input(io: &IoOptions) -> Result<Vec<Event>> {
    let reader = open_input(io.input.as_deref())?;
    let events = read_events(reader).context("Failed to read events")?;
    Ok(events)
}

fn read_details(io: &IoOptions, events: &[Event]) -> Vec<String> {
    let source = io
        .input
        .as_ref()
        .map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    let tracks: usize = events.iter().map(Event::track_count).sum();

    vec![
        format!("Parse TOML events from {}", source),
        format!("{} events, {} tracks", events.len(), tracks),
    ]
}

fn write_details(io: &IoOptions, rows: usize) -> Vec<String> {
    let target = io
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());

    vec![format!("{} rows to {}", rows, target)]
}
