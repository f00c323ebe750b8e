use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<&'static str> {
    use hf_vertex::io::Error as IoError;

    match err.downcast_ref::<IoError>() {
        Some(IoError::Io { source }) => std_io_hints(source.kind()),
        Some(IoError::Parse { .. }) => vec![
            "Inspect the event file around the reported line",
            "Each [[events]] entry needs vertex = [x, y, z] and b_field",
            "Each [[events.tracks]] entry needs id, charge, momentum and origin",
        ],
        Some(IoError::InvalidEvent { .. }) => vec![
            "Primary vertex coordinates and field must be finite numbers",
            "Events are numbered from 0 in file order",
        ],
        None => fallback_hints(err),
    }
}

fn std_io_hints(kind: io::ErrorKind) -> Vec<&'static str> {
    use io::ErrorKind;

    match kind {
        ErrorKind::NotFound => vec![
            "File or directory not found",
            "Check the path spelling and ensure the file exists",
        ],
        ErrorKind::PermissionDenied => vec![
            "Permission denied accessing the file",
            "Ensure you have read/write access as needed",
        ],
        ErrorKind::InvalidData => vec![
            "Input is not valid UTF-8 text",
            "Event files must be TOML documents",
        ],
        ErrorKind::BrokenPipe => vec![
            "Output consumer terminated early",
            "This may occur when piping to commands like `head`",
        ],
        _ => vec!["Check file path, permissions, and disk space"],
    }
}

fn fallback_hints(err: &Error) -> Vec<&'static str> {
    let text = err
        .chain()
        .map(|cause| cause.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    if text.contains("stdin is a terminal") {
        vec!["Provide events via -i/--input or pipe a TOML file to stdin"]
    } else if text.contains("mass hypotheses") {
        vec![
            "Pass one species per daughter, e.g. --masses kaon,pion,pion",
            "Known species: electron, muon, pion, kaon, proton, deuteron",
        ]
    } else if text.contains("solver") {
        vec!["The defaults --solver-tolerance 1e-6 --solver-max-iter 100 suit most events"]
    } else {
        Vec::new()
    }
}
