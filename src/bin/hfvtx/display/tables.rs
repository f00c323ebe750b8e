use std::io::{self, Write};

use hf_vertex::{Candidates, Event};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

/// Candidate counts accumulated over all events of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSummary {
    pub events: usize,
    pub attempted: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
    pub busiest_event: Option<(usize, usize)>,
}

impl CandidateSummary {
    pub fn add<T>(&mut self, event: usize, candidates: &Candidates<T>) {
        let accepted = candidates.accepted.len();
        self.events += 1;
        self.attempted += candidates.attempted();
        self.accepted += accepted;
        self.rejected += candidates.rejected;
        self.failed += candidates.failed;

        if accepted > 0 && self.busiest_event.is_none_or(|(_, n)| accepted > n) {
            self.busiest_event = Some((event, accepted));
        }
    }

    fn acceptance(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            100.0 * self.accepted as f64 / self.attempted as f64
        }
    }
}

pub fn print_event_summary(events: &[Event]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let tracks: usize = events.iter().map(Event::track_count).sum();
    let max_tracks = events.iter().map(Event::track_count).max().unwrap_or(0);

    let mut rows = vec![
        ("Events", format!("{}", events.len())),
        ("Tracks", format!("{}", tracks)),
        ("Max per event", format!("{}", max_tracks)),
    ];

    if let Some((lo, hi)) = field_range(events) {
        let field = if lo == hi {
            format!("{:.3} kG", lo)
        } else {
            format!("{:.3} … {:.3} kG", lo, hi)
        };
        rows.push(("Field", field));
    }

    print_kv_table(&mut out, "Event Summary", &rows);
}

pub fn print_candidate_summary(title: &str, summary: &CandidateSummary) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![
        ("Combinations", format!("{}", summary.attempted)),
        (
            "Accepted",
            format!("{} ({:.1}%)", summary.accepted, summary.acceptance()),
        ),
        ("Rejected", format!("{}", summary.rejected)),
    ];
    if summary.failed > 0 {
        rows.push(("Failed", format!("{}", summary.failed)));
    }
    if let Some((event, n)) = summary.busiest_event {
        rows.push(("Busiest event", format!("#{} ({} accepted)", event, n)));
    }

    print_kv_table(&mut out, title, &rows);
}

fn field_range(events: &[Event]) -> Option<(f64, f64)> {
    events.iter().map(|e| e.b_field).fold(None, |acc, b| match acc {
        None => Some((b, b)),
        Some((lo, hi)) => Some((lo.min(b), hi.max(b))),
    })
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);
    let k_line = "─".repeat(key_w + 2);
    let v_line = "─".repeat(val_w + 2);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}┌{}┬{}┐", INDENT, k_line, v_line);
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value"
    );
    let _ = writeln!(out, "{}├{}┼{}┤", INDENT, k_line, v_line);

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(out, "{}└{}┴{}┘", INDENT, k_line, v_line);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(accepted: usize, rejected: usize) -> Candidates<()> {
        Candidates {
            accepted: vec![(); accepted],
            rejected,
            failed: 0,
        }
    }

    #[test]
    fn summary_accumulates_over_events() {
        let mut summary = CandidateSummary::default();
        summary.add(0, &candidates(2, 3));
        summary.add(1, &candidates(0, 4));
        summary.add(2, &candidates(5, 0));

        assert_eq!(summary.events, 3);
        assert_eq!(summary.attempted, 14);
        assert_eq!(summary.accepted, 7);
        assert_eq!(summary.rejected, 7);
        assert_eq!(summary.busiest_event, Some((2, 5)));
        assert!((summary.acceptance() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn empty_summary_has_zero_acceptance() {
        assert_eq!(CandidateSummary::default().acceptance(), 0.0);
    }

    #[test]
    fn field_range_spans_all_events() {
        let events = [-4.98, 0.0, 4.98].map(|b_field| Event {
            b_field,
            ..Default::default()
        });
        assert_eq!(field_range(&events), Some((-4.98, 4.98)));
        assert_eq!(field_range(&[]), None);
    }

    #[test]
    fn kv_table_lines_share_width() {
        let mut out = Vec::new();
        print_kv_table(&mut out, "Title", &[("Key", "value".to_string())]);
        let text = String::from_utf8(out).unwrap();
        let widths: Vec<usize> = text.lines().skip(1).map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
