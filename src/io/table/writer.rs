use crate::io::error::Error;
use crate::topology::{ClosePairRecord, TripletRecord};
use std::io::Write;

const PAIR_COLUMNS: [&str; 16] = [
    "event",
    "particle1_idx",
    "particle2_idx",
    "particle1_id",
    "particle2_id",
    "mass1",
    "mass2",
    "particle1_dca",
    "particle2_dca",
    "dca_daughters",
    "p1x_at_dca",
    "p1y_at_dca",
    "p1z_at_dca",
    "p2x_at_dca",
    "p2y_at_dca",
    "p2z_at_dca",
];

const TRIPLET_COLUMNS: [&str; 24] = [
    "event",
    "particle1_idx",
    "particle2_idx",
    "particle3_idx",
    "m",
    "pt",
    "eta",
    "phi",
    "px",
    "py",
    "pz",
    "v0x",
    "v0y",
    "v0z",
    "pointing_angle",
    "decay_length",
    "dca_to_primary_vertex",
    "particle1_dca",
    "particle2_dca",
    "particle3_dca",
    "dca_daughters12",
    "dca_daughters23",
    "dca_daughters31",
    "max_vertex_spread",
];

/// Writes pair records as a tab-separated table; `events[n]` holds the
/// records of the n-th input event.
pub fn write_pairs<W: Write>(mut writer: W, events: &[Vec<ClosePairRecord>]) -> Result<(), Error> {
    writeln!(writer, "{}", PAIR_COLUMNS.join("\t"))?;

    for (event, records) in events.iter().enumerate() {
        for r in records {
            let [ax, ay, az] = r.p1_at_dca_to_p2;
            let [bx, by, bz] = r.p2_at_dca_to_p1;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                event,
                r.particle1_idx,
                r.particle2_idx,
                r.particle1_id,
                r.particle2_id,
                r.mass1,
                r.mass2,
                r.particle1_dca,
                r.particle2_dca,
                r.dca_daughters,
                ax,
                ay,
                az,
                bx,
                by,
                bz
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes triplet records as a tab-separated table; `events[n]` holds the
/// records of the n-th input event.
pub fn write_triplets<W: Write>(mut writer: W, events: &[Vec<TripletRecord>]) -> Result<(), Error> {
    writeln!(writer, "{}", TRIPLET_COLUMNS.join("\t"))?;

    for (event, records) in events.iter().enumerate() {
        for r in records {
            let values = [
                r.m,
                r.pt,
                r.eta,
                r.phi,
                r.px,
                r.py,
                r.pz,
                r.v0x,
                r.v0y,
                r.v0z,
                r.pointing_angle,
                r.decay_length,
                r.dca_to_primary_vertex,
                r.particle1_dca,
                r.particle2_dca,
                r.particle3_dca,
                r.dca_daughters12,
                r.dca_daughters23,
                r.dca_daughters31,
                r.max_vertex_spread,
            ];
            write!(
                writer,
                "{}\t{}\t{}\t{}",
                event, r.particle1_idx, r.particle2_idx, r.particle3_idx
            )?;
            for v in values {
                write!(writer, "\t{}", v)?;
            }
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}
