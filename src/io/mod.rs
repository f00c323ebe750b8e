//! Reading event files and writing candidate tables.
//!
//! Events are read from TOML documents holding an `[[events]]` array; each
//! event lists its primary vertex, field and `[[events.tracks]]`. Candidates
//! are written as tab-separated tables with one row per record, prefixed by
//! the position of the event in the input.

use std::fmt;

pub mod error;

pub mod event {
    pub mod reader;
}

pub mod table {
    pub mod writer;
}

pub use error::Error;
pub use event::reader::read as read_events;
pub use table::writer::{write_pairs, write_triplets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Toml => write!(f, "TOML"),
        }
    }
}
