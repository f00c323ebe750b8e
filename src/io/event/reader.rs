use crate::io::{Format, error::Error};
use crate::model::event::Event;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventFile {
    #[serde(default)]
    events: Vec<Event>,
}

/// Reads every event of a TOML event file.
///
/// Events whose vertex or field are not finite are refused; degenerate
/// tracks are left for candidate construction to reject.
pub fn read<R: Read>(mut reader: R) -> Result<Vec<Event>, Error> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let file: EventFile = toml::from_str(&content).map_err(|e| {
        let line = e
            .span()
            .map(|span| line_of(&content, span.start))
            .unwrap_or(0);
        Error::parse(Format::Toml, line, e.message())
    })?;

    for (index, event) in file.events.iter().enumerate() {
        if !event.vertex.iter().all(|v| v.is_finite()) {
            return Err(Error::invalid_event(index, "primary vertex is not finite"));
        }
        if !event.b_field.is_finite() {
            return Err(Error::invalid_event(index, "magnetic field is not finite"));
        }
    }

    Ok(file.events)
}

fn line_of(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .map_or(0, |head| head.bytes().filter(|&b| b == b'\n').count())
        + 1
}
