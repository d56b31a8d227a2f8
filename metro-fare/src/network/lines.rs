//! Line membership lookup.
//!
//! A station served by several lines is a transfer station and reports all
//! of them. Stations no line lists report nothing; callers treat that as
//! "unknown line".

use std::collections::HashMap;

use crate::domain::StationId;

/// A named line and the stations it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub members: Vec<StationId>,
}

impl Line {
    /// Create a new line.
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: Vec<StationId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members,
        }
    }
}

/// Station → line names index.
///
/// Line names for a station are reported in the order the lines were given,
/// each name at most once.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    lines: Vec<Line>,
    by_station: HashMap<StationId, Vec<String>>,
}

impl LineIndex {
    /// Build the index from a sequence of lines.
    pub fn new(lines: impl IntoIterator<Item = Line>) -> Self {
        let lines: Vec<Line> = lines.into_iter().collect();
        let mut by_station: HashMap<StationId, Vec<String>> = HashMap::new();

        for line in &lines {
            for station in &line.members {
                let names = by_station.entry(*station).or_default();
                if !names.contains(&line.name) {
                    names.push(line.name.clone());
                }
            }
        }

        Self { lines, by_station }
    }

    /// Names of the lines serving a station.
    ///
    /// Empty when no line lists the station.
    pub fn lines_of(&self, station: StationId) -> &[String] {
        self.by_station
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if the station is served by more than one line.
    pub fn is_transfer(&self, station: StationId) -> bool {
        self.lines_of(station).len() > 1
    }

    /// All lines, in index order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
