//! Grouping of priced results by line.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::domain::{Fare, StationId};
use crate::network::LineIndex;

use super::fares::PricedResult;

/// Display label of the group for stations no line lists.
pub const UNKNOWN_LINE: &str = "unknown";

/// Key of an output group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Stations served by the named line
    Line(String),
    /// Stations with no known line
    Unknown,
}

impl GroupKey {
    /// Returns the line name, or `None` for the unknown group.
    pub fn line_name(&self) -> Option<&str> {
        match self {
            GroupKey::Line(name) => Some(name),
            GroupKey::Unknown => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Line(name) => f.write_str(name),
            GroupKey::Unknown => f.write_str(UNKNOWN_LINE),
        }
    }
}

/// One line's share of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    pub key: GroupKey,
    pub entries: Vec<PricedResult>,
}

/// Stations reachable for exactly the requested fare, grouped by line.
///
/// Groups appear in the order their first entry was seen; entries keep the
/// order they were added in. A transfer station appears once in each of
/// its lines' groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedOutput {
    groups: Vec<LineGroup>,
}

impl GroupedOutput {
    pub fn groups(&self) -> &[LineGroup] {
        &self.groups
    }

    /// Entries of one group, if present.
    pub fn get(&self, key: &GroupKey) -> Option<&[PricedResult]> {
        self.groups
            .iter()
            .find(|group| &group.key == key)
            .map(|group| group.entries.as_slice())
    }

    /// Keys in output order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|group| &group.key)
    }

    /// Returns true if no station matched.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total entries across groups; transfer stations count once per line.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    /// Number of distinct stations across groups.
    pub fn station_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| group.entries.iter().map(|entry| entry.station))
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Filter `results` to the exact `budget` and partition them by line.
///
/// The origin is always left out. Results are processed in the order given,
/// which for planner output is settled order.
pub fn group(
    results: &[PricedResult],
    budget: Fare,
    origin: StationId,
    lines: &LineIndex,
) -> GroupedOutput {
    let mut groups: Vec<LineGroup> = Vec::new();
    let mut positions: HashMap<GroupKey, usize> = HashMap::new();

    let mut add = |key: GroupKey, entry: &PricedResult| {
        let index = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push(LineGroup {
                key,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].entries.push(entry.clone());
    };

    for entry in results {
        if entry.station == origin || entry.price != budget {
            continue;
        }

        let memberships = lines.lines_of(entry.station);
        if memberships.is_empty() {
            add(GroupKey::Unknown, entry);
        } else {
            for line in memberships {
                add(GroupKey::Line(line.clone()), entry);
            }
        }
    }

    GroupedOutput { groups }
}
