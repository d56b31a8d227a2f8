//! Console rendering of fare reports.

use std::fmt::Write;

use crate::domain::StationId;
use crate::network::Graph;
use crate::planner::{FareReport, PricedResult};

/// Separator between station names in a rendered path.
pub const PATH_SEPARATOR: &str = " -> ";

/// Render a path as station names, e.g. `A -> B -> C`.
pub fn format_path(graph: &Graph, path: &[StationId]) -> String {
    path.iter()
        .map(|station| graph.id_to_name(*station))
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

/// Render one result line.
pub fn format_entry(graph: &Graph, entry: &PricedResult, show_path: bool) -> String {
    let mut line = format!(
        "{} | distance: {}m | fare: {}",
        graph.id_to_name(entry.station),
        entry.distance,
        entry.price
    );
    if show_path {
        let _ = write!(line, " | path: {}", format_path(graph, &entry.path));
    }
    line
}

/// Render a full report: a header, one block per line group, and a total.
pub fn render_report(graph: &Graph, report: &FareReport, show_path: bool) -> String {
    let mut out = String::new();
    let origin = graph.id_to_name(report.origin());
    let groups = report.groups();

    if groups.is_empty() {
        let _ = writeln!(
            out,
            "No stations reachable from {origin} for a fare of {}.",
            report.budget()
        );
        return out;
    }

    let _ = writeln!(
        out,
        "From {origin} with a fare of {}, reachable stations:",
        report.budget()
    );

    for group in groups.groups() {
        let _ = writeln!(out, "{}", group.key);
        for entry in &group.entries {
            let _ = writeln!(out, "{}", format_entry(graph, entry, show_path));
        }
        let _ = writeln!(out, "-----");
    }

    let _ = writeln!(out, "{} stations reachable.", groups.entry_count());
    out
}
