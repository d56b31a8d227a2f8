//! Wire types for the network description.
//!
//! These mirror the published dataset's JSON layout one-to-one and carry no
//! invariants. [`Graph::from_description`](super::Graph::from_description)
//! validates them into the typed model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Complete network description as served by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescription {
    /// Stations keyed by their decimal ID.
    pub sta_dict: BTreeMap<String, StationDto>,

    /// Display name → station ID. Derived from `sta_dict` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sta_to_id: Option<BTreeMap<String, i64>>,

    /// Free distance allowance in metres.
    pub free_dis: i64,

    /// Lines keyed by line ID.
    #[serde(default)]
    pub line_detail: BTreeMap<String, LineDto>,
}

/// A station and its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StationDto {
    pub name: String,

    /// Neighbour ID → parallel edges to that neighbour.
    #[serde(default)]
    pub edges: BTreeMap<String, Vec<EdgeDto>>,
}

/// A single physical edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EdgeDto {
    /// Edge length in metres.
    pub dis: i64,
}

/// A line and the stations it serves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub name: String,

    #[serde(default)]
    pub sta_list: Vec<i64>,
}
