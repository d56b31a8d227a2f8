//! Validated network graph.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::domain::StationId;

use super::error::GraphError;
use super::lines::{Line, LineIndex};
use super::types::{EdgeDto, LineDto, NetworkDescription, StationDto};

/// A physical edge to a neighbouring station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Length in metres.
    pub distance: u64,
}

/// A station and its outgoing edges.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: String,
    /// Neighbour → parallel edges, in the order the description listed them.
    edges: BTreeMap<StationId, Vec<Edge>>,
}

impl Station {
    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parallel edges grouped by neighbour.
    pub fn edges(&self) -> &BTreeMap<StationId, Vec<Edge>> {
        &self.edges
    }

    /// Every outgoing edge as `(neighbour, distance)`.
    ///
    /// Neighbours come in ascending ID order; parallel edges keep their
    /// input order.
    pub fn neighbours(&self) -> impl Iterator<Item = (StationId, u64)> + '_ {
        self.edges
            .iter()
            .flat_map(|(target, edges)| edges.iter().map(move |edge| (*target, edge.distance)))
    }
}

/// Read-only transit network.
///
/// Every edge target is a station of the same graph and every distance is
/// non-negative; both are checked once by [`Graph::from_description`].
#[derive(Debug, Clone)]
pub struct Graph {
    stations: BTreeMap<StationId, Station>,
    names: HashMap<String, StationId>,
    free_distance: u64,
    lines: LineIndex,
}

impl Graph {
    /// Validate a network description and build the graph.
    pub fn from_description(description: NetworkDescription) -> Result<Self, GraphError> {
        let NetworkDescription {
            sta_dict,
            sta_to_id,
            free_dis,
            line_detail,
        } = description;

        let free_distance =
            u64::try_from(free_dis).map_err(|_| GraphError::NegativeFreeDistance(free_dis))?;

        // "7" and "007" are the same station
        let mut known = BTreeSet::new();
        for key in sta_dict.keys() {
            let id = StationId::parse(key)?;
            if !known.insert(id) {
                return Err(GraphError::DuplicateStation(id));
            }
        }

        let mut stations = BTreeMap::new();
        for (key, dto) in sta_dict {
            let station = build_station(StationId::parse(&key)?, dto, &known)?;
            stations.insert(station.id, station);
        }

        let names = match sta_to_id {
            Some(index) => build_name_index(index, &known)?,
            None => derive_name_index(&stations),
        };

        let lines = build_lines(line_detail);

        let graph = Self {
            stations,
            names,
            free_distance,
            lines,
        };

        debug!(
            stations = graph.len(),
            edges = graph.edge_count(),
            lines = graph.lines.len(),
            free_distance,
            "Network graph built"
        );

        Ok(graph)
    }

    /// Look up a station by ID.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Check if a station exists.
    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// All stations in ascending ID order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Outgoing edges of a station as `(neighbour, distance)`.
    ///
    /// Empty for unknown stations.
    pub fn neighbours(&self, id: StationId) -> impl Iterator<Item = (StationId, u64)> + '_ {
        self.stations
            .get(&id)
            .into_iter()
            .flat_map(Station::neighbours)
    }

    /// Exact, case-sensitive lookup of a station by display name.
    pub fn name_to_id(&self, name: &str) -> Option<StationId> {
        self.names.get(name).copied()
    }

    /// Display name of a station.
    ///
    /// Unknown IDs render as the ID itself so partial data still prints.
    pub fn id_to_name(&self, id: StationId) -> Cow<'_, str> {
        match self.stations.get(&id) {
            Some(station) => Cow::Borrowed(station.name.as_str()),
            None => Cow::Owned(id.to_string()),
        }
    }

    /// Names of the lines serving a station (empty if none is known).
    pub fn lines_of(&self, id: StationId) -> &[String] {
        self.lines.lines_of(id)
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Free distance allowance in metres.
    pub fn free_distance(&self) -> u64 {
        self.free_distance
    }

    /// Returns the number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the graph has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Total number of directed edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.stations
            .values()
            .flat_map(|station| station.edges.values())
            .map(Vec::len)
            .sum()
    }
}

fn build_station(
    id: StationId,
    dto: StationDto,
    known: &BTreeSet<StationId>,
) -> Result<Station, GraphError> {
    let mut edges = BTreeMap::new();

    for (key, parallel) in dto.edges {
        let neighbour = StationId::parse(&key)?;
        if !known.contains(&neighbour) {
            return Err(GraphError::UnknownNeighbour {
                station: id,
                neighbour,
            });
        }

        let parallel = parallel
            .into_iter()
            .map(|EdgeDto { dis }| {
                u64::try_from(dis)
                    .map(|distance| Edge { distance })
                    .map_err(|_| GraphError::NegativeDistance {
                        station: id,
                        neighbour,
                        distance: dis,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if edges.insert(neighbour, parallel).is_some() {
            return Err(GraphError::DuplicateNeighbour {
                station: id,
                neighbour,
            });
        }
    }

    Ok(Station {
        id,
        name: dto.name,
        edges,
    })
}

fn build_name_index(
    index: BTreeMap<String, i64>,
    known: &BTreeSet<StationId>,
) -> Result<HashMap<String, StationId>, GraphError> {
    index
        .into_iter()
        .map(|(name, raw)| match StationId::from_number(raw) {
            Ok(id) if known.contains(&id) => Ok((name, id)),
            _ => Err(GraphError::UnknownNameTarget { name, station: raw }),
        })
        .collect()
}

/// Build the name index from the stations themselves.
///
/// When two stations share a name the lower ID wins.
fn derive_name_index(stations: &BTreeMap<StationId, Station>) -> HashMap<String, StationId> {
    let mut names = HashMap::with_capacity(stations.len());
    for station in stations.values() {
        names.entry(station.name.clone()).or_insert(station.id);
    }
    names
}

fn build_lines(line_detail: BTreeMap<String, LineDto>) -> LineIndex {
    LineIndex::new(line_detail.into_iter().map(|(id, dto)| {
        let members = dto
            .sta_list
            .into_iter()
            .filter_map(|raw| match StationId::from_number(raw) {
                Ok(station) => Some(station),
                Err(e) => {
                    warn!(line = %id, error = %e, "Skipping invalid line member");
                    None
                }
            })
            .collect();
        Line::new(id, dto.name, members)
    }))
}

/// Builder for creating graphs in code.
///
/// Produces a [`NetworkDescription`] and runs it through the same validation
/// as data loaded from a source.
///
/// # Example
///
/// ```
/// use metro_fare::network::GraphBuilder;
///
/// let graph = GraphBuilder::new()
///     .free_distance(6000)
///     .station(1, "A")
///     .station(2, "B")
///     .link(1, 2, 5000)
///     .line("L1", "Line 1", &[1, 2])
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    inner: NetworkDescription,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new builder with no stations and no free allowance.
    pub fn new() -> Self {
        Self {
            inner: NetworkDescription {
                sta_dict: BTreeMap::new(),
                sta_to_id: None,
                free_dis: 0,
                line_detail: BTreeMap::new(),
            },
        }
    }

    /// Set the free distance allowance.
    pub fn free_distance(mut self, metres: i64) -> Self {
        self.inner.free_dis = metres;
        self
    }

    /// Add a station.
    pub fn station(mut self, id: u32, name: &str) -> Self {
        self.inner.sta_dict.insert(
            id.to_string(),
            StationDto {
                name: name.to_string(),
                edges: BTreeMap::new(),
            },
        );
        self
    }

    /// Add a one-way edge. Repeating a pair adds a parallel edge.
    ///
    /// The source station must have been added first; the target is not
    /// checked until [`build`](Self::build).
    pub fn edge(mut self, from: u32, to: u32, distance: i64) -> Self {
        if let Some(station) = self.inner.sta_dict.get_mut(&from.to_string()) {
            station
                .edges
                .entry(to.to_string())
                .or_default()
                .push(EdgeDto { dis: distance });
        }
        self
    }

    /// Add an edge in both directions.
    pub fn link(self, a: u32, b: u32, distance: i64) -> Self {
        self.edge(a, b, distance).edge(b, a, distance)
    }

    /// Add a line.
    pub fn line(mut self, id: &str, name: &str, members: &[i64]) -> Self {
        self.inner.line_detail.insert(
            id.to_string(),
            LineDto {
                name: name.to_string(),
                sta_list: members.to_vec(),
            },
        );
        self
    }

    /// Map a display name to a station ID explicitly.
    ///
    /// Once used, only explicitly mapped names are looked up.
    pub fn name(mut self, name: &str, id: i64) -> Self {
        self.inner
            .sta_to_id
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), id);
        self
    }

    /// The description built so far.
    pub fn description(&self) -> &NetworkDescription {
        &self.inner
    }

    /// Consume the builder, returning the raw description.
    pub fn into_description(self) -> NetworkDescription {
        self.inner
    }

    /// Validate and build the graph.
    pub fn build(self) -> Result<Graph, GraphError> {
        Graph::from_description(self.inner)
    }
}
