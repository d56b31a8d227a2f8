//! Single-source shortest paths.
//!
//! Dijkstra with lazy deletion: the frontier may hold several entries for a
//! station, and every entry popped after the station is settled is discarded.
//! The queue is keyed by cumulative distance only; fares are derived from the
//! settled distances afterwards.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::domain::StationId;
use crate::network::Graph;

use super::error::PlanError;

/// Shortest path to one reachable station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathResult {
    pub station: StationId,

    /// Minimal cumulative edge length from the origin, in metres.
    pub distance: u64,

    /// Stations from the origin (first) to `station` (last).
    pub path: Vec<StationId>,
}

impl ShortestPathResult {
    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Every station reachable from one origin, in settled order.
///
/// Stations with no path from the origin are absent.
#[derive(Debug, Clone)]
pub struct Reachable {
    origin: StationId,
    results: Vec<ShortestPathResult>,
    index: HashMap<StationId, usize>,
}

impl Reachable {
    pub fn origin(&self) -> StationId {
        self.origin
    }

    /// Result for a station, if it is reachable.
    pub fn get(&self, station: StationId) -> Option<&ShortestPathResult> {
        self.index.get(&station).map(|&i| &self.results[i])
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.index.contains_key(&station)
    }

    /// Results in the order stations were settled (non-decreasing distance).
    pub fn iter(&self) -> impl Iterator<Item = &ShortestPathResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[ShortestPathResult] {
        &self.results
    }

    /// Returns the number of reachable stations, including the origin.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Always false for a successful search: the origin reaches itself.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a Reachable {
    type Item = &'a ShortestPathResult;
    type IntoIter = std::slice::Iter<'a, ShortestPathResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Candidate on the frontier. Owns its path; extending it copies.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FrontierEntry {
    distance: u64,
    station: StationId,
    path: Vec<StationId>,
}

impl FrontierEntry {
    fn extend(&self, neighbour: StationId, weight: u64) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(neighbour);

        Self {
            distance: self.distance.saturating_add(weight),
            station: neighbour,
            path,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest distance, then the lowest
        // station ID, then the lexicographically smallest path.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.station.cmp(&self.station))
            .then_with(|| other.path.cmp(&self.path))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the shortest path from `origin` to every reachable station.
///
/// Runs in O(E log E) for E directed edges (parallel edges counted
/// separately). Ties between equal-length paths are broken
/// deterministically, so the same graph always yields the same paths.
pub fn shortest_paths_from(graph: &Graph, origin: StationId) -> Result<Reachable, PlanError> {
    if !graph.contains(origin) {
        return Err(PlanError::invalid_origin(origin));
    }

    let mut settled: HashSet<StationId> = HashSet::with_capacity(graph.len());
    let mut results = Vec::with_capacity(graph.len());
    let mut index = HashMap::with_capacity(graph.len());
    let mut frontier = BinaryHeap::new();
    let mut stale = 0usize;

    frontier.push(FrontierEntry {
        distance: 0,
        station: origin,
        path: vec![origin],
    });

    while let Some(entry) = frontier.pop() {
        if !settled.insert(entry.station) {
            stale += 1;
            continue;
        }

        for (neighbour, weight) in graph.neighbours(entry.station) {
            if !settled.contains(&neighbour) {
                frontier.push(entry.extend(neighbour, weight));
            }
        }

        index.insert(entry.station, results.len());
        results.push(ShortestPathResult {
            station: entry.station,
            distance: entry.distance,
            path: entry.path,
        });
    }

    debug!(
        origin = %origin,
        reachable = results.len(),
        stale,
        "Shortest paths settled"
    );

    Ok(Reachable {
        origin,
        results,
        index,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::GraphBuilder;
    use proptest::prelude::*;

    /// Random graph: up to 6 stations, up to 14 directed edges (parallel
    /// edges and self loops allowed), lengths 0..50.
    fn small_graph() -> impl Strategy<Value = (Graph, StationId)> {
        (1u32..=6).prop_flat_map(|n| {
            let edges = proptest::collection::vec((0..n, 0..n, 0i64..50), 0..14);
            (Just(n), edges, 0..n)
        })
        .prop_map(|(n, edges, origin)| {
            let mut builder = GraphBuilder::new();
            for i in 0..n {
                builder = builder.station(i, &format!("S{i}"));
            }
            for (from, to, distance) in edges {
                builder = builder.edge(from, to, distance);
            }
            (builder.build().unwrap(), StationId::new(origin))
        })
    }

    /// Minimum distance to every station via exhaustive simple-path search.
    fn brute_force(graph: &Graph, origin: StationId) -> HashMap<StationId, u64> {
        fn walk(
            graph: &Graph,
            at: StationId,
            distance: u64,
            visited: &mut Vec<StationId>,
            best: &mut HashMap<StationId, u64>,
        ) {
            let entry = best.entry(at).or_insert(u64::MAX);
            *entry = (*entry).min(distance);

            for (next, weight) in graph.neighbours(at) {
                if visited.contains(&next) {
                    continue;
                }
                visited.push(next);
                walk(graph, next, distance + weight, visited, best);
                visited.pop();
            }
        }

        let mut best = HashMap::new();
        walk(graph, origin, 0, &mut vec![origin], &mut best);
        best
    }

    fn min_edge(graph: &Graph, from: StationId, to: StationId) -> Option<u64> {
        graph
            .neighbours(from)
            .filter(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
            .min()
    }

    proptest! {
        /// Distances match exhaustive search; unreachable stations are absent
        #[test]
        fn matches_brute_force((graph, origin) in small_graph()) {
            let reachable = shortest_paths_from(&graph, origin).unwrap();
            let expected = brute_force(&graph, origin);

            prop_assert_eq!(reachable.len(), expected.len());
            for (station, distance) in &expected {
                let result = reachable.get(*station);
                prop_assert!(result.is_some());
                prop_assert_eq!(result.unwrap().distance, *distance);
            }
        }

        /// Summing edges along each path reproduces its distance
        #[test]
        fn paths_reconstruct_distance((graph, origin) in small_graph()) {
            let reachable = shortest_paths_from(&graph, origin).unwrap();

            for result in &reachable {
                prop_assert_eq!(result.path.first(), Some(&origin));
                prop_assert_eq!(result.path.last(), Some(&result.station));

                let mut total = 0u64;
                for pair in result.path.windows(2) {
                    let weight = min_edge(&graph, pair[0], pair[1]);
                    prop_assert!(weight.is_some());
                    total += weight.unwrap();
                }
                prop_assert_eq!(total, result.distance);

                // Optimal substructure: the predecessor's own result is a prefix
                if result.path.len() >= 2 {
                    let prev = result.path[result.path.len() - 2];
                    let prev_result = reachable.get(prev).unwrap();
                    let weight = min_edge(&graph, prev, result.station).unwrap();
                    prop_assert_eq!(prev_result.distance + weight, result.distance);
                }
            }
        }

        /// Settled order never goes back in distance
        #[test]
        fn settled_order_is_sorted((graph, origin) in small_graph()) {
            let reachable = shortest_paths_from(&graph, origin).unwrap();
            let distances: Vec<u64> = reachable.iter().map(|r| r.distance).collect();
            prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Repeated runs are identical
        #[test]
        fn deterministic((graph, origin) in small_graph()) {
            let a = shortest_paths_from(&graph, origin).unwrap();
            let b = shortest_paths_from(&graph, origin).unwrap();
            prop_assert_eq!(a.as_slice(), b.as_slice());
        }
    }
}
