//! Fare pipeline: shortest paths, pricing, grouping.

use tracing::{debug, info};

use crate::domain::{Fare, StationId, price_for_distance};
use crate::network::{Graph, NetworkDescription};

use super::dijkstra::{Reachable, ShortestPathResult, shortest_paths_from};
use super::error::PlanError;
use super::group::{GroupedOutput, group};

/// A shortest-path result with its fare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedResult {
    pub station: StationId,
    pub distance: u64,
    pub price: Fare,
    pub path: Vec<StationId>,
}

impl PricedResult {
    /// Price a shortest-path result.
    pub fn new(result: &ShortestPathResult, free_distance: u64) -> Self {
        Self {
            station: result.station,
            distance: result.distance,
            price: price_for_distance(result.distance, free_distance),
            path: result.path.clone(),
        }
    }
}

/// Price every reachable station, keeping settled order.
pub fn price_all(reachable: &Reachable, free_distance: u64) -> Vec<PricedResult> {
    reachable
        .iter()
        .map(|result| PricedResult::new(result, free_distance))
        .collect()
}

/// Outcome of one fare query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareReport {
    origin: StationId,
    budget: Fare,
    priced: Vec<PricedResult>,
    groups: GroupedOutput,
}

impl FareReport {
    pub fn origin(&self) -> StationId {
        self.origin
    }

    pub fn budget(&self) -> Fare {
        self.budget
    }

    /// Every reachable station with its fare, origin included, in settled
    /// order.
    pub fn priced(&self) -> &[PricedResult] {
        &self.priced
    }

    /// Stations reachable for exactly the budget, grouped by line.
    pub fn groups(&self) -> &GroupedOutput {
        &self.groups
    }

    pub fn into_groups(self) -> GroupedOutput {
        self.groups
    }
}

/// Find every station reachable from `origin_name` for exactly `budget`.
///
/// Fails only when the origin is not a known station name. A budget no
/// station matches produces an empty report.
pub fn compute(graph: &Graph, origin_name: &str, budget: Fare) -> Result<FareReport, PlanError> {
    let origin = graph
        .name_to_id(origin_name)
        .ok_or_else(|| PlanError::invalid_origin(origin_name))?;

    compute_from(graph, origin, budget)
}

/// [`compute`] for an origin given by ID.
pub fn compute_from(graph: &Graph, origin: StationId, budget: Fare) -> Result<FareReport, PlanError> {
    let reachable = shortest_paths_from(graph, origin)?;
    let priced = price_all(&reachable, graph.free_distance());
    let groups = group(&priced, budget, origin, graph.lines());

    info!(
        origin = %graph.id_to_name(origin),
        budget,
        reachable = priced.len(),
        matched = groups.station_count(),
        "Fare query complete"
    );

    Ok(FareReport {
        origin,
        budget,
        priced,
        groups,
    })
}

/// Validate a raw description and run [`compute`] on it.
pub fn compute_from_description(
    description: NetworkDescription,
    origin_name: &str,
    budget: Fare,
) -> Result<FareReport, PlanError> {
    let graph = Graph::from_description(description)?;
    debug!(stations = graph.len(), "Description validated");
    compute(&graph, origin_name, budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{GraphBuilder, GraphError};
    use crate::planner::GroupKey;

    fn id(raw: u32) -> StationId {
        StationId::new(raw)
    }

    /// A - B - C - D (5000, 4000, 9000), free allowance 6000.
    fn line_builder() -> GraphBuilder {
        GraphBuilder::new()
            .free_distance(6000)
            .station(1, "A")
            .station(2, "B")
            .station(3, "C")
            .station(4, "D")
            .link(1, 2, 5000)
            .link(2, 3, 4000)
            .link(3, 4, 9000)
            .line("L1", "Line 1", &[1, 2, 3, 4])
    }

    fn price_of(report: &FareReport, station: u32) -> Fare {
        report
            .priced()
            .iter()
            .find(|r| r.station == id(station))
            .unwrap()
            .price
    }

    #[test]
    fn line_graph_prices() {
        let graph = line_builder().build().unwrap();
        let report = compute(&graph, "A", 4).unwrap();

        assert_eq!(report.origin(), id(1));
        assert_eq!(report.budget(), 4);
        assert_eq!(price_of(&report, 1), 3);
        assert_eq!(price_of(&report, 2), 3);
        assert_eq!(price_of(&report, 3), 3);
        assert_eq!(price_of(&report, 4), 4);

        let line1 = report.groups().get(&GroupKey::Line("Line 1".into())).unwrap();
        assert_eq!(line1.len(), 1);
        assert_eq!(line1[0].station, id(4));
        assert_eq!(line1[0].distance, 18000);
        assert_eq!(line1[0].path, vec![id(1), id(2), id(3), id(4)]);
    }

    #[test]
    fn base_fare_excludes_origin() {
        let graph = line_builder().build().unwrap();
        let report = compute(&graph, "A", 3).unwrap();

        let stations: Vec<_> = report.groups().groups()[0]
            .entries
            .iter()
            .map(|e| e.station.get())
            .collect();
        assert_eq!(stations, vec![2, 3]);
    }

    #[test]
    fn transfer_station_in_both_lines() {
        let graph = GraphBuilder::new()
            .free_distance(6000)
            .station(1, "Origin")
            .station(2, "Interchange")
            .station(3, "Far")
            .link(1, 2, 20_000)
            .link(2, 3, 1000)
            .line("1", "Line 1", &[1, 2])
            .line("2", "Line 2", &[2, 3])
            .build()
            .unwrap();

        // Net 14 km and 15 km: both 5
        let report = compute(&graph, "Origin", 5).unwrap();
        let groups = report.groups();

        let line1 = groups.get(&GroupKey::Line("Line 1".into())).unwrap();
        let line2 = groups.get(&GroupKey::Line("Line 2".into())).unwrap();
        assert_eq!(line1.iter().filter(|e| e.station == id(2)).count(), 1);
        assert_eq!(line2.iter().filter(|e| e.station == id(2)).count(), 1);
        assert_eq!(line2.iter().filter(|e| e.station == id(3)).count(), 1);
        assert_eq!(groups.entry_count(), 3);
        assert_eq!(groups.station_count(), 2);
    }

    #[test]
    fn unknown_origin_name() {
        let graph = line_builder().build().unwrap();
        let err = compute(&graph, "Nowhere", 3).unwrap_err();

        assert_eq!(
            err,
            PlanError::InvalidOrigin {
                origin: "Nowhere".into()
            }
        );
    }

    #[test]
    fn unmatched_budget_is_empty_success() {
        let graph = line_builder().build().unwrap();
        let report = compute(&graph, "A", 9).unwrap();

        assert!(report.groups().is_empty());
        // The full priced set is still available for display
        assert_eq!(report.priced().len(), 4);
    }

    #[test]
    fn disconnected_station_never_reported() {
        let graph = line_builder().station(5, "Island").build().unwrap();
        let report = compute(&graph, "A", 3).unwrap();

        assert!(report.priced().iter().all(|r| r.station != id(5)));
        assert_eq!(report.priced().len(), 4);
    }

    #[test]
    fn malformed_description_is_reported() {
        let description = line_builder().edge(4, 42, 100).into_description();

        let err = compute_from_description(description, "A", 3).unwrap_err();
        assert_eq!(
            err,
            PlanError::MalformedGraph(GraphError::UnknownNeighbour {
                station: id(4),
                neighbour: id(42),
            })
        );
    }

    #[test]
    fn description_pipeline_matches_graph_pipeline() {
        let description = line_builder().into_description();
        let graph = Graph::from_description(description.clone()).unwrap();

        let direct = compute(&graph, "A", 4).unwrap();
        let via_description = compute_from_description(description, "A", 4).unwrap();
        assert_eq!(direct, via_description);
    }

    #[test]
    fn compute_is_idempotent() {
        let graph = line_builder()
            .station(5, "E")
            .station(6, "F")
            .link(1, 5, 9000)
            .link(5, 6, 100)
            .line("L2", "Line 2", &[5, 6])
            .build()
            .unwrap();

        let first = compute(&graph, "A", 3).unwrap();
        for _ in 0..5 {
            assert_eq!(compute(&graph, "A", 3).unwrap(), first);
        }
    }

    #[test]
    fn price_all_keeps_settled_order() {
        let graph = line_builder().build().unwrap();
        let reachable = shortest_paths_from(&graph, id(4)).unwrap();
        let priced = price_all(&reachable, graph.free_distance());

        let order: Vec<_> = priced.iter().map(|p| p.station.get()).collect();
        assert_eq!(order, vec![4, 3, 2, 1]);
        assert_eq!(priced[3].price, 4);
    }
}
