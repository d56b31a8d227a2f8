//! Fare planner.
//!
//! Answers: "starting here, which stations can I reach for exactly this
//! fare?" Shortest distances come from Dijkstra over the physical network,
//! fares from the tier function applied to each settled distance, and the
//! matches are grouped by the lines serving them.

mod dijkstra;
mod error;
mod fares;
mod group;

pub use dijkstra::{Reachable, ShortestPathResult, shortest_paths_from};
pub use error::PlanError;
pub use fares::{FareReport, PricedResult, compute, compute_from, compute_from_description, price_all};
pub use group::{GroupKey, GroupedOutput, LineGroup, UNKNOWN_LINE, group};
