//! Transit network model.
//!
//! Raw description types as served by the data source, and the validated
//! [`Graph`] the planner runs on. Validation happens once, at
//! [`Graph::from_description`]; afterwards every edge target is known to
//! exist and every distance is non-negative.

mod error;
mod graph;
mod lines;
mod types;

pub use error::GraphError;
pub use graph::{Edge, Graph, GraphBuilder, Station};
pub use lines::{Line, LineIndex};
pub use types::{EdgeDto, LineDto, NetworkDescription, StationDto};
