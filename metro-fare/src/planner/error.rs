//! Planner error types.

use crate::network::GraphError;

/// Errors from fare planning.
///
/// A budget nobody can reach is not an error; it yields an empty
/// [`GroupedOutput`](super::GroupedOutput).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The origin is not a station of the network
    #[error("unknown station: {origin}")]
    InvalidOrigin { origin: String },

    /// The network description failed validation
    #[error("malformed network: {0}")]
    MalformedGraph(#[from] GraphError),
}

impl PlanError {
    pub(crate) fn invalid_origin(origin: impl ToString) -> Self {
        PlanError::InvalidOrigin {
            origin: origin.to_string(),
        }
    }
}
