//! Network validation errors.
//!
//! Any of these means the description cannot be trusted for shortest-path
//! computation. They are raised while building the [`Graph`](super::Graph),
//! before any search runs.

use crate::domain::{InvalidStationId, StationId};

/// Errors found while validating a network description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A station key or edge target is not a valid station ID
    #[error(transparent)]
    InvalidStationId(#[from] InvalidStationId),

    /// Two station keys name the same ID (e.g. "7" and "007")
    #[error("station {0} is listed more than once")]
    DuplicateStation(StationId),

    /// Two edge keys of one station name the same neighbour
    #[error("station {station} lists neighbour {neighbour} more than once")]
    DuplicateNeighbour {
        station: StationId,
        neighbour: StationId,
    },

    /// An edge points at a station that is not in the network
    #[error("station {station} has an edge to unknown station {neighbour}")]
    UnknownNeighbour {
        station: StationId,
        neighbour: StationId,
    },

    /// An edge carries a negative distance
    #[error("edge {station} -> {neighbour} has negative distance {distance}")]
    NegativeDistance {
        station: StationId,
        neighbour: StationId,
        distance: i64,
    },

    /// The name index maps a name to a station that does not exist
    #[error("station name {name:?} refers to unknown station {station}")]
    UnknownNameTarget { name: String, station: i64 },

    /// The free distance allowance is negative
    #[error("free distance allowance must not be negative (got {0})")]
    NegativeFreeDistance(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::UnknownNeighbour {
            station: StationId::new(1),
            neighbour: StationId::new(99),
        };
        assert_eq!(err.to_string(), "station 1 has an edge to unknown station 99");

        let err = GraphError::NegativeDistance {
            station: StationId::new(1),
            neighbour: StationId::new(2),
            distance: -5,
        };
        assert_eq!(err.to_string(), "edge 1 -> 2 has negative distance -5");

        let err = GraphError::UnknownNameTarget {
            name: "Ghost".into(),
            station: 7,
        };
        assert_eq!(err.to_string(), "station name \"Ghost\" refers to unknown station 7");

        let err = GraphError::DuplicateStation(StationId::new(7));
        assert_eq!(err.to_string(), "station 7 is listed more than once");

        let err = GraphError::NegativeFreeDistance(-1);
        assert_eq!(
            err.to_string(),
            "free distance allowance must not be negative (got -1)"
        );
    }
}
