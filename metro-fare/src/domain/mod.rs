//! Domain types for the metro fare calculator.
//!
//! Station identity and the fare function. Both are pure and carry no
//! network data, so the rest of the crate can rely on them without
//! touching the graph.

mod fare;
mod station;

pub use fare::{BASE_FARE, Fare, price, price_for_distance};
pub use station::{InvalidStationId, StationId};
