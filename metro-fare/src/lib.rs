//! Metro fare reachability.
//!
//! Answers: "starting from this station, where can I get to for this
//! fare?" The network is loaded once, shortest paths are found from the
//! origin, each destination is priced by the distance tier table, and the
//! exact-fare matches are grouped by line.

pub mod domain;
pub mod export;
pub mod network;
pub mod output;
pub mod planner;
pub mod source;
