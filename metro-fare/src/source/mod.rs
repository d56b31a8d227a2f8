//! Network data source.
//!
//! Resolves the configured `data_source` URI once at startup, fetches the
//! JSON description over HTTP or from disk, and hands the planner a
//! validated [`Graph`](crate::network::Graph). Nothing here is needed by
//! the planner itself.

mod cache;
mod client;
mod config;
mod error;

pub use cache::NetworkCache;
pub use client::NetworkLoader;
pub use config::{DEFAULT_DATA_SOURCE, DataSource, NetworkCacheConfig, SourceConfig};
pub use error::{InvalidDataSource, SourceError};
