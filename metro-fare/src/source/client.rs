//! Network description loader.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::network::{Graph, NetworkDescription};

use super::cache::NetworkCache;
use super::config::{DataSource, SourceConfig};
use super::error::SourceError;

/// Loads and validates the network description.
///
/// The cache, when configured, is consulted first. Cache write failures are
/// logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct NetworkLoader {
    http: reqwest::Client,
    source: DataSource,
    cache: Option<NetworkCache>,
}

impl NetworkLoader {
    /// Create a new loader.
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            source: config.data_source,
            cache: config.cache.map(NetworkCache::new),
        })
    }

    /// The configured source.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch the raw description, from cache if possible.
    pub async fn fetch_description(&self) -> Result<NetworkDescription, SourceError> {
        if let Some(cache) = &self.cache
            && let Some(description) = cache.load(&self.source)
        {
            debug!(path = %cache.path().display(), "Network description loaded from cache");
            return Ok(description);
        }

        info!(source = %self.source, "Loading network description");
        let body = match &self.source {
            DataSource::Http(url) => self.fetch_http(url).await?,
            DataSource::File(path) => read_file(path).await?,
        };

        let description: NetworkDescription =
            serde_json::from_str(&body).map_err(|e| SourceError::Json {
                message: e.to_string(),
            })?;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(&self.source, &description)
        {
            warn!(error = %e, "Failed to write network cache");
        }

        Ok(description)
    }

    /// Fetch, decode and validate the network.
    pub async fn load(&self) -> Result<Graph, SourceError> {
        let description = self.fetch_description().await?;
        let graph = Graph::from_description(description)?;
        info!(
            stations = graph.len(),
            lines = graph.lines().len(),
            "Network ready"
        );
        Ok(graph)
    }

    async fn fetch_http(&self, url: &str) -> Result<String, SourceError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

async fn read_file(path: &Path) -> Result<String, SourceError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::source::NetworkCacheConfig;
    use tempfile::tempdir;

    const NETWORK_JSON: &str = r#"{
        "staDict": {
            "1": {"name": "A", "edges": {"2": [{"dis": 5000}]}},
            "2": {"name": "B", "edges": {"1": [{"dis": 5000}]}}
        },
        "staToId": {"A": 1, "B": 2},
        "freeDis": 6000,
        "lineDetail": {"1": {"name": "Line 1", "staList": [1, 2]}}
    }"#;

    fn file_loader(path: &Path) -> NetworkLoader {
        NetworkLoader::new(SourceConfig::new(DataSource::File(path.to_path_buf()))).unwrap()
    }

    #[tokio::test]
    async fn loads_graph_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("net.json");
        std::fs::write(&path, NETWORK_JSON).unwrap();

        let graph = file_loader(&path).load().await.unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.free_distance(), 6000);
        assert_eq!(graph.name_to_id("B"), Some(StationId::new(2)));
        assert_eq!(graph.lines_of(StationId::new(1)), ["Line 1"]);
    }

    #[tokio::test]
    async fn loads_from_file_uri() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("net.json");
        std::fs::write(&path, NETWORK_JSON).unwrap();

        let source = DataSource::parse(&format!("file://{}", path.display())).unwrap();
        let loader = NetworkLoader::new(SourceConfig::new(source)).unwrap();

        assert_eq!(loader.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = file_loader(&dir.path().join("absent.json"))
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn bad_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("net.json");
        std::fs::write(&path, r#"{"staDict": []}"#).unwrap();

        let err = file_loader(&path).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
    }

    #[tokio::test]
    async fn malformed_network_is_graph_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("net.json");
        std::fs::write(
            &path,
            r#"{"staDict": {"1": {"name": "A", "edges": {"7": [{"dis": 10}]}}}, "freeDis": 0}"#,
        )
        .unwrap();

        let err = file_loader(&path).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Graph(_)));
    }

    #[tokio::test]
    async fn cached_description_survives_source_removal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("net.json");
        std::fs::write(&path, NETWORK_JSON).unwrap();

        let config = SourceConfig::new(DataSource::File(path.clone()))
            .with_cache(NetworkCacheConfig::new(dir.path().join("cache").join("net.json")));
        let loader = NetworkLoader::new(config).unwrap();

        let first = loader.fetch_description().await.unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = loader.fetch_description().await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn loader_keeps_source() {
        let source = DataSource::Http("https://example.com/net.json".into());
        let loader = NetworkLoader::new(SourceConfig::new(source.clone())).unwrap();
        assert_eq!(loader.source(), &source);
    }
}
