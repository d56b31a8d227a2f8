//! Data source configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::error::InvalidDataSource;

/// Default location of the published network description.
pub const DEFAULT_DATA_SOURCE: &str = "https://static.qinxr.cn/Hyacinth/farecalc.json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default cache TTL: 24 hours.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Where the network description comes from.
///
/// # Examples
///
/// ```
/// use metro_fare::source::DataSource;
///
/// let remote: DataSource = "https://example.com/net.json".parse().unwrap();
/// assert!(remote.is_remote());
///
/// let local: DataSource = "file:///tmp/net.json".parse().unwrap();
/// assert_eq!(local, DataSource::File("/tmp/net.json".into()));
///
/// let bare: DataSource = "data/net.json".parse().unwrap();
/// assert_eq!(bare, DataSource::File("data/net.json".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// An `http://` or `https://` URL
    Http(String),
    /// A local file
    File(PathBuf),
}

impl DataSource {
    /// Parse a URI: `http(s)://…`, `file://…`, or a plain path.
    pub fn parse(uri: &str) -> Result<Self, InvalidDataSource> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(InvalidDataSource {
                input: uri.to_string(),
                reason: "must not be empty",
            });
        }

        let Some((scheme, rest)) = uri.split_once("://") else {
            return Ok(DataSource::File(PathBuf::from(uri)));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "http" | "https" => Ok(DataSource::Http(uri.to_string())),
            "file" if !rest.is_empty() => Ok(DataSource::File(PathBuf::from(rest))),
            "file" => Err(InvalidDataSource {
                input: uri.to_string(),
                reason: "file URI has no path",
            }),
            _ => Err(InvalidDataSource {
                input: uri.to_string(),
                reason: "unsupported scheme (expected http, https or file)",
            }),
        }
    }

    /// Returns true for HTTP sources.
    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Http(_))
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Http(DEFAULT_DATA_SOURCE.to_string())
    }
}

impl FromStr for DataSource {
    type Err = InvalidDataSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Configuration for the on-disk description cache.
#[derive(Debug, Clone)]
pub struct NetworkCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains valid.
    pub ttl: Duration,
}

impl NetworkCacheConfig {
    /// Create a new cache config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Configuration for loading the network.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Where to load the description from
    pub data_source: DataSource,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional on-disk cache
    pub cache: Option<NetworkCacheConfig>,
}

impl SourceConfig {
    /// Create a new config for the given source.
    pub fn new(data_source: DataSource) -> Self {
        Self {
            data_source,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache: None,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Enable the on-disk cache.
    pub fn with_cache(mut self, cache: NetworkCacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(DataSource::default())
    }
}
