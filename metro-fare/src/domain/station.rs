//! Station identifier type.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id {input:?}: {reason}")]
pub struct InvalidStationId {
    input: String,
    reason: &'static str,
}

impl InvalidStationId {
    fn new(input: impl Into<String>, reason: &'static str) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }
}

/// Identifier of a station within one network.
///
/// The dataset encodes station IDs as decimal integers, either as JSON object
/// keys (`"123"`) or as plain numbers in line member lists. Both forms map to
/// the same `StationId`.
///
/// # Examples
///
/// ```
/// use metro_fare::domain::StationId;
///
/// let id = StationId::parse("123").unwrap();
/// assert_eq!(id, StationId::new(123));
/// assert_eq!(id.to_string(), "123");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("-1").is_err());
/// assert!(StationId::parse("12a").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(u32);

impl StationId {
    /// Wrap a raw numeric identifier.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Parse a station ID from its decimal string form.
    ///
    /// Only ASCII digits are accepted; signs, whitespace and values that do
    /// not fit in a `u32` are rejected.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId::new(s, "must not be empty"));
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId::new(s, "must be decimal digits"));
        }

        s.parse::<u32>()
            .map(Self)
            .map_err(|_| InvalidStationId::new(s, "out of range"))
    }

    /// Convert a numeric ID as it appears in the dataset (for example a
    /// line's member list).
    pub fn from_number(raw: i64) -> Result<Self, InvalidStationId> {
        u32::try_from(raw)
            .map(Self)
            .map_err(|_| InvalidStationId::new(raw.to_string(), "out of range"))
    }

    /// Returns the raw numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for StationId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl FromStr for StationId {
    type Err = InvalidStationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
