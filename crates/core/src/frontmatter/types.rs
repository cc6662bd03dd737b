//! Front matter value algebra and format marks.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered key/value mapping decoded from a front matter block.
pub type Metadata = IndexMap<String, Value>;

/// Which serialization syntax wraps a document's front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatMark {
    /// `---` delimited YAML.
    Dash,
    /// `+++` delimited TOML.
    #[default]
    Plus,
    /// A bare JSON object starting at the first byte.
    Brace,
}

impl FormatMark {
    /// Detect the format from the first byte of a document.
    pub fn from_leading_byte(byte: u8) -> Option<Self> {
        match byte {
            b'-' => Some(Self::Dash),
            b'+' => Some(Self::Plus),
            b'{' => Some(Self::Brace),
            _ => None,
        }
    }

    /// Delimiter line surrounding the payload, `None` for self-delimiting JSON.
    pub fn delimiter(self) -> Option<&'static str> {
        match self {
            Self::Dash => Some("---"),
            Self::Plus => Some("+++"),
            Self::Brace => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dash => "yaml",
            Self::Plus => "toml",
            Self::Brace => "json",
        }
    }
}

impl fmt::Display for FormatMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown front matter format '{0}' (expected yaml, toml or json)")]
pub struct UnknownFormat(pub String);

impl FromStr for FormatMark {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" | "dash" | "-" | "---" => Ok(Self::Dash),
            "toml" | "plus" | "+" | "+++" => Ok(Self::Plus),
            "json" | "brace" | "{" => Ok(Self::Brace),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// A dynamically typed front matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`, which YAML and JSON can hold but TOML cannot.
    UnsignedInteger(u64),
    Float(f64),
    String(String),
    Timestamp(Timestamp),
    Sequence(Vec<Value>),
    Mapping(Metadata),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(i) => u64::try_from(*i).ok(),
            Self::UnsignedInteger(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Metadata> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::UnsignedInteger(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Timestamp(_) => "timestamp",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Plain text rendering of a scalar, `None` for sequences and mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::UnsignedInteger(u) => Some(u.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Timestamp(ts) => Some(ts.to_string()),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

/// Values that fit an `i64` stay `Integer`.
impl From<u64> for Value {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Self::Integer(i),
            Err(_) => Self::UnsignedInteger(u),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Metadata> for Value {
    fn from(map: Metadata) -> Self {
        Self::Mapping(map)
    }
}

/// The four date/time shapes TOML can express natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// `zulu` records whether a zero offset was written as `Z`.
    OffsetDateTime { at: DateTime<FixedOffset>, zulu: bool },
    LocalDateTime(NaiveDateTime),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
}

impl Timestamp {
    /// Calendar date of the timestamp; a bare time of day has none.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::OffsetDateTime { at, .. } => Some(at.date_naive()),
            Self::LocalDateTime(dt) => Some(dt.date()),
            Self::LocalDate(d) => Some(*d),
            Self::LocalTime(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetDateTime { at, zulu } => {
                f.write_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, *zulu))
            }
            Self::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::LocalDate(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::LocalTime(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not an RFC 3339 date, time or date-time: '{0}'")]
pub struct TimestampParseError(pub String);

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    /// Accepts RFC 3339 offset date-times plus the local forms TOML allows.
    /// A space may separate date and time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let normalized = match s.as_bytes().get(10) {
            Some(b' ' | b't') => format!("{}T{}", &s[..10], &s[11..]),
            _ => s.to_string(),
        };

        if let Ok(at) = DateTime::parse_from_rfc3339(&normalized) {
            let zulu = normalized.ends_with(['Z', 'z']);
            return Ok(Self::OffsetDateTime { at, zulu });
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::LocalDateTime(dt));
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::LocalDate(d));
        }
        if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S%.f") {
            return Ok(Self::LocalTime(t));
        }
        Err(TimestampParseError(s.to_string()))
    }
}
