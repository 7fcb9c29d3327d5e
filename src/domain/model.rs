use crate::core::{CharRange, CharRangeIter, IntRange, IntRangeIter};
use crate::utils::error::{RangeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declarative description of one range, as read from CLI flags or TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: RangeKind,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RangeKind {
    Numbers {
        from: i32,
        to: i32,
        #[serde(default)]
        step: Option<i32>,
    },
    Evens {
        from: i32,
        to: i32,
    },
    Odds {
        from: i32,
        to: i32,
    },
    Letters {
        start: char,
        end: char,
    },
}

impl RangeSpec {
    pub fn new(kind: RangeKind) -> Self {
        Self {
            name: None,
            kind,
            reverse: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn build(&self) -> Result<BuiltRange> {
        let built = match self.kind {
            RangeKind::Numbers { from, to, step } => {
                BuiltRange::Int(IntRange::from_to_with_step(from, to, step.unwrap_or(1))?)
            }
            RangeKind::Evens { from, to } => BuiltRange::Int(IntRange::evens_from_to(from, to)?),
            RangeKind::Odds { from, to } => BuiltRange::Int(IntRange::odds_from_to(from, to)?),
            RangeKind::Letters { start, end } => {
                BuiltRange::Letters(CharRange::from_to(start, end)?)
            }
        };

        Ok(if self.reverse { built.reverse() } else { built })
    }

    /// Label used by renderers: the configured name, or the kind plus its bounds.
    pub fn label(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.kind {
            RangeKind::Numbers { from, to, step } => match step {
                Some(step) => format!("numbers {}..{} step {}", from, to, step),
                None => format!("numbers {}..{}", from, to),
            },
            RangeKind::Evens { from, to } => format!("evens {}..{}", from, to),
            RangeKind::Odds { from, to } => format!("odds {}..{}", from, to),
            RangeKind::Letters { start, end } => format!("letters {}..{}", start, end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BuiltRange {
    Int(IntRange),
    Letters(CharRange),
}

impl BuiltRange {
    pub fn reverse(&self) -> Self {
        match self {
            BuiltRange::Int(range) => BuiltRange::Int(range.reverse()),
            BuiltRange::Letters(range) => BuiltRange::Letters(range.reversed()),
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            BuiltRange::Int(range) => range.len(),
            BuiltRange::Letters(range) => range.len(),
        }
    }

    /// Values in order, produced lazily so huge ranges never materialise.
    pub fn values(&self) -> RangeValues {
        match self {
            BuiltRange::Int(range) => RangeValues::Int(range.iter()),
            BuiltRange::Letters(range) => RangeValues::Letters(range.iter()),
        }
    }
}

/// One value of a [`BuiltRange`]; serialises as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeValue {
    Int(i32),
    Letter(char),
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeValue::Int(value) => write!(f, "{}", value),
            RangeValue::Letter(letter) => write!(f, "{}", letter),
        }
    }
}

impl Serialize for RangeValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
pub enum RangeValues {
    Int(IntRangeIter),
    Letters(CharRangeIter),
}

impl Iterator for RangeValues {
    type Item = RangeValue;

    fn next(&mut self) -> Option<RangeValue> {
        match self {
            RangeValues::Int(iter) => iter.next().map(RangeValue::Int),
            RangeValues::Letters(iter) => iter.next().map(RangeValue::Letter),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            RangeValues::Int(iter) => iter.size_hint(),
            RangeValues::Letters(iter) => iter.size_hint(),
        }
    }
}

impl fmt::Display for BuiltRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltRange::Int(range) => fmt::Display::fmt(range, f),
            BuiltRange::Letters(range) => fmt::Display::fmt(range, f),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Lines,
    Csv,
    Json,
}

impl OutputFormat {
    pub const VARIANTS: [&'static str; 3] = ["lines", "csv", "json"];
}

impl FromStr for OutputFormat {
    type Err = RangeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "lines" => Ok(OutputFormat::Lines),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(RangeError::InvalidConfigValueError {
                field: "format".to_string(),
                value: value.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    Self::VARIANTS.join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Lines => "lines",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// A built range together with the label it is rendered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRange {
    pub name: String,
    pub range: BuiltRange,
}
