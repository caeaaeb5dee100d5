use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single catalog entry. `number` and every prerequisite are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub number: String,
    pub title: String,
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(number: &str, title: &str, prerequisites: &[&str]) -> Self {
        Self {
            number: normalize_course_number(number),
            title: title.trim().to_string(),
            prerequisites: prerequisites
                .iter()
                .map(|p| normalize_course_number(p))
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

/// Trim surrounding whitespace and uppercase, so `" csci101 "` and `"CSCI101"` match.
pub fn normalize_course_number(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Outcome of one load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub source: String,
    pub accepted: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            accepted: 0,
            skipped: 0,
            duplicates: 0,
            loaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Backend {
    Map,
    Vec,
    #[default]
    Bst,
    Sqlite,
}

impl Backend {
    pub const NAMES: [&'static str; 4] = ["map", "vec", "bst", "sqlite"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Map => "map",
            Backend::Vec => "vec",
            Backend::Bst => "bst",
            Backend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "map" => Ok(Backend::Map),
            "vec" => Ok(Backend::Vec),
            "bst" => Ok(Backend::Bst),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["text", "json"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}
