use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Settings document as written on disk, before path validation.
#[derive(Debug, Deserialize, Default)]
pub struct SettingsFile {
    #[serde(default)]
    pub general: GeneralOptions,
    #[serde(default)]
    pub query: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GeneralOptions {
    #[serde(default, alias = "topic")]
    pub topics: Topics,
    #[serde(default)]
    pub membership: bool,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `topics` accepts a single string or a list of strings.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum Topics {
    One(String),
    Many(Vec<String>),
}

impl Default for Topics {
    fn default() -> Self {
        Topics::Many(Vec::new())
    }
}

impl Topics {
    pub fn list(&self) -> Vec<&str> {
        let all: Vec<&str> = match self {
            Topics::One(t) => vec![t.as_str()],
            Topics::Many(ts) => ts.iter().map(String::as_str).collect(),
        };
        all.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Validated, immutable settings shared by the query builder and the auditor.
#[derive(Debug, Clone)]
pub struct Settings {
    pub general: GeneralOptions,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub path: DottedPath,
    pub expected: Expected,
}

/// A setting identifier such as `containerRepository.enabled`.
/// Segments are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedPath {
    raw: String,
    segments: Vec<String>,
}

impl DottedPath {
    /// Returns `None` when any segment is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected value of one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Resolved value must equal this one.
    Equals(Value),
    /// `[{k: v, ...}]`: some element of the resolved sequence must carry every pair.
    AnyElement { fields: Map<String, Value>, raw: Value },
}

impl Expected {
    pub fn from_value(value: Value) -> Self {
        if let Value::Array(items) = &value {
            if let [Value::Object(fields)] = items.as_slice() {
                return Expected::AnyElement {
                    fields: fields.clone(),
                    raw: value.clone(),
                };
            }
        }
        Expected::Equals(value)
    }

    pub fn raw(&self) -> &Value {
        match self {
            Expected::Equals(v) => v,
            Expected::AnyElement { raw, .. } => raw,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expected::Equals(_) => "equals",
            Expected::AnyElement { .. } => "any-element",
        }
    }
}

/// One project node returned by the remote API.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub full_path: String,
    /// Full node object; path resolution starts here.
    pub raw: Value,
}

impl ProjectRecord {
    pub fn to_ref(&self) -> ProjectRef {
        ProjectRef {
            id: self.id.clone(),
            name: self.name.clone(),
            full_path: self.full_path.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage", default)]
    pub has_next_page: bool,
}

#[derive(Debug, Clone)]
pub struct ProjectsPage {
    pub nodes: Vec<ProjectRecord>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Conformant,
    Nonconformant(Vec<String>),
    Skipped { prefix: String },
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
    pub full_path: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct IncorrectProject {
    #[serde(flatten)]
    pub project: ProjectRef,
    pub mismatches: Vec<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SkippedProject {
    #[serde(flatten)]
    pub project: ProjectRef,
    pub prefix: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct AuditReport {
    pub summary: AuditSummary,
    pub correct: Vec<ProjectRef>,
    pub incorrect: Vec<IncorrectProject>,
    pub skipped: Vec<SkippedProject>,
}

#[derive(Serialize)]
pub struct RuleSummary {
    pub path: String,
    pub kind: String,
    pub expected: Value,
}

#[derive(Serialize)]
pub struct QueryDocument {
    pub query: String,
}
