//! Core type definitions for index question answering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page reference as stored in index files (either `"12"`, `"3-5"` or `12`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageLocator {
    Number(serde_json::Number),
    Text(String),
}

impl PageLocator {
    fn is_blank(&self) -> bool {
        match self {
            PageLocator::Number(n) => n.as_f64() == Some(0.0),
            PageLocator::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for PageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLocator::Number(n) => write!(f, "{}", n),
            PageLocator::Text(s) => f.write_str(s),
        }
    }
}

/// One section of an indexed document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_num: Option<PageLocator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_range: Option<PageLocator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<PageLocator>,
    /// Sub-sections in document order (`null` or missing = leaf)
    #[serde(default, deserialize_with = "nullable_children", skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
}

fn nullable_children<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Node>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Node {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.nodes = children;
        self
    }

    // Empty strings count as missing, same as a missing key.
    pub fn title(&self) -> Option<&str> {
        present(&self.title)
    }

    pub fn summary(&self) -> Option<&str> {
        present(&self.summary)
    }

    pub fn text(&self) -> Option<&str> {
        present(&self.text)
    }

    /// First present of `page_num`, `page_range`, `page_number`
    pub fn page_locator(&self) -> Option<&PageLocator> {
        [&self.page_num, &self.page_range, &self.page_number]
            .into_iter()
            .filter_map(|p| p.as_ref())
            .find(|p| !p.is_blank())
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Top-level `structure` value: indexers emit either one root or a list of roots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Structure {
    Many(Vec<Structure>),
    Single(Node),
}

impl From<Node> for Structure {
    fn from(node: Node) -> Self {
        Structure::Single(node)
    }
}

impl From<Vec<Node>> for Structure {
    fn from(nodes: Vec<Node>) -> Self {
        Structure::Many(nodes.into_iter().map(Structure::Single).collect())
    }
}

/// Persisted index document (`<book_id>_structure.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_description: Option<String>,
    /// `None` when missing or falsy (`null`, `false`, `0`, `""`, `[]`, `{}`)
    #[serde(default, deserialize_with = "truthy_structure")]
    pub structure: Option<Structure>,
}

fn truthy_structure<'de, D>(deserializer: D) -> Result<Option<Structure>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    let falsy = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    };
    if falsy {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(<D::Error as serde::de::Error>::custom)
}

impl Index {
    /// Structure to search, or `None` when the index has none
    pub fn content(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }
}

/// Which node field is used as the context body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySource {
    #[default]
    PreferSummary,
    PreferText,
}

impl BodySource {
    pub fn from_use_summary(use_summary: bool) -> Self {
        if use_summary {
            BodySource::PreferSummary
        } else {
            BodySource::PreferText
        }
    }
}

/// Parsed per-request query
#[derive(Debug, Clone)]
pub struct Query {
    pub question: String,
    pub query_terms: Vec<String>,
    pub top_k: usize,
    pub body_source: BodySource,
}

/// Which indexes a question should be answered from
#[derive(Debug, Clone, Default)]
pub enum IndexSelection {
    Paths(Vec<String>),
    Books(Vec<String>),
    #[default]
    All,
}

impl IndexSelection {
    /// Explicit paths win over book ids; neither means every known index
    pub fn from_parts(books: Option<Vec<String>>, index_paths: Option<Vec<String>>) -> Self {
        match (index_paths, books) {
            (Some(paths), _) if !paths.is_empty() => IndexSelection::Paths(paths),
            (_, Some(books)) if !books.is_empty() => IndexSelection::Books(books),
            _ => IndexSelection::All,
        }
    }
}

/// Request to answer a question
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub books: Option<Vec<String>>,
    #[serde(default)]
    pub index_paths: Option<Vec<String>>,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub use_summary: Option<bool>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Answer plus the indexes that contributed context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub used_books: Vec<String>,
    pub used_index_paths: Vec<String>,
}

/// Entry in the listing of known indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub book_id: String,
    pub index_path: String,
}
