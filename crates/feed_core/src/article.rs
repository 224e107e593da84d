use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Article identifier as sent by the content API: numeric ids for stored
/// articles, strings for anything imported or seeded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(id) => write!(f, "{id}"),
            ArticleId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(id: i64) -> Self {
        ArticleId::Number(id)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        ArticleId::Text(id.to_string())
    }
}

/// One article record. Only `id` is interpreted by the feed; everything else
/// is carried through untouched for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: ArticleId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ArticleSummary {
    pub fn new(id: impl Into<ArticleId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style helper, mostly for tests and fixtures.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// `true` only for an explicit JSON `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.fields
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn summary(&self) -> Option<&str> {
        self.str_field("summary")
    }

    pub fn section(&self) -> Option<&str> {
        self.str_field("section")
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field("category")
    }

    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug")
    }

    /// Route key for the detail view: the slug when present, else `article-{id}`.
    pub fn route_key(&self) -> String {
        match self.slug() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => format!("article-{}", self.id),
        }
    }
}
