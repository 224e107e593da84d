use feed_core::ArticleSummary;
use serde_json::Value;

use crate::{FailureKind, FetchError};

const ARTICLES_KEY: &str = "articles";
const ARTICLE_KEY: &str = "article";

/// Parse an article list body. Accepted shapes: a bare JSON array, or an
/// object carrying the list under `articles` (other keys such as `page` or
/// `totalItems` are ignored).
pub fn normalize_page(bytes: &[u8]) -> Result<Vec<ArticleSummary>, FetchError> {
    let value = parse_json(bytes)?;
    let list = match value {
        Value::Array(list) => list,
        Value::Object(mut object) => match object.remove(ARTICLES_KEY) {
            Some(Value::Array(list)) => list,
            Some(other) => {
                return Err(FetchError::new(
                    FailureKind::UnexpectedShape,
                    format!("`{ARTICLES_KEY}` is {}, expected an array", json_type(&other)),
                ));
            }
            None => {
                return Err(FetchError::new(
                    FailureKind::UnexpectedShape,
                    format!("object without an `{ARTICLES_KEY}` array"),
                ));
            }
        },
        other => {
            return Err(FetchError::new(
                FailureKind::UnexpectedShape,
                format!("expected an array or object, got {}", json_type(&other)),
            ));
        }
    };

    list.into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|err| {
                FetchError::new(
                    FailureKind::UnexpectedShape,
                    format!("article at index {index}: {err}"),
                )
            })
        })
        .collect()
}

/// Parse a single-article body: a bare article, `{ "article": {...} }`, or
/// `{ "article": null }` / `null` for "not found".
pub fn normalize_article(bytes: &[u8]) -> Result<Option<ArticleSummary>, FetchError> {
    let value = parse_json(bytes)?;
    let article = match value {
        Value::Null => return Ok(None),
        Value::Object(mut object) if object.contains_key(ARTICLE_KEY) => {
            match object.remove(ARTICLE_KEY) {
                Some(Value::Null) | None => return Ok(None),
                Some(article) => article,
            }
        }
        other @ Value::Object(_) => other,
        other => {
            return Err(FetchError::new(
                FailureKind::UnexpectedShape,
                format!("expected an article object, got {}", json_type(&other)),
            ));
        }
    };

    serde_json::from_value(article)
        .map(Some)
        .map_err(|err| FetchError::new(FailureKind::UnexpectedShape, err.to_string()))
}

fn parse_json(bytes: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedJson, err.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
