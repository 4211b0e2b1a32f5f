use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// JSON body extractor that never rejects on bad JSON. An empty, unparsable or
/// non-object body reads as `{}`; a field whose value has the wrong type is
/// dropped on its own. Required-field checks are left to the handler.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(LenientJson(T::default()));
        }

        let fields = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                tracing::warn!("Request body is not a JSON object, treating as empty");
                Map::new()
            }
            Err(e) => {
                tracing::warn!("Unparsable request body, treating as empty: {}", e);
                Map::new()
            }
        };

        Ok(LenientJson(from_fields(fields)))
    }
}

/// Deserializes `T` from an object, keeping only the fields `T` accepts.
fn from_fields<T>(fields: Map<String, Value>) -> T
where
    T: DeserializeOwned + Default,
{
    if let Ok(value) = serde_json::from_value(Value::Object(fields.clone())) {
        return value;
    }

    let mut accepted = Map::new();
    for (key, value) in fields {
        accepted.insert(key.clone(), value);
        if let Err(e) = serde_json::from_value::<T>(Value::Object(accepted.clone())) {
            tracing::warn!("Ignoring request field {}: {}", key, e);
            accepted.remove(&key);
        }
    }

    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

/// A required, non-blank string field.
pub fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}

/// An optional string field; blank counts as absent.
pub fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Body {
        topic: Option<String>,
        count: Option<u32>,
        keywords: Vec<String>,
    }

    async fn extract(raw: &'static str) -> Body {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(axum::body::Body::from(raw))
            .unwrap();
        LenientJson::<Body>::from_request(req, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn valid_body_is_parsed() {
        assert_eq!(extract(r#"{"topic":"coffee"}"#).await.topic.as_deref(), Some("coffee"));
    }

    #[tokio::test]
    async fn empty_or_broken_body_defaults() {
        assert_eq!(extract("").await, Body::default());
        assert_eq!(extract("{not json").await, Body::default());
        assert_eq!(extract("[1,2,3]").await, Body::default());
    }

    #[tokio::test]
    async fn wrong_typed_field_is_dropped_alone() {
        let body = extract(r#"{"topic":"coffee","count":"5","keywords":"latte, espresso"}"#).await;
        assert_eq!(body.topic.as_deref(), Some("coffee"));
        assert_eq!(body.count, None);
        assert!(body.keywords.is_empty());

        let body = extract(r#"{"topic":"coffee","count":-1,"keywords":["latte"]}"#).await;
        assert_eq!(body.topic.as_deref(), Some("coffee"));
        assert_eq!(body.count, None);
        assert_eq!(body.keywords, vec!["latte"]);
    }

    #[tokio::test]
    async fn null_and_unknown_fields_are_tolerated() {
        let body = extract(r#"{"topic":null,"extra":{"nested":true},"count":3}"#).await;
        assert_eq!(body, Body { topic: None, count: Some(3), keywords: vec![] });
    }

    #[test]
    fn blank_required_field_is_missing() {
        let err = required(&Some("   ".into()), "topic").unwrap_err();
        assert!(err.to_string().contains("topic"));
        assert_eq!(required(&Some(" x ".into()), "topic").unwrap(), "x");
        assert_eq!(optional(&Some("".into())), None);
    }
}
