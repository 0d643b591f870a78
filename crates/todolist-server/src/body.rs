//! Request body extraction for form submissions.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Body of `POST /todo/add`.
#[derive(Debug, Default, Deserialize)]
pub struct NewTodo {
    /// Text of the item to append.
    #[serde(default)]
    pub newtodo: String,
}

/// Body of `PUT /todo/edit/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct EditTodo {
    /// Replacement text.
    #[serde(default, rename = "editTodo")]
    pub edit_todo: String,
}

/// Encoding of a request body, judged from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/x-www-form-urlencoded`
    Form,
    /// `application/json` or any `+json` media type
    Json,
}

impl BodyKind {
    /// Classifies the request body, if it is one we understand.
    #[must_use]
    pub fn of(headers: &HeaderMap) -> Option<Self> {
        let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/x-www-form-urlencoded" {
            Some(Self::Form)
        } else if essence == "application/json" || essence.ends_with("+json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Extracts `T` from a form-encoded or JSON body.
///
/// A missing, unsupported or malformed body yields `T::default()`, which
/// callers treat like an empty submission.
#[derive(Debug)]
pub struct Submitted<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Submitted<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = match BodyKind::of(req.headers()) {
            Some(BodyKind::Form) => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|rejection| rejection.body_text()),
            Some(BodyKind::Json) => Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|rejection| rejection.body_text()),
            None => Ok(T::default()),
        };

        Ok(Self(parsed.unwrap_or_else(|reason| {
            tracing::debug!(%reason, "Ignoring unreadable request body");
            T::default()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    fn request(content_type: &'static str, body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/todo/add/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_body_kind() {
        assert_eq!(
            BodyKind::of(&headers("application/x-www-form-urlencoded")),
            Some(BodyKind::Form)
        );
        assert_eq!(
            BodyKind::of(&headers("application/json; charset=utf-8")),
            Some(BodyKind::Json)
        );
        assert_eq!(
            BodyKind::of(&headers("application/merge-patch+json")),
            Some(BodyKind::Json)
        );
        assert_eq!(BodyKind::of(&headers("text/plain")), None);
        assert_eq!(BodyKind::of(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_extracts_form_field() {
        let req = request("application/x-www-form-urlencoded", "newtodo=Buy+milk");
        let Submitted(body) = Submitted::<NewTodo>::from_request(req, &()).await.unwrap();
        assert_eq!(body.newtodo, "Buy milk");
    }

    #[tokio::test]
    async fn test_extracts_json_field() {
        let req = request("application/json", r#"{"editTodo":"Walk dog"}"#);
        let Submitted(body) = Submitted::<EditTodo>::from_request(req, &()).await.unwrap();
        assert_eq!(body.edit_todo, "Walk dog");
    }

    #[tokio::test]
    async fn test_malformed_body_is_empty() {
        let req = request("application/json", "{not json");
        let Submitted(body) = Submitted::<NewTodo>::from_request(req, &()).await.unwrap();
        assert!(body.newtodo.is_empty());

        let req = request("text/plain", "newtodo=ignored");
        let Submitted(body) = Submitted::<NewTodo>::from_request(req, &()).await.unwrap();
        assert!(body.newtodo.is_empty());
    }
}
