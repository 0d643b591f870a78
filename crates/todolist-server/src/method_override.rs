//! HTTP method override for HTML forms.
//!
//! Browsers can only submit `GET` and `POST`. An edit form posts with a hidden
//! `_method` field naming the method it really means. This middleware runs in
//! front of routing: it removes the field from the body and, when the value
//! names a known method, rewrites the request method before the router sees it.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;

use crate::body::BodyKind;
use crate::handlers;

/// Name of the body field carrying the overriding method.
pub const OVERRIDE_FIELD: &str = "_method";

/// Largest body the middleware will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Normalizes `POST` requests that carry an override field.
///
/// Requests that are not `POST`, or whose body is neither form-encoded nor
/// JSON, pass through untouched.
pub async fn normalize_method(request: Request, next: Next) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }
    let Some(kind) = BodyKind::of(request.headers()) else {
        return next.run(request).await;
    };

    let (mut parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to buffer request body");
            return handlers::to_list();
        },
    };

    let body = match take_override(kind, &bytes) {
        Some((value, stripped)) => {
            if let Some(method) = parse_method(&value) {
                tracing::debug!(from = %parts.method, to = %method, "Method override");
                parts.method = method;
            }
            parts
                .headers
                .insert(header::CONTENT_LENGTH, HeaderValue::from(stripped.len()));
            Body::from(stripped)
        },
        None => Body::from(bytes),
    };

    next.run(Request::from_parts(parts, body)).await
}

/// Maps an override value onto a standard method, ignoring case.
#[must_use]
pub fn parse_method(value: &str) -> Option<Method> {
    let method = match value.trim().to_ascii_uppercase().as_str() {
        "GET" => Method::GET,
        "HEAD" => Method::HEAD,
        "POST" => Method::POST,
        "PUT" => Method::PUT,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        "OPTIONS" => Method::OPTIONS,
        _ => return None,
    };
    Some(method)
}

/// Removes the override field from `body`.
///
/// Returns the field's value and the re-encoded remaining body, or `None` if
/// the body has no override field. A non-string JSON value yields an empty
/// value, which names no method.
#[must_use]
pub fn take_override(kind: BodyKind, body: &[u8]) -> Option<(String, Vec<u8>)> {
    match kind {
        BodyKind::Form => take_form_override(body),
        BodyKind::Json => take_json_override(body),
    }
}

fn take_form_override(body: &[u8]) -> Option<(String, Vec<u8>)> {
    let mut value = None;
    let mut rest = form_urlencoded::Serializer::new(String::new());

    for (key, field) in form_urlencoded::parse(body) {
        if key == OVERRIDE_FIELD {
            value.get_or_insert_with(|| field.into_owned());
        } else {
            rest.append_pair(&key, &field);
        }
    }

    value.map(|value| (value, rest.finish().into_bytes()))
}

fn take_json_override(body: &[u8]) -> Option<(String, Vec<u8>)> {
    let mut json: serde_json::Value = serde_json::from_slice(body).ok()?;
    let removed = json.as_object_mut()?.remove(OVERRIDE_FIELD)?;
    let value = removed.as_str().unwrap_or_default().to_string();
    let stripped = serde_json::to_vec(&json).ok()?;
    Some((value, stripped))
}
