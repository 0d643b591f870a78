//! Request handlers.
//!
//! Every handler performs at most one store operation. Anything other than a
//! rendered page is answered with the same redirect to the list, whether or
//! not the operation changed the store.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use todolist_core::Position;

use crate::body::{EditTodo, NewTodo, Submitted};
use crate::server::AppState;
use crate::views::{EditView, ListView};

/// Path of the list page, the target of every redirect.
pub const LIST_PATH: &str = "/todo";

/// Redirects to the list page with `302 Found`.
#[must_use]
pub fn to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LIST_PATH)]).into_response()
}

fn position(path: Result<Path<String>, PathRejection>) -> Option<Position> {
    path.ok().and_then(|Path(raw)| Position::parse(&raw))
}

/// `GET /todo`
pub async fn list(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = ListView::new(state.store.snapshot());
    Html(state.renderer.render_list(&view))
}

/// `POST /todo/add`
pub async fn create(
    State(state): State<Arc<AppState>>,
    Submitted(body): Submitted<NewTodo>,
) -> Response {
    let outcome = state.store.add(&body.newtodo);
    tracing::debug!(%outcome, len = state.store.len(), "Create");
    to_list()
}

/// `GET /todo/:id`
pub async fn show(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let found = position(path).and_then(|position| {
        let todo = state.store.get(position)?;
        let index = usize::try_from(position.value()).ok()?;
        Some(EditView::new(index, todo))
    });

    match found {
        Some(view) => Html(state.renderer.render_edit(&view)).into_response(),
        None => {
            tracing::debug!("Edit requested for a missing item");
            to_list()
        },
    }
}

/// `PUT /todo/edit/:id`, normally reached through a method override.
pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    Submitted(body): Submitted<EditTodo>,
) -> Response {
    let position = position(path);
    let outcome = state.store.update(position, &body.edit_todo);
    tracing::debug!(?position, %outcome, "Update");
    to_list()
}

/// `GET /todo/delete/:id`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let position = position(path);
    let outcome = state.store.remove(position);
    tracing::debug!(?position, %outcome, "Delete");
    to_list()
}

/// Any unmatched path or method.
pub async fn fallback() -> Response {
    to_list()
}
