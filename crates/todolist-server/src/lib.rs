//! # Todolist Server
//!
//! Server-rendered HTML front end for the todo list: list, add, edit and
//! delete items through plain form submissions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod body;
pub mod handlers;
pub mod method_override;
pub mod server;
pub mod views;

pub use server::{AppState, Server, ServerConfig};
pub use views::{EditView, HtmlRenderer, ListView, ViewRenderer};
