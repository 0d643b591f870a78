//! # Todolist Core
//!
//! Core types for the todo list service.
//!
//! This crate holds everything that does not depend on HTTP:
//! - The in-memory [`TodoStore`] and the [`Outcome`] of each mutation
//! - Markup escaping applied to submitted text
//! - Lenient parsing of item positions taken from request paths
//! - The error type used for startup and serving failures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod position;
pub mod sanitize;
pub mod store;

pub use error::{Error, Result};
pub use position::Position;
pub use store::{Outcome, TodoStore};
