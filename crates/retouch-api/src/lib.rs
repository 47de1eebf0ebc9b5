//! Retouch API Library
//!
//! HTTP handlers, the editor page and application setup.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;
mod utils;
mod views;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
