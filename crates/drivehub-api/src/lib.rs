//! # drivehub-api
//!
//! HTTP API layer for DriveHub built on Axum.
//!
//! A thin realization of the engine's operation surface: every handler
//! extracts a [`Session`](extractors::Session), calls one service, and maps
//! the engine's error taxonomy to an HTTP status through [`ApiError`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
