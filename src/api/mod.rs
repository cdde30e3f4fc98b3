//! HTTP API module for the Daily Allowance Engine.
//!
//! This module provides the REST API endpoints for generating daily
//! allowance payment rows and recomputing them with amended income data.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{GenerateRequest, RecomputeRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
