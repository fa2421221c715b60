//! Type definitions shared by the API layer
//!
//! - `response` - API response wrapper and health check payload

pub mod response;

pub use response::{HealthResponse, HealthStatus};
