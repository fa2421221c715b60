pub mod cors;
pub mod rate_limit;

pub use cors::create_cors;
pub use rate_limit::{RateLimitDecision, RateLimitStore, RateLimiter};
