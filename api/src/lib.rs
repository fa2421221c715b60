//! # ShineGold API
//!
//! HTTP surface of the verification backend: email/SMS code delivery and
//! verification plus captcha issue/verify, with per-IP throttling in front of
//! the verification engine.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{build_state, create_app, AppState};
