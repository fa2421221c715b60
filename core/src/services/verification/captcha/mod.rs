//! Graphical captchas: SVG rendering and the swept in-memory answer cache

mod cache;
mod generator;

pub use cache::CaptchaCache;
pub use generator::{CaptchaGenerator, CAPTCHA_ALPHABET};
