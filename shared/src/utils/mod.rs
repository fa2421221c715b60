//! Common utility functions

pub mod email;
pub mod phone;

pub use email::{is_valid_email, mask_email};
pub use phone::{is_valid_chinese_mobile, mask_phone_number};
