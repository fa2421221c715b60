//! Verification route handlers
//!
//! This module contains the endpoints under `/api/v1/verification`:
//! - Email and SMS code delivery
//! - Code verification
//! - Captcha issue and verification

pub mod captcha;
pub mod send_email;
pub mod send_sms;
pub mod verify;

use actix_web::web;
use std::sync::Arc;

use sg_shared::config::RateLimitConfig;

use crate::middleware::{RateLimitStore, RateLimiter};

/// Register the verification routes, each behind its own throttle
pub fn configure(
    cfg: &mut web::ServiceConfig,
    store: Arc<RateLimitStore>,
    limits: &RateLimitConfig,
) {
    cfg.service(
        web::scope("/verification")
            .service(
                web::resource("/email/send")
                    .wrap(RateLimiter::new(store.clone(), "email_send", limits.send_code))
                    .route(web::post().to(send_email::send_email_code)),
            )
            .service(
                web::resource("/sms/send")
                    .wrap(RateLimiter::new(store.clone(), "sms_send", limits.send_code))
                    .route(web::post().to(send_sms::send_sms_code)),
            )
            .service(
                web::resource("/verify")
                    .wrap(RateLimiter::new(store.clone(), "verify", limits.verify_code))
                    .route(web::post().to(verify::verify_code)),
            )
            .service(
                web::resource("/captcha")
                    .wrap(RateLimiter::new(store.clone(), "captcha", limits.captcha))
                    .route(web::get().to(captcha::get_captcha)),
            )
            .service(
                web::resource("/captcha/verify")
                    .wrap(RateLimiter::new(store, "captcha_verify", limits.captcha))
                    .route(web::post().to(captcha::verify_captcha)),
            ),
    );
}
