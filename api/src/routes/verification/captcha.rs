use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{CaptchaResponse, VerifyCaptchaRequest, VerifyCaptchaResponse};
use crate::handlers::ApiError;

/// Handler for GET /api/v1/verification/captcha
pub async fn get_captcha(state: web::Data<AppState>) -> HttpResponse {
    let challenge = state.verification.generate_captcha();
    HttpResponse::Ok().json(CaptchaResponse::from(challenge))
}

/// Handler for POST /api/v1/verification/captcha/verify
///
/// A correct answer consumes the captcha.
pub async fn verify_captcha(
    state: web::Data<AppState>,
    request: web::Json<VerifyCaptchaRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let valid = state
        .verification
        .verify_captcha(&request.captcha_id, &request.captcha_code);

    Ok(HttpResponse::Ok().json(VerifyCaptchaResponse::new(valid)))
}
