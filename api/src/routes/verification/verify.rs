use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/verification/verify
///
/// A wrong, expired or unknown code is a `200` with `valid: false`; only
/// malformed requests and store failures are errors.
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;
    request.ensure_target()?;

    let result = state.verification.verify_code(request.into()).await?;

    Ok(HttpResponse::Ok().json(VerifyCodeResponse::from(result)))
}
