use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_shared::utils::mask_email;

use crate::app::AppState;
use crate::dto::{SendCodeResponse, SendEmailCodeRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/verification/email/send
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "purpose": "register" }
/// ```
///
/// # Response
///
/// `200 OK` with `{ "message": "...", "retry_after": 40 }`; `retry_after`
/// is only present while the previous code is cooling down.
pub async fn send_email_code(
    state: web::Data<AppState>,
    request: web::Json<SendEmailCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;
    request.ensure_purpose()?;

    tracing::debug!(
        recipient = %mask_email(&request.email),
        purpose = %request.purpose,
        "Processing send email code request"
    );

    let result = state
        .verification
        .send_email_code(&request.email, request.purpose)
        .await?;

    Ok(HttpResponse::Ok().json(SendCodeResponse::from(result)))
}
