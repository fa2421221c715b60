use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_shared::utils::mask_phone_number;

use crate::app::AppState;
use crate::dto::{SendCodeResponse, SendSmsCodeRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/verification/sms/send
///
/// Same contract as the email route with `{ "phone", "purpose" }`.
pub async fn send_sms_code(
    state: web::Data<AppState>,
    request: web::Json<SendSmsCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;
    request.ensure_purpose()?;

    tracing::debug!(
        recipient = %mask_phone_number(&request.phone),
        purpose = %request.purpose,
        "Processing send SMS code request"
    );

    let result = state
        .verification
        .send_sms_code(&request.phone, request.purpose)
        .await?;

    Ok(HttpResponse::Ok().json(SendCodeResponse::from(result)))
}
