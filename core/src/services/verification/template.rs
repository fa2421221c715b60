//! Email subjects and bodies for verification codes

use crate::domain::entities::verification_code::VerificationPurpose;

/// Subject line for a verification email
pub fn email_subject(brand: &str, purpose: VerificationPurpose) -> String {
    let label = match purpose {
        VerificationPurpose::Register => "Registration code",
        VerificationPurpose::Login => "Login code",
        VerificationPurpose::ResetPassword => "Password reset code",
        VerificationPurpose::ChangeEmail => "Email change code",
        VerificationPurpose::ChangePhone => "Verification code",
    };
    format!("{} - {}", brand, label)
}

/// HTML body embedding the code
pub fn email_html(brand: &str, code: &str, ttl_minutes: i64) -> String {
    format!(
        r#"<div style="max-width: 600px; margin: 0 auto; padding: 20px; font-family: Arial, sans-serif;">
  <h2 style="color: #333; text-align: center;">{brand} verification code</h2>
  <p>Hello,</p>
  <p>Your verification code is:</p>
  <div style="background-color: #f5f5f5; padding: 15px; text-align: center; font-size: 24px; font-weight: bold; letter-spacing: 5px; margin: 20px 0;">{code}</div>
  <p>The code is valid for {ttl_minutes} minutes. Do not share it with anyone.</p>
  <p>If you did not request this code, please ignore this email.</p>
  <p>Thank you,</p>
  <p>The {brand} team</p>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects_per_purpose() {
        assert_eq!(
            email_subject("ShineGold", VerificationPurpose::Register),
            "ShineGold - Registration code"
        );
        assert_eq!(
            email_subject("ShineGold", VerificationPurpose::ResetPassword),
            "ShineGold - Password reset code"
        );
        assert_eq!(
            email_subject("ShineGold", VerificationPurpose::ChangeEmail),
            "ShineGold - Email change code"
        );
        assert_eq!(
            email_subject("ShineGold", VerificationPurpose::ChangePhone),
            "ShineGold - Verification code"
        );
    }

    #[test]
    fn test_html_embeds_code_and_ttl() {
        let html = email_html("ShineGold", "482913", 15);
        assert!(html.contains(">482913</div>"));
        assert!(html.contains("valid for 15 minutes"));
        assert!(html.contains("The ShineGold team"));
    }
}
