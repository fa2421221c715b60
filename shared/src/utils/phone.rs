//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Mainland China mobile number: 11 digits, second digit 3-9
static CHINA_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("valid mobile regex"));

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a valid Chinese mobile number
///
/// The check is strict: separators are not stripped, so `138-1234-5678` is
/// rejected. SMS codes are keyed by the exact submitted target.
pub fn is_valid_chinese_mobile(phone: &str) -> bool {
    CHINA_MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for logging (e.g., 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("138-1234-5678"), "13812345678");
        assert_eq!(normalize_phone_number("+86 138 1234 5678"), "+8613812345678");
    }

    #[test]
    fn test_is_valid_chinese_mobile() {
        assert!(is_valid_chinese_mobile("13812345678"));
        assert!(is_valid_chinese_mobile("19912345678"));
        assert!(!is_valid_chinese_mobile("12812345678")); // Invalid prefix
        assert!(!is_valid_chinese_mobile("1381234567")); // Too short
        assert!(!is_valid_chinese_mobile("138123456789")); // Too long
        assert!(!is_valid_chinese_mobile("138-1234-5678"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("13812345678"), "138****5678");
        assert_eq!(mask_phone_number("+8613812345678"), "+86****5678");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
