//! Phone number utilities

/// Minimum phone length accepted at the request boundary, counted after trimming
pub const MIN_PHONE_LENGTH: usize = 10;

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Whether the trimmed phone has at least [`MIN_PHONE_LENGTH`] characters.
///
/// OTP keys use the phone exactly as submitted (trimmed), so this is a length
/// check only and does not reformat the number.
pub fn meets_min_length(phone: &str) -> bool {
    phone.trim().chars().count() >= MIN_PHONE_LENGTH
}

/// Mask a phone number for logs (e.g. +15****1234)
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
        assert_eq!(normalize_phone_number("555-123-4567"), "5551234567");
        assert_eq!(normalize_phone_number("+1 (555) 123 4567"), "+15551234567");
    }

    #[test]
    fn test_meets_min_length() {
        assert!(meets_min_length("5551234567"));
        assert!(meets_min_length("  +15551234567 "));
        assert!(!meets_min_length("555123456"));
        assert!(!meets_min_length("   12345    "));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+15551234567"), "+15****4567");
        assert_eq!(mask_phone_number("9876543210"), "987****3210");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
