//! One-time passcode generation

use rand::{rngs::OsRng, Rng};

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Generates a 6-digit code, uniform over [100000, 999999], from the OS CSPRNG
pub fn generate_code() -> String {
    OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::otp_record::CODE_LENGTH;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_format() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));

            let num: u32 = code.parse().expect("Generated code should be a valid number");
            assert!((CODE_MIN..=CODE_MAX).contains(&num));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: HashSet<String> = (0..100).map(|_| generate_code()).collect();
        assert!(codes.len() > 1);
    }
}
