use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating Indonesian mobile numbers
    /// Local "08" prefix followed by 8-11 further digits
    /// - Valid: "081234567890", "0812345678"
    /// - Invalid: "6281234567890", "08123", "0812-3456-7890"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^08\d{8,11}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("081234567890"));
        assert!(PHONE_REGEX.is_match("0812345678")); // 8 digits after prefix
        assert!(PHONE_REGEX.is_match("0812345678901")); // 11 digits after prefix
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("6281234567890")); // country-code prefix
        assert!(!PHONE_REGEX.is_match("08123")); // too short
        assert!(!PHONE_REGEX.is_match("08123456789012")); // too long
        assert!(!PHONE_REGEX.is_match("0812-3456-7890")); // separators
        assert!(!PHONE_REGEX.is_match("")); // empty
        assert!(!PHONE_REGEX.is_match("08 1234567890")); // space
    }
}
