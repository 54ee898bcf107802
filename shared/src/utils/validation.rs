//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

static WALLET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid wallet pattern"));

/// Blood groups accepted across requests, users and donations
pub const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Image content types accepted for uploads
pub const IMAGE_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

pub fn is_valid_blood_type(blood_type: &str) -> bool {
    BLOOD_TYPES.contains(&blood_type.trim().to_uppercase().as_str())
}

/// EVM account address, `0x` followed by 40 hex digits
pub fn is_valid_wallet_address(address: &str) -> bool {
    WALLET_REGEX.is_match(address.trim())
}

pub fn is_allowed_image(content_type: &str) -> bool {
    IMAGE_CONTENT_TYPES.contains(&content_type.trim().to_lowercase().as_str())
}

/// Coordinates within WGS84 bounds
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("donor@darahconnect.id"));
        assert!(!is_valid_email("donor@"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn test_blood_type() {
        assert!(is_valid_blood_type("AB+"));
        assert!(is_valid_blood_type("o-"));
        assert!(!is_valid_blood_type("C+"));
    }

    #[test]
    fn test_wallet_address() {
        assert!(is_valid_wallet_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_valid_wallet_address("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_valid_wallet_address("0x5FbDB2315678afecb367f032d93F642f64180aa"));
        assert!(!is_valid_wallet_address("0xZZbDB2315678afecb367f032d93F642f64180aa3"));
    }

    #[test]
    fn test_image_types() {
        assert!(is_allowed_image("image/png"));
        assert!(is_allowed_image("image/JPEG"));
        assert!(!is_allowed_image("image/gif"));
    }

    #[test]
    fn test_coordinates() {
        assert!(is_valid_coordinate(-6.2, 106.8));
        assert!(!is_valid_coordinate(91.0, 0.0));
        assert!(!is_valid_coordinate(0.0, -181.0));
    }
}
