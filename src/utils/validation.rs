//! Form-level validation helpers.
//!
//! These run before any business logic is invoked; a field that fails
//! here surfaces as a 400 with a message and never reaches the pricing
//! engine or the database.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// SAT format: 3-4 letters, date of birth/incorporation, homoclave.
static RFC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-ZÑ&]{3,4}[0-9]{2}(0[1-9]|1[012])(0[1-9]|[12][0-9]|3[01])[A-Z0-9]{2}[0-9A]$")
        .expect("rfc regex")
});

// 10-digit national number, optional +52 country code.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+52)?[1-9][0-9]{9}$").expect("phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// RFC is validated uppercased, so lowercase input is accepted.
pub fn is_valid_rfc(rfc: &str) -> bool {
    RFC_RE.is_match(&rfc.to_uppercase())
}

/// Spaces are stripped before matching ("33 1234 5678" style input).
pub fn is_valid_phone(phone: &str) -> bool {
    let stripped: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&stripped)
}

pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
}

pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// discount in [0, 100]
pub fn is_valid_discount(percentage: f64) -> bool {
    percentage.is_finite() && (0.0..=100.0).contains(&percentage)
}

/// profit margin in [0, 200]
pub fn is_valid_profit(percentage: f64) -> bool {
    percentage.is_finite() && (0.0..=200.0).contains(&percentage)
}
