//! Local checks run before any remote call.

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use chrono::NaiveDate;

use crate::types::AccessTokenScope;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Standard alphabet with padding; non-zero trailing bits are accepted.
const CONTENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Accepts standard base64, including line-wrapped output of `base64(1)`.
pub fn validate_base64_content(value: &str, _key: &str) -> Vec<String> {
    let unwrapped: String = value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    match CONTENT_ENGINE.decode(unwrapped) {
        Ok(_) => Vec::new(),
        Err(_) => vec![format!(
            "given repository file content '{value}' is not base64 encoded, but must be"
        )],
    }
}

pub fn validate_iso_date(value: &str, key: &str) -> Vec<String> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(_) => Vec::new(),
        Err(e) => vec![format!(
            "expected {key:?} to be a valid YYYY-MM-DD date, got {value:?}: {e}"
        )],
    }
}

pub fn validate_scope(value: &str, key: &str) -> Vec<String> {
    if AccessTokenScope::parse(value).is_some() {
        return Vec::new();
    }
    let allowed: Vec<&str> = AccessTokenScope::ALL.iter().map(|s| s.as_str()).collect();
    vec![format!(
        "expected {key} to be one of [{}], got {value}",
        allowed.join(" ")
    )]
}
