//! Pure helpers shared by the store and the HTTP layer. No I/O.

use qrbox_core::ServiceError;

/// Path prefix of the public, read-only box page.
pub const PUBLIC_PREFIX: &str = "/b/";

/// Trim `raw` and reject it if nothing is left.
///
/// `what` names the field in the error message ("box name", "item name").
pub fn validate_name(raw: &str, what: &str) -> Result<String, ServiceError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(format!("{what} must not be empty")));
    }
    Ok(name.to_string())
}

/// Normalize a submitted quantity to an integer ≥ 1.
///
/// Anything that does not parse as an integer, and any value below 1,
/// becomes 1.
pub fn normalize_qty(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .map(normalize_qty_value)
        .unwrap_or(1)
}

/// Clamp a numeric quantity into `1..=u32::MAX`.
pub fn normalize_qty_value(qty: i64) -> u32 {
    u32::try_from(qty.max(1)).unwrap_or(u32::MAX)
}

/// Public link for a box: `base_url` + `/b/` + id.
pub fn public_url(base_url: &str, id: &str) -> String {
    format!("{}{}{}", base_url.trim_end_matches('/'), PUBLIC_PREFIX, id)
}
