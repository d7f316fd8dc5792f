//! Placeholder text for relations or fields that are missing on a record.
//!
//! A donation whose donor profile was removed, or a request without a
//! contact phone, still renders; the gap is filled with a fixed label
//! instead of failing the response.

/// Shown when a related profile (donor, recipient, volunteer) is missing.
pub const UNKNOWN: &str = "Unknown";

/// Shown when an optional free-text field was never filled in.
pub const NOT_PROVIDED: &str = "Not provided";

/// Return the trimmed name, or [`UNKNOWN`] when absent or blank.
pub fn name_or_unknown(name: Option<&str>) -> String {
    non_blank(name).unwrap_or(UNKNOWN).to_string()
}

/// Return the trimmed value, or [`NOT_PROVIDED`] when absent or blank.
pub fn or_not_provided(value: Option<&str>) -> String {
    non_blank(value).unwrap_or(NOT_PROVIDED).to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_name_is_kept() {
        assert_eq!(name_or_unknown(Some("  Ada Obi ")), "Ada Obi");
    }

    #[test]
    fn missing_name_is_unknown() {
        assert_eq!(name_or_unknown(None), "Unknown");
        assert_eq!(name_or_unknown(Some("   ")), "Unknown");
    }

    #[test]
    fn missing_field_is_not_provided() {
        assert_eq!(or_not_provided(None), "Not provided");
        assert_eq!(or_not_provided(Some("")), "Not provided");
        assert_eq!(or_not_provided(Some("12 Main St")), "12 Main St");
    }
}
