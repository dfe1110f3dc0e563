//! Required-field checks shared by controllers and the client sanitizer.

/// Payloads that name the fields they cannot be sent without.
pub trait RequiredFields {
    /// Names of required fields that are absent, in declaration order.
    fn missing_fields(&self) -> Vec<&'static str>;
}

/// Collect the names whose presence flag is false.
pub fn missing(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect()
}

/// Human readable message listing missing fields.
pub fn missing_fields_message(fields: &[&str]) -> String {
    format!("Missing required fields: {}", fields.join(", "))
}

/// True when an optional string is present and not blank.
pub(crate) fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
