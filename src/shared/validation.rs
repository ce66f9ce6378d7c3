use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

lazy_static! {
    /// Regex for catalog slugs (cities, services, categories)
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "riyadh", "furniture-moving", "ac-maintenance"
    /// - Invalid: "-riyadh", "riyadh-", "furniture--moving", "Riyadh", "furniture_moving"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for advertiser short codes: exactly six lowercase alphanumerics
    pub static ref SHORT_CODE_REGEX: Regex = Regex::new(r"^[a-z0-9]{6}$").unwrap();

    /// Regex for phone and WhatsApp numbers: optional leading "+", 8 to 15 digits
    /// - Valid: "0501234567", "+966501234567"
    /// - Invalid: "05-0123", "phone", "+96650123456789012"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{8,15}$").unwrap();
}

/// Strip the separators people type into phone numbers ("050 123 4567", "050-123-4567")
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '(' && *c != ')')
        .collect()
}

/// Render validator errors as "field: message" pairs, sorted by field name
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
