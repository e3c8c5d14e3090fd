//! Masking of secrets before they are printed.

use serde_json::{Map, Value};

/// Fields masked by [`redact_secrets`].
pub const SECRET_KEYS: [&str; 3] = ["accessToken", "refreshToken", "apiKey"];

/// Masks a secret: empty stays empty, up to 8 characters become `****`,
/// longer values keep their first and last four characters.
pub fn mask_secret(value: &str) -> String {
    let count = value.chars().count();
    match count {
        0 => String::new(),
        1..=8 => "****".to_string(),
        _ => {
            let head: String = value.chars().take(4).collect();
            let tail: String = value.chars().skip(count - 4).collect();
            format!("{head}...{tail}")
        }
    }
}

/// Copy of `map` with every string secret field masked.
pub fn redact_secrets(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) if SECRET_KEYS.contains(&key.as_str()) => {
                    Value::String(mask_secret(s))
                }
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}
