//! Argument validation: schema checks plus travel-domain input validators.

use std::sync::OnceLock;

use regex::Regex;

/// Validate tool call arguments against a JSON Schema.
///
/// Performs top-level validation: schema type check, required field
/// presence, and property type verification. Returns `Ok(())` when valid,
/// `Err(message)` describing the first violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    if let Some(schema_type) = schema.get("type").and_then(|v| v.as_str()) {
        if schema_type == "object" && !args.is_object() {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(args)
            ));
        }
    }

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        let obj = match args.as_object() {
            Some(obj) => obj,
            None => return Ok(()),
        };
        for field in required {
            if let Some(name) = field.as_str() {
                if !obj.contains_key(name) {
                    return Err(format!("missing required field '{name}'"));
                }
            }
        }
    }

    if let (Some(properties), Some(obj)) = (
        schema.get("properties").and_then(|v| v.as_object()),
        args.as_object(),
    ) {
        for (key, value) in obj {
            if let Some(prop_schema) = properties.get(key) {
                if let Some(expected_type) = prop_schema.get("type").and_then(|v| v.as_str()) {
                    if !value_matches_type(value, expected_type) {
                        return Err(format!(
                            "field '{}' expected type '{}', got {}",
                            key,
                            expected_type,
                            json_type_name(value)
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Whether `month` is a full English month name (case-insensitive).
pub fn is_valid_month(month: &str) -> bool {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    MONTHS.contains(&month.to_lowercase().as_str())
}

/// Whether `code` is a three-letter IATA airport code.
pub fn is_valid_airport(code: &str) -> bool {
    static AIRPORT_RE: OnceLock<Regex> = OnceLock::new();
    AIRPORT_RE
        .get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("valid regex"))
        .is_match(code)
}

/// Whether `date` is a real calendar date in `YYYY-MM-DD` form.
pub fn is_valid_date(date: &str) -> bool {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    let re = DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
    re.is_match(date) && chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_case_insensitive() {
        assert!(is_valid_month("January"));
        assert!(is_valid_month("december"));
        assert!(!is_valid_month("Januray"));
    }

    #[test]
    fn airport_codes_are_three_uppercase_letters() {
        assert!(is_valid_airport("JFK"));
        assert!(!is_valid_airport("jfk"));
        assert!(!is_valid_airport("JFKX"));
    }

    #[test]
    fn dates_must_exist_on_the_calendar() {
        assert!(is_valid_date("2025-06-15"));
        assert!(!is_valid_date("2025-02-30"));
        assert!(!is_valid_date("June 15th"));
    }
}
