//! Book record validation
//!
//! Works on the raw JSON record so that type mismatches (a numeric title,
//! a string price) are reported instead of being lost in deserialization.
//! Every rule runs; errors accumulate in a fixed order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// 10 or 13 ASCII digits, nothing else.
static ISBN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}([0-9]{3})?$").expect("invalid isbn regex"));

/// Outcome of validating a book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a book record.
///
/// # Rules
/// - Absent, `null`, non-object or key-less input: only `"Book data is empty"`
/// - Presence: a falsy field (`null`, `false`, `0`, `""`, absent) is missing
/// - Type: title/author must always be strings; price/isbn are type-checked
///   only when present
/// - Price must be greater than 0; ISBN must be 10 or 13 digits
///
/// # Example
/// ```
/// use bookstore_server::models::validate;
/// use serde_json::json;
///
/// let report = validate(Some(&json!({
///     "title": "Dune", "author": "Herbert", "price": 9.99, "isbn": "0441013597"
/// })));
/// assert!(report.is_valid);
/// ```
pub fn validate(record: Option<&Value>) -> ValidationReport {
    let fields = match record {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return ValidationReport::from_errors(vec!["Book data is empty".to_owned()]),
    };

    let title = fields.get("title");
    let author = fields.get("author");
    let price = fields.get("price");
    let isbn = fields.get("isbn");

    let mut errors = Vec::new();

    if !is_truthy(title) {
        errors.push("Title is required");
    }
    if !is_truthy(author) {
        errors.push("Author is required");
    }
    if !is_truthy(price) {
        errors.push("Price is required");
    }
    if !is_truthy(isbn) {
        errors.push("ISBN is required");
    }

    if !matches!(title, Some(Value::String(_))) {
        errors.push("Title must be a string");
    }
    if !matches!(author, Some(Value::String(_))) {
        errors.push("Author must be a string");
    }
    if is_truthy(price) && !matches!(price, Some(Value::Number(_))) {
        errors.push("Price must be a number");
    }
    if is_truthy(isbn) && !matches!(isbn, Some(Value::String(_))) {
        errors.push("ISBN must be a string");
    }

    if is_truthy(price) && price.and_then(numeric_value).is_some_and(|p| p <= 0.0) {
        errors.push("Price must be greater than 0");
    }
    if is_truthy(isbn) && !isbn.and_then(text_form).is_some_and(|s| ISBN_RE.is_match(&s)) {
        errors.push("Invalid ISBN format");
    }

    ValidationReport::from_errors(errors.into_iter().map(str::to_owned).collect())
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Number literal as loose comparison reads it: decimal with optional
/// exponent, signed `Infinity`, or a `0x`/`0o`/`0b` integer.
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(Infinity|([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?)$")
        .expect("invalid numeric regex")
});

static RADIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0([xX][0-9a-fA-F]+|[oO][0-7]+|[bB][01]+)$").expect("invalid radix regex")
});

/// Numeric reading of a price for the `<= 0` check.
///
/// Strings and arrays are coerced through their text form, so `"-5"` is
/// non-positive, `" "` and `[]` read as 0, and `"-inf"` reads as nothing.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::String(_) | Value::Array(_) | Value::Object(_) => {
            text_form(value).and_then(|s| parse_number(&s))
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return Some(0.0);
    }

    if let Some(caps) = RADIX_RE.captures(text) {
        let digits = &caps[1][1..];
        let radix = match caps[1].as_bytes()[0] {
            b'x' | b'X' => 16,
            b'o' | b'O' => 8,
            _ => 2,
        };
        return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    if !NUMERIC_RE.is_match(text) {
        return None;
    }
    match text.trim_start_matches('+') {
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        literal => literal.parse().ok(),
    }
}

/// Text form of a value: arrays join their elements with `,`
/// (`null` elements become empty), objects are opaque.
fn text_form(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_owned()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => text_form(other).unwrap_or_default(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some("[object Object]".to_owned()),
    }
}

/// Integral floats print without a fraction (`5.0` -> `"5"`).
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{}", f as i128),
        _ => n.to_string(),
    }
}
