//! Raw JSON keys → exported Go identifiers.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Returned when nothing usable survives sanitization.
pub const NAMING_FAILED: &str = "NAMING_FAILED";

/// Prefix for keys made only of digits.
const NUMERIC_PREFIX: &str = "Num";

const DIGIT_WORDS: [&str; 10] = [
    "Zero_", "One_", "Two_", "Three_", "Four_",
    "Five_", "Six_", "Seven_", "Eight_", "Nine_",
];

/// Rendered fully upper-cased instead of title-cased.
pub const COMMON_INITIALISMS: &[&str] = &[
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP",
    "HTTPS", "ID", "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA",
    "SMTP", "SSH", "TCP", "TLS", "TTL", "UDP", "UI", "UID", "UUID", "URI",
    "URL", "UTF8", "VM", "XML", "XSRF", "XSS",
];

static INITIALISMS: Lazy<HashSet<&'static str>> = Lazy::new(|| COMMON_INITIALISMS.iter().copied().collect());

// a lowercase run at the start or right after a non-letter
static WORD_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|[^a-zA-Z])([a-z]+)").expect("word pattern is valid")
});

/// Sanitize and case a raw key into a Go identifier.
///
/// Empty input gives an empty string; input that sanitizes to nothing gives
/// [`NAMING_FAILED`]. Already-exported identifiers come back unchanged.
pub fn sanitize_identifier(raw: &str) -> String {
    let Some(first) = raw.chars().next() else {
        return String::new();
    };

    let prefixed = if raw.chars().all(|c| c.is_ascii_digit()) {
        format!("{NUMERIC_PREFIX}{raw}")
    } else if let Some(d) = first.to_digit(10) {
        format!("{}{}", DIGIT_WORDS[d as usize], &raw[first.len_utf8()..])
    } else {
        raw.to_string()
    };

    let out: String = to_proper_case(&prefixed)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if out.is_empty() { NAMING_FAILED.to_string() } else { out }
}

fn to_proper_case(s: &str) -> String {
    WORD_START
        .replace_all(s, |caps: &Captures| {
            let word = &caps[2];
            let upper = word.to_ascii_uppercase();
            let cased = if INITIALISMS.contains(upper.as_str()) { upper } else { title_case(word) };
            format!("{}{}", &caps[1], cased)
        })
        .into_owned()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}
