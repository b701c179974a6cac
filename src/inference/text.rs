use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::Prim;

/// ISO-8601-ish date-time with mandatory zone. Unanchored: a timestamp
/// anywhere in the string is enough.
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})")
        .expect("timestamp pattern is valid")
});

pub fn looks_like_timestamp(s: &str) -> bool {
    TIMESTAMP.is_match(s)
}

pub fn classify(s: &str) -> Prim {
    if looks_like_timestamp(s) { Prim::Timestamp } else { Prim::String }
}
