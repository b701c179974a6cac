use serde::de::DeserializeOwned;

use crate::error::ParseError;
use crate::value::Value;

/// Deserialize with JSON-path context in error messages.
///
/// Trailing non-whitespace after the document is rejected.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, ParseError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let value = match serde_path_to_error::deserialize::<_, T>(&mut *de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(ParseError::new(path, err.inner()));
        }
    };
    de.end().map_err(|err| ParseError::new(".".to_string(), &err))?;
    Ok(value)
}

/// Decode JSON text into a [`Value`].
pub fn value_from_str(src: &str) -> Result<Value, ParseError> {
    from_str_with_path::<Value>(src)
}
