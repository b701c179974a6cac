//! Infer a Go struct declaration from example JSON.
//!
//! ```
//! let go = json_to_go::convert(r#"{"id": 1, "tags": ["x"]}"#, "Item").unwrap();
//! assert_eq!(go, "type Item struct {\n\tID int `json:\"id\"`\n\tTags []string `json:\"tags\"`\n}");
//! ```
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod path_de;
pub mod value;

pub use error::ParseError;
pub use ir::{Field, InferredType, Prim};
pub use value::Value;

/// Type name used when the caller has none.
pub const DEFAULT_TYPE_NAME: &str = "AutoGenerated";

/// Parse `input` and render `type <TypeName> ...` for it.
///
/// No package clause, imports or trailing newline; framing is the caller's.
pub fn convert(input: &str, type_name: &str) -> Result<String, ParseError> {
    let value = path_de::value_from_str(input)?;
    Ok(convert_value(&value, type_name))
}

/// Infallible half of [`convert`], for already-decoded input.
pub fn convert_value(value: &Value, type_name: &str) -> String {
    let ty = inference::infer(value);
    render(&ty, type_name)
}

/// Render an already-inferred type as `type <TypeName> ...`; `type_name` is
/// sanitized like a field name. Used by the driver after multi-sample inference.
pub fn render(ty: &InferredType, type_name: &str) -> String {
    let mut cg = codegen::Codegen::new();
    cg.emit(ty, type_name);
    let out = cg.into_string();
    tracing::debug!(type_name, bytes = out.len(), "rendered declaration");
    out
}
