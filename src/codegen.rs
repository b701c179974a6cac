//! Go declaration emitter.
//!
//! One `Codegen` per conversion: it owns the output buffer and the current
//! tab depth, both threaded explicitly through the recursive walk.
use crate::ir::{Field, InferredType, Prim};
use crate::naming::{sanitize_identifier, NAMING_FAILED};

pub struct Codegen {
    out: String,
    tabs: usize,
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new(), tabs: 0 }
    }

    /// `type <Name> <root>`, without package clause or trailing newline.
    pub fn emit(&mut self, root: &InferredType, type_name: &str) {
        self.out.push_str("type ");
        self.out.push_str(&identifier(type_name));
        self.out.push(' ');
        self.emit_ty(root);
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_ty(&mut self, ty: &InferredType) {
        match ty {
            InferredType::Primitive { prim } => self.out.push_str(go_primitive(*prim)),
            InferredType::Sequence { item } => {
                self.out.push_str("[]");
                self.emit_ty(item);
            }
            InferredType::Struct { fields } => self.emit_struct(fields),
        }
    }

    fn emit_struct(&mut self, fields: &[Field]) {
        self.out.push_str("struct {\n");
        self.tabs += 1;
        for f in fields {
            self.indent();
            self.out.push_str(&identifier(&f.name));
            self.out.push(' ');
            self.emit_ty(&f.ty);
            self.out.push_str(" `json:\"");
            self.out.push_str(&f.name);
            if f.optional {
                self.out.push_str(",omitempty");
            }
            self.out.push_str("\"`\n");
        }
        self.tabs -= 1;
        self.indent();
        self.out.push('}');
    }

    fn indent(&mut self) {
        for _ in 0..self.tabs {
            self.out.push('\t');
        }
    }
}

impl Default for Codegen {
    fn default() -> Self { Self::new() }
}

pub fn go_primitive(prim: Prim) -> &'static str {
    match prim {
        Prim::Bool => "bool",
        Prim::String => "string",
        Prim::Timestamp => "time.Time",
        Prim::Int32 => "int",
        Prim::Int64 => "int64",
        Prim::Float64 => "float64",
        Prim::Unknown => "interface{}",
    }
}

// empty keys have no identifier at all; render them like any other failure
fn identifier(raw: &str) -> String {
    let ident = sanitize_identifier(raw);
    if ident.is_empty() { NAMING_FAILED.to_string() } else { ident }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(ty: &InferredType, name: &str) -> String {
        let mut cg = Codegen::new();
        cg.emit(ty, name);
        cg.into_string()
    }

    fn field(name: &str, ty: InferredType, optional: bool) -> Field {
        Field { name: name.to_string(), ty, optional }
    }

    #[test]
    fn primitives() {
        assert_eq!(render(&InferredType::prim(Prim::Timestamp), "t"), "type T time.Time");
        assert_eq!(render(&InferredType::unknown(), "Any"), "type Any interface{}");
        assert_eq!(
            render(&InferredType::sequence(InferredType::sequence(InferredType::prim(Prim::Int64))), "Grid"),
            "type Grid [][]int64"
        );
    }

    #[test]
    fn nested_struct_indents_with_tabs() {
        let ty = InferredType::sequence(InferredType::Struct { fields: vec![
            field("user_id", InferredType::prim(Prim::Int32), false),
            field("profile", InferredType::Struct { fields: vec![
                field("avatar_url", InferredType::prim(Prim::String), true),
            ]}, true),
        ]});
        let expected = "type Users []struct {\n\
                        \tUserID int `json:\"user_id\"`\n\
                        \tProfile struct {\n\
                        \t\tAvatarURL string `json:\"avatar_url,omitempty\"`\n\
                        \t} `json:\"profile,omitempty\"`\n\
                        }";
        assert_eq!(render(&ty, "users"), expected);
    }

    #[test]
    fn empty_struct() {
        assert_eq!(render(&InferredType::Struct { fields: vec![] }, "Empty"), "type Empty struct {\n}");
    }

    #[test]
    fn unnamable_keys_and_type_names_use_sentinel() {
        let ty = InferredType::Struct { fields: vec![
            field("", InferredType::prim(Prim::Bool), false),
            field("$$", InferredType::prim(Prim::Bool), false),
        ]};
        assert_eq!(
            render(&ty, ""),
            "type NAMING_FAILED struct {\n\tNAMING_FAILED bool `json:\"\"`\n\tNAMING_FAILED bool `json:\"$$\"`\n}"
        );
    }
}
