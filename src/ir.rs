// Strongly-typed IR for codegen. No decoded values here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Prim {
    Bool,
    String,
    Timestamp,
    Int32,
    Int64,
    Float64,
    Unknown,                 // null, empty sample, or irreconcilable mix
}

impl Prim {
    pub fn is_int(self) -> bool { matches!(self, Prim::Int32 | Prim::Int64) }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InferredType {
    Primitive { prim: Prim },
    Struct { fields: Vec<Field> },   // first-seen order, never sorted
    Sequence { item: Box<InferredType> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,        // raw key as written in the input
    pub ty: InferredType,
    pub optional: bool,      // absent in at least one sibling element
}

impl InferredType {
    pub fn prim(prim: Prim) -> Self { InferredType::Primitive { prim } }
    pub fn unknown() -> Self { Self::prim(Prim::Unknown) }
    pub fn sequence(item: InferredType) -> Self { InferredType::Sequence { item: Box::new(item) } }

    /// True when any node is a `Timestamp`, i.e. the Go source needs `import "time"`.
    pub fn uses_timestamp(&self) -> bool {
        match self {
            InferredType::Primitive { prim } => *prim == Prim::Timestamp,
            InferredType::Sequence { item } => item.uses_timestamp(),
            InferredType::Struct { fields } => fields.iter().any(|f| f.ty.uses_timestamp()),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            InferredType::Struct { fields } => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }
}
