use crate::inference::Shape;
use crate::ir::{Field, InferredType, Prim};

pub fn lower_to_ir(shape: &Shape) -> InferredType {
    match shape {
        // nothing observed (items of empty arrays)
        Shape::Empty => InferredType::prim(Prim::Unknown),
        Shape::Prim(p) => InferredType::prim(*p),
        Shape::Arr(arr) => InferredType::sequence(lower_to_ir(&arr.item)),
        Shape::Obj(obj) => {
            let fields = obj.fields.iter().map(|(k, f)| Field {
                name: k.clone(),
                ty: lower_to_ir(&f.shape),
                optional: obj.is_optional(f),
            }).collect();
            InferredType::Struct { fields }
        }
    }
}
