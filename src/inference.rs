//! Most-specific-common-type inference over decoded JSON.
//!
//! Values are observed into a small evidence tree (`Shape`), shapes are
//! joined pairwise (left fold, short-circuiting on `Unknown`), and the result
//! is lowered to the strongly-typed IR in `crate::ir`.
//!
//! Reconciliation rules:
//! - equal primitives stay; float ⊔ int → float; any other mix → unknown.
//! - object ⊔ object → union of keys with per-key presence counts, so a key
//!   missing from some siblings lowers to an optional field.
//! - array ⊔ array → array whose item pools the elements of both.
//! - containers mixed with anything of another kind → unknown.
pub mod text;
pub mod num;
pub mod obj;
pub mod arr;

use indexmap::IndexMap;

use crate::ir::{InferredType, Prim};
use crate::lower::lower_to_ir;
use crate::value::Value;

pub use arr::ArrC;
pub use obj::{FieldC, ObjC};

// ------------------------------ State ------------------------------------ //

#[derive(Clone, Debug, Default)]
pub enum Shape {
    /// No samples yet (identity of `join`).
    #[default]
    Empty,
    Prim(Prim),
    Obj(ObjC),
    Arr(ArrC),
}

impl Shape {
    /// Absorbing element of `join`.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Shape::Prim(Prim::Unknown))
    }
}

// ------------------------------ Observe ---------------------------------- //

pub fn observe_value(v: &Value) -> Shape {
    match v {
        Value::Sequence(xs) => Shape::Arr(observe_array(xs)),
        Value::Composite(m) => Shape::Obj(observe_object(m)),
        scalar => Shape::Prim(infer_scalar(scalar).unwrap_or(Prim::Unknown)),
    }
}

fn observe_array(xs: &[Value]) -> ArrC {
    let mut item = Shape::Empty;
    for el in xs {
        item = join(item, observe_value(el));
        if item.is_unknown() { break; }
    }
    ArrC { item: Box::new(item) }
}

fn observe_object(map: &IndexMap<String, Value>) -> ObjC {
    let fields = map.iter()
        .map(|(k, v)| (k.clone(), FieldC { shape: observe_value(v), present_in: 1 }))
        .collect();
    ObjC { fields, seen_objects: 1 }
}

// -------------------------------- Join (⊔) -------------------------------- //

pub fn join(a: Shape, b: Shape) -> Shape {
    match (a, b) {
        (Shape::Empty, x) | (x, Shape::Empty) => x,
        (Shape::Prim(x), Shape::Prim(y)) => Shape::Prim(reconcile(x, y)),
        (Shape::Obj(x), Shape::Obj(y)) => Shape::Obj(ObjC::join(x, y)),
        (Shape::Arr(x), Shape::Arr(y)) => Shape::Arr(ArrC::join(x, y)),
        (x, y) => {
            tracing::trace!(left = kind_name(&x), right = kind_name(&y), "mixed kinds collapse to unknown");
            Shape::Prim(Prim::Unknown)
        }
    }
}

fn kind_name(s: &Shape) -> &'static str {
    match s {
        Shape::Empty => "empty",
        Shape::Prim(_) => "primitive",
        Shape::Obj(_) => "object",
        Shape::Arr(_) => "array",
    }
}

// ------------------------------- Front API -------------------------------- //

/// Primitive kind of a scalar; `None` for sequences and composites.
pub fn infer_scalar(v: &Value) -> Option<Prim> {
    match v {
        Value::Null => Some(Prim::Unknown),
        Value::Bool(_) => Some(Prim::Bool),
        Value::Number(n) => Some(num::classify(*n)),
        Value::String(s) => Some(text::classify(s)),
        Value::Sequence(_) | Value::Composite(_) => None,
    }
}

/// Pairwise reconciliation of two primitive kinds.
pub fn reconcile(a: Prim, b: Prim) -> Prim {
    let out = num::reconcile_prim(a, b);
    if out == Prim::Unknown && a != b {
        tracing::trace!(?a, ?b, "primitives collapse to unknown");
    }
    out
}

/// Always a `Sequence`; an empty input has `Unknown` items.
pub fn infer_sequence(elements: &[Value]) -> InferredType {
    lower_to_ir(&Shape::Arr(observe_array(elements)))
}

/// Always a `Struct` with no optional fields.
pub fn infer_composite(fields: &IndexMap<String, Value>) -> InferredType {
    lower_to_ir(&Shape::Obj(observe_object(fields)))
}

pub fn infer(v: &Value) -> InferredType {
    lower_to_ir(&observe_value(v))
}

/// Accumulates several independent samples of the same type.
///
/// Keys missing from some samples come out optional, exactly as for the
/// elements of one array.
pub struct Inference { state: Shape, samples: u64 }

impl Inference {
    pub fn new() -> Self { Self { state: Shape::Empty, samples: 0 } }

    pub fn observe_value(&mut self, v: &Value) {
        let obs = observe_value(v);
        self.state = join(std::mem::take(&mut self.state), obs);
        self.samples += 1;
    }

    pub fn samples(&self) -> u64 { self.samples }

    pub fn solve(&self) -> InferredType {
        lower_to_ir(&self.state)
    }
}

impl Default for Inference {
    fn default() -> Self { Self::new() }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Field;
    use serde_json::json;

    fn v(j: serde_json::Value) -> Value { Value::from(j) }

    fn field(name: &str, ty: InferredType, optional: bool) -> Field {
        Field { name: name.to_string(), ty, optional }
    }

    #[test]
    fn scalars() {
        assert_eq!(infer_scalar(&v(json!(null))), Some(Prim::Unknown));
        assert_eq!(infer_scalar(&v(json!(true))), Some(Prim::Bool));
        assert_eq!(infer_scalar(&v(json!("x"))), Some(Prim::String));
        assert_eq!(infer_scalar(&v(json!("2020-01-01T00:00:00Z"))), Some(Prim::Timestamp));
        assert_eq!(infer_scalar(&v(json!(3))), Some(Prim::Int32));
        assert_eq!(infer_scalar(&v(json!(3_000_000_000u64))), Some(Prim::Int64));
        assert_eq!(infer_scalar(&v(json!(0.1))), Some(Prim::Float64));
        assert_eq!(infer_scalar(&v(json!([]))), None);
        assert_eq!(infer_scalar(&v(json!({}))), None);
    }

    #[test]
    fn composite_keeps_order_and_no_optionals() {
        let Value::Composite(m) = v(json!({"id": 1, "name": "a", "tags": ["x", "y"]})) else { unreachable!() };
        let ty = infer_composite(&m);
        assert_eq!(ty, InferredType::Struct { fields: vec![
            field("id", InferredType::prim(Prim::Int32), false),
            field("name", InferredType::prim(Prim::String), false),
            field("tags", InferredType::sequence(InferredType::prim(Prim::String)), false),
        ]});
    }

    #[test]
    fn empty_sequence_is_unknown_items() {
        assert_eq!(infer_sequence(&[]), InferredType::sequence(InferredType::unknown()));
    }

    #[test]
    fn int_then_float_widens() {
        let ty = infer(&v(json!([1, 2, 3.5, 4])));
        assert_eq!(ty, InferredType::sequence(InferredType::prim(Prim::Float64)));
    }

    #[test]
    fn numeric_with_non_numeric_collapses() {
        assert_eq!(infer(&v(json!([1, "a"]))), InferredType::sequence(InferredType::unknown()));
        assert_eq!(infer(&v(json!([1.5, null]))), InferredType::sequence(InferredType::unknown()));
        assert_eq!(infer(&v(json!([{"a": 1}, [1]]))), InferredType::sequence(InferredType::unknown()));
    }

    #[test]
    fn unknown_short_circuits() {
        // once unknown, later objects cannot resurrect a struct
        let ty = infer(&v(json!([1, "a", {"x": 1}, {"x": 2}])));
        assert_eq!(ty, InferredType::sequence(InferredType::unknown()));
    }

    #[test]
    fn struct_field_reconciled_to_float() {
        let ty = infer(&v(json!([{"a": 1}, {"a": 1.5}])));
        let InferredType::Sequence { item } = ty else { panic!("expected sequence") };
        assert_eq!(*item, InferredType::Struct { fields: vec![
            field("a", InferredType::prim(Prim::Float64), false),
        ]});
    }

    #[test]
    fn partial_presence_marks_optional() {
        let ty = infer(&v(json!([{"a": 1}, {"b": 2}])));
        let InferredType::Sequence { item } = ty else { panic!("expected sequence") };
        assert_eq!(*item, InferredType::Struct { fields: vec![
            field("a", InferredType::prim(Prim::Int32), true),
            field("b", InferredType::prim(Prim::Int32), true),
        ]});
    }

    #[test]
    fn optional_iff_missing_somewhere() {
        let ty = infer(&v(json!([
            {"id": 1, "name": "a"},
            {"id": 2},
            {"id": 3, "name": "c", "extra": true},
        ])));
        let InferredType::Sequence { item } = ty else { panic!("expected sequence") };
        assert!(!item.field("id").unwrap().optional);
        assert!(item.field("name").unwrap().optional);
        assert!(item.field("extra").unwrap().optional);
        let names: Vec<&str> = match item.as_ref() {
            InferredType::Struct { fields } => fields.iter().map(|f| f.name.as_str()).collect(),
            _ => unreachable!(),
        };
        assert_eq!(names, ["id", "name", "extra"]);
    }

    #[test]
    fn field_type_reconciled_only_where_present() {
        // "b" is missing from the first element; that absence is not a null
        let ty = infer(&v(json!([{"a": 1}, {"a": 2, "b": "x"}, {"a": 3, "b": "y"}])));
        let InferredType::Sequence { item } = ty else { panic!("expected sequence") };
        assert_eq!(item.field("b").unwrap().ty, InferredType::prim(Prim::String));
    }

    #[test]
    fn nested_structs_under_arrays_carry_optionals() {
        let ty = infer(&v(json!([
            {"meta": {"x": 1, "y": 2}},
            {"meta": {"x": 3}},
        ])));
        let InferredType::Sequence { item } = ty else { panic!("expected sequence") };
        let meta = &item.field("meta").unwrap().ty;
        assert!(!meta.field("x").unwrap().optional);
        assert!(meta.field("y").unwrap().optional);
    }

    #[test]
    fn nested_arrays_pool_all_inner_elements() {
        let ty = infer(&v(json!([[1, 2], [3.5], []])));
        assert_eq!(ty, InferredType::sequence(InferredType::sequence(InferredType::prim(Prim::Float64))));

        let ty = infer(&v(json!([[], [{"a": 1}], [{"b": true}]])));
        let InferredType::Sequence { item } = ty else { panic!("expected sequence") };
        let InferredType::Sequence { item: inner } = *item else { panic!("expected nested sequence") };
        assert!(inner.field("a").unwrap().optional);
        assert!(inner.field("b").unwrap().optional);
    }

    #[test]
    fn top_level_object_has_no_optionals() {
        let ty = infer(&v(json!({"a": null, "b": {"c": []}})));
        assert_eq!(ty.field("a").unwrap().ty, InferredType::unknown());
        assert!(!ty.field("a").unwrap().optional);
        let b = &ty.field("b").unwrap().ty;
        assert_eq!(b.field("c").unwrap().ty, InferredType::sequence(InferredType::unknown()));
    }

    #[test]
    fn inference_over_samples() {
        let mut inf = Inference::new();
        inf.observe_value(&v(json!({"id": 1, "ok": true})));
        inf.observe_value(&v(json!({"id": 2.5})));
        assert_eq!(inf.samples(), 2);
        let ty = inf.solve();
        assert_eq!(ty.field("id").unwrap().ty, InferredType::prim(Prim::Float64));
        assert!(!ty.field("id").unwrap().optional);
        assert!(ty.field("ok").unwrap().optional);
    }

    #[test]
    fn join_is_order_independent_for_kinds() {
        let samples = [json!(1), json!(2.5), json!("s"), json!(null), json!([1]), json!({"a": 1})];
        for a in &samples {
            for b in &samples {
                let ab = lower_to_ir(&join(observe_value(&v(a.clone())), observe_value(&v(b.clone()))));
                let ba = lower_to_ir(&join(observe_value(&v(b.clone())), observe_value(&v(a.clone()))));
                assert_eq!(ab, ba, "{a} vs {b}");
            }
        }
    }
}
