use indexmap::IndexMap;
use super::Shape;

#[derive(Clone, Debug, Default)]
pub struct ObjC {
    pub fields: IndexMap<String, FieldC>,   // first-seen order
    pub seen_objects: u64,
}

#[derive(Clone, Debug, Default)]
pub struct FieldC {
    pub shape: Shape,       // joined over the objects that had this key
    pub present_in: u64,
}

impl ObjC {
    /// Union of keys; `a`'s order first, then keys only `b` has.
    pub(super) fn join(a: Self, b: Self) -> Self {
        let mut out = a;
        out.seen_objects += b.seen_objects;

        for (k, fb) in b.fields {
            match out.fields.get_mut(&k) {
                Some(fa) => {
                    let shape = std::mem::take(&mut fa.shape);
                    fa.shape = super::join(shape, fb.shape);
                    fa.present_in += fb.present_in;
                }
                None => {
                    out.fields.insert(k, fb);
                }
            }
        }

        out
    }

    pub fn is_optional(&self, field: &FieldC) -> bool {
        field.present_in != self.seen_objects
    }
}
