use super::Shape;

#[derive(Clone, Debug, Default)]
pub struct ArrC {
    pub item: Box<Shape>,      // joined over every element of every array seen here
}

impl ArrC {
    /// Nested arrays pool their elements: `[[1], [2.5]]` has item `float64`.
    pub(super) fn join(a: Self, b: Self) -> Self {
        Self { item: Box::new(super::join(*a.item, *b.item)) }
    }
}
