//! Arity-dispatching hash over numeric vectors
//!
//! Anything that can list its numeric components in a stable order can be
//! hashed with [`hash_x`]: fixed arrays, slices, vectors, numeric tuples and
//! stored grid entries.

use num_traits::AsPrimitive;

use crate::hash::mixing::{hash_n, hash2, hash3};

/// A value whose numeric components can be hashed
pub trait HashVector {
    /// Numeric components in their canonical order
    fn components(&self) -> impl Iterator<Item = f64> + '_;
}

/// Hash a numeric vector, dispatching on its arity
///
/// Two components go through [`hash2`], three through [`hash3`], and any
/// other count through [`hash_n`].
pub fn hash_x<V>(vector: &V) -> i32
where
    V: HashVector + ?Sized,
{
    let mut components = vector.components();
    let head: [Option<f64>; 4] = std::array::from_fn(|_| components.next());

    match head {
        [Some(x), Some(y), None, _] => hash2(x, y),
        [Some(x), Some(y), Some(z), None] => hash3(x, y, z),
        _ => {
            let values: Vec<f64> = head.into_iter().flatten().chain(components).collect();
            hash_n(&values)
        }
    }
}

impl<T: AsPrimitive<f64>> HashVector for [T] {
    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|&value| value.as_())
    }
}

impl<T: AsPrimitive<f64>, const N: usize> HashVector for [T; N] {
    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().components()
    }
}

impl<T: AsPrimitive<f64>> HashVector for Vec<T> {
    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().components()
    }
}

impl<T: AsPrimitive<f64>> HashVector for (T, T) {
    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        [self.0.as_(), self.1.as_()].into_iter()
    }
}

impl<T: AsPrimitive<f64>> HashVector for (T, T, T) {
    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        [self.0.as_(), self.1.as_(), self.2.as_()].into_iter()
    }
}
