//! The `Matrix` façade: the type users actually construct and
//! call methods on. Ties the parallel-array container (`container::Raw`),
//! the stream merge (`merge`), the heap merge (`heap`) and the
//! multiplication kernel (`mul`) together.

use super::container::Raw;
use super::merge;
use super::mul;
use crate::elem::{Block, Eq0, Storage};
use crate::error::Error;
use crate::key::Key;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryFrom;

/// A sparse matrix whose entries are kept in strictly ascending Morton
/// (Z-order) key order. `S` picks the backing strategy for the value array;
/// row/column coordinates are always stored unboxed regardless of `S`. No
/// explicit width or height is tracked — a matrix is simply the set of its
/// nonzero `(Key, T)` pairs, so arbitrarily large or sparse extents need no
/// dimension parameter.
///
/// ```
/// use morton_mat::Matrix;
/// use morton_mat::key::Key;
/// let m = Matrix::<i32>::from_list(vec![(Key::new(0, 0), 1), (Key::new(1, 1), 2)]);
/// assert_eq!(Some(2), m.lookup(Key::new(1, 1)));
/// assert_eq!(None, m.lookup(Key::new(0, 1)));
/// ```
#[derive(Clone, Debug)]
pub struct Matrix<T: Eq0, S: Storage<T> = Block<T>> {
  raw: Raw<T, S>,
}

impl<T: Eq0 + 'static, S: Storage<T>> Matrix<T, S> {
  /// The matrix with no nonzero entries.
  pub fn empty() -> Self {
    Matrix { raw: Raw::empty() }
  }

  /// A matrix with exactly one nonzero entry.
  pub fn singleton(key: Key, value: T) -> Self {
    Matrix { raw: Raw::from_sorted(vec![(key, value)]) }
  }

  /// Builds a matrix from a list of `(Key, T)` pairs, sorting by key.
  /// Callers must supply distinct keys: like the source this is derived
  /// from, duplicates are not deduplicated, only sorted stably, so a
  /// duplicate key yields two adjacent entries rather than an error.
  pub fn from_list(mut pairs: Vec<(Key, T)>) -> Self {
    pairs.sort_by_key(|(k, _)| *k);
    Matrix { raw: Raw::from_sorted(pairs) }
  }

  /// The number of stored (nonzero) entries.
  pub fn size(&self) -> usize {
    self.raw.size()
  }

  /// Whether the matrix has no stored entries.
  pub fn is_empty(&self) -> bool {
    self.raw.is_empty()
  }

  /// The value stored at `key`, or `None` if it is implicitly zero.
  pub fn lookup(&self, key: Key) -> Option<T> {
    self.raw.lookup(key)
  }

  /// All stored keys, in ascending Morton order.
  pub fn keys(&self) -> Vec<Key> {
    self.raw.iter().map(|(k, _)| k).collect()
  }

  /// All stored values, in the order of their keys.
  pub fn values(&self) -> Vec<T> {
    self.raw.iter().map(|(_, v)| v).collect()
  }

  /// Iterates the stored `(Key, T)` pairs in ascending Morton order.
  pub fn iter(&self) -> impl Iterator<Item = (Key, T)> + '_ {
    self.raw.iter()
  }

  /// Swaps rows and columns: applies [`Key::swap`] to every key and
  /// re-sorts, equivalent to exchanging the bit planes of every Morton code.
  pub fn transpose(&self) -> Self {
    let mut pairs: Vec<(Key, T)> = self.raw.iter().map(|(k, v)| (k.swap(), v)).collect();
    pairs.sort_by_key(|(k, _)| *k);
    Matrix { raw: Raw::from_sorted(pairs) }
  }

  /// Maps `f` over every stored value, keeping keys unchanged. `W` may drop
  /// to a different storage strategy than `T`'s (e.g. mapping `i32` values
  /// to `Bit` switches from `Block<i32>` to `BitBlock`).
  pub fn map_values<W, R>(&self, mut f: impl FnMut(T) -> W) -> Matrix<W, R>
  where
    W: Eq0 + 'static,
    R: Storage<W>,
  {
    let pairs: Vec<(Key, W)> = self.raw.iter().map(|(k, v)| (k, f(v))).collect();
    Matrix { raw: Raw::from_sorted(pairs) }
  }

  /// Negates every stored value (keys unchanged): `T::zero() - v`. `Eq0`
  /// deliberately has no `Neg` bound (unsigned primitives have none), so
  /// this is expressed with only the `Sub`/`Zero` capability `Eq0` already
  /// requires.
  pub fn negate(&self) -> Self {
    self.map_values(|v| T::zero() - v)
  }

  /// `nonZero(+)` merge of two matrices.
  pub fn add(&self, other: &Self) -> Self {
    self.add_with0(other, |a, b| {
      let s = a + b;
      if s.is_zero() {
        None
      } else {
        Some(s)
      }
    })
  }

  /// `nonZero(-)` merge of two matrices.
  pub fn sub(&self, other: &Self) -> Self {
    self.add_with0(other, |a, b| {
      let d = a - b;
      if d.is_zero() {
        None
      } else {
        Some(d)
      }
    })
  }

  /// Stream-merges `self` and `other` under a caller-supplied combiner that
  /// always keeps the combined entry (no zero-thinning).
  pub fn add_with(&self, other: &Self, mut combine: impl FnMut(T, T) -> T) -> Self {
    self.add_with0(other, move |a, b| Some(combine(a, b)))
  }

  /// Stream-merges `self` and `other` under a combiner that may return
  /// `None` to drop a colliding entry (zero-thinning).
  pub fn add_with0(&self, other: &Self, combine: impl FnMut(T, T) -> Option<T>) -> Self {
    let merged = merge::merge_with(self.raw.iter(), other.raw.iter(), combine);
    Matrix { raw: Raw::from_sorted(merged.collect()) }
  }

  /// Recursive quadtree-style multiplication, combining
  /// colliding partial products with `nonZero(+)`.
  pub fn mul(&self, other: &Self) -> Self {
    if self.is_empty() || other.is_empty() {
      return Matrix::empty();
    }
    Matrix { raw: mul::mul(&self.raw, &other.raw) }
  }

  /// Recursive multiplication with a caller-supplied `times` (replacing the
  /// element type's `*`) and `combine` (replacing `nonZero(+)` in the final
  /// drain). Used by the matrix-of-matrix recursive-algebra scenario, where
  /// the block multiply/combine are themselves `Matrix::mul`/`Matrix::add`.
  pub fn mul_with(&self, other: &Self, times: impl FnMut(T, T) -> T, combine: impl FnMut(T, T) -> Option<T> + 'static) -> Self {
    if self.is_empty() || other.is_empty() {
      return Matrix::empty();
    }
    Matrix { raw: mul::mul_with(&self.raw, &other.raw, times, combine) }
  }
}

impl<T, S> Matrix<T, S>
where
  T: Eq0 + num_traits::One + 'static,
  S: Storage<T>,
{
  /// The identity matrix of dimension `width`: `width` diagonal ones.
  /// Fails if `width` does not fit in a `u32` row/column coordinate.
  pub fn identity(width: u64) -> Result<Self, Error> {
    let w = u32::try_from(width).map_err(|_| Error::IdentityWidthOverflow { requested: width })?;
    let pairs: Vec<(Key, T)> = (0..w).map(|i| (Key::new(i, i), T::one())).collect();
    Ok(Matrix { raw: Raw::from_sorted(pairs) })
  }
}

impl<T: Eq0, S: Storage<T>> PartialEq for Matrix<T, S>
where
  T: PartialEq,
{
  fn eq(&self, other: &Self) -> bool {
    self.size() == other.size() && self.raw.iter().zip(other.raw.iter()).all(|(a, b)| a == b)
  }
}

// A block matrix is itself a valid element: `Matrix<T, S>` satisfies `Eq0`
// by delegating `+`/`-`/`*`/zero to the inherent `add`/`sub`/`mul`/`empty`
// above, so the multiplication kernel in `tree::mul`, unchanged, composes
// blocks of blocks through `Matrix::mul_with`.
impl<T: Eq0 + 'static, S: Storage<T>> std::ops::Add for Matrix<T, S> {
  type Output = Self;
  fn add(self, rhs: Self) -> Self {
    Matrix::add(&self, &rhs)
  }
}

impl<T: Eq0 + 'static, S: Storage<T>> std::ops::Sub for Matrix<T, S> {
  type Output = Self;
  fn sub(self, rhs: Self) -> Self {
    Matrix::sub(&self, &rhs)
  }
}

impl<T: Eq0 + 'static, S: Storage<T>> std::ops::Mul for Matrix<T, S> {
  type Output = Self;
  fn mul(self, rhs: Self) -> Self {
    Matrix::mul(&self, &rhs)
  }
}

impl<T: Eq0 + 'static, S: Storage<T>> num_traits::Zero for Matrix<T, S> {
  fn zero() -> Self {
    Matrix::empty()
  }
  fn is_zero(&self) -> bool {
    self.is_empty()
  }
}

impl<T: Eq0 + 'static, S: Storage<T>> Eq0 for Matrix<T, S> {}

/// Serializes as the `(Key, T)` pair list in ascending Morton order, not the
/// internal parallel-array representation — the storage strategy `S` is an
/// implementation detail, not part of the matrix's logical value.
impl<T, S> Serialize for Matrix<T, S>
where
  T: Eq0 + Serialize + 'static,
  S: Storage<T>,
{
  fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
    let pairs: Vec<(Key, T)> = self.raw.iter().collect();
    pairs.serialize(serializer)
  }
}

impl<'de, T, S> Deserialize<'de> for Matrix<T, S>
where
  T: Eq0 + Deserialize<'de> + 'static,
  S: Storage<T>,
{
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let pairs = Vec::<(Key, T)>::deserialize(deserializer)?;
    Ok(Matrix::from_list(pairs))
  }
}
