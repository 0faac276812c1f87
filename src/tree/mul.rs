//! The recursive, quadtree-style multiplication kernel.
//!
//! Both operands are treated as implicit quadtrees over their Morton-ordered
//! storage. At every step a single bit is chosen to split on, dispatching to
//! one of four shapes (single-by-single, single-by-many, many-by-single,
//! many-by-many) and combining the two halves either by `fby` (disjoint,
//! already-ordered output regions) or `mix` (overlapping output regions,
//! coalesced later by `drain`). No explicit quadtree node is ever
//! allocated: the "tree" is purely the lexicographic structure of the
//! Morton codes plus this bit-split discipline.
//!
//! Single-operand (`go11`/`go12`/`go21`) shapes are not special-cased as
//! separate code paths: a size-1 operand's low and high key coincide, which
//! makes its row/column spans (`xor(low, high)`) zero automatically, and the
//! split-selection table below is exactly degenerate enough that it never
//! picks a split on a zero-span side. One recursive function handles all
//! four shapes; only the base case (both operands size 1) is distinguished
//! explicitly.

use super::container::Raw;
use super::heap::{self, Stream};
use crate::elem::{Eq0, Storage};
use crate::key::{self, Key};

/// Multiplies two non-empty matrices, producing the result as a fresh
/// `Raw` container. Partial products use the element type's `*`; collisions
/// between partial products from different recursive branches are combined
/// with `nonZero(+)`.
pub(crate) fn mul<T, S>(x: &Raw<T, S>, y: &Raw<T, S>) -> Raw<T, S>
where
  T: Eq0 + 'static,
  S: Storage<T>,
{
  mul_with(x, y, |a, b| a * b, |a, b| {
    let sum = a + b;
    if sum.is_zero() {
      None
    } else {
      Some(sum)
    }
  })
}

/// As `mul`, but with the pointwise `*` and the final-drain combiner
/// supplied by the caller, so block matrices can recurse through
/// `Matrix::mul`/`Matrix::add_with0` instead of the leaf element's own
/// arithmetic.
pub(crate) fn mul_with<T, S, M, C>(x: &Raw<T, S>, y: &Raw<T, S>, mut times: M, combine: C) -> Raw<T, S>
where
  T: Eq0 + 'static,
  S: Storage<T>,
  M: FnMut(T, T) -> T,
  C: FnMut(T, T) -> Option<T> + 'static,
{
  match multiply(x, y, &mut times) {
    None => Raw::empty(),
    Some(stream) => {
      let combined = heap::drain(stream, combine);
      // size(X)*size(Y) is an upper bound on the number of partial products
      // the drain can ever coalesce down to.
      let mut out = Vec::with_capacity(x.size().checked_mul(y.size()).unwrap_or(0));
      out.extend(combined);
      Raw::from_sorted(out)
    }
  }
}

fn multiply<T, S, M>(x: &Raw<T, S>, y: &Raw<T, S>, times: &mut M) -> Option<Stream<T>>
where
  T: Eq0 + 'static,
  S: Storage<T>,
  M: FnMut(T, T) -> T,
{
  if x.is_empty() || y.is_empty() {
    return None;
  }
  if x.size() == 1 && y.size() == 1 {
    return go11(x.low_key(), x.head_val(), y.low_key(), y.head_val(), times);
  }
  go_many(x, y, times)
}

/// Single-by-single: `X[i,j] * Y[j,k] -> result[i,k]`, only if the inner
/// dimensions actually meet (`xa.col == ya.row`).
fn go11<T, M>(xa: Key, a: T, ya: Key, b: T, times: &mut M) -> Option<Stream<T>>
where
  T: Eq0 + 'static,
  M: FnMut(T, T) -> T,
{
  if xa.col() == ya.row() {
    Some(heap::singleton(Key::new(xa.row(), ya.col()), times(a, b)))
  } else {
    None
  }
}

fn go_many<T, S, M>(x: &Raw<T, S>, y: &Raw<T, S>, times: &mut M) -> Option<Stream<T>>
where
  T: Eq0 + 'static,
  S: Storage<T>,
  M: FnMut(T, T) -> T,
{
  let (xa, xb) = (x.low_key(), x.high_key());
  let (ya, yb) = (y.low_key(), y.high_key());

  let xi = key::xor(xa.row() as u64, xb.row() as u64);
  let xj = key::xor(xa.col() as u64, xb.col() as u64);
  let yj = key::xor(ya.row() as u64, yb.row() as u64);
  let yk = key::xor(ya.col() as u64, yb.col() as u64);
  let xiyj = xi | yj;
  let ykxj = yk | xj;

  // Overlap test: the left operand's column range and the right operand's
  // row range lie in disjoint quadtree nodes, so their product is empty.
  if key::gts(key::xor(xa.col() as u64, ya.row() as u64), xiyj | ykxj) {
    return None;
  }

  if key::ges(xiyj, ykxj) {
    if key::ges(xi, yj) {
      let (xl, xr) = x.split_on_bit1(xa.row(), xb.row());
      let l = multiply(&xl, y, times);
      let r = multiply(&xr, y, times);
      join(heap::fby, l, r)
    } else {
      let (yl, yr) = y.split_on_bit1(ya.row(), yb.row());
      let l = multiply(x, &yl, times);
      let r = multiply(x, &yr, times);
      join(heap::mix, l, r)
    }
  } else if key::ges(yk, xj) {
    let (yl, yr) = y.split_on_bit2(ya.col(), yb.col());
    let l = multiply(x, &yl, times);
    let r = multiply(x, &yr, times);
    join(heap::fby, l, r)
  } else {
    let (xl, xr) = x.split_on_bit2(xa.col(), xb.col());
    let l = multiply(&xl, y, times);
    let r = multiply(&xr, y, times);
    join(heap::mix, l, r)
  }
}

/// Combines two optional partial-product heaps with `op` (`fby` or `mix`),
/// passing a lone present side through untouched.
fn join<T: 'static>(op: impl Fn(Stream<T>, Stream<T>) -> Stream<T>, l: Option<Stream<T>>, r: Option<Stream<T>>) -> Option<Stream<T>> {
  match (l, r) {
    (None, None) => None,
    (Some(a), None) => Some(a),
    (None, Some(b)) => Some(b),
    (Some(a), Some(b)) => Some(op(a, b)),
  }
}
