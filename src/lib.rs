#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

/*!
A sparse matrix library that stores its nonzero entries as three parallel
arrays kept in strictly ascending Morton (Z-order) key order, and multiplies
them with a recursive, quadtree-style kernel — without ever materializing an
explicit tree.

# How it works

Every `(row, col)` coordinate is packed into a single 64-bit [`key::Key`] by
interleaving the bits of `row` and `col` (see [`key`] for the bit-spread
trick). Unsigned ordering on that packed code is exactly a pre-order
traversal of the implicit quadtree over the matrix: the highest differing
bit between two codes identifies the smallest quadtree node containing both.
A [`Matrix`] is just its sorted list of `(Key, T)` pairs — no node, no
pointer, no explicit width or height.

Addition streams two such lists together, combining colliding keys as it
goes (`tree::merge`). Multiplication instead walks both operands' *key
ranges*, picks a single bit to split on (the highest bit the two ranges
still disagree on), recurses on the two halves, and only coalesces colliding
partial products in one final pass over the assembled result (`tree::heap`,
`tree::mul`). Both disciplines fall out of plain `Iterator` composition:
`fby` ("followed by") is `Iterator::chain`, `mix` is a peekable interleave,
and `drain` is a peekable run-length coalesce — there is no need for
hand-rolled lazy thunks since `Iterator::next` already pulls lazily.

# Element types

Anything satisfying [`elem::Eq0`] (clonable, zero, `+`/`-`/`*`) can be a
matrix element — the numeric primitives already do. [`elem::Bit`] supplies
the boolean (GF(2)) semiring for sparse *bit*-matrices, paired with the
bit-packed [`elem::BitBlock`] storage strategy; ordinary element types use
the general-purpose, `Rc`-backed [`elem::Block`].
*/

pub use tree::Matrix;

/// Morton (Z-order) key encoding.
pub mod key;

/// The element-type and storage-strategy trait family (`Eq0`, `Storage`,
/// `Block`, `BitBlock`, `Bit`).
pub mod elem;

/// The `Matrix` container, its merge/heap internals and multiplication
/// kernel.
pub mod tree;

/// Library error types.
pub mod error;
