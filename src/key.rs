/*!
Morton (Z-order) key encoding: bit-interleaving of a (row, col) coordinate
pair into a single 64-bit code whose unsigned ordering coincides with a
pre-order traversal of the implicit quadtree over the matrix.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a sparse matrix, stored as a 64-bit Morton (Z-order) code.
///
/// Bit `2i` of the code is bit `i` of the column; bit `2i+1` is bit `i` of
/// the row. Ordering on `Key` is unsigned ordering on the code, which is
/// exactly the pre-order traversal of the quadtree implied by the bits.
/// ```
/// use morton_mat::key::Key;
/// let a = Key::new(0, 1);
/// let b = Key::new(1, 0);
/// assert!(a < b); // col bit (even) is lower-order than row bit (odd)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Key(u64);

impl Key {
  /// Builds a `Key` from row/column coordinates.
  pub fn new(row: u32, col: u32) -> Self {
    Key(encode(row, col))
  }

  /// Builds a `Key` directly from a previously-encoded Morton code.
  pub fn from_code(code: u64) -> Self {
    Key(code)
  }

  /// The row coordinate.
  pub fn row(&self) -> u32 {
    decode(self.0).0
  }

  /// The column coordinate.
  pub fn col(&self) -> u32 {
    decode(self.0).1
  }

  /// The (row, col) pair.
  pub fn row_col(&self) -> (u32, u32) {
    decode(self.0)
  }

  /// The raw 64-bit Morton code.
  pub fn code(&self) -> u64 {
    self.0
  }

  /// Exchanges the row and column bit-planes in one step, without a
  /// decode/re-encode round-trip. Used by `transpose`.
  /// ```
  /// use morton_mat::key::Key;
  /// let k = Key::new(3, 5);
  /// assert_eq!(Key::new(5, 3), k.swap());
  /// ```
  pub fn swap(&self) -> Self {
    Key(swap(self.0))
  }
}

impl fmt::Debug for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (row, col) = decode(self.0);
    write!(f, "Key({}, {})", row, col)
  }
}

/// Bitwise XOR of two codes. The position of its highest set bit identifies
/// the smallest quadtree node containing both keys.
pub fn xor(a: u64, b: u64) -> u64 {
  a ^ b
}

/// Unsigned `<` on two codes. Branch-free: compiles to a single comparison.
pub fn lts(a: u64, b: u64) -> bool {
  a < b
}

/// Unsigned `>` on two codes.
pub fn gts(a: u64, b: u64) -> bool {
  a > b
}

/// Unsigned `>=` on two codes.
pub fn ges(a: u64, b: u64) -> bool {
  a >= b
}

/// Interleaves row/col into a 64-bit Morton code.
/// Bit `2i` = bit `i` of `col`; bit `2i+1` = bit `i` of `row`.
pub fn encode(row: u32, col: u32) -> u64 {
  spread(col) | (spread(row) << 1)
}

/// Inverse of [`encode`].
pub fn decode(code: u64) -> (u32, u32) {
  let col = compact(code);
  let row = compact(code >> 1);
  (row, col)
}

/// Exchanges the even (col) and odd (row) bit-planes of a code in O(1).
fn swap(code: u64) -> u64 {
  let even = code & EVEN_MASK;
  let odd = code & ODD_MASK;
  (even << 1) | (odd >> 1)
}

const EVEN_MASK: u64 = 0x5555_5555_5555_5555;
const ODD_MASK: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// Spreads the low 32 bits of `x` into the even bit positions of a 64-bit
/// integer: `0b_x1_x0 -> 0b_0_x1_0_x0`. Classic binary-magic-number bit
/// interleaving, extended from 16->32 bits to 32->64 bits.
fn spread(x: u32) -> u64 {
  let mut x = x as u64;
  x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
  x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
  x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
  x = (x | (x << 2)) & 0x3333_3333_3333_3333;
  x = (x | (x << 1)) & 0x5555_5555_5555_5555;
  x
}

/// Inverse of [`spread`]: compacts the even bit positions of a 64-bit
/// integer back into the low 32 bits.
fn compact(mut x: u64) -> u32 {
  x &= 0x5555_5555_5555_5555;
  x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
  x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
  x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
  x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
  x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
  x as u32
}
