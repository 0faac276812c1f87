//! Algebraic invariants of the matrix type, checked against randomly
//! generated sparse matrices (rand 0.7).

use crate::elem::Block;
use crate::key::Key;
use crate::Matrix;
use rand::Rng;
use std::collections::HashSet;

type M = Matrix<i32, Block<i32>>;

/// A random sparse matrix with `n` distinct entries, coordinates in
/// `0..bound`, nonzero values in `[-9, 9] \ {0}`.
fn random_matrix(rng: &mut impl Rng, n: usize, bound: u32) -> M {
  let mut seen = HashSet::new();
  let mut pairs = Vec::new();
  while pairs.len() < n {
    let row = rng.gen_range(0, bound);
    let col = rng.gen_range(0, bound);
    let key = Key::new(row, col);
    if seen.insert(key) {
      let mag = rng.gen_range(1, 10);
      let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
      pairs.push((key, mag * sign));
    }
  }
  M::from_list(pairs)
}

fn entries(m: &M) -> Vec<((u32, u32), i32)> {
  m.iter().map(|(k, v)| (k.row_col(), v)).collect()
}

const TRIALS: usize = 25;

#[test]
fn invariant1_representation_is_sorted_and_consistent() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let m = random_matrix(&mut rng, 12, 16);
    let keys = m.keys();
    let values = m.values();
    assert_eq!(keys.len(), values.len());
    assert_eq!(keys.len(), m.size());
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
  }
}

#[test]
fn invariant2_additive_identity() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 10, 16);
    assert_eq!(entries(&a), entries(&a.add(&M::empty())));
    assert_eq!(entries(&a), entries(&M::empty().add(&a)));
  }
}

#[test]
fn invariant3_additive_commutativity() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 10, 16);
    let b = random_matrix(&mut rng, 10, 16);
    assert_eq!(entries(&a.add(&b)), entries(&b.add(&a)));
  }
}

#[test]
fn invariant4_additive_associativity() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 8, 16);
    let b = random_matrix(&mut rng, 8, 16);
    let c = random_matrix(&mut rng, 8, 16);
    assert_eq!(entries(&a.add(&b).add(&c)), entries(&a.add(&b.add(&c))));
  }
}

#[test]
fn invariant5_multiplicative_identity() {
  let mut rng = rand::thread_rng();
  let n = 8u64;
  let id = M::identity(n).unwrap();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 10, n as u32);
    assert_eq!(entries(&a), entries(&a.mul(&id)));
    assert_eq!(entries(&a), entries(&id.mul(&a)));
  }
}

#[test]
fn invariant6_zero_absorption() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 10, 16);
    assert!(a.mul(&M::empty()).is_empty());
    assert!(M::empty().mul(&a).is_empty());
  }
}

#[test]
fn invariant7_distributivity() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 6, 8);
    let b = random_matrix(&mut rng, 6, 8);
    let c = random_matrix(&mut rng, 6, 8);
    assert_eq!(entries(&a.mul(&b.add(&c))), entries(&a.mul(&b).add(&a.mul(&c))));
    assert_eq!(entries(&a.add(&b).mul(&c)), entries(&a.mul(&c).add(&b.mul(&c))));
  }
}

#[test]
fn invariant8_transpose_involution() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 10, 16);
    assert_eq!(entries(&a), entries(&a.transpose().transpose()));
  }
}

#[test]
fn invariant9_transpose_of_product() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 6, 8);
    let b = random_matrix(&mut rng, 6, 8);
    assert_eq!(entries(&a.mul(&b).transpose()), entries(&b.transpose().mul(&a.transpose())));
  }
}

#[test]
fn invariant10_from_list_to_list_round_trip() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 10, 16);
    let pairs: Vec<(Key, i32)> = a.iter().collect();
    let rebuilt = M::from_list(pairs);
    assert_eq!(entries(&a), entries(&rebuilt));
  }
}

#[test]
fn invariant11_no_spurious_zeros_after_add_and_mul() {
  let mut rng = rand::thread_rng();
  for _ in 0..TRIALS {
    let a = random_matrix(&mut rng, 10, 16);
    let b = random_matrix(&mut rng, 10, 16);
    assert!(a.add(&b).values().into_iter().all(|v| v != 0));
    assert!(a.mul(&b).values().into_iter().all(|v| v != 0));
  }
}
