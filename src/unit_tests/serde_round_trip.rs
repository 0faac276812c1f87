//! `Key` and `Matrix` both carry `Serialize`/`Deserialize`; round-trip them
//! through both `serde_json` and `serde_yaml`.

use crate::elem::Block;
use crate::key::Key;
use crate::Matrix;

type M = Matrix<i32, Block<i32>>;

fn sample() -> M {
  M::from_list(vec![(Key::new(0, 0), 1), (Key::new(1, 1), -2), (Key::new(3, 7), 9)])
}

#[test]
fn key_round_trips_through_json() {
  let k = Key::new(123, 456);
  let encoded = serde_json::to_string(&k).unwrap();
  let decoded: Key = serde_json::from_str(&encoded).unwrap();
  assert_eq!(k, decoded);
}

#[test]
fn matrix_round_trips_through_json() {
  let m = sample();
  let encoded = serde_json::to_string(&m).unwrap();
  let decoded: M = serde_json::from_str(&encoded).unwrap();
  assert_eq!(m.iter().collect::<Vec<_>>(), decoded.iter().collect::<Vec<_>>());
}

#[test]
fn matrix_round_trips_through_yaml() {
  let m = sample();
  let encoded = serde_yaml::to_string(&m).unwrap();
  let decoded: M = serde_yaml::from_str(&encoded).unwrap();
  assert_eq!(m.iter().collect::<Vec<_>>(), decoded.iter().collect::<Vec<_>>());
}
