/*!

A set of natural numbers backed by a bit vector. Coset indices are small, dense integers, so membership tests against
a bit vector are both compact and fast. We wrap `bit_set::BitSet` so the rest of the crate is insulated from the
backing implementation.

*/

use std::fmt::{Debug, Formatter};
use bit_set::BitSet;

use crate::abstractions::join_string;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct NatSet(BitSet);

impl NatSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts `value`, returning `true` if it was not already present.
  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn clear(&mut self) {
    self.0.clear()
  }

  /// Iterates over the members in increasing order.
  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }
}

impl FromIterator<usize> for NatSet {
  fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
    let mut set = NatSet::new();
    for value in iter {
      set.insert(value);
    }
    set
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{{}}}", join_string(self.iter(), ", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_contains_clear() {
    let mut set = NatSet::new();
    assert!(set.insert(3));
    assert!(!set.insert(3));
    assert!(set.insert(7));
    assert!(set.contains(3));
    assert!(!set.contains(4));
    assert_eq!(set.len(), 2);

    assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 7]);

    set.clear();
    assert!(set.is_empty());
  }

  #[test]
  fn collect_and_debug() {
    let set: NatSet = [9, 1, 5, 1].into_iter().collect();
    assert_eq!(set.len(), 3);
    assert_eq!(format!("{:?}", set), "{1, 5, 9}");
  }
}
