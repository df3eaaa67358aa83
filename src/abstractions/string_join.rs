use std::fmt::{Display, Write};

/// Writes each item's `Display` form into one `String`, placing `separator` between neighbours. Unlike `[T]::join`
/// this takes any iterator of displayable items.
pub fn join_string<T: Display>(iter: impl Iterator<Item = T>, separator: &str) -> String {
  let mut accumulator = String::new();
  for (position, item) in iter.enumerate() {
    if position > 0 {
      accumulator.push_str(separator);
    }
    // Writing into a `String` cannot fail.
    let _ = write!(accumulator, "{}", item);
  }
  accumulator
}

/// Concatenates the `Display` forms of the items with no separator, e.g. the letters of a word.
#[inline(always)]
pub fn concat_string<T: Display>(iter: impl Iterator<Item = T>) -> String {
  join_string(iter, "")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn join_string_test() {
    let relators = ["AAA", "BB", "ABAB"];
    assert_eq!(join_string(relators.iter(), ","), "AAA,BB,ABAB");
    assert_eq!(join_string([4, 1, 2].iter(), ", "), "4, 1, 2");
  }

  #[test]
  fn join_empty_and_single() {
    let empty: [&str; 0] = [];
    assert_eq!(join_string(empty.iter(), ","), "");
    assert_eq!(join_string(["A"].iter(), ","), "A");
    assert_eq!(concat_string(["A", "B", "A"].iter()), "ABA");
  }
}
