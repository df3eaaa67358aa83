/*!

A `Word` is a finite sequence of generator names. The empty word is the identity.

*/

use std::fmt::{Debug, Display, Formatter};

use crate::abstractions::{concat_string, IString};

#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct Word(Vec<IString>);

impl Word {
  #[inline(always)]
  pub fn identity() -> Self {
    Word(Vec::new())
  }

  /// Every character of `letters` is one generator name.
  pub fn from_letters(letters: &str) -> Self {
    Word(letters.chars().map(|c| IString::from(c.to_string())).collect())
  }

  pub fn from_symbols<T: Into<IString>>(symbols: impl IntoIterator<Item = T>) -> Self {
    Word(symbols.into_iter().map(Into::into).collect())
  }

  #[inline(always)]
  pub fn is_identity(&self) -> bool {
    self.0.is_empty()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[inline(always)]
  pub fn letters(&self) -> &[IString] {
    &self.0
  }

  /// The word `self` followed by `other`.
  pub fn concat(&self, other: &Word) -> Word {
    let mut letters = Vec::with_capacity(self.len() + other.len());
    letters.extend_from_slice(&self.0);
    letters.extend_from_slice(&other.0);
    Word(letters)
  }

  /// The word `self` followed by the single letter `letter`.
  pub fn appended(&self, letter: IString) -> Word {
    let mut letters = self.0.clone();
    letters.push(letter);
    Word(letters)
  }
}

impl Display for Word {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", concat_string(self.0.iter()))
  }
}

impl Debug for Word {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "Word(\"{}\")", self)
  }
}

impl From<&str> for Word {
  fn from(letters: &str) -> Self {
    Word::from_letters(letters)
  }
}

impl From<Vec<IString>> for Word {
  fn from(letters: Vec<IString>) -> Self {
    Word(letters)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identity_is_empty() {
    let identity = Word::identity();
    assert!(identity.is_identity());
    assert_eq!(identity.len(), 0);
    assert_eq!(identity.to_string(), "");
    assert_eq!(identity, Word::from_letters(""));
  }

  #[test]
  fn concat_and_append() {
    let ab = Word::from_letters("AB");
    let ba = Word::from("BA");
    assert_eq!(ab.concat(&ba).to_string(), "ABBA");
    assert_eq!(ab.concat(&Word::identity()), ab);
    assert_eq!(ab.appended(IString::from("C")).to_string(), "ABC");
    assert_eq!(format!("{:?}", ba), "Word(\"BA\")");
  }

  #[test]
  fn multi_character_symbols() {
    let word = Word::from_symbols(["x1", "x2", "x1"]);
    assert_eq!(word.len(), 3);
    assert_eq!(word.letters()[1], IString::from("x2"));
    assert_eq!(word.to_string(), "x1x2x1");
  }
}
