/*!

A finite presentation `<Σ | R>`: an ordered list of distinct generator names and a list of nonempty relators, each a
word over the generators that is asserted to equal the identity. The order of Σ is the order used to break ties
everywhere in the engine.

A `Presentation` is validated on construction, so an enumerator never sees an empty relator or an unknown symbol.
Inverse generators are not special: a presentation that wants `a⁻¹` lists it as a generator of its own together with
the relators `a·a⁻¹` and `a⁻¹·a`.

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::{join_string, IString},
  api::{
    presentation_error::PresentationError,
    word::Word
  },
  core::GeneratorIndex,
};

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Presentation {
  generators: Vec<IString>,
  relators  : Vec<Vec<GeneratorIndex>>,
}

impl Presentation {
  pub fn new(generators: Vec<IString>, relators: Vec<Word>) -> Result<Self, PresentationError> {
    if generators.is_empty() {
      return Err(PresentationError::EmptyGeneratorSet);
    }
    for (position, name) in generators.iter().enumerate() {
      if generators[..position].contains(name) {
        return Err(PresentationError::DuplicateGenerator(name.clone()));
      }
    }

    let relators = relators
        .iter()
        .enumerate()
        .map(|(index, relator)| {
          if relator.is_empty() {
            return Err(PresentationError::EmptyRelator { index });
          }
          relator
              .letters()
              .iter()
              .map(|symbol| {
                generators
                    .iter()
                    .position(|name| name == symbol)
                    .ok_or_else(|| PresentationError::UnknownGenerator { relator: index, symbol: symbol.clone() })
              })
              .collect::<Result<Vec<GeneratorIndex>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Presentation { generators, relators })
  }

  /// Every character is one generator name: `from_letters("AB", &["AA", "BB", "ABAB"])`.
  pub fn from_letters(generators: &str, relators: &[&str]) -> Result<Self, PresentationError> {
    Presentation::new(
      generators.chars().map(|c| IString::from(c.to_string())).collect(),
      relators.iter().map(|relator| Word::from_letters(relator)).collect(),
    )
  }

  #[inline(always)]
  pub fn generators(&self) -> &[IString] {
    &self.generators
  }

  /// Relators as generator indices.
  #[inline(always)]
  pub fn relators(&self) -> &[Vec<GeneratorIndex>] {
    &self.relators
  }

  pub fn relator_word(&self, index: usize) -> Word {
    Word::from_symbols(self.relators[index].iter().map(|&generator| self.generators[generator].clone()))
  }

  pub fn generator_index(&self, name: &str) -> Option<GeneratorIndex> {
    self.generators.iter().position(|generator| &**generator == name)
  }
}

impl Display for Presentation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let relators = (0..self.relators.len()).map(|index| self.relator_word(index));
    write!(f, "<{}|{}>", join_string(self.generators.iter(), ","), join_string(relators, ","))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_letters_indexes_relators() {
    let presentation = Presentation::from_letters("AB", &["AA", "BB", "ABAB"]).unwrap();
    assert_eq!(presentation.generators().len(), 2);
    assert_eq!(presentation.relators(), &[vec![0, 0], vec![1, 1], vec![0, 1, 0, 1]]);
    assert_eq!(presentation.generator_index("B"), Some(1));
    assert_eq!(presentation.generator_index("C"), None);
    assert_eq!(presentation.relator_word(2).to_string(), "ABAB");
    assert_eq!(presentation.to_string(), "<A,B|AA,BB,ABAB>");
  }

  #[test]
  fn no_relators_is_allowed() {
    let presentation = Presentation::from_letters("A", &[]).unwrap();
    assert!(presentation.relators().is_empty());
    assert_eq!(presentation.to_string(), "<A|>");
  }

  #[test]
  fn malformed_presentations_are_rejected() {
    assert_eq!(Presentation::from_letters("", &["AA"]), Err(PresentationError::EmptyGeneratorSet));
    assert_eq!(
      Presentation::from_letters("ABA", &[]),
      Err(PresentationError::DuplicateGenerator(IString::from("A")))
    );
    assert_eq!(
      Presentation::from_letters("AB", &["AA", ""]),
      Err(PresentationError::EmptyRelator { index: 1 })
    );
    assert_eq!(
      Presentation::from_letters("AB", &["AC"]),
      Err(PresentationError::UnknownGenerator { relator: 0, symbol: IString::from("C") })
    );
  }

  #[test]
  fn named_generators() {
    let presentation = Presentation::new(
      vec![IString::from("x"), IString::from("y")],
      vec![Word::from_symbols(["x", "x"]), Word::from_symbols(["x", "y"])],
    ).unwrap();
    assert_eq!(presentation.relators(), &[vec![0, 0], vec![0, 1]]);
    assert_eq!(presentation.to_string(), "<x,y|xx,xy>");
  }
}
