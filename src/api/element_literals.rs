/*!

Names for the elements of an enumerated group. Every live coset of a complete table is one group element, and its
_literal_ is the shortlex-least word that reaches it from the identity coset: shortest first, and among words of equal
length the one that comes first when letters are compared in generator order. The identity's literal is the empty
word.

Literals are found by a breadth-first search from coset 1 that tries generators in order, so the first word to reach
a coset is its shortlex-least word. The group operation is concatenation followed by reduction to a literal.

*/

use std::collections::VecDeque;

use crate::{
  abstractions::{HashMap, IString},
  api::word::Word,
  core::{
    CosetError,
    CosetIndex,
    CosetTable,
    GeneratorIndex,
    IDENTITY_COSET
  },
  critical,
};

pub struct ElementLiteralResolver {
  table   : CosetTable,
  literals: HashMap<CosetIndex, Word>,
}

impl ElementLiteralResolver {
  /// Panics if some live coset cannot be reached from the identity coset.
  pub fn new(table: CosetTable) -> Self {
    let literals = compute_shortest_words(&table);
    ElementLiteralResolver { table, literals }
  }

  #[inline(always)]
  pub fn table(&self) -> &CosetTable {
    &self.table
  }

  /// The number of elements.
  pub fn order(&self) -> usize {
    self.literals.len()
  }

  pub fn identity(&self) -> &Word {
    &self.literals[&IDENTITY_COSET]
  }

  pub fn literal(&self, coset: CosetIndex) -> Option<&Word> {
    self.literals.get(&coset)
  }

  /// Each live coset with its literal, in coset order.
  pub fn shortest_words(&self) -> impl Iterator<Item = (CosetIndex, &Word)> + '_ {
    self.table
        .live_cosets()
        .map(|coset| (coset, &self.literals[&coset]))
  }

  /// Every element literal, in coset order.
  pub fn elements(&self) -> impl Iterator<Item = &Word> + '_ {
    self.shortest_words().map(|(_, word)| word)
  }

  /// The coset reached from the identity coset by reading `word`.
  pub fn number_of(&self, word: &Word) -> Result<CosetIndex, CosetError> {
    word.letters()
        .iter()
        .try_fold(IDENTITY_COSET, |coset, letter| {
          self.table.forward_lookup(coset, self.generator(letter)?)
        })
  }

  /// The literal of the product `first·second`.
  pub fn operator(&self, first: &Word, second: &Word) -> Result<&Word, CosetError> {
    let coset = self.number_of(&first.concat(second))?;
    Ok(self.literal_of(coset))
  }

  /// The literal `v` with `word·v` equal to the identity. Found by reading `word` backwards from the identity coset
  /// with preimages.
  pub fn inverse(&self, word: &Word) -> Result<&Word, CosetError> {
    let coset = word.letters()
        .iter()
        .rev()
        .try_fold(IDENTITY_COSET, |image, letter| {
          self.table.backward_lookup(self.generator(letter)?, image)
        })?;
    Ok(self.literal_of(coset))
  }

  fn generator(&self, letter: &IString) -> Result<GeneratorIndex, CosetError> {
    self.table
        .generator_index(letter)
        .ok_or_else(|| CosetError::UnknownGenerator(letter.clone()))
  }

  fn literal_of(&self, coset: CosetIndex) -> &Word {
    match self.literals.get(&coset) {
      Some(word) => word,
      None => {
        critical!(0, "coset {} was reached by a lookup but has no literal", coset);
        panic!("coset {} was reached by a lookup but has no literal", coset)
      }
    }
  }
}

fn compute_shortest_words(table: &CosetTable) -> HashMap<CosetIndex, Word> {
  let mut literals = HashMap::new();
  let mut frontier = VecDeque::from([IDENTITY_COSET]);
  literals.insert(IDENTITY_COSET, Word::identity());

  while let Some(coset) = frontier.pop_front() {
    for generator in 0..table.generator_count() {
      let Some(image) = table.image(coset, generator) else {
        continue;
      };
      if literals.contains_key(&image) {
        continue;
      }
      let word = literals[&coset].appended(table.generator_name(generator).clone());
      literals.insert(image, word);
      frontier.push_back(image);
    }
  }

  if let Some(unreachable) = table.live_cosets().find(|coset| !literals.contains_key(coset)) {
    critical!(0, "coset {} is live but unreachable from the identity coset", unreachable);
    panic!("coset {} is live but unreachable from the identity coset", unreachable);
  }

  literals
}
