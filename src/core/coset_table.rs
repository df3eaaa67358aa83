/*!

The coset table σ records, for each generator `g` and coset `c`, the coset `σ(g, c)` reached by acting on `c` on
the right by `g`. While the enumeration is running the table is partial; once it is complete each column is a
permutation of the live cosets.

## Invariants

 - For a fixed `(g, c)` at most one image is ever recorded. A second, different value is reported as
   `CosetError::Conflict` rather than stored.
 - For a fixed `(g, c')` at most one preimage is recorded, so every column is injective. A definition that would
   give `c'` a second preimage is likewise reported as a conflict: the two preimages are the same coset.
 - No entry ever mentions a collapsed coset. `CosetTable::collapse` removes every entry mentioning the collapsed
   index and re-files it under the surviving index.

## Reverse Lookup

Backward lookups go through an auxiliary map keyed by `(generator, image)`. It holds exactly the inverse of the
recorded forward entries, so a lookup in it gives the same answer a scan of the column would.

## Lifecycle of Indices

Coset 1 exists from the start. New indices are allocated as `max_defined + 1` and are never reused while the
enumeration runs. A collapsed index keeps a link to the index it was merged into so that pending coincidences that
still mention it can be resolved with `CosetTable::representative`. When the enumeration finishes,
`CosetTable::compact` renumbers the live cosets to `1..=n`.

*/

use std::cmp::max;

use crate::{
  abstractions::{HashMap, IString, NatSet},
  core::{
    error::CosetError,
    CosetIndex,
    GeneratorIndex,
    IDENTITY_COSET
  },
  debug,
};

#[derive(Clone, Debug)]
pub struct CosetTable {
  generators : Vec<IString>,
  /// `images[g][c]` is σ(g, c). Slot 0 of every column is unused.
  images     : Vec<Vec<Option<CosetIndex>>>,
  /// `(g, c')` ↦ the unique `c` with σ(g, c) = c'.
  preimages  : HashMap<(GeneratorIndex, CosetIndex), CosetIndex>,
  /// The largest coset index allocated so far, live or not.
  max_defined: CosetIndex,
  collapsed  : NatSet,
  /// For every collapsed index, the index it was merged into.
  merged_into: HashMap<CosetIndex, CosetIndex>,
}

impl CosetTable {
  /// Creates the table containing only the identity coset, with no entries.
  pub fn new(generators: Vec<IString>) -> Self {
    let column_count = generators.len();
    CosetTable {
      generators,
      images     : vec![vec![None; IDENTITY_COSET + 1]; column_count],
      preimages  : HashMap::new(),
      max_defined: IDENTITY_COSET,
      collapsed  : NatSet::new(),
      merged_into: HashMap::new(),
    }
  }

  // region Inspection

  #[inline(always)]
  pub fn generators(&self) -> &[IString] {
    &self.generators
  }

  #[inline(always)]
  pub fn generator_count(&self) -> usize {
    self.generators.len()
  }

  pub fn generator_name(&self, generator: GeneratorIndex) -> &IString {
    &self.generators[generator]
  }

  pub fn generator_index(&self, name: &str) -> Option<GeneratorIndex> {
    self.generators.iter().position(|generator| generator.as_ref() == name)
  }

  #[inline(always)]
  pub fn max_defined(&self) -> CosetIndex {
    self.max_defined
  }

  /// Is `coset` allocated and not collapsed?
  pub fn is_live(&self, coset: CosetIndex) -> bool {
    coset >= IDENTITY_COSET && coset <= self.max_defined && !self.collapsed.contains(coset)
  }

  /// Live cosets in increasing order.
  pub fn live_cosets(&self) -> impl Iterator<Item = CosetIndex> + '_ {
    (IDENTITY_COSET..=self.max_defined).filter(|coset| !self.collapsed.contains(*coset))
  }

  pub fn live_count(&self) -> usize {
    self.max_defined - self.collapsed.len()
  }

  /// The recorded entries `(c, σ(g, c))` of one generator's column, in increasing order of `c`.
  pub fn defined_entries(&self, generator: GeneratorIndex) -> impl Iterator<Item = (CosetIndex, CosetIndex)> + '_ {
    self.images[generator]
        .iter()
        .enumerate()
        .filter_map(|(coset, image)| image.map(|image| (coset, image)))
  }

  /// σ(g, c) if it is recorded.
  #[inline(always)]
  pub fn image(&self, coset: CosetIndex, generator: GeneratorIndex) -> Option<CosetIndex> {
    self.images[generator].get(coset).copied().flatten()
  }

  /// The `c` with σ(g, c) = `image`, if one is recorded.
  #[inline(always)]
  pub fn preimage(&self, generator: GeneratorIndex, image: CosetIndex) -> Option<CosetIndex> {
    self.preimages.get(&(generator, image)).copied()
  }

  /// The earliest undefined pair: lowest live coset first, then generator order.
  pub fn first_undefined(&self) -> Option<(CosetIndex, GeneratorIndex)> {
    self.live_cosets().find_map(|coset| {
      (0..self.generator_count())
          .find(|&generator| self.image(coset, generator).is_none())
          .map(|generator| (coset, generator))
    })
  }

  /// Is σ(g, c) recorded for every generator and every live coset?
  pub fn is_saturated(&self) -> bool {
    self.first_undefined().is_none()
  }

  /// Follows collapse links from `coset` to the live index it was merged into.
  pub fn representative(&self, mut coset: CosetIndex) -> CosetIndex {
    while let Some(&survivor) = self.merged_into.get(&coset) {
      coset = survivor;
    }
    coset
  }

  // endregion Inspection

  // region Lookups and definitions

  pub fn forward_lookup(&self, coset: CosetIndex, generator: GeneratorIndex) -> Result<CosetIndex, CosetError> {
    self.image(coset, generator).ok_or_else(|| CosetError::Undefined {
      coset,
      generator: self.generators[generator].clone(),
    })
  }

  pub fn backward_lookup(&self, generator: GeneratorIndex, image: CosetIndex) -> Result<CosetIndex, CosetError> {
    self.preimage(generator, image).ok_or_else(|| CosetError::Undefined {
      coset    : image,
      generator: self.generators[generator].clone(),
    })
  }

  /**
  Records σ(g, c) = `image`. Returns `Ok(true)` if the entry is new and `Ok(false)` if exactly this entry was already
  recorded.

  Fails with `CosetError::Conflict` without modifying the table if σ(g, c) holds a different value
  (`existing` is that value, `attempted` is `image`) or if another coset already maps to `image` under `g`
  (`existing` is that coset, `attempted` is `coset`). Either way the two indices in the error denote the same coset.
  */
  pub fn define(&mut self, coset: CosetIndex, generator: GeneratorIndex, image: CosetIndex)
    -> Result<bool, CosetError>
  {
    if let Some(existing) = self.image(coset, generator) {
      return if existing == image {
        Ok(false)
      } else {
        Err(CosetError::Conflict { existing, attempted: image })
      };
    }
    if let Some(existing) = self.preimage(generator, image) {
      return Err(CosetError::Conflict { existing, attempted: coset });
    }

    self.store(coset, generator, image);
    self.max_defined = max(self.max_defined, max(coset, image));
    Ok(true)
  }

  /**
  Replaces an existing σ(g, c) with `image`. Only coincidence resolution uses this.

  Fails with `CosetError::InvalidOverwrite` if σ(g, c) is unset or already equal to `image`; that indicates a
  defect in the caller. Fails with `CosetError::Conflict` without modifying the table if another coset already maps
  to `image` under `g`.
  */
  pub fn overwrite_define(&mut self, coset: CosetIndex, generator: GeneratorIndex, image: CosetIndex)
    -> Result<(), CosetError>
  {
    let previous = match self.image(coset, generator) {
      Some(previous) if previous != image => previous,
      _ => {
        return Err(CosetError::InvalidOverwrite {
          coset,
          generator: self.generators[generator].clone(),
          value    : image,
        });
      }
    };
    if let Some(existing) = self.preimage(generator, image) {
      return Err(CosetError::Conflict { existing, attempted: coset });
    }

    if self.preimage(generator, previous) == Some(coset) {
      self.preimages.remove(&(generator, previous));
    }
    self.store(coset, generator, image);
    self.max_defined = max(self.max_defined, image);
    Ok(())
  }

  /**
  Allocates the fresh coset `max_defined + 1` as the image of an undefined pair and returns it.

  The pair is `preferred` if it is given and still undefined at a live coset; otherwise it is the earliest undefined
  pair (see `CosetTable::first_undefined`). Returns `None` when every pair is already defined.
  */
  pub fn create_next_definition(&mut self, preferred: Option<(CosetIndex, GeneratorIndex)>) -> Option<CosetIndex> {
    let (coset, generator) = preferred
        .filter(|&(coset, generator)| self.is_live(coset) && self.image(coset, generator).is_none())
        .or_else(|| self.first_undefined())?;

    let fresh = self.max_defined + 1;
    // A fresh index has no preimage yet, so this cannot conflict.
    let defined = self.define(coset, generator, fresh);
    debug_assert_eq!(defined, Ok(true));

    debug!(4, "defined {}·{} = {}", coset, self.generators[generator], fresh);
    Some(fresh)
  }

  // endregion Lookups and definitions

  // region Coincidences

  /**
  Collapses `big` into `small`, which must both be live with `small < big`.

  Every entry mentioning `big` is removed. Entries `s·g = big` are redirected to `s·g = small`, and entries
  `big·g = t` are re-filed as `small·g = t`. Where re-filing collides with an entry already present, the collision is
  not stored; instead the pair of indices it proves equal is returned so the caller can merge them in turn. No
  information is lost this way: once those pairs are merged the skipped entry follows from the surviving one.
  */
  pub fn collapse(&mut self, big: CosetIndex, small: CosetIndex)
    -> Result<Vec<(CosetIndex, CosetIndex)>, CosetError>
  {
    assert!(
      small < big && self.is_live(small) && self.is_live(big),
      "tried to collapse coset {} into coset {}",
      big,
      small
    );

    self.collapsed.insert(big);
    self.merged_into.insert(big, small);

    let mut coincidences = Vec::new();
    let mut displaced    = Vec::new();

    for generator in 0..self.generator_count() {
      // Outgoing: big·g = t
      if let Some(image) = self.take(big, generator) {
        displaced.push((generator, if image == big { small } else { image }));
      }

      // Incoming: s·g = big. A self-loop on `big` was already removed above.
      if let Some(source) = self.preimage(generator, big) {
        match self.overwrite_define(source, generator, small) {
          Ok(()) => {}
          Err(CosetError::Conflict { existing, attempted }) => {
            self.take(source, generator);
            coincidences.push((existing, attempted));
          }
          Err(error) => return Err(error),
        }
      }
    }

    for (generator, image) in displaced {
      match self.define(small, generator, image) {
        Ok(_) => {}
        Err(CosetError::Conflict { existing, attempted }) => coincidences.push((existing, attempted)),
        Err(error) => return Err(error),
      }
    }

    Ok(coincidences)
  }

  /**
  Renumbers the live cosets to `1..=n`, preserving their order, and forgets the collapsed ones. Returns the
  renumbering as a vector indexed by old coset index; collapsed indices map to 0.
  */
  pub fn compact(&mut self) -> Vec<CosetIndex> {
    let mut renumbering = vec![0; self.max_defined + 1];
    let mut live_count  = 0;
    for coset in IDENTITY_COSET..=self.max_defined {
      if !self.collapsed.contains(coset) {
        live_count += 1;
        renumbering[coset] = live_count;
      }
    }

    let mut images    = vec![vec![None; live_count + 1]; self.generator_count()];
    let mut preimages = HashMap::new();
    for (generator, column) in self.images.iter().enumerate() {
      for (coset, image) in column.iter().enumerate() {
        if let Some(image) = image {
          let (from, to) = (renumbering[coset], renumbering[*image]);
          debug_assert!(from != 0 && to != 0, "coset table entry mentions a collapsed coset");
          images[generator][from] = Some(to);
          preimages.insert((generator, to), from);
        }
      }
    }

    self.images      = images;
    self.preimages   = preimages;
    self.max_defined = live_count;
    self.collapsed.clear();
    self.merged_into.clear();

    renumbering
  }

  // endregion Coincidences

  fn store(&mut self, coset: CosetIndex, generator: GeneratorIndex, image: CosetIndex) {
    let column = &mut self.images[generator];
    if column.len() <= coset {
      column.resize(coset + 1, None);
    }
    column[coset] = Some(image);
    self.preimages.insert((generator, image), coset);
  }

  /// Removes σ(g, c) and its reverse record, returning the removed image.
  fn take(&mut self, coset: CosetIndex, generator: GeneratorIndex) -> Option<CosetIndex> {
    let image = self.images[generator].get_mut(coset).and_then(Option::take)?;
    if self.preimage(generator, image) == Some(coset) {
      self.preimages.remove(&(generator, image));
    }
    Some(image)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn table(generators: &str) -> CosetTable {
    CosetTable::new(generators.chars().map(|c| IString::from(c.to_string())).collect())
  }

  /// Every entry of every column, as `(generator, coset, image)`.
  fn entries(table: &CosetTable) -> Vec<(GeneratorIndex, CosetIndex, CosetIndex)> {
    (0..table.generator_count())
        .flat_map(|g| table.defined_entries(g).map(move |(c, d)| (g, c, d)))
        .collect()
  }

  #[test]
  fn define_records_and_reports_conflicts() {
    let mut t = table("AB");
    assert_eq!(t.define(1, 0, 2), Ok(true));
    assert_eq!(t.define(2, 0, 3), Ok(true));
    assert_eq!(t.define(1, 0, 2), Ok(false));
    assert_eq!(t.max_defined(), 3);

    // A second, different image for 1·A is never stored.
    assert_eq!(t.define(1, 0, 3), Err(CosetError::Conflict { existing: 2, attempted: 3 }));
    assert_eq!(t.image(1, 0), Some(2));

    // 3 already has preimage 2 under A.
    assert_eq!(t.define(3, 0, 3), Err(CosetError::Conflict { existing: 2, attempted: 3 }));
    assert_eq!(t.image(3, 0), None);
  }

  #[test]
  fn define_raises_max_defined() {
    let mut t = table("ABCD");
    t.define(2, 1, 1).unwrap();
    assert_eq!(t.max_defined(), 2);
    assert_eq!(t.live_cosets().collect::<Vec<_>>(), vec![1, 2]);
  }

  #[test]
  fn create_next_definition_takes_earliest_pair() {
    let mut single = table("A");
    for expected in 2..=4 {
      assert_eq!(single.create_next_definition(None), Some(expected));
    }
    assert_eq!(entries(&single), vec![(0, 1, 2), (0, 2, 3), (0, 3, 4)]);

    let mut pair = table("AB");
    pair.define(1, 1, 2).unwrap();
    assert_eq!(pair.create_next_definition(None), Some(3));
    assert_eq!(pair.image(1, 0), Some(3));
    pair.create_next_definition(None);
    pair.create_next_definition(None);
    assert_eq!(pair.image(2, 0), Some(4));
    assert_eq!(pair.image(2, 1), Some(5));

    let mut four = table("ABCD");
    four.define(2, 1, 1).unwrap();
    for _ in 0..6 {
      four.create_next_definition(None);
    }
    assert_eq!(
      entries(&four),
      vec![(0, 1, 3), (0, 2, 7), (1, 1, 4), (1, 2, 1), (2, 1, 5), (2, 2, 8), (3, 1, 6)]
    );
  }

  #[test]
  fn create_next_definition_honours_preferred_pair() {
    let mut t = table("AB");
    assert_eq!(t.create_next_definition(Some((1, 1))), Some(2));
    assert_eq!(t.image(1, 1), Some(2));

    // Already defined, so the earliest undefined pair is used instead.
    assert_eq!(t.create_next_definition(Some((1, 1))), Some(3));
    assert_eq!(t.image(1, 0), Some(3));

    // Not a live coset.
    assert_eq!(t.create_next_definition(Some((40, 0))), Some(4));
    assert_eq!(t.image(2, 0), Some(4));
  }

  #[test]
  fn create_next_definition_on_saturated_table() {
    let mut t = table("A");
    t.define(1, 0, 1).unwrap();
    assert!(t.is_saturated());
    assert_eq!(t.create_next_definition(None), None);
    assert_eq!(t.max_defined(), 1);
  }

  #[test]
  fn forward_and_backward_lookups() {
    let mut t = table("AB");
    for _ in 0..4 {
      t.create_next_definition(None);
    }
    t.define(5, 1, 2).unwrap();
    // 1·A = 2, 1·B = 3, 2·A = 4, 2·B = 5, 5·B = 2

    assert_eq!(t.forward_lookup(1, 0), Ok(2));
    assert_eq!(t.forward_lookup(2, 1), Ok(5));
    assert_eq!(t.forward_lookup(5, 1), Ok(2));
    assert_eq!(
      t.forward_lookup(3, 0),
      Err(CosetError::Undefined { coset: 3, generator: IString::from("A") })
    );

    assert_eq!(t.backward_lookup(0, 2), Ok(1));
    assert_eq!(t.backward_lookup(0, 4), Ok(2));
    assert_eq!(t.backward_lookup(1, 3), Ok(1));
    assert_eq!(t.backward_lookup(1, 2), Ok(5));
    for (generator, image) in [(0, 1), (0, 3), (0, 5), (1, 1), (1, 4)] {
      assert!(t.backward_lookup(generator, image).is_err());
    }
  }

  #[test]
  fn overwrite_define_rejects_unset_and_identical() {
    let mut t = table("A");
    t.define(1, 0, 2).unwrap();

    assert!(matches!(t.overwrite_define(1, 0, 2), Err(CosetError::InvalidOverwrite { .. })));
    assert!(matches!(t.overwrite_define(2, 0, 1), Err(CosetError::InvalidOverwrite { .. })));

    assert_eq!(t.overwrite_define(1, 0, 1), Ok(()));
    assert_eq!(t.image(1, 0), Some(1));
    assert_eq!(t.preimage(0, 1), Some(1));
    assert_eq!(t.preimage(0, 2), None);
  }

  #[test]
  fn collapse_removes_every_mention() {
    let mut t = table("AB");
    t.define(1, 0, 2).unwrap();
    t.define(2, 0, 3).unwrap();
    t.define(3, 1, 1).unwrap();
    t.define(3, 0, 4).unwrap();

    let coincidences = t.collapse(3, 2).unwrap();

    // 2·A = 3 becomes 2·A = 2, but 1·A = 2 already: 1 and 2 are the same coset.
    assert_eq!(coincidences, vec![(1, 2)]);
    assert!(!t.is_live(3));
    assert_eq!(t.representative(3), 2);
    assert_eq!(t.live_count(), 3);
    assert!(entries(&t).iter().all(|&(_, c, d)| c != 3 && d != 3));
    assert_eq!(t.image(2, 0), Some(4));
    assert_eq!(t.image(2, 1), Some(1));
    assert_eq!(t.preimage(0, 4), Some(2));

    t.collapse(2, 1).unwrap();
    assert_eq!(t.representative(3), 1);
    assert!(entries(&t).iter().all(|&(_, c, d)| c != 2 && d != 2));
  }

  #[test]
  fn compact_renumbers_live_cosets() {
    let mut t = table("A");
    t.define(1, 0, 2).unwrap();
    t.define(2, 0, 3).unwrap();
    t.define(3, 0, 4).unwrap();
    t.collapse(3, 1).unwrap();

    let renumbering = t.compact();
    assert_eq!(renumbering, vec![0, 1, 2, 0, 3]);
    assert_eq!(t.max_defined(), 3);
    assert_eq!(t.live_cosets().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(t.image(1, 0), Some(2));
    assert_eq!(t.image(2, 0), Some(1));
    assert_eq!(t.image(3, 0), None);
    assert_eq!(t.backward_lookup(0, 1), Ok(2));
  }
}
