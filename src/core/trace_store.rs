/*!

For every relator `r = r₀r₁…r_{L−1}` and every coset `c` the store keeps a trace row `v[0..=L]` with
`v[0] = v[L] = c`. Slot `v[i]` holds the coset reached from `c` by reading `r₀…r_{i−1}`, once the coset table can say
which coset that is. A row is complete when none of its slots is empty.

Rows are filled from both ends: forward with σ(g, ·) and backward with the preimage of σ(g, ·). When a row is
complete, every adjacent pair `(v[i], v[i+1])` is an entry `σ(rᵢ, v[i]) = v[i+1]` the relator forces, and harvesting
writes those entries into the table. A forced entry that contradicts one already in the table is a coincidence.

## Coincidences

Merging is eager: the larger index is replaced by the smaller one in every slot of every row, and the table
collapses the larger index into the smaller one. Each merge costs time proportional to the size of the store. The
table reports any further coincidences a merge forces; those are processed from a queue until none remain.

*/

use std::collections::VecDeque;

use crate::{
  core::{
    coset_table::CosetTable,
    error::CosetError,
    CosetIndex,
    GeneratorIndex
  },
  debug,
  trace,
};

/// A partial trace of one relator from one coset.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TraceRow {
  slots: Vec<Option<CosetIndex>>,
}

impl TraceRow {
  fn new(coset: CosetIndex, relator_length: usize) -> Self {
    let mut slots = vec![None; relator_length + 1];
    slots[0]              = Some(coset);
    slots[relator_length] = Some(coset);
    TraceRow { slots }
  }

  /// The coset the row starts and ends at.
  pub fn coset(&self) -> CosetIndex {
    match self.slots.first() {
      Some(Some(coset)) => *coset,
      _ => unreachable!("trace rows are pinned at both ends"),
    }
  }

  #[inline(always)]
  pub fn slots(&self) -> &[Option<CosetIndex>] {
    &self.slots
  }

  pub fn empty_slot_count(&self) -> usize {
    self.slots.iter().filter(|slot| slot.is_none()).count()
  }

  #[inline(always)]
  pub fn is_complete(&self) -> bool {
    self.slots.iter().all(Option::is_some)
  }

  /// Fills empty slots from both ends until a pass fills nothing.
  fn fill(&mut self, relator: &[GeneratorIndex], table: &CosetTable) {
    let length = relator.len();
    loop {
      let mut filled = false;

      for i in 0..length {
        if let (Some(coset), None) = (self.slots[i], self.slots[i + 1]) {
          if let Ok(image) = table.forward_lookup(coset, relator[i]) {
            self.slots[i + 1] = Some(image);
            filled = true;
          }
        }
      }

      for i in (1..=length).rev() {
        if let (Some(image), None) = (self.slots[i], self.slots[i - 1]) {
          if let Ok(coset) = table.backward_lookup(relator[i - 1], image) {
            self.slots[i - 1] = Some(coset);
            filled = true;
          }
        }
      }

      if !filled {
        break;
      }
    }
  }

  /// The pair `(v[i], rᵢ)` at the first gap of the row whose table entry is still undefined.
  fn first_open_edge(&self, relator: &[GeneratorIndex], table: &CosetTable) -> Option<(CosetIndex, GeneratorIndex)> {
    (0..relator.len()).find_map(|i| match (self.slots[i], self.slots[i + 1]) {
      (Some(coset), None) if table.image(coset, relator[i]).is_none() => Some((coset, relator[i])),
      _ => None,
    })
  }

  fn replace(&mut self, big: CosetIndex, small: CosetIndex) -> usize {
    let mut replaced = 0;
    for slot in self.slots.iter_mut().filter(|slot| **slot == Some(big)) {
      *slot = Some(small);
      replaced += 1;
    }
    replaced
  }
}

/// What one harvesting pass did.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Harvest {
  /// Table entries that were not recorded before.
  pub definitions: usize,
  /// Cosets collapsed into smaller ones.
  pub merges     : usize,
}

impl Harvest {
  #[inline(always)]
  pub fn changed(&self) -> bool {
    self.definitions > 0 || self.merges > 0
  }
}

#[derive(Clone, Debug)]
pub struct RelatorTraceStore {
  relators: Vec<Vec<GeneratorIndex>>,
  /// `rows[r]` holds the rows of relator `r`, in the order they were opened.
  rows    : Vec<Vec<TraceRow>>,
}

impl RelatorTraceStore {
  pub fn new(relators: Vec<Vec<GeneratorIndex>>) -> Self {
    assert!(relators.iter().all(|relator| !relator.is_empty()), "relators must be nonempty");
    let rows = vec![Vec::new(); relators.len()];
    RelatorTraceStore { relators, rows }
  }

  // region Inspection

  /// Each relator together with its rows.
  pub fn relators(&self) -> impl Iterator<Item = (&[GeneratorIndex], &[TraceRow])> + '_ {
    self.relators
        .iter()
        .zip(self.rows.iter())
        .map(|(relator, rows)| (relator.as_slice(), rows.as_slice()))
  }

  pub fn rows(&self, relator: usize) -> &[TraceRow] {
    &self.rows[relator]
  }

  pub fn empty_slot_count(&self) -> usize {
    self.rows.iter().flatten().map(TraceRow::empty_slot_count).sum()
  }

  pub fn is_incomplete(&self) -> bool {
    self.rows.iter().flatten().any(|row| !row.is_complete())
  }

  // endregion Inspection

  /// Opens one row per relator at `coset`.
  pub fn open_row(&mut self, coset: CosetIndex) {
    for (relator, rows) in self.relators.iter().zip(self.rows.iter_mut()) {
      rows.push(TraceRow::new(coset, relator.len()));
    }
  }

  /// Fills every row as far as the table allows. Returns whether any slot was filled.
  pub fn propagate_to_fixpoint(&mut self, table: &CosetTable) -> bool {
    let empty_before = self.empty_slot_count();

    for (relator, rows) in self.relators.iter().zip(self.rows.iter_mut()) {
      for row in rows.iter_mut().filter(|row| !row.is_complete()) {
        row.fill(relator, table);
      }
    }

    let empty_after = self.empty_slot_count();
    if empty_after != empty_before {
      trace!(5, "filled {} trace slots, {} remain empty", empty_before - empty_after, empty_after);
    }
    empty_after != empty_before
  }

  /**
  Writes the entries forced by every complete row into `table`. A conflicting entry is a coincidence and is merged
  on the spot, after which the remaining rows are read with the merged indices.

  Errors other than `CosetError::Conflict` are returned to the caller; they indicate a broken invariant.
  */
  pub fn harvest_definitions(&mut self, table: &mut CosetTable) -> Result<Harvest, CosetError> {
    let mut harvest = Harvest::default();

    for relator in 0..self.relators.len() {
      for row in 0..self.rows[relator].len() {
        if !self.rows[relator][row].is_complete() {
          continue;
        }

        for i in 0..self.relators[relator].len() {
          let generator = self.relators[relator][i];
          // Re-read the slots every time: a merge may have rewritten them.
          let slots = &self.rows[relator][row].slots;
          let (Some(coset), Some(image)) = (slots[i], slots[i + 1]) else {
            unreachable!("complete trace row has an empty slot");
          };

          match table.define(coset, generator, image) {
            Ok(true) => harvest.definitions += 1,
            Ok(false) => {}
            Err(CosetError::Conflict { existing, attempted }) => {
              harvest.merges += self.resolve_coincidence(table, existing, attempted)?;
            }
            Err(error) => return Err(error),
          }
        }
      }
    }

    Ok(harvest)
  }

  /// Merges `first` and `second`, and every pair of cosets that merge forces, returning the number of cosets
  /// collapsed.
  pub fn resolve_coincidence(&mut self, table: &mut CosetTable, first: CosetIndex, second: CosetIndex)
    -> Result<usize, CosetError>
  {
    let mut pending = VecDeque::from([(first, second)]);
    let mut merges  = 0;

    while let Some((first, second)) = pending.pop_front() {
      let (first, second) = (table.representative(first), table.representative(second));
      if first == second {
        continue;
      }
      let (small, big) = if first < second { (first, second) } else { (second, first) };

      let replaced = self.replace_all_occurrences(big, small);
      pending.extend(table.collapse(big, small)?);
      merges += 1;

      debug!(3, "coincidence: coset {} merged into {} ({} trace slots rewritten)", big, small, replaced);
    }

    Ok(merges)
  }

  /// Rewrites every slot holding `big` to `small`, returning how many slots changed.
  pub fn replace_all_occurrences(&mut self, big: CosetIndex, small: CosetIndex) -> usize {
    self.rows
        .iter_mut()
        .flatten()
        .map(|row| row.replace(big, small))
        .sum()
  }

  /**
  The undefined pair at the first gap of the row with the fewest empty slots. Ties go to the earlier relator, then
  to the earlier row. Rows whose gap pair is already defined (possible only before propagation has run) are skipped.
  */
  pub fn fewest_gap_target(&self, table: &CosetTable) -> Option<(CosetIndex, GeneratorIndex)> {
    let mut best: Option<(usize, (CosetIndex, GeneratorIndex))> = None;

    for (relator, rows) in self.relators.iter().zip(self.rows.iter()) {
      for row in rows {
        let gaps = row.empty_slot_count();
        if gaps == 0 || best.is_some_and(|(fewest, _)| gaps >= fewest) {
          continue;
        }
        if let Some(target) = row.first_open_edge(relator, table) {
          best = Some((gaps, target));
        }
      }
    }

    best.map(|(_, target)| target)
  }

  /// Applies a renumbering produced by `CosetTable::compact` to every slot.
  pub fn renumber(&mut self, renumbering: &[CosetIndex]) {
    for slot in self.rows.iter_mut().flatten().flat_map(|row| row.slots.iter_mut()) {
      if let Some(coset) = slot {
        *coset = renumbering[*coset];
      }
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::abstractions::IString;

  fn table(generators: &str) -> CosetTable {
    CosetTable::new(generators.chars().map(|c| IString::from(c.to_string())).collect())
  }

  fn slots(row: &TraceRow) -> Vec<Option<CosetIndex>> {
    row.slots().to_vec()
  }

  #[test]
  fn open_row_pins_both_ends() {
    // AAA, BB
    let mut store = RelatorTraceStore::new(vec![vec![0, 0, 0], vec![1, 1]]);
    store.open_row(1);
    store.open_row(2);

    assert_eq!(store.rows(0).len(), 2);
    assert_eq!(slots(&store.rows(0)[1]), vec![Some(2), None, None, Some(2)]);
    assert_eq!(slots(&store.rows(1)[0]), vec![Some(1), None, Some(1)]);
    assert_eq!(store.empty_slot_count(), 6);
    assert!(store.is_incomplete());
    for (_, rows) in store.relators() {
      for row in rows {
        assert_eq!(row.slots().first(), row.slots().last());
      }
    }
  }

  #[test]
  fn propagation_fills_from_both_ends() {
    let mut t = table("AB");
    t.define(1, 0, 2).unwrap();
    t.define(3, 1, 1).unwrap();

    // ABAB traced from 1: forward 1·A = 2, backward 3·B = 1.
    let mut store = RelatorTraceStore::new(vec![vec![0, 1, 0, 1]]);
    store.open_row(1);

    assert!(store.propagate_to_fixpoint(&t));
    assert_eq!(slots(&store.rows(0)[0]), vec![Some(1), Some(2), None, Some(3), Some(1)]);

    // Nothing more can be derived.
    assert!(!store.propagate_to_fixpoint(&t));
  }

  #[test]
  fn harvesting_a_complete_row_defines_the_closing_entry() {
    let mut t = table("A");
    t.define(1, 0, 2).unwrap();

    // AA from 1 fills to [1, 2, 1]; the entry 2·A = 1 is forced.
    let mut store = RelatorTraceStore::new(vec![vec![0, 0]]);
    store.open_row(1);
    store.propagate_to_fixpoint(&t);

    let harvest = store.harvest_definitions(&mut t).unwrap();
    assert_eq!(harvest, Harvest { definitions: 1, merges: 0 });
    assert_eq!(t.image(2, 0), Some(1));

    // Harvesting again changes nothing.
    assert!(!store.harvest_definitions(&mut t).unwrap().changed());
  }

  #[test]
  fn harvest_conflict_merges_cosets_everywhere() {
    // <A | AA, AAA>
    let mut t = table("A");
    let mut store = RelatorTraceStore::new(vec![vec![0, 0], vec![0, 0, 0]]);
    store.open_row(1);
    let fresh = t.create_next_definition(None).unwrap();
    store.open_row(fresh);

    loop {
      let filled  = store.propagate_to_fixpoint(&t);
      let harvest = store.harvest_definitions(&mut t).unwrap();
      if !(filled || harvest.changed()) {
        break;
      }
    }

    assert!(!t.is_live(2));
    assert_eq!(t.live_count(), 1);
    assert_eq!(t.image(1, 0), Some(1));
    for (_, rows) in store.relators() {
      for row in rows {
        assert!(row.slots().iter().all(|slot| *slot == Some(1)));
      }
    }
    assert!(!store.is_incomplete());
  }

  #[test]
  fn replace_all_occurrences_counts_rewrites() {
    let mut store = RelatorTraceStore::new(vec![vec![0, 0], vec![0]]);
    store.open_row(1);
    store.open_row(3);

    assert_eq!(store.replace_all_occurrences(3, 2), 4);
    assert_eq!(store.replace_all_occurrences(3, 2), 0);
    assert_eq!(slots(&store.rows(0)[1]), vec![Some(2), None, Some(2)]);
    assert_eq!(store.rows(1)[1].coset(), 2);
  }

  #[test]
  fn fewest_gap_target_prefers_rows_nearest_completion() {
    let mut t = table("AB");
    // AAAA and BB
    let mut store = RelatorTraceStore::new(vec![vec![0, 0, 0, 0], vec![1, 1]]);
    store.open_row(1);
    assert_eq!(store.fewest_gap_target(&t), Some((1, 1)));

    t.define(1, 1, 1).unwrap();
    store.propagate_to_fixpoint(&t);
    // Only the AAAA row is left.
    assert_eq!(store.fewest_gap_target(&t), Some((1, 0)));

    t.define(1, 0, 1).unwrap();
    store.propagate_to_fixpoint(&t);
    assert!(!store.is_incomplete());
    assert_eq!(store.fewest_gap_target(&t), None);
  }

  #[test]
  fn renumber_applies_mapping() {
    let mut store = RelatorTraceStore::new(vec![vec![0, 0]]);
    store.open_row(1);
    store.open_row(4);
    store.renumber(&[0, 1, 0, 0, 2]);
    assert_eq!(store.rows(0)[1].coset(), 2);
  }
}
