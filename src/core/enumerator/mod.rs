/*!

The enumeration loop. Each step allocates one fresh coset for a chosen undefined (coset, generator) pair, opens its
trace rows, and then settles: propagate every row as far as the table allows, harvest the entries that complete
rows force, and repeat until neither changes anything. Coincidences found while harvesting are merged on the spot.

The run is over when every trace row is complete and every generator is defined at every live coset. At that point
the live cosets are renumbered to `1..=n` and the enumerator enters `EnumerationState::Done`, which it never leaves.

```
use coxeter::{solve, Presentation};

let presentation = Presentation::from_letters("AB", &["AAA", "BB", "ABAB"]).unwrap();
let table = solve(&presentation);
assert_eq!(table.live_count(), 6);
```

*/

mod options;

use std::fmt::{Display, Formatter};

use crate::{
  api::{
    element_literals::ElementLiteralResolver,
    presentation::Presentation
  },
  core::{
    coset_table::CosetTable,
    error::{CosetError, EnumerationError},
    trace_store::RelatorTraceStore,
    CosetIndex,
    GeneratorIndex,
    IDENTITY_COSET
  },
  critical,
  debug,
  info,
};

pub use options::{DefinitionStrategy, EnumerationOptions, DEFAULT_FAIRNESS_INTERVAL};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum EnumerationState {
  Growing,
  Done,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct EnumerationStatistics {
  /// Fresh cosets allocated.
  pub definitions : usize,
  /// Cosets merged away.
  pub coincidences: usize,
  /// Propagate-and-harvest passes.
  pub passes      : usize,
  /// Largest number of simultaneously live cosets.
  pub peak_live   : usize,
}

impl Display for EnumerationStatistics {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} definitions, {} coincidences, {} passes, peak of {} live cosets",
      self.definitions,
      self.coincidences,
      self.passes,
      self.peak_live
    )
  }
}

pub struct Enumerator {
  presentation: Presentation,
  options     : EnumerationOptions,
  table       : CosetTable,
  traces      : RelatorTraceStore,
  state       : EnumerationState,
  statistics  : EnumerationStatistics,
}

impl Enumerator {
  pub fn new(presentation: &Presentation) -> Self {
    Self::with_options(presentation, EnumerationOptions::default())
  }

  pub fn with_options(presentation: &Presentation, options: EnumerationOptions) -> Self {
    let mut enumerator = Enumerator {
      presentation: presentation.clone(),
      options,
      table       : CosetTable::new(presentation.generators().to_vec()),
      traces      : RelatorTraceStore::new(presentation.relators().to_vec()),
      state       : EnumerationState::Growing,
      statistics  : EnumerationStatistics { peak_live: 1, ..EnumerationStatistics::default() },
    };

    info!(1, "enumerating cosets of {} ({} strategy)", enumerator.presentation, enumerator.options.strategy);
    enumerator.traces.open_row(IDENTITY_COSET);
    // Relators of length one already force entries at the identity coset.
    enumerator.settle();

    enumerator
  }

  // region Accessors

  #[inline(always)]
  pub fn state(&self) -> EnumerationState {
    self.state
  }

  #[inline(always)]
  pub fn presentation(&self) -> &Presentation {
    &self.presentation
  }

  #[inline(always)]
  pub fn options(&self) -> &EnumerationOptions {
    &self.options
  }

  #[inline(always)]
  pub fn table(&self) -> &CosetTable {
    &self.table
  }

  #[inline(always)]
  pub fn traces(&self) -> &RelatorTraceStore {
    &self.traces
  }

  #[inline(always)]
  pub fn statistics(&self) -> &EnumerationStatistics {
    &self.statistics
  }

  /// The table as it stands. Unless the state is `Done` it is partial.
  pub fn into_table(self) -> CosetTable {
    self.table
  }

  /// Runs to completion, then hands the table to an `ElementLiteralResolver`.
  pub fn into_resolver(mut self) -> Result<ElementLiteralResolver, EnumerationError> {
    self.solve()?;
    Ok(ElementLiteralResolver::new(self.table))
  }

  // endregion Accessors

  /// Steps until the state is `Done`.
  pub fn solve(&mut self) -> Result<&CosetTable, EnumerationError> {
    while self.step()? == EnumerationState::Growing {}
    Ok(&self.table)
  }

  /**
  Makes one definition and settles its consequences. Once the state is `Done` this does nothing.

  Fails with `EnumerationError::CosetLimitExceeded` before allocating past `EnumerationOptions::max_cosets`; the
  enumerator is left unchanged and stays `Growing`.
  */
  pub fn step(&mut self) -> Result<EnumerationState, EnumerationError> {
    if self.state == EnumerationState::Done {
      return Ok(EnumerationState::Done);
    }
    if self.is_closed() {
      self.finish();
      return Ok(self.state);
    }

    if let Some(limit) = self.options.max_cosets {
      if self.table.max_defined() >= limit {
        let live = self.table.live_count();
        info!(1, "coset limit {} reached with {} live cosets ({})", limit, live, self.statistics);
        return Err(EnumerationError::CosetLimitExceeded { limit, live });
      }
    }

    let preferred = self.preferred_pair();
    if let Some(coset) = self.table.create_next_definition(preferred) {
      self.traces.open_row(coset);
      self.statistics.definitions += 1;
    }
    self.settle();

    let live = self.table.live_count();
    self.statistics.peak_live = self.statistics.peak_live.max(live);
    debug!(
      2,
      "step {}: {} live cosets, {} empty trace slots",
      self.statistics.definitions,
      live,
      self.traces.empty_slot_count()
    );

    if self.is_closed() {
      self.finish();
    }
    Ok(self.state)
  }

  fn is_closed(&self) -> bool {
    !self.traces.is_incomplete() && self.table.is_saturated()
  }

  /// The pair the strategy asks for. `None` lets the table take its earliest undefined pair.
  fn preferred_pair(&self) -> Option<(CosetIndex, GeneratorIndex)> {
    match self.options.strategy {
      DefinitionStrategy::FirstUndefined => None,
      DefinitionStrategy::FewestGaps => {
        if self.options.is_fairness_turn(self.statistics.definitions) {
          None
        } else {
          self.traces.fewest_gap_target(&self.table)
        }
      }
    }
  }

  /// Propagates and harvests until neither changes anything.
  fn settle(&mut self) {
    loop {
      self.statistics.passes += 1;

      let filled  = self.traces.propagate_to_fixpoint(&self.table);
      let harvest = match self.traces.harvest_definitions(&mut self.table) {
        Ok(harvest) => harvest,
        Err(error) => invariant_violated(&error),
      };
      self.statistics.coincidences += harvest.merges;

      if !(filled || harvest.changed()) {
        break;
      }
    }
  }

  fn finish(&mut self) {
    let renumbering = self.table.compact();
    self.traces.renumber(&renumbering);
    self.state = EnumerationState::Done;

    info!(
      1,
      "enumeration of {} finished with {} cosets: {}",
      self.presentation,
      self.table.live_count(),
      self.statistics
    );
  }
}

fn invariant_violated(error: &CosetError) -> ! {
  critical!(0, "coset table invariant violated: {}", error);
  panic!("coset table invariant violated: {}", error)
}

/// Enumerates the cosets of the trivial subgroup. Does not return if the group is infinite; use
/// `solve_with_options` with a coset limit when that is possible.
pub fn solve(presentation: &Presentation) -> CosetTable {
  match solve_with_options(presentation, EnumerationOptions::default()) {
    Ok(table) => table,
    Err(error) => unreachable!("an unbounded enumeration reported a limit: {}", error),
  }
}

pub fn solve_with_options(presentation: &Presentation, options: EnumerationOptions)
    -> Result<CosetTable, EnumerationError>
{
  let mut enumerator = Enumerator::with_options(presentation, options);
  enumerator.solve()?;
  Ok(enumerator.into_table())
}
