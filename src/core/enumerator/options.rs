/*!

Knobs for an enumeration run. The defaults suit every presentation with a finite group small enough to enumerate;
set `max_cosets` when the group might be infinite.

*/

use std::fmt::{Display, Formatter};

/// After this many definitions chosen by fewest gaps, one definition is taken at the earliest undefined pair.
pub const DEFAULT_FAIRNESS_INTERVAL: usize = 8;

/// How the enumerator picks the (coset, generator) pair that receives a fresh coset.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum DefinitionStrategy {
  /// The undefined pair at the first gap of the trace row with the fewest empty slots. Every
  /// `fairness_interval`-th definition falls back to `FirstUndefined` so that no pair is postponed forever.
  #[default]
  FewestGaps,
  /// The earliest undefined pair: lowest live coset, then generator order.
  FirstUndefined,
}

impl Display for DefinitionStrategy {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      DefinitionStrategy::FewestGaps     => write!(f, "fewest gaps"),
      DefinitionStrategy::FirstUndefined => write!(f, "first undefined"),
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EnumerationOptions {
  pub strategy         : DefinitionStrategy,
  /// Zero disables the fallback.
  pub fairness_interval: usize,
  /// Largest coset index the enumerator may allocate. `None` means unbounded.
  pub max_cosets       : Option<usize>,
}

impl Default for EnumerationOptions {
  fn default() -> Self {
    EnumerationOptions {
      strategy         : DefinitionStrategy::default(),
      fairness_interval: DEFAULT_FAIRNESS_INTERVAL,
      max_cosets       : None,
    }
  }
}

impl EnumerationOptions {
  pub fn with_strategy(mut self, strategy: DefinitionStrategy) -> Self {
    self.strategy = strategy;
    self
  }

  pub fn with_fairness_interval(mut self, fairness_interval: usize) -> Self {
    self.fairness_interval = fairness_interval;
    self
  }

  pub fn with_max_cosets(mut self, max_cosets: usize) -> Self {
    self.max_cosets = Some(max_cosets);
    self
  }

  /// Whether the definition numbered `definitions + 1` should ignore the strategy and take the earliest undefined
  /// pair.
  pub(crate) fn is_fairness_turn(&self, definitions: usize) -> bool {
    self.fairness_interval > 0 && (definitions + 1) % self.fairness_interval == 0
  }
}
