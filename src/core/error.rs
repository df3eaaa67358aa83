/*!

Errors raised by the enumeration engine. `CosetError` comes from the coset table. Only `Conflict` is part of normal operation: it is how the table reports that two
coset indices have been shown to name the same coset, which the enumerator resolves by merging them. The other
variants either mean "not known yet" (`Undefined`, while the table is still growing) or signal a defect in the
coincidence machinery (`InvalidOverwrite`).

`EnumerationError` is what a caller of the enumerator can see: the only way a run stops short of a complete table is
the configured coset limit.

*/

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::abstractions::IString;
use crate::core::CosetIndex;

#[derive(Clone, PartialEq, Eq)]
pub enum CosetError {
  /// No entry is recorded for `coset` under `generator`. For a backward lookup `coset` is the image whose preimage
  /// was requested.
  Undefined {
    coset    : CosetIndex,
    generator: IString,
  },
  /// The indices `existing` and `attempted` were both derived for the same table slot, so they denote one coset.
  Conflict {
    existing : CosetIndex,
    attempted: CosetIndex,
  },
  /// An overwrite was requested for a slot that is unset or already holds the requested value.
  InvalidOverwrite {
    coset    : CosetIndex,
    generator: IString,
    value    : CosetIndex,
  },
  /// A word mentions a symbol that is not a generator of the presentation.
  UnknownGenerator(IString),
}

impl Display for CosetError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      CosetError::Undefined { coset, generator } => {
        write!(f, "no coset table entry for coset {} and generator {}", coset, generator)
      }

      CosetError::Conflict { existing, attempted } => {
        write!(
          f,
          "conflicting coset table entries: {} is already recorded where {} was derived",
          existing,
          attempted
        )
      }

      CosetError::InvalidOverwrite { coset, generator, value } => {
        write!(
          f,
          "invalid overwrite of coset table entry {}·{} with {}: the slot is unset or already holds that value",
          coset,
          generator,
          value
        )
      }

      CosetError::UnknownGenerator(name) => {
        write!(f, "\"{}\" is not a generator of the presentation", name)
      }

    } // end match on `CosetError`
  }
}

impl Debug for CosetError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for CosetError {}


#[derive(Clone, PartialEq, Eq)]
pub enum EnumerationError {
  /// Allocating another coset would exceed `EnumerationOptions::max_cosets`.
  CosetLimitExceeded {
    limit: usize,
    live : usize,
  },
}

impl Display for EnumerationError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      EnumerationError::CosetLimitExceeded { limit, live } => {
        write!(
          f,
          "coset limit of {} reached with {} live cosets; the group may be infinite",
          limit,
          live
        )
      }
    }
  }
}

impl Debug for EnumerationError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for EnumerationError {}
