use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::abstractions::IString;

/// Reasons a generator list and relator list do not form a presentation.
#[derive(Clone, PartialEq, Eq)]
pub enum PresentationError {
  EmptyGeneratorSet,
  DuplicateGenerator(IString),
  EmptyRelator {
    index: usize,
  },
  UnknownGenerator {
    relator: usize,
    symbol : IString,
  },
}

impl Display for PresentationError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      PresentationError::EmptyGeneratorSet => {
        write!(f, "a presentation needs at least one generator")
      }

      PresentationError::DuplicateGenerator(name) => {
        write!(f, "generator {} is listed more than once", name)
      }

      PresentationError::EmptyRelator { index } => {
        write!(f, "relator {} is empty", index)
      }

      PresentationError::UnknownGenerator { relator, symbol } => {
        write!(f, "relator {} uses \"{}\", which is not a generator", relator, symbol)
      }

    } // end match on `PresentationError`
  }
}

impl Debug for PresentationError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for PresentationError {}
