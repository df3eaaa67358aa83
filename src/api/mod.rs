/*!

The public API of the library: the input value types, and the resolver that names the elements of an enumerated
group. The enumeration engine itself lives in the private `core` module; the parts of it a client needs are
re-exported here.

*/

pub mod element_literals;
pub mod presentation;
pub mod presentation_error;
pub mod word;

pub use element_literals::ElementLiteralResolver;
pub use presentation::Presentation;
pub use presentation_error::PresentationError;
pub use word::Word;

pub use crate::core::{
  solve,
  solve_with_options,
  CosetError,
  CosetIndex,
  CosetTable,
  DefinitionStrategy,
  EnumerationError,
  EnumerationOptions,
  EnumerationState,
  EnumerationStatistics,
  Enumerator,
  GeneratorIndex,
  RelatorTraceStore,
  TraceRow,
  DEFAULT_FAIRNESS_INTERVAL,
  IDENTITY_COSET,
};
