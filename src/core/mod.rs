/*!

The enumeration engine.

The coset table records the right action of each generator on the cosets discovered so far. Each relator is traced
from every coset in a `RelatorTraceStore`; a trace row that closes up forces new table entries, and a table entry that
disagrees with an existing one reveals a coincidence: two coset indices that name the same coset. The `Enumerator`
alternates between defining fresh cosets and propagating what the rows imply until every row is complete.

| component           | owns                                         | answers                                  |
|:--------------------|:---------------------------------------------|:-----------------------------------------|
| `CosetTable`        | σ(g, c) entries, reverse map, collapse links | forward/backward lookups, definitions     |
| `RelatorTraceStore` | one row per (relator, coset)                 | which entries the relators force         |
| `Enumerator`        | one table and one trace store                | when the table is complete               |

*/

pub mod coset_table;
pub mod enumerator;
pub mod error;
pub mod trace_store;

pub use coset_table::CosetTable;
pub use enumerator::{
  solve,
  solve_with_options,
  DefinitionStrategy,
  EnumerationOptions,
  EnumerationState,
  EnumerationStatistics,
  Enumerator,
  DEFAULT_FAIRNESS_INTERVAL,
};
pub use error::{CosetError, EnumerationError};
pub use trace_store::{RelatorTraceStore, TraceRow};

/// A coset is named by a positive integer. Index 0 is never used.
pub type CosetIndex = usize;
/// A generator is addressed by its position in the presentation's generator list.
pub type GeneratorIndex = usize;

/// The coset of the identity element. It is present from the start and survives every coincidence.
pub const IDENTITY_COSET: CosetIndex = 1;
