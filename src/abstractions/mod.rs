/*!

Types/type aliases that abstract over the implementing backing type.

The enumeration engine only needs a handful of general purpose facilities: interned strings for generator names, a
dense set of natural numbers for coset bookkeeping, a hash map, and string joining for `Display` impls. Each is
re-exported from here so the choice of backing crate can change in one place.

*/

mod nat_set;
mod string_join;

// Logging
pub mod log;

// A set of natural numbers
pub use nat_set::NatSet;

// Interned string.
pub use string_cache::DefaultAtom as IString;

pub use std::collections::HashMap;

// Join sequences with a separator
pub use string_join::{concat_string, join_string};
