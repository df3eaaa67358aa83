/*!

Todd–Coxeter coset enumeration for finitely presented groups.

Given generators and relators, the enumerator builds the table of right multiplication by each generator on the
cosets of the trivial subgroup, which is the regular permutation representation of the group when the group is
finite. An `ElementLiteralResolver` then names every element by its shortlex-least word and multiplies elements.

```
use coxeter::{solve, ElementLiteralResolver, Presentation, Word};

// The dihedral group of order 6.
let presentation = Presentation::from_letters("AB", &["AAA", "BB", "ABAB"]).unwrap();
let resolver = ElementLiteralResolver::new(solve(&presentation));

assert_eq!(resolver.order(), 6);
assert!(resolver.operator(&Word::from("A"), &Word::from("AA")).unwrap().is_identity());
```

Enumeration does not terminate for an infinite group unless a coset limit is configured through
`EnumerationOptions::with_max_cosets`.

*/

pub mod api;
pub mod abstractions;
mod core;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString
};

pub use api::*;
