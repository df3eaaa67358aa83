/*!

# Overview

Logging for the enumeration engine. Messages carry a _level_ (what kind of message it is) and a numeric _threshold_
(how verbose the logger has to be before the message is shown). The engine logs at its component boundaries: when a
coset is defined, when a coincidence merges two cosets, when a step reaches its fixpoint, and when enumeration
finishes.

```
use coxeter::log::*;

// Only messages logged at threshold 2 or lower are emitted from here on.
set_global_logging_threshold(2);

info!(1, "Enumerating {} relators", 3);         // Emitted
debug!(4, "Defined {}·{} = {}", 1, "A", 2);       // Not emitted
critical!(0, "Coset table invariant violated");  // Emitted
```

## Threshold

Higher thresholds mean more verbose output. A message is emitted when its threshold is less than or equal to the
global threshold, so threshold 0 is always emitted. The thresholds used by the engine are:

| threshold | what is logged                                        |
|:----------|:------------------------------------------------------|
| 1         | enumeration start and final statistics                |
| 2         | per-step summaries (live cosets, empty slots)         |
| 3         | coincidences                                          |
| 4         | individual coset definitions                          |
| 5         | trace row fills                                       |

The global threshold defaults to 1. It can be changed at any time with `set_global_logging_threshold`, or set at
start-up through the `COXETER_LOG_THRESHOLD` environment variable, which is read once when the logger initializes
and only if the threshold has not already been set in code.

## Levels

Available levels are: Critical, Error, Warning, Info, Debug, Trace. A critical message is an `ERROR` level event
marked `[CRITICAL]`; the engine uses it right before it panics on a broken invariant.

# Macros

`critical!`, `error!`, `warning!`, `info!`, `debug!`, `trace!`, each with the syntax

```ignore
level!(threshold, "format string", args...);
level!("plain message"); // threshold 0
```

The logger installs itself on first use. If the host application has already installed a global `tracing`
subscriber, that subscriber is left in place and receives the events instead.

*/
mod formatter;
mod threshold_filter;
mod macros;

use std::sync::{
  atomic::{AtomicBool, AtomicU8, Ordering},
  LazyLock
};

use tracing_subscriber::{
  fmt,
  layer::SubscriberExt,
  Registry
};

use threshold_filter::ThresholdFilterLayer;
use formatter::EnumerationFieldFormatter;
pub use macros::*;

#[doc(hidden)]
pub use tracing as __tracing;

/// Environment variable consulted for the initial logging threshold.
pub const THRESHOLD_ENV_VAR: &str = "COXETER_LOG_THRESHOLD";

const DEFAULT_THRESHOLD: u8 = 1;

static GLOBAL_LOGGING_THRESHOLD: AtomicU8  = AtomicU8::new(DEFAULT_THRESHOLD);
static THRESHOLD_SET_IN_CODE   : AtomicBool = AtomicBool::new(false);

/// Used for implicit initialization.
static INIT_LOGGER: LazyLock<()> = LazyLock::new(|| {
  if !THRESHOLD_SET_IN_CODE.load(Ordering::SeqCst) {
    if let Some(threshold) = threshold_from_env() {
      GLOBAL_LOGGING_THRESHOLD.store(threshold, Ordering::SeqCst);
    }
  }

  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(EnumerationFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stdout),
      );

  // Fails only when the host application installed its own subscriber first.
  let _ = tracing::subscriber::set_global_default(subscriber);
});

fn threshold_from_env() -> Option<u8> {
  std::env::var(THRESHOLD_ENV_VAR)
      .ok()
      .and_then(|value| value.trim().parse::<u8>().ok())
}

/// This does not need to be called directly. Initializes the logging system.
pub fn init_logger() {
  LazyLock::force(&INIT_LOGGER);
}

/// Sets the global threshold. Takes precedence over `COXETER_LOG_THRESHOLD`.
pub fn set_global_logging_threshold(new_threshold: u8) {
  THRESHOLD_SET_IN_CODE.store(true, Ordering::SeqCst);
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

/// Retrieves the global threshold.
pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_round_trip_and_macros() {
    let previous = get_global_logging_threshold();

    set_global_logging_threshold(3);
    assert_eq!(get_global_logging_threshold(), 3);

    info!(2, "emitted: {} live cosets", 4);
    debug!(4, "NOT emitted: defined {}·{} = {}", 1, "A", 2);
    warning!("emitted: plain message at threshold 0");
    critical!(1, "emitted: critical at threshold {}", 1);
    trace!(9, "NOT emitted");

    set_global_logging_threshold(previous);
  }
}
