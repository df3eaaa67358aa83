use std::fmt::Debug;
use tracing::{
  field::{Field, Visit},
  Event,
  Subscriber
};
use tracing_subscriber::{
  Layer,
  layer::Context,
  registry::LookupSpan
};

use super::get_global_logging_threshold;

/// A layer that only lets through events whose `threshold` field is at most the global logging threshold. Events
/// without a `threshold` field (for example those emitted by other crates) are treated as threshold 0.
pub(crate) struct ThresholdFilterLayer;

impl<S> Layer<S> for ThresholdFilterLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
  fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
    let mut visitor = ThresholdVisitor { threshold: 0 };
    event.record(&mut visitor);
    visitor.threshold <= get_global_logging_threshold()
  }
}

/// Extracts the `threshold` field of an event. Out of range values saturate to the `u8` range.
struct ThresholdVisitor {
  threshold: u8,
}

impl Visit for ThresholdVisitor {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() == "threshold" {
      self.threshold = value.clamp(0, u8::MAX as i64) as u8;
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() == "threshold" {
      self.threshold = value.min(u8::MAX as u64) as u8;
    }
  }

  fn record_debug(&mut self, _field: &Field, _value: &dyn Debug) {
    // Only integer thresholds are meaningful.
  }
}
