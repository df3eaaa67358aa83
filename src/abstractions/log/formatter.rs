use std::fmt::Debug;

use tracing::field::{Field, Visit};
use tracing_subscriber::{
  field::RecordFields,
  fmt::{
    format::Writer,
    FormatFields
  }
};

/// Field names that steer filtering and are never printed.
const HIDDEN_FIELDS: [&str; 2] = ["threshold", "critical"];

/// Writes the message first, then any remaining structured fields as `name=value`. A `critical = true` field
/// becomes a `[CRITICAL]` prefix.
pub(crate) struct EnumerationFieldFormatter;

impl<'writer> FormatFields<'writer> for EnumerationFieldFormatter {
  fn format_fields<R: RecordFields>(&self, mut writer: Writer<'writer>, fields: R) -> std::fmt::Result {
    let mut visitor = CollectingVisitor::default();
    fields.record(&mut visitor);

    if visitor.critical {
      write!(writer, "[CRITICAL] ")?;
    }
    if let Some(message) = &visitor.message {
      write!(writer, "{}", message)?;
    }
    for (name, value) in &visitor.extra {
      write!(writer, " {}={}", name, value)?;
    }
    Ok(())
  }
}

#[derive(Default)]
struct CollectingVisitor {
  critical: bool,
  message : Option<String>,
  extra   : Vec<(&'static str, String)>,
}

impl CollectingVisitor {
  fn push(&mut self, field: &Field, value: String) {
    if !HIDDEN_FIELDS.contains(&field.name()) {
      self.extra.push((field.name(), value));
    }
  }
}

impl Visit for CollectingVisitor {
  fn record_i64(&mut self, field: &Field, value: i64) {
    self.push(field, value.to_string());
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    self.push(field, value.to_string());
  }

  fn record_bool(&mut self, field: &Field, value: bool) {
    if field.name() == "critical" {
      self.critical = value;
    } else {
      self.push(field, value.to_string());
    }
  }

  fn record_str(&mut self, field: &Field, value: &str) {
    if field.name() == "message" {
      self.message = Some(value.to_string());
    } else {
      self.push(field, value.to_string());
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
    if field.name() == "message" {
      // `format_args!` messages arrive here; their `Debug` form is the formatted text.
      self.message = Some(format!("{:?}", value));
    } else {
      self.push(field, format!("{:?}", value));
    }
  }
}
