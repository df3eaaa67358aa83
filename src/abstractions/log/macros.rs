//! Macros for generating log messages. Every public macro defers to `log_event!`.

#[doc(hidden)]
#[macro_export]
macro_rules! log_event {
  (@critical $threshold:expr, $($arg:tt)+) => {
    {
      $crate::log::init_logger();
      $crate::log::__tracing::event!(
        $crate::log::__tracing::Level::ERROR,
        critical  = true,
        threshold = $threshold,
        message   = format_args!($($arg)+)
      );
    }
  };
  ($level:expr, $threshold:expr, $($arg:tt)+) => {
    {
      $crate::log::init_logger();
      $crate::log::__tracing::event!(
        $level,
        threshold = $threshold,
        message   = format_args!($($arg)+)
      );
    }
  };
}

#[macro_export]
macro_rules! critical {
  ($message:literal) => { $crate::log_event!(@critical 0, $message) };
  ($threshold:expr, $($arg:tt)+) => { $crate::log_event!(@critical $threshold, $($arg)+) };
}

#[macro_export]
macro_rules! error {
  ($message:literal) => { $crate::log_event!($crate::log::__tracing::Level::ERROR, 0, $message) };
  ($threshold:expr, $($arg:tt)+) => {
    $crate::log_event!($crate::log::__tracing::Level::ERROR, $threshold, $($arg)+)
  };
}

#[macro_export]
macro_rules! warning {
  ($message:literal) => { $crate::log_event!($crate::log::__tracing::Level::WARN, 0, $message) };
  ($threshold:expr, $($arg:tt)+) => {
    $crate::log_event!($crate::log::__tracing::Level::WARN, $threshold, $($arg)+)
  };
}

#[macro_export]
macro_rules! info {
  ($message:literal) => { $crate::log_event!($crate::log::__tracing::Level::INFO, 0, $message) };
  ($threshold:expr, $($arg:tt)+) => {
    $crate::log_event!($crate::log::__tracing::Level::INFO, $threshold, $($arg)+)
  };
}

#[macro_export]
macro_rules! debug {
  ($message:literal) => { $crate::log_event!($crate::log::__tracing::Level::DEBUG, 0, $message) };
  ($threshold:expr, $($arg:tt)+) => {
    $crate::log_event!($crate::log::__tracing::Level::DEBUG, $threshold, $($arg)+)
  };
}

#[macro_export]
macro_rules! trace {
  ($message:literal) => { $crate::log_event!($crate::log::__tracing::Level::TRACE, 0, $message) };
  ($threshold:expr, $($arg:tt)+) => {
    $crate::log_event!($crate::log::__tracing::Level::TRACE, $threshold, $($arg)+)
  };
}


// The following makes the macros importable directly from the `log` module.
pub use {critical, error, warning, info, debug, trace};
