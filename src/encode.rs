//! Frame sinks: where finished frames go once a worker has filled them.

/// PNG image-sequence output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
