//! Output formatting and sinks

pub mod format;
pub mod writer;

pub use writer::OutputWriter;
