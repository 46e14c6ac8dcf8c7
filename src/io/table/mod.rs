//! Header-less comma-separated numeric tables.

pub mod writer;

pub use writer::format_scientific;
