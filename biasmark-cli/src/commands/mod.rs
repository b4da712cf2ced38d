//! Subcommand implementations.

pub mod parse;
pub mod segment;

pub use parse::ParseArgs;
pub use segment::SegmentArgs;
