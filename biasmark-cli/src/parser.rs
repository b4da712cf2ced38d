//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ParseArgs, SegmentArgs};

/// Bias annotation segmentation CLI
#[derive(Parser)]
#[command(name = "biasmark")]
#[command(
    author,
    version,
    about = "Reconcile bias annotations with text and segment it",
    long_about = r#"
biasmark - place model-flagged bias spans on the text they came from

Annotation offsets from a model are often wrong. biasmark validates them,
recovers misplaced spans by searching for their text, and splits the input
into segments tagged with the annotations that cover them.

OFFSETS:
  Codepoints by default. Pass --utf16 when offsets were counted in UTF-16
  code units (JavaScript string indices).

EXAMPLES:
  biasmark segment --annotations anns.json "The old guy won't get it."
  biasmark segment -f post.txt -a anns.json --format inline
  biasmark parse --response reply.txt -f post.txt --format json

LOGGING:
  Diagnostics go to stderr. Use -v for debug output or set RUST_LOG.
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Segment text under a JSON array of annotations
    #[command(visible_alias = "s")]
    Segment(SegmentArgs),

    /// Turn a raw model reply into placed annotations
    #[command(visible_alias = "p")]
    Parse(ParseArgs),
}

/// Output format for `segment`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing of segments (default)
    #[default]
    Human,
    /// Full segmentation as JSON
    Json,
    /// JSON lines (one segment per line)
    Jsonl,
    /// Inline markers in text
    Inline,
}

/// Output format for `parse`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ParseFormat {
    /// JSON analysis (default)
    #[default]
    Json,
    /// Human-readable report
    Human,
}
