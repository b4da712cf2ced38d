//! Segment command: reconcile annotations with text and split it

use clap::Parser;
use std::time::Instant;

use super::super::output::{color_if, log_info, stdout_is_terminal, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::{read_input, read_text};

use biasmark::{Engine, EngineConfig, OffsetUnit, Segmentation};

/// Segment text under a JSON array of annotations
#[derive(Parser, Debug)]
pub struct SegmentArgs {
    /// Input text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read input from file (`-` for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// JSON array of annotation records (`-` for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub annotations: String,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Engine configuration (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Offsets are UTF-16 code units (overrides the config file)
    #[arg(long)]
    pub utf16: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Positional text argument
    #[arg(trailing_var_arg = true)]
    pub positional: Vec<String>,
}

pub fn run(args: SegmentArgs) -> Result<(), String> {
    let text = read_text(
        args.text.as_deref(),
        args.file.as_deref(),
        &args.positional,
        &args.annotations,
    )?;
    let annotations_json = read_input(&args.annotations)?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    if args.utf16 {
        config.offset_unit = OffsetUnit::Utf16;
    }

    let engine = Engine::new(config);
    let start = Instant::now();
    let result = engine
        .segment_json(&text, &annotations_json)
        .map_err(|e| format!("{}: {}", args.annotations, e))?;
    let elapsed = start.elapsed();

    let colored = args.output.is_none() && stdout_is_terminal();
    let output = match args.format {
        OutputFormat::Human => render_human(&result, args.quiet, colored),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&result)
                .map_err(|e| format!("Failed to serialize segments: {}", e))?;
            json.push('\n');
            json
        }
        OutputFormat::Jsonl => render_jsonl(&result)?,
        OutputFormat::Inline => render_inline(&result, colored),
    };

    write_output(&output, args.output.as_deref())?;

    if !result.skipped.is_empty() {
        eprintln!(
            "WARNING: {} annotation(s) could not be placed: {:?}",
            result.skipped.len(),
            result.skipped
        );
    }
    log::debug!(
        "segmented {} annotations in {:.2}ms",
        result.spans.len() + result.skipped.len(),
        elapsed.as_secs_f64() * 1000.0
    );
    if args.output.is_some() {
        log_info(&format!("Wrote {} segments", result.segments.len()), args.quiet);
    }

    Ok(())
}

fn render_human(result: &Segmentation, quiet: bool, colored: bool) -> String {
    let mut out = String::new();
    if !quiet {
        let recovered = result.recovered();
        out.push_str(&format!(
            "{} segments ({} annotated, {} recovered, {} skipped):\n\n",
            result.segments.len(),
            result.annotated().count(),
            recovered.len(),
            result.skipped.len()
        ));
    }

    for seg in &result.segments {
        if !seg.is_annotated() {
            out.push_str(&format!("  [{},{})  {:?}\n", seg.start, seg.end, seg.text));
            continue;
        }
        let indices: Vec<String> = seg
            .annotation_indices
            .iter()
            .map(|i| format!("#{}", i))
            .collect();
        out.push_str(&format!(
            "  [{},{})  {:?}  {} {}\n",
            seg.start,
            seg.end,
            seg.text,
            color_if(colored, "33", &seg.categories.join(", ")),
            indices.join(" ")
        ));
        if !quiet {
            for explanation in seg.explanations.iter().filter(|e| !e.is_empty()) {
                out.push_str(&format!("      - {}\n", explanation));
            }
        }
    }
    out
}

fn render_jsonl(result: &Segmentation) -> Result<String, String> {
    let mut out = String::new();
    for seg in &result.segments {
        let line = serde_json::to_string(seg)
            .map_err(|e| format!("Failed to serialize segment: {}", e))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn render_inline(result: &Segmentation, colored: bool) -> String {
    let mut out = String::new();
    for seg in &result.segments {
        if seg.is_annotated() {
            let marked = format!("[{}: {}]", seg.categories.join(", "), seg.text);
            out.push_str(&color_if(colored, "33", &marked));
        } else {
            out.push_str(&seg.text);
        }
    }
    out.push('\n');
    out
}
