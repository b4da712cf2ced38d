//! Parse command: place the spans of a raw model reply

use clap::Parser;

use super::super::output::{color_if, stdout_is_terminal, write_output};
use super::super::parser::ParseFormat;
use super::super::utils::{read_input, read_text};

use biasmark::{BiasAnalysis, OffsetUnit, RiskLevel};

/// Turn a raw model reply into placed annotations
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Raw model reply, JSON optionally in a markdown fence (`-` for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub response: String,

    /// Text the reply was produced for
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read the text from file (`-` for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: ParseFormat,

    /// Emit offsets in UTF-16 code units
    #[arg(long)]
    pub utf16: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Positional text argument
    #[arg(trailing_var_arg = true)]
    pub positional: Vec<String>,
}

pub fn run(args: ParseArgs) -> Result<(), String> {
    let text = read_text(
        args.text.as_deref(),
        args.file.as_deref(),
        &args.positional,
        &args.response,
    )?;
    let raw = read_input(&args.response)?;
    let unit = if args.utf16 { OffsetUnit::Utf16 } else { OffsetUnit::Char };

    let analysis = BiasAnalysis::from_response(&raw, &text, unit)
        .map_err(|e| format!("{}: {}", args.response, e))?;

    let output = match args.format {
        ParseFormat::Json => {
            let mut json = serde_json::to_string_pretty(&analysis)
                .map_err(|e| format!("Failed to serialize analysis: {}", e))?;
            json.push('\n');
            json
        }
        ParseFormat::Human => {
            render_human(&analysis, args.output.is_none() && stdout_is_terminal())
        }
    };

    write_output(&output, args.output.as_deref())
}

fn render_human(analysis: &BiasAnalysis, colored: bool) -> String {
    let summary = &analysis.summary;
    let risk = summary.risk_level.to_string();
    let mut out = format!(
        "Risk: {} ({})\n",
        color_if(colored, risk_color(summary.risk_level), &risk),
        summary.overall_assessment
    );
    if !summary.categories_detected.is_empty() {
        out.push_str(&format!("Categories: {}\n", summary.categories_detected.join(", ")));
    }

    for span in &analysis.bias_spans {
        let place = match (span.start_index, span.end_index) {
            (Some(s), Some(e)) if s >= 0 && e >= 0 => format!("{}-{}", s, e),
            _ => "not found".to_string(),
        };
        out.push_str(&format!(
            "\n  [{}] {:?} ({})\n",
            color_if(colored, "33", &span.category),
            span.text,
            place
        ));
        if !span.explanation.is_empty() {
            out.push_str(&format!("      why: {}\n", span.explanation));
        }
        if !span.suggested_revision.is_empty() {
            out.push_str(&format!("      try: {}\n", span.suggested_revision));
        }
    }
    out
}

fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "31",
        RiskLevel::Medium => "33",
        RiskLevel::Low => "32",
    }
}
