//! Shared output formatting for lint results.

use anyhow::Result;
use mdlint_core::LintResult;
use std::fmt::Write as _;
use std::io::IsTerminal;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result, std::io::stdout().is_terminal()),
        OutputFormat::Json => render_json(result)?,
        OutputFormat::Compact => render_compact(result),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(result: &LintResult, color: bool) -> String {
    let paint = |code: &str, text: &str| {
        if color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    };

    let mut out = String::new();
    for (path, violation) in result.iter() {
        let _ = writeln!(out, "{}:{violation}", path.display());
    }
    for (path, warning) in result.warnings() {
        let _ = writeln!(
            out,
            "{}: {}:{}: {}",
            paint("33", "warning"),
            path.display(),
            warning.line,
            warning.message
        );
    }
    for error in &result.errors {
        let _ = writeln!(
            out,
            "{}: {}: {}",
            paint("31", "error"),
            error.path.display(),
            error.message
        );
    }
    if result.deadline_exceeded {
        let skipped_rules: usize = result.files.iter().map(|f| f.rules_skipped).sum();
        let _ = writeln!(
            out,
            "{}: deadline exceeded, {} file(s) and {} rule run(s) skipped",
            paint("33", "warning"),
            result.files_skipped,
            skipped_rules
        );
    }

    let count = result.violation_count();
    let summary = format!(
        "Found {count} violation(s) in {} file(s)",
        result.files_checked()
    );
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", paint(if count > 0 { "31" } else { "32" }, &summary));
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for (path, v) in result.iter() {
        let _ = writeln!(
            out,
            "{}:{}:{}: {}/{} {}",
            path.display(),
            v.line,
            v.column.unwrap_or(1),
            v.code,
            v.rule,
            v.message,
        );
    }
    out
}
