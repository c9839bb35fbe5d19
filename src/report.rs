//! Report rendering for the command-line front end.

use crate::config::OutputConfig;
use crate::scanner::ScanReport;

/// Characters considered before trimming a preview.
const PREVIEW_WINDOW: usize = 300;

/// Hint printed when nothing was found.
pub const NO_FLAGS_HINT: &str = "[-] No flags found. Try --verbose, --bits 2, or different --channels.";

/// Renders the console report.
///
/// Encodings with flags list each one; with `verbose`, encodings without
/// flags show a short preview of their candidate text.
pub fn render_text(report: &ScanReport, output: &OutputConfig) -> String {
    let mut out = String::new();

    for result in &report.results {
        let name = result.encoding.name().to_uppercase();
        if !result.flags.is_empty() {
            out.push_str(&format!("\n[+] FLAGS FOUND  [{}]\n", name));
            for flag in &result.flags {
                out.push_str(&format!("    >>> {}\n", flag));
            }
        } else if output.verbose {
            let preview = preview(&result.candidate, output.preview_chars);
            if !preview.is_empty() {
                out.push_str(&format!("\n[~] {} - no flags, preview:\n", name));
                out.push_str(&format!("    {}\n", preview));
            }
        }
    }

    if !report.flags_found() {
        out.push('\n');
        out.push_str(NO_FLAGS_HINT);
        out.push('\n');
    }
    out
}

/// Renders the report as pretty-printed JSON.
pub fn render_json(report: &ScanReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Leading slice of a candidate, trimmed, at most `max_chars` long.
pub fn preview(candidate: &str, max_chars: usize) -> String {
    let window: String = candidate.chars().take(PREVIEW_WINDOW.max(max_chars)).collect();
    window.trim().chars().take(max_chars).collect()
}
