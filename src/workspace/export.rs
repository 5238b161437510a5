//! Format export for generated content.
//!
//! The markdown-to-HTML/plain-text conversion is deliberately the simple
//! line-based regex transform the product has always shipped: newlines, then
//! `**bold**`, then `*italic*`, non-recursive. Nested or overlapping markers
//! are undefined and not guaranteed to round-trip.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Html,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Text => "txt",
        }
    }
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold regex"))
}

fn italic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*(.*?)\*").expect("italic regex"))
}

/// Render the content in the requested format. Markdown passes through.
pub fn render(format: ExportFormat, content: &str) -> String {
    match format {
        ExportFormat::Markdown => content.to_string(),
        ExportFormat::Html => render_html(content),
        ExportFormat::Text => render_text(content),
    }
}

fn render_html(content: &str) -> String {
    let html = content.replace('\n', "<br>");
    let html = bold_re().replace_all(&html, "<strong>$1</strong>");
    let html = italic_re().replace_all(&html, "<em>$1</em>");
    format!(
        "<!DOCTYPE html><html><head><title>Generated Content</title></head><body>{html}</body></html>"
    )
}

fn render_text(content: &str) -> String {
    let text = bold_re().replace_all(content, "$1");
    italic_re().replace_all(&text, "$1").into_owned()
}

/// Derived download filename for the format.
pub fn export_filename(format: ExportFormat) -> String {
    format!("generated-content.{}", format.extension())
}

/// Write the rendered content into the user's download directory and return
/// the path.
pub fn write_download(format: ExportFormat, content: &str) -> Result<PathBuf, AppError> {
    let dir = dirs::download_dir()
        .ok_or_else(|| AppError::Internal("no download directory available".into()))?;
    let path = dir.join(export_filename(format));
    std::fs::write(&path, render(format, content))?;
    tracing::info!(path = %path.display(), "Exported generated content");
    Ok(path)
}
