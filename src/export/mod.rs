pub mod pdf;
pub mod text;

pub use pdf::PdfExporter;
pub use text::TextExporter;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExportError;

const MAX_STEM_CHARS: usize = 60;
const DEFAULT_STEM: &str = "pitch-deck";

/// Turns opaque deck text into a downloadable artifact.
pub trait Exporter {
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;

    /// Never returns empty bytes for non-empty content.
    fn export(&self, content: &str) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
}

impl ExportFormat {
    pub fn exporter(self) -> Box<dyn Exporter + Send + Sync> {
        match self {
            ExportFormat::Text => Box::new(TextExporter),
            ExportFormat::Pdf => Box::new(PdfExporter::default()),
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(ExportFormat::Text),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

/// Writes `content` into `dir` as `<sanitized stem>.<ext>` and returns the path written.
pub fn save_artifact(
    dir: &Path,
    stem: &str,
    format: ExportFormat,
    content: &str,
) -> Result<PathBuf, ExportError> {
    let exporter = format.exporter();
    let bytes = exporter.export(content)?;
    let path = dir.join(format!("{}.{}", sanitize_stem(stem), exporter.extension()));
    std::fs::write(&path, &bytes)?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        mime = exporter.mime_type(),
        "[Export] Artifact written"
    );
    Ok(path)
}

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn sanitize_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len().min(MAX_STEM_CHARS));
    for ch in stem.chars() {
        if out.len() >= MAX_STEM_CHARS {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn stems_are_file_system_safe() {
        assert_eq!(
            sanitize_stem("A mobile app for dog walking services!"),
            "a-mobile-app-for-dog-walking-services"
        );
        assert_eq!(sanitize_stem("../../etc/passwd"), "etc-passwd");
        assert_eq!(sanitize_stem("🐶🐶"), DEFAULT_STEM);
        assert!(sanitize_stem(&"word ".repeat(40)).len() <= MAX_STEM_CHARS);
    }

    #[test]
    fn formats_resolve_from_extensions() {
        assert_eq!(ExportFormat::from_extension(".PDF"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::from_extension("txt"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::from_extension("svg"), None);
    }

    #[test]
    fn save_artifact_writes_into_directory() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "cofoundr-export-{}-{}",
            std::process::id(),
            nanos
        ));
        std::fs::create_dir_all(&dir).expect("create temp dir");

        let deck = "**SLIDE 1: PROBLEM**\n• Dog owners are busy";
        let txt = save_artifact(&dir, "Dog walking", ExportFormat::Text, deck).expect("txt");
        let pdf = save_artifact(&dir, "Dog walking", ExportFormat::Pdf, deck).expect("pdf");

        assert_eq!(txt.file_name().and_then(|n| n.to_str()), Some("dog-walking.txt"));
        assert_eq!(
            std::fs::read_to_string(&txt).expect("read txt"),
            format!("{deck}\n")
        );
        assert!(
            std::fs::read(&pdf)
                .expect("read pdf")
                .starts_with(b"%PDF-")
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_content_is_refused() {
        for format in [ExportFormat::Text, ExportFormat::Pdf] {
            assert!(matches!(
                format.exporter().export("  \n "),
                Err(ExportError::EmptyContent)
            ));
        }
    }
}
