use super::Exporter;
use crate::error::ExportError;

/// Plain-text download: the deck as-is, LF line endings, one trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain;charset=utf-8"
    }

    fn export(&self, content: &str) -> Result<Vec<u8>, ExportError> {
        if content.trim().is_empty() {
            return Err(ExportError::EmptyContent);
        }

        let mut text = content.replace("\r\n", "\n");
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_content_and_normalizes_line_endings() {
        let out = TextExporter
            .export("SLIDE 1\r\n• one\r\n")
            .expect("export");
        assert_eq!(out, b"SLIDE 1\n\xE2\x80\xA2 one\n");
    }
}
