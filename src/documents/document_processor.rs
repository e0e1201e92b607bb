// Document processor: best-effort plain-text extraction for uploaded files

use super::{DocumentKind, ExtractionError, ExtractionOutcome};
use docx_rust::document::BodyContent;
use docx_rust::DocxFile;
use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct DocumentProcessor;

impl DocumentProcessor {
    /// Extract text from the file at `path` on the blocking pool.
    pub async fn process_document(path: PathBuf) -> ExtractionOutcome {
        let shown = path.display().to_string();
        match tokio::task::spawn_blocking(move || Self::extract(&path)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(path = %shown, error = %e, "Extraction task panicked");
                ExtractionOutcome::Failed(ExtractionError::Task(e.to_string()))
            }
        }
    }

    /// Extract text from the file at `path`. Never fails: errors are folded
    /// into the outcome and logged.
    pub fn extract(path: &Path) -> ExtractionOutcome {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let result = match DocumentKind::from_extension(&extension) {
            Some(DocumentKind::Text) => Self::extract_txt(path),
            Some(DocumentKind::Pdf) => Self::extract_pdf(path),
            Some(DocumentKind::Docx) => Self::extract_docx(path),
            // Legacy .doc needs converting to .docx first
            Some(DocumentKind::Doc) | None => {
                debug!(path = %path.display(), extension = %extension, "Unsupported document type");
                return ExtractionOutcome::Unsupported { extension };
            }
        };

        match result {
            Ok(text) if text.trim().is_empty() => {
                debug!(path = %path.display(), "Document contains no text");
                ExtractionOutcome::Empty
            }
            Ok(text) => {
                debug!(path = %path.display(), chars = text.len(), "Extracted document text");
                ExtractionOutcome::Text(text)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Text extraction failed");
                ExtractionOutcome::Failed(e)
            }
        }
    }

    /// UTF-8 text; invalid byte sequences are dropped.
    fn extract_txt(path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path)?;
        let mut text = String::with_capacity(bytes.len());
        for chunk in bytes.utf8_chunks() {
            text.push_str(chunk.valid());
        }
        Ok(text)
    }

    /// Text of every page, in page order.
    fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
        let doc = Document::load(path).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        let mut text = String::new();
        for (page_num, _page_id) in doc.get_pages() {
            let content = doc
                .extract_text(&[page_num])
                .map_err(|e| ExtractionError::Pdf(format!("page {}: {}", page_num, e)))?;
            text.push_str(&content);
        }
        Ok(text)
    }

    /// Non-blank body paragraphs, one per line.
    fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
        let file = DocxFile::from_file(path).map_err(|e| ExtractionError::Docx(format!("{:?}", e)))?;
        let docx = file.parse().map_err(|e| ExtractionError::Docx(format!("{:?}", e)))?;

        let paragraphs: Vec<String> = docx
            .document
            .body
            .content
            .iter()
            .filter_map(|content| match content {
                BodyContent::Paragraph(paragraph) => Some(paragraph.text()),
                _ => None,
            })
            .filter(|text| !text.trim().is_empty())
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn write_pdf(path: &Path, line: &str) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_txt_extraction() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", b"Photosynthesis converts light into energy.");
        assert_eq!(
            DocumentProcessor::extract(&path).text(),
            Some("Photosynthesis converts light into energy.")
        );
    }

    #[test]
    fn test_txt_drops_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.TXT", b"Cell\xff\xfe wall");
        assert_eq!(DocumentProcessor::extract(&path).text(), Some("Cell wall"));
    }

    #[test]
    fn test_blank_txt_is_empty() {
        let dir = TempDir::new().unwrap();
        let empty = write(&dir, "empty.txt", b"");
        let blank = write(&dir, "blank.txt", b"  \n\t \n");
        assert!(matches!(DocumentProcessor::extract(&empty), ExtractionOutcome::Empty));
        assert!(matches!(DocumentProcessor::extract(&blank), ExtractionOutcome::Empty));
    }

    #[test]
    fn test_empty_files_never_yield_text() {
        let dir = TempDir::new().unwrap();
        for name in ["a.txt", "a.pdf", "a.doc", "a.docx"] {
            let path = write(&dir, name, b"");
            assert_eq!(DocumentProcessor::extract(&path).text(), None, "{}", name);
        }
    }

    #[test]
    fn test_doc_is_always_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "lecture.doc", b"Plenty of readable text in here");
        assert!(matches!(
            DocumentProcessor::extract(&path),
            ExtractionOutcome::Unsupported { extension } if extension == "doc"
        ));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "readme.md", b"# Title");
        assert!(matches!(
            DocumentProcessor::extract(&path),
            ExtractionOutcome::Unsupported { .. }
        ));
    }

    #[test]
    fn test_corrupt_files_fail() {
        let dir = TempDir::new().unwrap();
        let pdf = write(&dir, "broken.pdf", b"not a pdf at all");
        let docx = write(&dir, "broken.docx", b"not a zip archive");
        assert!(matches!(
            DocumentProcessor::extract(&pdf),
            ExtractionOutcome::Failed(ExtractionError::Pdf(_))
        ));
        assert!(matches!(
            DocumentProcessor::extract(&docx),
            ExtractionOutcome::Failed(ExtractionError::Docx(_))
        ));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");
        assert!(matches!(
            DocumentProcessor::extract(&path),
            ExtractionOutcome::Failed(ExtractionError::Io(_))
        ));
    }

    #[test]
    fn test_pdf_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("biology.pdf");
        write_pdf(&path, "Photosynthesis");

        let outcome = DocumentProcessor::extract(&path);
        let text = outcome.text().expect("pdf should contain text");
        assert!(text.contains("Photosynthesis"));
    }

    #[test]
    fn test_docx_skips_blank_paragraphs() {
        use docx_rust::document::Paragraph;
        use docx_rust::Docx;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cells.docx");

        let mut docx = Docx::default();
        docx.document.push(Paragraph::default().push_text("Cells divide."));
        docx.document.push(Paragraph::default().push_text("   "));
        docx.document.push(Paragraph::default());
        docx.document.push(Paragraph::default().push_text("Mitosis has phases."));
        docx.write_file(&path).unwrap();

        assert_eq!(
            DocumentProcessor::extract(&path).text(),
            Some("Cells divide.\nMitosis has phases.")
        );
    }

    #[tokio::test]
    async fn test_process_document_runs_off_thread() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", b"Osmosis moves water.");
        let outcome = DocumentProcessor::process_document(path).await;
        assert_eq!(outcome.text(), Some("Osmosis moves water."));
    }
}
