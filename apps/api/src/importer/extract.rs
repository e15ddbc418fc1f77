//! Text extraction adapter — PDF bytes in, positioned fragments per page out.
//!
//! `TextExtractor` is the seam the importer depends on. `PdfTextExtractor` is the
//! default backend, built on pdf-extract's `OutputDev` callbacks: glyphs are grouped
//! into word fragments positioned in PDF user space (bottom-left origin).
//!
//! Parsing is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use async_trait::async_trait;
use bytes::Bytes;
use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The PDF header must appear within the first KiB of the file.
const HEADER_SEARCH_WINDOW: usize = 1024;
/// Horizontal gap, as a fraction of the font size, that starts a new word.
const WORD_GAP_RATIO: f64 = 0.1;

/// One atomic run of text at a page coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

pub type PageFragments = Vec<PositionedFragment>;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Input is not a PDF document")]
    NotPdf,

    #[error("PDF is encrypted and no password was supplied")]
    Encrypted,

    #[error("PDF could not be read: {0}")]
    Corrupt(String),

    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

/// Source of positioned text. Carried in `AppState` as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the fragments of every page, in document order.
    async fn extract_pages(&self, pdf: Bytes) -> Result<Vec<PageFragments>, ExtractionError>;
}

/// pdf-extract backed extractor.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_pages(&self, pdf: Bytes) -> Result<Vec<PageFragments>, ExtractionError> {
        if !has_pdf_header(&pdf) {
            return Err(ExtractionError::NotPdf);
        }

        let pages = tokio::task::spawn_blocking(move || extract_pages_sync(&pdf))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    warn!("PDF reader panicked during extraction");
                    ExtractionError::Corrupt("reader aborted on malformed content".to_string())
                } else {
                    ExtractionError::Worker(e.to_string())
                }
            })??;

        debug!(
            pages = pages.len(),
            fragments = pages.iter().map(Vec::len).sum::<usize>(),
            "PDF text extracted"
        );
        Ok(pages)
    }
}

/// Blocking extraction. Call through `PdfTextExtractor` from async code.
pub fn extract_pages_sync(pdf: &[u8]) -> Result<Vec<PageFragments>, ExtractionError> {
    if !has_pdf_header(pdf) {
        return Err(ExtractionError::NotPdf);
    }

    let doc = pdf_extract::Document::load_mem(pdf)
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))?;

    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(ExtractionError::Encrypted);
    }

    let mut collector = FragmentCollector::default();
    pdf_extract::output_doc(&doc, &mut collector)
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))?;

    Ok(collector.into_pages())
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

// ────────────────────────────────────────────────────────────────────────────
// Glyph → fragment grouping
// ────────────────────────────────────────────────────────────────────────────

/// Collects glyphs into word fragments, one `Vec` per page.
///
/// A fragment closes on a whitespace glyph, at line or page end, when a new text
/// run starts past the previous glyph's advance, or when the baseline moves by
/// more than half the font size.
#[derive(Default)]
struct FragmentCollector {
    pages: Vec<PageFragments>,
    page: PageFragments,
    open: Option<PositionedFragment>,
    run_start: bool,
    last_end: f64,
}

impl FragmentCollector {
    fn push_glyph(&mut self, x: f64, y: f64, size: f64, advance: f64, glyph: &str) {
        let next_end = x + advance;

        if glyph.chars().all(char::is_whitespace) {
            self.close_fragment();
            self.last_end = next_end;
            return;
        }

        let breaks = match &self.open {
            Some(open) => {
                (open.y - y).abs() > size * 0.5
                    || (self.run_start && x > self.last_end + size * WORD_GAP_RATIO)
            }
            None => false,
        };
        if breaks {
            self.close_fragment();
        }

        self.open
            .get_or_insert_with(|| PositionedFragment {
                text: String::new(),
                x,
                y,
                height: size,
            })
            .text
            .push_str(glyph);

        self.run_start = false;
        self.last_end = next_end;
    }

    fn close_fragment(&mut self) {
        if let Some(fragment) = self.open.take() {
            if !fragment.text.trim().is_empty() {
                self.page.push(fragment);
            }
        }
    }

    fn finish_page(&mut self) {
        self.close_fragment();
        self.pages.push(std::mem::take(&mut self.page));
    }

    fn into_pages(mut self) -> Vec<PageFragments> {
        if self.open.is_some() || !self.page.is_empty() {
            self.finish_page();
        }
        self.pages
    }
}

impl OutputDev for FragmentCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.page = Vec::new();
        self.open = None;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.finish_page();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        // Side of the square with the same area as the transformed (size, size) vector.
        let sx = font_size * (trm.m11 + trm.m21);
        let sy = font_size * (trm.m12 + trm.m22);
        let size = (sx * sy).abs().sqrt();
        self.push_glyph(trm.m31, trm.m32, size, width * size, char);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        self.run_start = true;
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        self.close_fragment();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::lines::reconstruct_document;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// One-page Helvetica document with each `(text, x, y)` drawn by its own `Tj`.
    fn build_pdf(runs: &[(&str, i64, i64)], encrypted: bool) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = Vec::new();
        for (text, x, y) in runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
            operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
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
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if encrypted {
            let encrypt_id = doc.add_object(dictionary! {
                "Filter" => "Standard",
                "V" => 1,
                "R" => 2,
                "O" => Object::string_literal(vec![0x4f_u8; 32]),
                "U" => Object::string_literal(vec![0x55_u8; 32]),
                "P" => -44,
            });
            doc.trailer.set("Encrypt", encrypt_id);
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    const RESUME_RUNS: &[(&str, i64, i64)] = &[
        ("Jane Smith", 72, 760),
        ("jane@x.com", 72, 740),
        ("EXPERIENCE", 72, 700),
        ("Globex Inc, Remote", 72, 680),
        ("2019 - Present", 400, 678),
    ];

    #[tokio::test]
    async fn test_real_pdf_fragments_follow_text_positions() {
        let pdf = Bytes::from(build_pdf(RESUME_RUNS, false));
        let pages = PdfTextExtractor.extract_pages(pdf).await.unwrap();
        assert_eq!(pages.len(), 1);

        let first = &pages[0][0];
        assert_eq!(first.text, "Jane");
        assert!((first.x - 72.0).abs() < 0.5, "x = {}", first.x);
        assert!((first.y - 760.0).abs() < 0.5, "y = {}", first.y);

        let dates = pages[0].iter().find(|f| f.text == "2019").unwrap();
        assert!((dates.x - 400.0).abs() < 0.5, "x = {}", dates.x);
        assert!((dates.y - 678.0).abs() < 0.5, "y = {}", dates.y);

        assert_eq!(
            reconstruct_document(&pages),
            vec![
                "Jane Smith",
                "jane@x.com",
                "EXPERIENCE",
                "Globex Inc, Remote 2019 - Present",
            ]
        );
    }

    #[test]
    fn test_encrypt_trailer_is_rejected() {
        let err = extract_pages_sync(&build_pdf(RESUME_RUNS, true)).unwrap_err();
        assert!(matches!(err, ExtractionError::Encrypted), "got {err:?}");
    }

    fn glyphs(collector: &mut FragmentCollector, text: &str, x: f64, y: f64) {
        collector.run_start = true;
        for (i, ch) in text.chars().enumerate() {
            let mut buf = [0u8; 4];
            collector.push_glyph(x + i as f64 * 6.0, y, 10.0, 6.0, ch.encode_utf8(&mut buf));
        }
    }

    #[test]
    fn test_pdf_header_detection() {
        assert!(has_pdf_header(b"%PDF-1.7\n..."));
        assert!(has_pdf_header(b"\n\n  %PDF-1.4"));
        assert!(!has_pdf_header(b"PK\x03\x04 zip archive"));
        assert!(!has_pdf_header(b""));
    }

    #[test]
    fn test_non_pdf_bytes_rejected_before_parsing() {
        let err = extract_pages_sync(b"just some text").unwrap_err();
        assert!(matches!(err, ExtractionError::NotPdf));
    }

    #[test]
    fn test_truncated_pdf_is_corrupt() {
        let err = extract_pages_sync(b"%PDF-1.4\n1 0 obj\n<<").unwrap_err();
        assert!(matches!(err, ExtractionError::Corrupt(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_extractor_rejects_non_pdf() {
        let err = PdfTextExtractor
            .extract_pages(Bytes::from_static(b"<html></html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NotPdf));
    }

    #[test]
    fn test_whitespace_glyph_splits_words() {
        let mut c = FragmentCollector::default();
        glyphs(&mut c, "Jane Smith", 72.0, 700.0);
        c.finish_page();

        let page = &c.pages[0];
        let texts: Vec<_> = page.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Jane", "Smith"]);
        assert_eq!(page[0].x, 72.0);
        assert_eq!(page[1].x, 72.0 + 5.0 * 6.0);
        assert_eq!(page[0].y, 700.0);
        assert_eq!(page[0].height, 10.0);
    }

    #[test]
    fn test_adjacent_runs_join_into_one_fragment() {
        // Kerned word split across two text runs with no gap.
        let mut c = FragmentCollector::default();
        glyphs(&mut c, "Res", 100.0, 500.0);
        glyphs(&mut c, "ume", 118.0, 500.0);
        c.finish_page();
        assert_eq!(c.pages[0].len(), 1);
        assert_eq!(c.pages[0][0].text, "Resume");
    }

    #[test]
    fn test_distant_run_starts_new_fragment() {
        let mut c = FragmentCollector::default();
        glyphs(&mut c, "Acme", 72.0, 500.0);
        glyphs(&mut c, "2020", 400.0, 500.0);
        c.finish_page();
        let texts: Vec<_> = c.pages[0].iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Acme", "2020"]);
    }

    #[test]
    fn test_baseline_change_starts_new_fragment() {
        let mut c = FragmentCollector::default();
        c.run_start = true;
        c.push_glyph(72.0, 500.0, 10.0, 6.0, "A");
        c.push_glyph(78.0, 480.0, 10.0, 6.0, "B");
        c.finish_page();
        assert_eq!(c.pages[0].len(), 2);
    }

    #[test]
    fn test_pages_kept_separate_and_in_order() {
        let mut c = FragmentCollector::default();
        glyphs(&mut c, "one", 72.0, 700.0);
        c.finish_page();
        glyphs(&mut c, "two", 72.0, 700.0);
        let pages = c.into_pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0][0].text, "one");
        assert_eq!(pages[1][0].text, "two");
    }
}
