// Heuristic PDF → structured resume importer.
// Pipeline: extract (PDF → positioned fragments) → lines (reading-order lines)
// → segmenter (section buffers) → parsers (entries) → assembler (record).
// Only extraction can fail; every later stage degrades to partial output.

pub mod assembler;
pub mod extract;
pub mod handlers;
pub mod lines;
pub mod parsers;
pub mod patterns;
pub mod segmenter;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::models::resume::PartialResumeRecord;

pub use assembler::import_lines;
pub use extract::{ExtractionError, PdfTextExtractor, PositionedFragment, TextExtractor};

/// Imports a PDF resume. The only await point is page text retrieval.
pub async fn import_pdf(
    extractor: &dyn TextExtractor,
    pdf: Bytes,
) -> Result<PartialResumeRecord, ExtractionError> {
    let pages = extractor.extract_pages(pdf).await.map_err(|e| {
        warn!("PDF extraction failed: {e}");
        e
    })?;

    let lines = lines::reconstruct_document(&pages);
    debug!(pages = pages.len(), lines = lines.len(), "Lines reconstructed");
    if lines.is_empty() {
        warn!("PDF has no text layer; returning an empty record");
    }
    trace!(text = %lines.join("\n"), "Reconstructed document text");

    Ok(import_lines(&lines))
}

/// Imports already-extracted plain text, one logical line per `\n`.
pub fn import_text(text: &str) -> PartialResumeRecord {
    let lines: Vec<&str> = text.lines().collect();
    import_lines(&lines)
}
