//! Page collection across source documents
//!
//! Parses every input buffer and flattens their pages into one ordered
//! sequence: documents in input order, pages in stored order within each.

use crate::layout::Rect;
use crate::render::page_media_box;
use crate::types::*;
use lopdf::{Document, ObjectId};

/// One page of a source document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePage {
    /// Index of the owning document in the input list
    pub document: usize,
    /// 1-based page number within its document
    pub page_number: u32,
    /// Object ID of the page dictionary in its document
    pub object_id: ObjectId,
    /// MediaBox captured at collection time
    pub media_box: Rect,
}

impl SourcePage {
    /// Intrinsic width in points
    pub fn width(&self) -> f32 {
        self.media_box.width
    }

    /// Intrinsic height in points
    pub fn height(&self) -> f32 {
        self.media_box.height
    }
}

/// Ordered pages of all source documents, together with the documents
/// they belong to
#[derive(Debug, Clone)]
pub struct PageSequence {
    documents: Vec<Document>,
    pages: Vec<SourcePage>,
}

impl PageSequence {
    /// Total number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the sequence holds no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages in order
    pub fn pages(&self) -> &[SourcePage] {
        &self.pages
    }

    /// Page at a flat index
    pub fn get(&self, index: usize) -> Option<&SourcePage> {
        self.pages.get(index)
    }

    /// Number of source documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Source document by input index
    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    /// Page count of each source document, in input order
    pub fn pages_per_document(&self) -> Vec<usize> {
        let mut counts = vec![0; self.documents.len()];
        for page in &self.pages {
            counts[page.document] += 1;
        }
        counts
    }

    /// (width, height) of each page, in order
    pub fn dimensions(&self) -> Vec<(f32, f32)> {
        self.pages
            .iter()
            .map(|page| (page.width(), page.height()))
            .collect()
    }
}

/// Parse every buffer and collect all pages in order.
///
/// # Errors
/// * `EmptyInput` if `buffers` is empty or the documents hold no pages
/// * `Parse` with the position of the first buffer that is not a readable PDF
pub fn collect<B: AsRef<[u8]>>(buffers: &[B]) -> Result<PageSequence> {
    if buffers.is_empty() {
        return Err(ImposeError::EmptyInput);
    }

    let documents = buffers
        .iter()
        .enumerate()
        .map(|(index, bytes)| {
            Document::load_mem(bytes.as_ref()).map_err(|source| ImposeError::Parse { index, source })
        })
        .collect::<Result<Vec<_>>>()?;

    collect_documents(documents)
}

/// Collect all pages of already-parsed documents, in order.
///
/// # Errors
/// * `EmptyInput` if there are no documents or they hold no pages
/// * `Parse` with the document's position if a page's attributes cannot be read
pub fn collect_documents(documents: Vec<Document>) -> Result<PageSequence> {
    let mut pages = Vec::new();

    for (index, doc) in documents.iter().enumerate() {
        // get_pages is keyed by 1-based page number, so iteration is in page order
        let doc_pages = doc.get_pages();
        log::debug!("Document #{} has {} pages", index, doc_pages.len());

        for (page_number, object_id) in doc_pages {
            pages.push(SourcePage {
                document: index,
                page_number,
                object_id,
                media_box: page_media_box(doc, object_id).map_err(|err| match err {
                    ImposeError::Pdf(source) => ImposeError::Parse { index, source },
                    other => other,
                })?,
            });
        }
    }

    if pages.is_empty() {
        return Err(ImposeError::EmptyInput);
    }

    log::info!(
        "Collected {} pages from {} documents",
        pages.len(),
        documents.len()
    );

    Ok(PageSequence { documents, pages })
}
