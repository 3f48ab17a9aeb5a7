//! Document I/O operations for imposition

use crate::collect::{PageSequence, collect};
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Read a single PDF file
pub async fn load_pdf_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}

/// Read multiple PDF files, keeping their order
pub async fn load_multiple_pdf_bytes(paths: &[impl AsRef<Path>]) -> Result<Vec<Vec<u8>>> {
    let mut buffers = Vec::with_capacity(paths.len());
    for path in paths {
        buffers.push(load_pdf_bytes(path).await?);
    }
    Ok(buffers)
}

/// Read PDF files and collect their pages.
///
/// A `Parse` error carries the position of the offending path.
pub async fn load_pages(paths: &[impl AsRef<Path>]) -> Result<PageSequence> {
    let buffers = load_multiple_pdf_bytes(paths).await?;
    tokio::task::spawn_blocking(move || collect(&buffers)).await?
}

/// Serialize a document, optionally compressing its streams first
pub fn to_bytes(mut doc: Document, compress: bool) -> Result<Vec<u8>> {
    if compress {
        doc.compress();
    }
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Save the imposed document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>, compress: bool) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || to_bytes(doc, compress)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
