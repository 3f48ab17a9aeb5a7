//! N-up imposition - arranging several source pages on each destination page
//!
//! This module orchestrates the imposition process:
//! 1. Group the collected pages (one group per destination page)
//! 2. Plan every placement (pure geometry)
//! 3. Create the destination pages and draw the embedded source pages

mod io;

pub use io::{load_multiple_pdf_bytes, load_pages, load_pdf_bytes, save_pdf, to_bytes};

use crate::collect::{PageSequence, collect};
use crate::layout::{ImpositionPlan, plan_imposition};
use crate::render::render_sheet;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Impose the collected pages onto N-up destination pages.
///
/// # Errors
/// * `EmptyInput` if `pages` is empty
/// * `Draw` if a source page cannot be embedded or placed; no partial
///   document is returned
pub fn impose(pages: &PageSequence, mode: LayoutMode) -> Result<Document> {
    let plan = plan_imposition(&pages.dimensions(), mode)?;
    log::info!(
        "Imposing {} pages as {} onto {} destination pages",
        pages.len(),
        mode,
        plan.page_count()
    );
    render_plan(pages, &plan)
}

/// Render a precomputed plan into a new document
pub fn render_plan(pages: &PageSequence, plan: &ImpositionPlan) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut caches: Vec<HashMap<ObjectId, ObjectId>> =
        vec![HashMap::new(); pages.document_count()];
    let mut page_refs = Vec::with_capacity(plan.page_count());

    for (index, sheet) in plan.sheets.iter().enumerate() {
        log::debug!(
            "Destination page {}: source pages {:?}",
            index,
            sheet.group
        );
        let page_id = render_sheet(
            &mut output,
            pages,
            sheet,
            (plan.page_width, plan.page_height),
            pages_tree_id,
            &mut caches,
        )?;
        page_refs.push(Object::Reference(page_id));
    }

    finish_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

/// Impose on a blocking worker thread
pub async fn impose_pages(pages: PageSequence, mode: LayoutMode) -> Result<Document> {
    tokio::task::spawn_blocking(move || impose(&pages, mode)).await?
}

/// Collect pages from raw PDF buffers and impose them, on a blocking worker thread
pub async fn combine(buffers: Vec<Vec<u8>>, mode: LayoutMode) -> Result<Document> {
    tokio::task::spawn_blocking(move || {
        let pages = collect(&buffers)?;
        impose(&pages, mode)
    })
    .await?
}

/// Write the page tree and catalog
fn finish_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
