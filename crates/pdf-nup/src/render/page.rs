//! Destination page rendering for imposition
//!
//! Geometry comes in as a `SheetPlan`; this module embeds the source
//! pages it references and writes the page object.

use crate::collect::PageSequence;
use crate::layout::{PagePlacement, Rect, SheetPlan};
use crate::types::{ImposeError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::{EmbeddedPage, embed_page};

// =============================================================================
// Draw Commands
// =============================================================================

/// A single "draw this XObject here" instruction for a content stream
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Resource name of the XObject on the destination page
    pub name: String,
    /// Uniform scale factor
    pub scale: f32,
    /// Horizontal translation in points
    pub translate_x: f32,
    /// Vertical translation in points
    pub translate_y: f32,
}

impl DrawCommand {
    /// Build the command that maps `bbox` (the XObject's own space) onto
    /// `target` using a uniform `scale`.
    pub fn place(name: impl Into<String>, bbox: &Rect, target: &Rect, scale: f32) -> Self {
        Self {
            name: name.into(),
            scale,
            translate_x: target.x - bbox.x * scale,
            translate_y: target.y - bbox.y * scale,
        }
    }

    /// Content stream operators for this command
    pub fn to_operators(&self) -> String {
        format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            self.scale, self.scale, self.translate_x, self.translate_y, self.name
        )
    }
}

/// Draw command for an embedded page at its planned placement
pub fn draw_command(embedded: &EmbeddedPage, placement: &PagePlacement) -> DrawCommand {
    DrawCommand::place(
        xobject_name(placement.cell_index),
        &embedded.bbox,
        &placement.content_rect,
        placement.scale,
    )
}

/// XObject resource name used for the page in `cell_index`
pub fn xobject_name(cell_index: usize) -> String {
    format!("P{}", cell_index)
}

// =============================================================================
// Page Rendering
// =============================================================================

/// Render one destination page to the output document.
///
/// # Arguments
/// * `output` - The destination document
/// * `pages` - The collected source pages
/// * `sheet` - Placements for this page
/// * `page_size` - Destination page (width, height) in points
/// * `parent_pages_id` - The parent Pages object ID
/// * `caches` - One object ID cache per source document
pub fn render_sheet(
    output: &mut Document,
    pages: &PageSequence,
    sheet: &SheetPlan,
    page_size: (f32, f32),
    parent_pages_id: ObjectId,
    caches: &mut [HashMap<ObjectId, ObjectId>],
) -> Result<ObjectId> {
    let (sheet_width_pt, sheet_height_pt) = page_size;

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(sheet_width_pt),
            Object::Real(sheet_height_pt),
        ]),
    );

    let mut content_ops = Vec::with_capacity(sheet.placements.len());
    let mut xobjects = Dictionary::new();

    for placement in &sheet.placements {
        let draw_error = |reason: String| ImposeError::Draw {
            page: placement.source_index,
            reason,
        };

        let source_page = pages
            .get(placement.source_index)
            .ok_or_else(|| draw_error("not in page sequence".to_string()))?;
        let source = pages
            .document(source_page.document)
            .ok_or_else(|| draw_error("source document missing".to_string()))?;
        let cache = caches
            .get_mut(source_page.document)
            .ok_or_else(|| draw_error("no object cache for source document".to_string()))?;

        let embedded = embed_page(output, source, source_page.object_id, cache)
            .map_err(|e| draw_error(e.to_string()))?;

        let command = draw_command(&embedded, placement);
        xobjects.set(command.name.as_bytes(), Object::Reference(embedded.xobject_id));
        content_ops.push(command.to_operators());
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Tests
// =============================================================================
