//! XObject creation for imposition
//!
//! This module handles creating Form XObjects from source PDF pages,
//! which are then placed onto destination pages with transformations.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Upper bound on page tree depth when resolving inherited attributes
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// A source page embedded in the destination document as a Form XObject
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddedPage {
    /// Object ID of the XObject in the destination document
    pub xobject_id: ObjectId,
    /// Bounding box of the XObject in its own coordinate space
    pub bbox: Rect,
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Embed a source page into `output` as a Form XObject.
///
/// Objects reachable from the page resources are deep-copied once per
/// source document; pass the same `cache` for every page of that document
/// so shared fonts and images are not duplicated.
///
/// # Arguments
/// * `output` - The destination document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `cache` - Source-to-destination object ID map for `source`
pub fn embed_page(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<EmbeddedPage> {
    let page_dict = source.get_dictionary(page_id)?;
    let bbox = page_media_box(source, page_id)?;

    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", rect_to_array(&bbox));
    xobject_dict.set("FormType", Object::Integer(1));

    // Resources may be inherited from the page tree
    let resources = match resolve_inherited(source, page_id, b"Resources")? {
        Some(resources) => copy_object_deep(output, source, resources, cache)?,
        None => Object::Dictionary(Dictionary::new()),
    };
    xobject_dict.set("Resources", resources);

    let xobject_id = output.add_object(Stream::new(xobject_dict, content_data));
    Ok(EmbeddedPage { xobject_id, bbox })
}

fn rect_to_array(rect: &Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x),
        Object::Real(rect.y),
        Object::Real(rect.right()),
        Object::Real(rect.top()),
    ])
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the decoded content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => resolve(doc, c)?,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Stream(stream) => decoded_content(stream),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Ok(stream) = resolve(doc, obj)?.as_stream() {
            result.extend_from_slice(&decoded_content(stream)?);
            result.push(b'\n');
        }
    }

    Ok(result)
}

/// Stream content with its filters removed
fn decoded_content(stream: &Stream) -> Result<Vec<u8>> {
    if !stream.dict.has(b"Filter") {
        return Ok(stream.content.clone());
    }
    Ok(stream.decompressed_content()?)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times. The
/// destination ID is reserved before descending, so reference cycles
/// terminate. `/Parent` links are not followed.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

// =============================================================================
// Page Attributes
// =============================================================================

/// Follow a single indirect reference
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        _ => Ok(obj),
    }
}

/// Look up a page attribute, walking up the page tree through `/Parent`
/// when the page itself does not define it.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current_id = page_id;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let dict = doc.get_dictionary(current_id)?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(resolve(doc, value)?));
        }

        match dict.get(b"Parent").and_then(|parent| parent.as_reference()) {
            Ok(parent_id) => current_id = parent_id,
            Err(_) => return Ok(None),
        }
    }

    Ok(None)
}

/// Get a page's MediaBox in points, falling back to US Letter at the origin.
pub fn page_media_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    let fallback = Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1);

    let Some(Object::Array(mb)) = resolve_inherited(doc, page_id, b"MediaBox")? else {
        return Ok(fallback);
    };

    let coords: Option<Vec<f32>> = mb
        .iter()
        .map(|obj| resolve(doc, obj).ok().and_then(extract_number))
        .collect();

    match coords.as_deref() {
        Some(&[x0, y0, x1, y1]) => Ok(Rect::new(
            x0.min(x1),
            y0.min(y1),
            (x1 - x0).abs(),
            (y1 - y0).abs(),
        )),
        _ => Ok(fallback),
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
