//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Creating Form XObjects from source pages
//! - Turning placements into content stream draw commands
//! - Building destination pages
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::*;
pub use xobject::{EmbeddedPage, copy_object_deep, embed_page, page_media_box};
