//! N-up imposition of PDF pages
//!
//! Collects the pages of one or more PDFs in order and lays them out
//! several to a destination page (2-up stacked or 8-up in a 2x4 grid),
//! each page scaled to fit its cell and centered.

pub mod collect;
pub mod constants;
pub mod impose;
pub mod layout;
mod options;
pub mod render;
mod stats;
mod types;

pub use collect::{PageSequence, SourcePage, collect, collect_documents};
pub use impose::{
    combine, impose, impose_pages, load_multiple_pdf_bytes, load_pages, load_pdf_bytes,
    render_plan, save_pdf, to_bytes,
};
pub use layout::{ImpositionPlan, PagePlacement, Rect, SheetPlan, plan_imposition};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
