use crate::collect::PageSequence;
use crate::layout::output_page_count;
use crate::types::*;

/// Calculate statistics for the imposition
pub fn calculate_statistics(
    pages: &PageSequence,
    mode: LayoutMode,
) -> Result<ImpositionStatistics> {
    let source_pages = pages.len();
    if source_pages == 0 {
        return Err(ImposeError::EmptyInput);
    }

    let pages_per_sheet = mode.pages_per_sheet();
    let output_pages = output_page_count(source_pages, pages_per_sheet);

    Ok(ImpositionStatistics {
        source_pages,
        pages_per_document: pages.pages_per_document(),
        pages_per_sheet,
        output_pages,
        empty_cells: output_pages * pages_per_sheet - source_pages,
    })
}
