use crate::parser::decoder::{DocumentDecoder, PageText};
use crate::parser::ExtractionError;

const ITEM_SEPARATOR: &str = " ";
const PAGE_SEPARATOR: &str = "\n";

/// Decodes `bytes` and flattens every page into one string.
///
/// Items within a page are joined with a single space; pages are joined with
/// a newline, so N pages always yield N newline-separated segments.
pub fn extract_text(decoder: &dyn DocumentDecoder, bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = decoder.open_and_extract_pages(bytes)?;
    Ok(join_pages(&pages))
}

pub fn join_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|page| page.items.join(ITEM_SEPARATOR))
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}
