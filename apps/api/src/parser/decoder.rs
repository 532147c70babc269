//! Document decoding seam.
//!
//! `DocumentDecoder` is the only place the parser touches a document format.
//! The concrete implementation is chosen when `AppState` is built; the
//! default is `PdfDecoder`, backed by `pdf-extract`.

use std::panic::{self, AssertUnwindSafe};

use crate::parser::ExtractionError;

/// The textual content items of one page, in decoder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageText {
    pub items: Vec<String>,
}

impl PageText {
    /// Builds a page from a decoder's raw page string: one item per
    /// non-empty trimmed line.
    pub fn from_raw(raw: &str) -> Self {
        let items = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { items }
    }
}

pub trait DocumentDecoder: Send + Sync {
    /// Opens `bytes` as a paginated document and returns each page's text
    /// content, page 1 first.
    fn open_and_extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError>;
}

/// PDF decoder. Only PDF input is accepted; anything else fails at decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDecoder;

impl DocumentDecoder for PdfDecoder {
    fn open_and_extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|payload| ExtractionError::Decode(panic_message(payload.as_ref())))?
        .map_err(|e| ExtractionError::Decode(e.to_string()))?;

        Ok(pages.iter().map(|page| PageText::from_raw(page)).collect())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("decoder panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("decoder panicked: {s}")
    } else {
        "decoder panicked".to_string()
    }
}
