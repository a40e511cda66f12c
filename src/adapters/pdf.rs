use crate::domain::ports::DocumentExtractor;
use crate::utils::error::{AppError, Result};
use lopdf::Document;

/// Plain-text extraction backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn load(document: &[u8]) -> Result<Document> {
        Document::load_mem(document).map_err(|e| AppError::DocumentParseError {
            message: e.to_string(),
        })
    }

    /// Text of each page, in page-number order.
    pub fn page_texts(&self, document: &[u8]) -> Result<Vec<String>> {
        let doc = Self::load(document)?;
        let pages = doc.get_pages();
        tracing::debug!("PDF has {} pages", pages.len());

        pages
            .keys()
            .map(|page_number| {
                doc.extract_text(&[*page_number])
                    .map_err(|e| AppError::DocumentParseError {
                        message: format!("page {}: {}", page_number, e),
                    })
            })
            .collect()
    }
}

impl DocumentExtractor for PdfExtractor {
    /// Pages are joined back to back with no separator.
    fn extract_text(&self, document: &[u8]) -> Result<String> {
        Ok(self.page_texts(document)?.concat())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::pdf_with_pages;
    use super::*;

    #[test]
    fn test_multi_page_text_is_concatenated_in_order() {
        let pdf = pdf_with_pages(&["Rust developer", "Five years of Python", "AWS certified"]);
        let extractor = PdfExtractor::new();

        let pages = extractor.page_texts(&pdf).unwrap();
        let text = extractor.extract_text(&pdf).unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(text, pages.concat());

        let first = text.find("Rust developer").unwrap();
        let second = text.find("Five years of Python").unwrap();
        let third = text.find("AWS certified").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_invalid_pdf_is_document_parse_error() {
        let result = PdfExtractor::new().extract_text(b"this is not a pdf");
        assert!(matches!(result, Err(AppError::DocumentParseError { .. })));
    }
}
