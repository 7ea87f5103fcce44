pub mod document;
pub mod gemini;

use async_trait::async_trait;

pub use self::document::Document;
use crate::record::{RawBill, RawOffer};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Reads a bill document into raw bill fields.
#[async_trait]
pub trait BillExtractor: Sync {
    async fn extract_bill(&self, document: &Document) -> Result<RawBill, ExtractionError>;
}

/// Reads an offer disclosure sheet («CTE») into raw offer fields.
#[async_trait]
pub trait OfferExtractor: Sync {
    async fn extract_offer(&self, document: &Document) -> Result<RawOffer, ExtractionError>;
}
