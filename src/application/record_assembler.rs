//! Record assembly: product fields first, then reviews
//!
//! A failed product fetch aborts assembly and no record is produced.
//! Review collection never fails the record.

use tracing::{debug, info};

use super::review_collector::ReviewCollector;
use crate::domain::product::{ProductIdentifier, ProductRecord};
use crate::domain::review_quota::ReviewQuota;
use crate::domain::services::FetchAdapter;
use crate::infrastructure::extraction_error::ExtractionResult;
use crate::infrastructure::parsing::FieldExtractor;

pub struct RecordAssembler {
    extractor: FieldExtractor,
}

impl RecordAssembler {
    pub fn new(extractor: FieldExtractor) -> Self {
        Self { extractor }
    }

    pub async fn assemble(
        &self,
        identifier: ProductIdentifier,
        adapter: &dyn FetchAdapter,
        quota: &ReviewQuota,
        include_reviews: bool,
    ) -> ExtractionResult<ProductRecord> {
        let content = adapter.fetch_product(&identifier).await?;
        let fields = self.extractor.extract_fields(&content);
        debug!(
            "Extracted {} features and {} technical details from {}",
            fields.features.len(),
            fields.technical_details.len(),
            content.url()
        );

        let record = ProductRecord::from_fields(identifier, fields);
        if !include_reviews || quota.is_empty() {
            info!("✅ Assembled {} without reviews", record.identifier);
            return Ok(record);
        }

        let reviews = ReviewCollector::new(adapter, &self.extractor)
            .collect_reviews(&record.identifier, quota)
            .await;
        info!("✅ Assembled {} with {} reviews", record.identifier, reviews.len());
        Ok(record.with_reviews(reviews))
    }
}
