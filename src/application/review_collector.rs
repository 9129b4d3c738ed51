//! Rating-stratified review collection
//!
//! Tiers are walked from 5 stars down to 1. Each tier pages through its
//! reviews until its quota is met, a page yields no reviews, or the adapter
//! reports no next page. A failing fetch abandons only that tier; whatever
//! the tier gathered before the failure is kept.

use tracing::{debug, error, info, warn};

use crate::domain::pagination::PageToken;
use crate::domain::product::{ProductIdentifier, Review};
use crate::domain::review_quota::{RatingTier, ReviewQuota};
use crate::domain::services::FetchAdapter;
use crate::infrastructure::extraction_error::ExtractionError;
use crate::infrastructure::parsing::FieldExtractor;

/// What happened while collecting one tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierOutcome {
    pub tier: RatingTier,
    pub requested: u32,
    pub collected: u32,
    pub pages_fetched: u32,
    /// Set when the tier was abandoned on a fetch failure
    pub error: Option<ExtractionError>,
}

/// Collected reviews plus a per-tier report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewCollection {
    pub reviews: Vec<Review>,
    pub tiers: Vec<TierOutcome>,
}

impl ReviewCollection {
    pub fn abandoned_tiers(&self) -> impl Iterator<Item = &TierOutcome> {
        self.tiers.iter().filter(|outcome| outcome.error.is_some())
    }
}

pub struct ReviewCollector<'a> {
    adapter: &'a dyn FetchAdapter,
    extractor: &'a FieldExtractor,
}

impl<'a> ReviewCollector<'a> {
    pub fn new(adapter: &'a dyn FetchAdapter, extractor: &'a FieldExtractor) -> Self {
        Self { adapter, extractor }
    }

    /// Reviews in tier order 5 to 1, never more than the quota per tier
    pub async fn collect_reviews(
        &self,
        identifier: &ProductIdentifier,
        quota: &ReviewQuota,
    ) -> Vec<Review> {
        self.collect(identifier, quota).await.reviews
    }

    pub async fn collect(&self, identifier: &ProductIdentifier, quota: &ReviewQuota) -> ReviewCollection {
        let mut collection = ReviewCollection::default();

        for tier in RatingTier::DESCENDING {
            let need = quota.get(tier);
            if need == 0 {
                continue;
            }
            let outcome = self
                .collect_tier(identifier, tier, need, &mut collection.reviews)
                .await;
            collection.tiers.push(outcome);
        }

        info!(
            "📝 Collected {} reviews for {} ({} tiers abandoned)",
            collection.reviews.len(),
            identifier,
            collection.abandoned_tiers().count()
        );
        collection
    }

    async fn collect_tier(
        &self,
        identifier: &ProductIdentifier,
        tier: RatingTier,
        need: u32,
        reviews: &mut Vec<Review>,
    ) -> TierOutcome {
        let mut outcome = TierOutcome {
            tier,
            requested: need,
            collected: 0,
            pages_fetched: 0,
            error: None,
        };
        let mut page = PageToken::first();

        while outcome.collected < need {
            let fetched = match self.adapter.fetch_reviews(identifier, tier, page).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    if e.is_fetch_error() {
                        warn!("⚠️ Abandoning {}★ reviews at page {}: {}", tier, page.page_number(), e);
                    } else {
                        error!("❌ Abandoning {}★ reviews at page {}: {}", tier, page.page_number(), e);
                    }
                    outcome.error = Some(e);
                    break;
                }
            };
            outcome.pages_fetched += 1;

            let texts = self.extractor.extract_review_texts(&fetched.content);
            if texts.is_empty() {
                debug!("{}★ page {} is empty, tier exhausted", tier, page.page_number());
                break;
            }

            for text in texts {
                if outcome.collected >= need {
                    break;
                }
                reviews.push(Review::new(tier, text));
                outcome.collected += 1;
            }

            match fetched.next {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!(
            "{}★: {}/{} reviews from {} pages",
            tier, outcome.collected, need, outcome.pages_fetched
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedAdapter;
    use proptest::prelude::*;

    fn tier(value: u8) -> RatingTier {
        RatingTier::try_from(value).unwrap()
    }

    fn identifier() -> ProductIdentifier {
        ProductIdentifier::new("fr", "B0EXAMPLE1")
    }

    async fn collect(adapter: &ScriptedAdapter, quota: ReviewQuota) -> ReviewCollection {
        let extractor = FieldExtractor::new().unwrap();
        ReviewCollector::new(adapter, &extractor)
            .collect(&identifier(), &quota)
            .await
    }

    #[tokio::test]
    async fn test_single_tier_quota_is_respected() {
        let adapter = ScriptedAdapter::new()
            .page(5, 1, vec!["a", "b", "c"], Some(2))
            .page(5, 2, vec!["d"], None)
            .page(4, 1, vec!["four"], None);
        let quota = ReviewQuota::new().with(tier(5), 2);

        let reviews = collect(&adapter, quota).await.reviews;

        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.rating == tier(5)));
        assert_eq!(adapter.review_calls(), vec![(5, 1)]);
    }

    #[tokio::test]
    async fn test_tiers_in_descending_order_across_pages() {
        let adapter = ScriptedAdapter::new()
            .page(5, 1, vec!["five-a"], Some(2))
            .page(5, 2, vec!["five-b"], Some(3))
            .page(1, 1, vec!["one-a", "one-b"], Some(2));
        let quota = ReviewQuota::new().with(tier(1), 1).with(tier(5), 3);

        let collection = collect(&adapter, quota).await;
        let flat: Vec<String> = collection.reviews.iter().map(Review::to_flat_string).collect();

        assert_eq!(flat, vec!["5★: five-a", "5★: five-b", "1★: one-a"]);
        // page 3 of tier 5 is unscripted, so it comes back empty
        assert_eq!(adapter.review_calls(), vec![(5, 1), (5, 2), (5, 3), (1, 1)]);
    }

    #[tokio::test]
    async fn test_empty_first_page_yields_nothing() {
        let adapter = ScriptedAdapter::new().page(4, 1, vec![], Some(2));
        let collection = collect(&adapter, ReviewQuota::new().with(tier(4), 5)).await;

        assert!(collection.reviews.is_empty());
        assert_eq!(collection.tiers[0].pages_fetched, 1);
        assert_eq!(collection.tiers[0].error, None);
        assert_eq!(adapter.review_calls(), vec![(4, 1)]);
    }

    #[tokio::test]
    async fn test_zero_quota_tiers_are_never_fetched() {
        let adapter = ScriptedAdapter::new();
        let collection = collect(&adapter, ReviewQuota::new()).await;
        assert!(collection.tiers.is_empty());
        assert!(adapter.review_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_tier_keeps_earlier_pages_and_other_tiers() {
        let adapter = ScriptedAdapter::new()
            .page(5, 1, vec!["kept"], Some(2))
            .failing_page(5, 2, 503)
            .failing_page(3, 1, 404)
            .page(2, 1, vec!["two"], None);
        let quota = ReviewQuota::new()
            .with(tier(5), 3)
            .with(tier(3), 1)
            .with(tier(2), 1);

        let collection = collect(&adapter, quota).await;

        let flat: Vec<String> = collection.reviews.iter().map(Review::to_flat_string).collect();
        assert_eq!(flat, vec!["5★: kept", "2★: two"]);
        let abandoned: Vec<u8> = collection.abandoned_tiers().map(|o| o.tier.value()).collect();
        assert_eq!(abandoned, vec![5, 3]);
        assert_eq!(collection.tiers[1].error.as_ref().and_then(ExtractionError::status), Some(404));
    }

    const TEXTS: [&str; 8] = ["r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8"];

    proptest! {
        #[test]
        fn prop_quota_never_exceeded(
            quotas in proptest::collection::vec(0u32..6, 5),
            page_sizes in proptest::collection::vec(0usize..=8, 5),
            pages in 1u32..4,
        ) {
            let mut adapter = ScriptedAdapter::new();
            let mut quota = ReviewQuota::new();
            for (i, t) in RatingTier::DESCENDING.iter().enumerate() {
                quota.set(*t, quotas[i]);
                for p in 1..=pages {
                    let next = (p < pages).then_some(p + 1);
                    adapter = adapter.page(t.value(), p, TEXTS[..page_sizes[i]].to_vec(), next);
                }
            }

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let collection = runtime.block_on(collect(&adapter, quota));

            for t in RatingTier::DESCENDING {
                let count = collection.reviews.iter().filter(|r| r.rating == t).count();
                prop_assert!(count as u32 <= quota.get(t));
            }
            let ratings: Vec<u8> = collection.reviews.iter().map(|r| r.rating.value()).collect();
            let mut sorted = ratings.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            prop_assert_eq!(ratings, sorted);
        }
    }
}
