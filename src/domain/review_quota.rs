//! Rating tiers and the per-tier review quota supplied by the caller

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Star rating bucket, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingTier(u8);

impl RatingTier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Tiers in collection order, most positive first
    pub const DESCENDING: [RatingTier; 5] = [
        RatingTier(5),
        RatingTier(4),
        RatingTier(3),
        RatingTier(2),
        RatingTier(1),
    ];

    pub fn value(self) -> u8 {
        self.0
    }

    /// English word for the tier ("five", "four", ...)
    pub fn word(self) -> &'static str {
        match self.0 {
            5 => "five",
            4 => "four",
            3 => "three",
            2 => "two",
            _ => "one",
        }
    }

    fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }
}

impl TryFrom<u8> for RatingTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "rating tier must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
        }
    }
}

impl From<RatingTier> for u8 {
    fn from(tier: RatingTier) -> Self {
        tier.0
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum number of reviews requested per rating tier.
///
/// A tier that was never set has a quota of zero and is skipped.
/// Serialized as a `{"5": 2, "1": 1}` map keyed by tier; absent tiers are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u8, u32>", into = "BTreeMap<u8, u32>")]
pub struct ReviewQuota {
    counts: [u32; 5],
}

impl ReviewQuota {
    /// Empty quota: every tier skipped
    pub fn new() -> Self {
        Self::default()
    }

    /// Same count for every tier
    pub fn uniform(count: u32) -> Self {
        Self { counts: [count; 5] }
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, tier: RatingTier, count: u32) -> Self {
        self.set(tier, count);
        self
    }

    pub fn set(&mut self, tier: RatingTier, count: u32) {
        self.counts[tier.index()] = count;
    }

    pub fn get(&self, tier: RatingTier) -> u32 {
        self.counts[tier.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Build a quota from raw (tier, count) pairs, rejecting tiers outside 1..=5
    pub fn from_pairs<I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let mut quota = Self::new();
        for (tier, count) in pairs {
            quota.set(RatingTier::try_from(tier)?, count);
        }
        Ok(quota)
    }
}

impl TryFrom<BTreeMap<u8, u32>> for ReviewQuota {
    type Error = String;

    fn try_from(counts: BTreeMap<u8, u32>) -> Result<Self, Self::Error> {
        Self::from_pairs(counts)
    }
}

impl From<ReviewQuota> for BTreeMap<u8, u32> {
    fn from(quota: ReviewQuota) -> Self {
        RatingTier::DESCENDING
            .into_iter()
            .map(|tier| (tier.value(), quota.get(tier)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }
}
