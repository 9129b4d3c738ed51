use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::review_quota::RatingTier;

/// Length of a well-formed product identifier (ASIN)
pub const PRODUCT_ID_LEN: usize = 10;

/// Title placeholder used when the product page carries no title
pub const TITLE_SENTINEL: &str = "N/A";

/// Canonical (site locale, product id) pair produced by the identifier resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductIdentifier {
    /// Site locale such as "fr", "com" or "co.uk"
    domain: String,
    /// Fixed-format product code (ASIN)
    #[serde(rename = "productId")]
    product_id: String,
}

impl ProductIdentifier {
    /// Create an identifier from an already normalized domain and product id
    pub fn new(domain: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            product_id: product_id.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Whether the product id matches the 10-character alphanumeric pattern.
    ///
    /// Raw identifiers are accepted without this check; a malformed one
    /// surfaces later as a failed product fetch.
    pub fn has_well_formed_id(&self) -> bool {
        self.product_id.len() == PRODUCT_ID_LEN
            && self.product_id.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl fmt::Display for ProductIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (domain: {})", self.product_id, self.domain)
    }
}

/// Attribute name -> value mapping from the specification tables.
///
/// Keeps document order of first appearance; writing an existing name
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechnicalDetails {
    entries: Vec<(String, String)>,
}

impl TechnicalDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, returning the previous value when the name was already present
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for TechnicalDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TechnicalDetails {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut details = Self::new();
        for (name, value) in iter {
            details.insert(name, value);
        }
        details
    }
}

/// A single customer review tagged with the rating tier it was collected for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub rating: RatingTier,
    pub text: String,
}

impl Review {
    pub fn new(rating: RatingTier, text: impl Into<String>) -> Self {
        Self {
            rating,
            text: text.into(),
        }
    }

    /// Flat "<rating>★: <text>" form used by displays and exports
    pub fn to_flat_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}★: {}", self.rating, self.text)
    }
}

/// Normalized product fields produced by the field extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFields {
    pub title: String,
    pub features: Vec<String>,
    #[serde(rename = "technicalDetails")]
    pub technical_details: TechnicalDetails,
}

impl Default for ProductFields {
    fn default() -> Self {
        Self {
            title: TITLE_SENTINEL.to_string(),
            features: Vec::new(),
            technical_details: TechnicalDetails::new(),
        }
    }
}

/// Final result of an extraction session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub identifier: ProductIdentifier,
    pub title: String,
    pub features: Vec<String>,
    #[serde(rename = "technicalDetails")]
    pub technical_details: TechnicalDetails,
    pub reviews: Vec<Review>,
}

impl ProductRecord {
    /// Start a record from extracted product fields; reviews are attached later
    pub fn from_fields(identifier: ProductIdentifier, fields: ProductFields) -> Self {
        Self {
            identifier,
            title: fields.title,
            features: fields.features,
            technical_details: fields.technical_details,
            reviews: Vec::new(),
        }
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn has_title(&self) -> bool {
        self.title != TITLE_SENTINEL
    }

    /// Reviews in their flat display form
    pub fn flat_reviews(&self) -> Vec<String> {
        self.reviews.iter().map(Review::to_flat_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(value: u8) -> RatingTier {
        RatingTier::try_from(value).unwrap()
    }

    #[test]
    fn test_identifier_well_formed() {
        assert!(ProductIdentifier::new("fr", "B0EXAMPLE1").has_well_formed_id());
        assert!(!ProductIdentifier::new("fr", "B0EXAMPLE").has_well_formed_id());
        assert!(!ProductIdentifier::new("fr", "B0EXAMPLE-1").has_well_formed_id());
    }

    #[test]
    fn test_technical_details_last_write_wins_in_place() {
        let mut details = TechnicalDetails::new();
        assert_eq!(details.insert("Weight", "1 kg"), None);
        details.insert("Colour", "Black");
        assert_eq!(details.insert("Weight", "2 kg"), Some("1 kg".to_string()));

        let pairs: Vec<_> = details.iter().collect();
        assert_eq!(pairs, vec![("Weight", "2 kg"), ("Colour", "Black")]);
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_technical_details_serializes_as_ordered_map() {
        let details: TechnicalDetails = [("Zeta", "1"), ("Alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, r#"{"Zeta":"1","Alpha":"2"}"#);
    }

    #[test]
    fn test_review_flat_form() {
        let review = Review::new(tier(4), "Solid build");
        assert_eq!(review.to_flat_string(), "4★: Solid build");
    }

    #[test]
    fn test_record_from_default_fields_has_sentinel_title() {
        let record = ProductRecord::from_fields(
            ProductIdentifier::new("com", "B000000001"),
            ProductFields::default(),
        );
        assert_eq!(record.title, TITLE_SENTINEL);
        assert!(!record.has_title());
        assert!(record.reviews.is_empty());
    }
}
