//! Identifier resolution
//!
//! Turns whatever the caller typed (a raw id, a product name or a product
//! page address) into one canonical `ProductIdentifier`.

use regex::Regex;
use tracing::{debug, info, warn};
use url::{ParseError, Url};

use crate::domain::product::{PRODUCT_ID_LEN, ProductIdentifier};
use crate::domain::product_input::ProductInput;
use crate::domain::services::FetchAdapter;
use crate::infrastructure::config::SiteConfig;
use crate::infrastructure::extraction_error::{ExtractionError, ExtractionResult};

pub struct IdentifierResolver {
    site_label: String,
    host_prefix: String,
    address_pattern: Regex,
}

impl IdentifierResolver {
    pub fn new(site: &SiteConfig) -> ExtractionResult<Self> {
        let pattern = format!(
            "{}([A-Z0-9]{{{}}})",
            regex::escape(&site.product_path_marker),
            PRODUCT_ID_LEN
        );
        let address_pattern = Regex::new(&pattern).map_err(|e| {
            ExtractionError::configuration(format!("Invalid product address pattern {pattern}: {e}"))
        })?;

        Ok(Self {
            site_label: format!(".{}.", site.site_name.to_ascii_lowercase()),
            host_prefix: site.host_prefix().to_ascii_lowercase(),
            address_pattern,
        })
    }

    /// Lower-case the hint and strip protocol and `www.<site>.` prefixes
    pub fn normalize_domain(&self, hint: &str) -> String {
        let lowered = hint.trim().to_lowercase();
        let mut domain = lowered.as_str();
        for prefix in ["https://", "http://", self.host_prefix.as_str()] {
            domain = domain.strip_prefix(prefix).unwrap_or(domain);
        }
        domain.trim_end_matches('/').trim().to_string()
    }

    /// Product id from the address path, domain from its host
    pub fn resolve_address(&self, address: &str) -> ExtractionResult<ProductIdentifier> {
        let invalid = || ExtractionError::InvalidAddress {
            address: address.to_string(),
        };

        let trimmed = address.trim();
        let parsed = match Url::parse(trimmed) {
            Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{trimmed}")),
            other => other,
        }
        .map_err(|_| invalid())?;
        let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
        let product_id = self
            .address_pattern
            .captures(parsed.path())
            .and_then(|captures| captures.get(1))
            .ok_or_else(invalid)?
            .as_str();

        let identifier = ProductIdentifier::new(self.domain_from_host(host), product_id);
        debug!("Resolved address {} to {}", address, identifier);
        Ok(identifier)
    }

    /// Site locale from a host: `www.amazon.co.uk` and `smile.amazon.co.uk` give `co.uk`
    fn domain_from_host(&self, host: &str) -> String {
        let lowered = host.trim_end_matches('.').to_ascii_lowercase();
        let dotted = format!(".{lowered}");
        if let Some(start) = dotted.find(&self.site_label) {
            return dotted[start + self.site_label.len()..].to_string();
        }
        let bare = lowered.strip_prefix("www.").unwrap_or(&lowered);
        match bare.split_once('.') {
            Some((_, domain)) if !domain.is_empty() => domain.to_string(),
            _ => bare.to_string(),
        }
    }

    /// Resolve any input variant; only free text goes to the network
    pub async fn resolve(
        &self,
        input: &ProductInput,
        domain_hint: &str,
        adapter: &dyn FetchAdapter,
    ) -> ExtractionResult<ProductIdentifier> {
        match input {
            ProductInput::RawId(id) => {
                let identifier = ProductIdentifier::new(self.normalize_domain(domain_hint), id.trim());
                if !identifier.has_well_formed_id() {
                    warn!(
                        "Product id {:?} is not {} alphanumeric characters, using it as-is",
                        identifier.product_id(),
                        PRODUCT_ID_LEN
                    );
                }
                Ok(identifier)
            }
            ProductInput::Address(address) => self.resolve_address(address),
            ProductInput::FreeText(text) => {
                let query = text.trim();
                let not_found = || ExtractionError::NotFound {
                    query: query.to_string(),
                };
                if query.is_empty() {
                    return Err(not_found());
                }

                let domain = self.normalize_domain(domain_hint);
                let product_id = adapter
                    .search_product(&domain, query)
                    .await?
                    .ok_or_else(not_found)?;

                info!("🔎 Found product {} for query {:?}", product_id, query);
                Ok(ProductIdentifier::new(domain, product_id))
            }
        }
    }
}
