//! Catalog configuration

use serde::Deserialize;

use super::error::ValidationError;

fn default_offer_group() -> String {
    "standard".to_string()
}

/// Catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Offer group every user sees before any purchase
    #[serde(default = "default_offer_group")]
    pub default_offer_group: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_offer_group: default_offer_group(),
        }
    }
}

impl CatalogConfig {
    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_offer_group.trim().is_empty() {
            return Err(ValidationError::EmptyOfferGroup);
        }
        Ok(())
    }
}
