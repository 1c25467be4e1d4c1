//! Profile provider trait for public-profile enrichment

use async_trait::async_trait;
use crate::error::Result;

/// Trait for fetching structured public-profile data
///
/// Implementations:
/// - `RapidApiProfileClient`: LinkedIn data scraper on RapidAPI
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch the raw profile payload for a profile URL
    async fn fetch_profile(&self, profile_url: &str) -> Result<serde_json::Value>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
