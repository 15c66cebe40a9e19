//! Region data sources.
//!
//! The checker only needs one operation from the outside world: fetch a
//! region with a given set of shards. [`RegionSource`] is that seam;
//! [`NationStatesClient`] implements it against the live NationStates API.

pub mod client;
pub mod xml;

pub use client::{ClientConfig, NationStatesClient};

use crate::error::SourceError;
use crate::models::{Region, Shard};
use std::future::Future;

/// Something regions can be fetched from.
pub trait RegionSource {
    /// Fetch `name` with the requested shards.
    ///
    /// Returns `Ok(None)` when the region does not exist.
    fn fetch_region(
        &self,
        name: &str,
        shards: &[Shard],
    ) -> impl Future<Output = Result<Option<Region>, SourceError>> + Send;
}

/// Normalise a region name the way the API expects it in a request.
pub fn api_region_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_region_name() {
        assert_eq!(api_region_name("The Western Isles"), "the_western_isles");
        assert_eq!(api_region_name("  Lazarus "), "lazarus");
    }
}
