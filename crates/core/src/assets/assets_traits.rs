//! Reference data repository and service contracts.
//!
//! Reference data is created by a seeding process outside this crate; these
//! traits only expose lookups. Storage-specific details are handled by
//! concrete implementations.

use super::assets_model::{AssetClass, AssetClassCategory, Security};
use crate::errors::Result;

/// Read access to seeded reference data.
pub trait AssetReferenceRepositoryTrait: Send + Sync {
    fn list_asset_classes(&self) -> Result<Vec<AssetClass>>;

    fn list_categories(&self) -> Result<Vec<AssetClassCategory>>;

    fn list_securities(&self) -> Result<Vec<Security>>;

    fn get_asset_class(&self, asset_class_id: &str) -> Result<Option<AssetClass>>;

    /// Asset class names are globally unique, so name lookup is exact.
    fn find_asset_class_by_name(&self, name: &str) -> Result<Option<AssetClass>>;
}

/// Service contract over reference data, used by the allocation and strategy
/// services.
pub trait AssetReferenceServiceTrait: Send + Sync {
    /// Resolves the Cash sentinel asset class. The remainder rule materially
    /// depends on it, so a missing sentinel is surfaced as a configuration
    /// error. Resolved on every call, never memoized across requests.
    fn cash_asset_class(&self) -> Result<AssetClass>;

    fn list_asset_classes(&self) -> Result<Vec<AssetClass>>;

    fn list_categories(&self) -> Result<Vec<AssetClassCategory>>;

    fn list_securities(&self) -> Result<Vec<Security>>;

    fn get_asset_class(&self, asset_class_id: &str) -> Result<Option<AssetClass>>;
}
