//! Asset reference data - asset classes, their category tree, and securities.

mod assets_model;
mod assets_service;
mod assets_traits;

pub use assets_model::{AssetClass, AssetClassCategory, Security};
pub use assets_service::{resolve_group, AssetReferenceService};
pub use assets_traits::{AssetReferenceRepositoryTrait, AssetReferenceServiceTrait};
