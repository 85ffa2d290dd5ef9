//! Reference data service implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::assets_model::{AssetClass, AssetClassCategory, Security};
use super::assets_traits::{AssetReferenceRepositoryTrait, AssetReferenceServiceTrait};
use crate::constants::CASH_ASSET_CLASS;
use crate::errors::{Error, Result};

pub struct AssetReferenceService {
    repository: Arc<dyn AssetReferenceRepositoryTrait>,
}

impl AssetReferenceService {
    pub fn new(repository: Arc<dyn AssetReferenceRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl AssetReferenceServiceTrait for AssetReferenceService {
    fn cash_asset_class(&self) -> Result<AssetClass> {
        self.repository
            .find_asset_class_by_name(CASH_ASSET_CLASS)?
            .ok_or_else(|| Error::CashAssetClassNotFound(CASH_ASSET_CLASS.to_string()))
    }

    fn list_asset_classes(&self) -> Result<Vec<AssetClass>> {
        self.repository.list_asset_classes()
    }

    fn list_categories(&self) -> Result<Vec<AssetClassCategory>> {
        self.repository.list_categories()
    }

    fn list_securities(&self) -> Result<Vec<Security>> {
        self.repository.list_securities()
    }

    fn get_asset_class(&self, asset_class_id: &str) -> Result<Option<AssetClass>> {
        self.repository.get_asset_class(asset_class_id)
    }
}

/// Walks a category's parent chain to its top-level ancestor (its group).
/// A top-level category is its own group. The chain must terminate: a cycle
/// or a dangling parent code is reported as a data-integrity error instead
/// of recursing forever.
pub fn resolve_group<'a>(
    categories: &'a HashMap<String, AssetClassCategory>,
    code: &str,
) -> Result<&'a AssetClassCategory> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut current_code = code.to_string();

    loop {
        let node = categories.get(&current_code).ok_or_else(|| {
            Error::DataIntegrity(format!(
                "category '{}' references unknown code '{}'",
                code, current_code
            ))
        })?;

        match &node.parent_code {
            None => return Ok(node),
            Some(parent_code) => {
                if !visited.insert(current_code.clone()) {
                    return Err(Error::DataIntegrity(format!(
                        "category parent chain does not terminate at '{}'",
                        code
                    )));
                }
                current_code = parent_code.clone();
            }
        }
    }
}
