//! Crop catalog access
//!
//! The engine only reads the catalog. Persistence-backed callers load a
//! snapshot into an [`InMemoryCatalog`] and hand it to the engine per request.

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::CropProfile;

/// Read interface over the crop catalog
pub trait CropCatalog {
    /// Crops whose region list contains `region` (substring, case-sensitive),
    /// in catalog order
    fn find_by_region(&self, region: &str) -> Vec<&CropProfile>;

    /// Crop by id
    fn get(&self, id: Uuid) -> Option<&CropProfile>;

    /// Crop by id, as an error when missing
    fn require(&self, id: Uuid) -> EngineResult<&CropProfile> {
        self.get(id).ok_or(EngineError::CropNotFound(id))
    }
}

/// Catalog held in memory, preserving insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    crops: Vec<CropProfile>,
}

impl InMemoryCatalog {
    pub fn new(crops: Vec<CropProfile>) -> Self {
        Self { crops }
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

impl CropCatalog for InMemoryCatalog {
    fn find_by_region(&self, region: &str) -> Vec<&CropProfile> {
        self.crops.iter().filter(|c| c.grows_in(region)).collect()
    }

    fn get(&self, id: Uuid) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.id == id)
    }
}

impl FromIterator<CropProfile> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = CropProfile>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
