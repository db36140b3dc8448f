//! Crop catalog models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inclusive tolerance range for one agro-climatic factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ToleranceRange {
    pub min: f64,
    pub max: f64,
}

impl ToleranceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.max - self.min) / 2.0
    }

    /// Distance from `value` to the nearer of the two bounds
    pub fn distance_to_nearer_bound(&self, value: f64) -> f64 {
        (value - self.min).abs().min((value - self.max).abs())
    }
}

/// A crop profile from the catalog. Reference data: never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub id: Uuid,
    pub name: String,
    pub scientific_name: Option<String>,
    /// Free-form category as stored (Cereal, Vegetable, Fruit, Oilseed, Spice, Cash Crop, ...)
    pub category: String,
    /// Season tag (Kharif, Rabi, Perennial, ...)
    pub season: String,
    /// Temperature tolerance in °C
    pub temperature: ToleranceRange,
    /// Rainfall tolerance in mm
    pub rainfall: ToleranceRange,
    pub soil_ph: ToleranceRange,
    pub growing_period_days: i32,
    /// Comma-separated region names, matched by substring containment
    pub suitable_regions: String,
    /// Average yield in tons per hectare
    pub yield_per_hectare: f64,
    /// Average market price per kg
    pub market_price_per_kg: f64,
}

impl CropProfile {
    /// Whether `region` occurs in the stored region list. Case-sensitive.
    pub fn grows_in(&self, region: &str) -> bool {
        self.suitable_regions.contains(region)
    }

    pub fn category_group(&self) -> CropCategoryGroup {
        CropCategoryGroup::classify(&self.category)
    }
}

/// Coarse crop grouping used to pick a seasonal price pattern
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropCategoryGroup {
    Grain,
    Vegetable,
    Fruit,
    Other,
}

impl CropCategoryGroup {
    /// Keyword containment on the lowercased category, first match wins
    pub fn classify(category: &str) -> Self {
        let category = category.to_lowercase();
        if category.contains("grain") || category.contains("cereal") {
            CropCategoryGroup::Grain
        } else if category.contains("vegetable") {
            CropCategoryGroup::Vegetable
        } else if category.contains("fruit") {
            CropCategoryGroup::Fruit
        } else {
            CropCategoryGroup::Other
        }
    }
}

impl std::fmt::Display for CropCategoryGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropCategoryGroup::Grain => write!(f, "Grain"),
            CropCategoryGroup::Vegetable => write!(f, "Vegetable"),
            CropCategoryGroup::Fruit => write!(f, "Fruit"),
            CropCategoryGroup::Other => write!(f, "Other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = ToleranceRange::new(15.0, 25.0);
        assert!(range.contains(15.0));
        assert!(range.contains(25.0));
        assert!(!range.contains(25.01));
    }

    #[test]
    fn test_distance_to_nearer_bound() {
        let range = ToleranceRange::new(6.0, 7.0);
        assert!((range.distance_to_nearer_bound(8.0) - 1.0).abs() < 1e-12);
        assert!((range.distance_to_nearer_bound(5.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_category_group_classification() {
        assert_eq!(CropCategoryGroup::classify("Cereal"), CropCategoryGroup::Grain);
        assert_eq!(CropCategoryGroup::classify("Food grain"), CropCategoryGroup::Grain);
        assert_eq!(CropCategoryGroup::classify("Vegetable"), CropCategoryGroup::Vegetable);
        assert_eq!(CropCategoryGroup::classify("FRUIT"), CropCategoryGroup::Fruit);
        assert_eq!(CropCategoryGroup::classify("Oilseed"), CropCategoryGroup::Other);
        assert_eq!(CropCategoryGroup::classify("Cash Crop"), CropCategoryGroup::Other);
    }
}
