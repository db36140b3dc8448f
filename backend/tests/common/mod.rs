//! Crop fixtures shared by the engine test suites

#![allow(dead_code)]

use shared::{CropProfile, InMemoryCatalog, ObservationInput, ToleranceRange};
use uuid::Uuid;

/// Crop with the given tolerance ranges and economics
pub fn crop(
    name: &str,
    category: &str,
    temperature: (f64, f64),
    rainfall: (f64, f64),
    soil_ph: (f64, f64),
    yield_per_hectare: f64,
    market_price_per_kg: f64,
) -> CropProfile {
    CropProfile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        scientific_name: None,
        category: category.to_string(),
        season: "Rabi".to_string(),
        temperature: ToleranceRange::new(temperature.0, temperature.1),
        rainfall: ToleranceRange::new(rainfall.0, rainfall.1),
        soil_ph: ToleranceRange::new(soil_ph.0, soil_ph.1),
        growing_period_days: 90,
        suitable_regions: "Punjab, Haryana, Uttar Pradesh".to_string(),
        yield_per_hectare,
        market_price_per_kg,
    }
}

pub fn wheat() -> CropProfile {
    crop("Wheat", "Cereal", (15.0, 25.0), (50.0, 100.0), (6.0, 8.0), 4.0, 22.0)
}

pub fn potato() -> CropProfile {
    crop("Potato", "Vegetable", (15.0, 25.0), (40.0, 80.0), (5.5, 7.0), 25.0, 15.0)
}

pub fn broccoli() -> CropProfile {
    crop("Broccoli", "Vegetable", (15.0, 25.0), (40.0, 80.0), (6.0, 7.0), 15.0, 40.0)
}

pub fn mango() -> CropProfile {
    let mut mango = crop("Mango", "Fruit", (24.0, 35.0), (75.0, 250.0), (5.5, 7.5), 10.0, 60.0);
    mango.suitable_regions = "Uttar Pradesh, Bihar, Gujarat".to_string();
    mango
}

/// Punjab catalog: three crops grow there, mango does not
pub fn punjab_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![wheat(), potato(), broccoli(), mango()])
}

/// Mild Punjab winter readings on a 2 ha farm
pub fn punjab_observation() -> ObservationInput {
    ObservationInput::new("Punjab", 2.0, 6.5, 20.0, 60.0)
}
