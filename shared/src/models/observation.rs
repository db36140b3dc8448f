//! Farm observation submitted with a recommendation request

use serde::{Deserialize, Serialize};

/// Soil and climate readings for one farm. Ephemeral: one per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationInput {
    /// Region (state) name, matched against each crop's region list
    pub region: String,
    /// Farm area in hectares
    pub farm_area_hectares: f64,
    pub soil_ph: f64,
    /// Temperature in °C
    pub temperature: f64,
    /// Rainfall in mm; scoring falls back to defaults when absent
    pub rainfall: Option<f64>,
    /// Nitrogen (kg/ha), carried but not scored
    pub nitrogen: Option<f64>,
    /// Phosphorus (kg/ha), carried but not scored
    pub phosphorus: Option<f64>,
    /// Potassium (kg/ha), carried but not scored
    pub potassium: Option<f64>,
    /// Relative humidity (%), carried but not scored
    pub humidity: Option<f64>,
}

impl ObservationInput {
    /// Observation with the scored readings only
    pub fn new(
        region: impl Into<String>,
        farm_area_hectares: f64,
        soil_ph: f64,
        temperature: f64,
        rainfall: f64,
    ) -> Self {
        Self {
            region: region.into(),
            farm_area_hectares,
            soil_ph,
            temperature,
            rainfall: Some(rainfall),
            nitrogen: None,
            phosphorus: None,
            potassium: None,
            humidity: None,
        }
    }

    pub fn with_nutrients(mut self, nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        self.nitrogen = Some(nitrogen);
        self.phosphorus = Some(phosphorus);
        self.potassium = Some(potassium);
        self
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    pub fn without_rainfall(mut self) -> Self {
        self.rainfall = None;
        self
    }
}
