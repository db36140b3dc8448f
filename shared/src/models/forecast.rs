//! Price forecast models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seasonal climate effect on a crop's price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClimateImpact {
    Positive,
    Negative,
    Neutral,
}

impl ClimateImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateImpact::Positive => "positive",
            ClimateImpact::Negative => "negative",
            ClimateImpact::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "positive" => Some(ClimateImpact::Positive),
            "negative" => Some(ClimateImpact::Negative),
            "neutral" => Some(ClimateImpact::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClimateImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a crop's market price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Rising,
    Stable,
    Falling,
}

impl MarketTrend {
    /// Draw order used by the trend model
    pub const ALL: [MarketTrend; 3] = [MarketTrend::Rising, MarketTrend::Stable, MarketTrend::Falling];

    /// Label for a realized percentage change
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            MarketTrend::Rising
        } else if change < 0.0 {
            MarketTrend::Falling
        } else {
            MarketTrend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Rising => "rising",
            MarketTrend::Stable => "stable",
            MarketTrend::Falling => "falling",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rising" => Some(MarketTrend::Rising),
            "stable" => Some(MarketTrend::Stable),
            "falling" => Some(MarketTrend::Falling),
            _ => None,
        }
    }
}

impl std::fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One month of a crop's price forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceForecastPoint {
    pub crop_id: Uuid,
    /// 1-12
    pub month: u32,
    pub year: i32,
    /// Price per kg, two decimals, never negative
    pub forecasted_price: f64,
    /// Percent change from the crop's base price, two decimals
    pub price_change_percentage: f64,
    pub climate_impact: ClimateImpact,
    /// Always agrees with the sign of `price_change_percentage`
    pub market_trend: MarketTrend,
}

impl PriceForecastPoint {
    /// Whether the stored trend label matches the stored percentage change
    pub fn is_consistent(&self) -> bool {
        MarketTrend::from_change(self.price_change_percentage) == self.market_trend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_from_change() {
        assert_eq!(MarketTrend::from_change(0.01), MarketTrend::Rising);
        assert_eq!(MarketTrend::from_change(-0.01), MarketTrend::Falling);
        assert_eq!(MarketTrend::from_change(0.0), MarketTrend::Stable);
        assert_eq!(MarketTrend::from_change(-0.0), MarketTrend::Stable);
    }

    #[test]
    fn test_labels_round_trip_through_strings() {
        for trend in MarketTrend::ALL {
            assert_eq!(MarketTrend::parse(trend.as_str()), Some(trend));
        }
        assert_eq!(ClimateImpact::parse("negative"), Some(ClimateImpact::Negative));
        assert_eq!(ClimateImpact::parse("sunny"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&MarketTrend::Falling).unwrap();
        assert_eq!(json, "\"falling\"");
    }
}
