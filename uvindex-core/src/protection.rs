//! Static UV index banding shown next to the current reading.

use serde::{Deserialize, Serialize};

/// Highest level on the chart scale.
pub const UV_INDEX_MAX: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl ProtectionBand {
    pub fn from_uv_index(uv_index: f64) -> Self {
        match uv_index {
            x if x >= 11.0 => Self::Extreme,
            x if x >= 8.0 => Self::VeryHigh,
            x if x >= 6.0 => Self::High,
            x if x >= 3.0 => Self::Moderate,
            // negative and NaN readings land here too
            _ => Self::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very high",
            Self::Extreme => "Extreme",
        }
    }

    pub fn recommended_protection(&self) -> &'static str {
        match self {
            Self::Low => "No protection required. You can safely stay outside.",
            Self::Moderate => "Protection required. Seek shade during midday hours, wear a shirt, sunscreen and a hat.",
            Self::High => "Protection required. Reduce time in the sun between 10 a.m. and 4 p.m., cover up and use SPF 30+ sunscreen.",
            Self::VeryHigh => "Extra protection required. Avoid being outside during midday hours; shade, shirt, sunscreen and hat are a must.",
            Self::Extreme => "Extra protection required. Avoid the sun between 10 a.m. and 4 p.m. and take every precaution.",
        }
    }

    pub fn info(&self) -> &'static str {
        match self {
            Self::Low => "Low danger from the sun's UV rays for the average person.",
            Self::Moderate => "Moderate risk of harm from unprotected sun exposure.",
            Self::High => "High risk of harm from unprotected sun exposure.",
            Self::VeryHigh => "Very high risk of harm; unprotected skin can burn quickly.",
            Self::Extreme => "Extreme risk of harm; unprotected skin can burn in minutes.",
        }
    }
}

/// Integer level `0..=11` used for chart bars and colours.
pub fn chart_level(uv_index: f64) -> u8 {
    if uv_index.is_nan() || uv_index <= 0.0 {
        return 0;
    }
    uv_index.round().min(f64::from(UV_INDEX_MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(ProtectionBand::from_uv_index(0.0), ProtectionBand::Low);
        assert_eq!(ProtectionBand::from_uv_index(2.99), ProtectionBand::Low);
        assert_eq!(ProtectionBand::from_uv_index(3.0), ProtectionBand::Moderate);
        assert_eq!(ProtectionBand::from_uv_index(5.9), ProtectionBand::Moderate);
        assert_eq!(ProtectionBand::from_uv_index(6.0), ProtectionBand::High);
        assert_eq!(ProtectionBand::from_uv_index(8.0), ProtectionBand::VeryHigh);
        assert_eq!(ProtectionBand::from_uv_index(10.99), ProtectionBand::VeryHigh);
        assert_eq!(ProtectionBand::from_uv_index(11.0), ProtectionBand::Extreme);
        assert_eq!(ProtectionBand::from_uv_index(13.5), ProtectionBand::Extreme);
    }

    #[test]
    fn invalid_readings_are_low() {
        assert_eq!(ProtectionBand::from_uv_index(-1.0), ProtectionBand::Low);
        assert_eq!(ProtectionBand::from_uv_index(f64::NAN), ProtectionBand::Low);
    }

    #[test]
    fn chart_level_rounds_and_clamps() {
        assert_eq!(chart_level(4.4), 4);
        assert_eq!(chart_level(4.5), 5);
        assert_eq!(chart_level(-2.0), 0);
        assert_eq!(chart_level(14.2), 11);
        assert_eq!(chart_level(f64::NAN), 0);
    }
}
