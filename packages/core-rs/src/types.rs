use crate::error::SubScoreRangeError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FactorKind {
    Weather,
    Avalanche,
    Terrain,
    Group,
}

impl FactorKind {
    pub const ALL: [FactorKind; 4] = [
        FactorKind::Weather,
        FactorKind::Avalanche,
        FactorKind::Terrain,
        FactorKind::Group,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FactorKind::Weather => "weather",
            FactorKind::Avalanche => "avalanche",
            FactorKind::Terrain => "terrain",
            FactorKind::Group => "group",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category rating on the fixed 0-10 scale. Always finite and in range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct SubScore(f64);

impl SubScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;

    /// Returns `None` for non-finite or out-of-range values.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Pulls finite values into range. Non-finite values still yield `None`.
    pub fn clamped(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self(value.clamp(Self::MIN, Self::MAX)))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SubScore {
    type Error = SubScoreRangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        SubScore::new(value).ok_or(SubScoreRangeError(value))
    }
}

impl From<SubScore> for f64 {
    fn from(score: SubScore) -> Self {
        score.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherFactor {
    pub score: SubScore,
    #[serde(default)]
    pub temperature_c: f64,
    #[serde(default)]
    pub wind_speed_kmh: f64,
    #[serde(default)]
    pub visibility_km: f64,
    #[serde(default)]
    pub conditions: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvalancheFactor {
    pub score: SubScore,
    /// European avalanche danger scale, 1-5.
    #[serde(default)]
    pub danger_level: u8,
    #[serde(default)]
    pub problem: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerrainFactor {
    pub score: SubScore,
    #[serde(default)]
    pub slope_angle_deg: f64,
    #[serde(default)]
    pub elevation_m: u32,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupFactor {
    pub score: SubScore,
    #[serde(default)]
    pub group_size: u32,
    #[serde(default)]
    pub experience_level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RiskFactors {
    pub weather: WeatherFactor,
    pub avalanche: AvalancheFactor,
    pub terrain: TerrainFactor,
    pub group: GroupFactor,
}

impl RiskFactors {
    pub fn sub_score(&self, kind: FactorKind) -> SubScore {
        match kind {
            FactorKind::Weather => self.weather.score,
            FactorKind::Avalanche => self.avalanche.score,
            FactorKind::Terrain => self.terrain.score,
            FactorKind::Group => self.group.score,
        }
    }

    pub fn sub_score_mut(&mut self, kind: FactorKind) -> &mut SubScore {
        match kind {
            FactorKind::Weather => &mut self.weather.score,
            FactorKind::Avalanche => &mut self.avalanche.score,
            FactorKind::Terrain => &mut self.terrain.score,
            FactorKind::Group => &mut self.group.score,
        }
    }

    pub fn scores(&self) -> SubScores {
        SubScores {
            weather: self.weather.score.value(),
            avalanche: self.avalanche.score.value(),
            terrain: self.terrain.score.value(),
            group: self.group.score.value(),
        }
    }

    /// Static demo conditions used to seed a fresh session.
    pub fn demo() -> Self {
        Self {
            weather: WeatherFactor {
                score: SubScore(6.0),
                temperature_c: -4.0,
                wind_speed_kmh: 45.0,
                visibility_km: 8.0,
                conditions: "snow showers".to_string(),
            },
            avalanche: AvalancheFactor {
                score: SubScore(7.0),
                danger_level: 3,
                problem: "wind slab".to_string(),
            },
            terrain: TerrainFactor {
                score: SubScore(5.0),
                slope_angle_deg: 35.0,
                elevation_m: 3100,
                difficulty: "T4 alpine hiking".to_string(),
            },
            group: GroupFactor {
                score: SubScore(3.0),
                group_size: 4,
                experience_level: "intermediate".to_string(),
            },
        }
    }
}

/// Raw, unvalidated sub-scores as they arrive from data sources.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SubScores {
    pub weather: f64,
    pub avalanche: f64,
    pub terrain: f64,
    pub group: f64,
}

impl SubScores {
    pub fn new(weather: f64, avalanche: f64, terrain: f64, group: f64) -> Self {
        Self {
            weather,
            avalanche,
            terrain,
            group,
        }
    }

    pub fn get(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::Weather => self.weather,
            FactorKind::Avalanche => self.avalanche,
            FactorKind::Terrain => self.terrain,
            FactorKind::Group => self.group,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Extreme,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
            RiskTier::Extreme => "EXTREME",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub action: String,
    pub message: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: f64,
    pub tier: RiskTier,
    pub color_token: String,
    pub percentage: u8,
    pub recommendation: Recommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_score_rejects_out_of_range_and_non_finite() {
        assert!(SubScore::new(-0.1).is_none());
        assert!(SubScore::new(10.01).is_none());
        assert!(SubScore::new(f64::NAN).is_none());
        assert!(SubScore::new(f64::INFINITY).is_none());
        assert_eq!(SubScore::new(0.0).map(SubScore::value), Some(0.0));
        assert_eq!(SubScore::new(10.0).map(SubScore::value), Some(10.0));
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        assert_eq!(SubScore::clamped(-3.0).map(SubScore::value), Some(0.0));
        assert_eq!(SubScore::clamped(42.0).map(SubScore::value), Some(10.0));
        assert_eq!(SubScore::clamped(4.5).map(SubScore::value), Some(4.5));
        assert!(SubScore::clamped(f64::NAN).is_none());
        assert!(SubScore::clamped(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn factor_records_reject_bad_scores_when_deserialised() {
        let ok: WeatherFactor = serde_json::from_str(r#"{"score": 4.0}"#).unwrap();
        assert_eq!(ok.score.value(), 4.0);
        assert!(ok.conditions.is_empty());

        let bad = serde_json::from_str::<WeatherFactor>(r#"{"score": 11.0}"#);
        assert!(bad.is_err());

        let missing = serde_json::from_str::<GroupFactor>(r#"{"groupSize": 3}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn sub_scores_require_every_category() {
        let missing = serde_json::from_str::<SubScores>(r#"{"weather": 1, "avalanche": 2, "terrain": 3}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn tiers_order_by_severity() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
        assert!(RiskTier::High < RiskTier::Extreme);
        assert_eq!(serde_json::to_string(&RiskTier::Extreme).unwrap(), "\"EXTREME\"");
    }

    #[test]
    fn demo_factors_expose_scores_by_kind() {
        let factors = RiskFactors::demo();
        assert_eq!(factors.sub_score(FactorKind::Avalanche).value(), 7.0);
        assert_eq!(factors.scores(), SubScores::new(6.0, 7.0, 5.0, 3.0));
    }
}
