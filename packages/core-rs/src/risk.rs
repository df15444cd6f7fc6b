use crate::error::{Result, RiskError};
use crate::types::{
    AvalancheFactor, FactorKind, GroupFactor, RiskAssessment, RiskFactors, RiskTier, SubScore,
    SubScores, TerrainFactor, WeatherFactor,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const LOW_MAX: f64 = 3.0;
const MODERATE_MAX: f64 = 5.0;
const HIGH_MAX: f64 = 7.0;

/// Weights are held in hundredths so integer sub-scores sum exactly.
fn weight_hundredths(kind: FactorKind) -> f64 {
    match kind {
        FactorKind::Weather => 30.0,
        FactorKind::Avalanche => 35.0,
        FactorKind::Terrain => 20.0,
        FactorKind::Group => 15.0,
    }
}

/// Fixed category weights. They sum to 1.0 and are not configurable.
pub struct RiskWeights;

impl RiskWeights {
    pub fn weight(kind: FactorKind) -> f64 {
        weight_hundredths(kind) / 100.0
    }
}

/// How raw sub-scores outside [0, 10] are handled at the boundary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FactorPolicy {
    #[default]
    Reject,
    Clamp,
}

impl FactorPolicy {
    /// Non-finite values are rejected under either policy.
    pub fn apply(self, factor: FactorKind, value: f64) -> Result<SubScore> {
        let score = match self {
            FactorPolicy::Reject => SubScore::new(value),
            FactorPolicy::Clamp => SubScore::clamped(value),
        }
        .ok_or(RiskError::InvalidFactorInput { factor, value })?;

        if score.value() != value {
            warn!(%factor, value, clamped = score.value(), "sub-score clamped into range");
        }
        Ok(score)
    }
}

impl RiskFactors {
    /// Builds factor records from raw numbers; display fields stay empty.
    pub fn from_scores(scores: &SubScores, policy: FactorPolicy) -> Result<Self> {
        Ok(Self {
            weather: WeatherFactor {
                score: policy.apply(FactorKind::Weather, scores.weather)?,
                ..WeatherFactor::default()
            },
            avalanche: AvalancheFactor {
                score: policy.apply(FactorKind::Avalanche, scores.avalanche)?,
                ..AvalancheFactor::default()
            },
            terrain: TerrainFactor {
                score: policy.apply(FactorKind::Terrain, scores.terrain)?,
                ..TerrainFactor::default()
            },
            group: GroupFactor {
                score: policy.apply(FactorKind::Group, scores.group)?,
                ..GroupFactor::default()
            },
        })
    }
}

impl RiskTier {
    /// Boundaries belong to the lower tier: exactly 3.0 is `Low`.
    pub fn from_score(score: f64) -> Self {
        if score <= LOW_MAX {
            RiskTier::Low
        } else if score <= MODERATE_MAX {
            RiskTier::Moderate
        } else if score <= HIGH_MAX {
            RiskTier::High
        } else {
            RiskTier::Extreme
        }
    }
}

pub fn weighted_score(factors: &RiskFactors) -> f64 {
    let total: f64 = FactorKind::ALL
        .iter()
        .map(|kind| weight_hundredths(*kind) * factors.sub_score(*kind).value())
        .sum();
    total / 100.0
}

/// Rounds half away from zero; scores are never negative so 2.5 becomes 3.
pub fn display_percentage(score: f64) -> u8 {
    (score * 10.0).round().clamp(0.0, 100.0) as u8
}

/// The category with the largest weighted contribution. Earlier kinds win ties.
pub fn dominant_factor(factors: &RiskFactors) -> FactorKind {
    let mut best = FactorKind::Weather;
    let mut best_term = f64::MIN;
    for kind in FactorKind::ALL {
        let term = weight_hundredths(kind) * factors.sub_score(kind).value();
        if term > best_term {
            best = kind;
            best_term = term;
        }
    }
    best
}

pub fn classify(factors: &RiskFactors) -> RiskAssessment {
    let score = weighted_score(factors);
    let tier = RiskTier::from_score(score);
    debug!(score, %tier, "classified route risk");

    RiskAssessment {
        score,
        tier,
        color_token: tier.color_token().to_string(),
        percentage: display_percentage(score),
        recommendation: tier.recommendation(),
    }
}

pub fn assess(scores: &SubScores, policy: FactorPolicy) -> Result<RiskAssessment> {
    let factors = RiskFactors::from_scores(scores, policy)?;
    Ok(classify(&factors))
}
