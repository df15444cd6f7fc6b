use crate::error::Result;
use crate::risk::{classify, FactorPolicy};
use crate::types::{
    AvalancheFactor, FactorKind, GroupFactor, RiskAssessment, RiskFactors, SubScore,
    TerrainFactor, WeatherFactor,
};

/// Session-scoped holder of the current factors and their derived assessment.
///
/// Every update recomputes the assessment before returning, so readers never
/// observe factors and assessment out of step.
#[derive(Debug, Clone)]
pub struct RiskState {
    factors: RiskFactors,
    assessment: RiskAssessment,
}

impl Default for RiskState {
    fn default() -> Self {
        Self::new(RiskFactors::demo())
    }
}

impl RiskState {
    pub fn new(factors: RiskFactors) -> Self {
        let assessment = classify(&factors);
        Self {
            factors,
            assessment,
        }
    }

    pub fn factors(&self) -> &RiskFactors {
        &self.factors
    }

    pub fn assessment(&self) -> &RiskAssessment {
        &self.assessment
    }

    pub fn set_weather(&mut self, weather: WeatherFactor) -> &RiskAssessment {
        self.factors.weather = weather;
        self.recompute()
    }

    pub fn set_avalanche(&mut self, avalanche: AvalancheFactor) -> &RiskAssessment {
        self.factors.avalanche = avalanche;
        self.recompute()
    }

    pub fn set_terrain(&mut self, terrain: TerrainFactor) -> &RiskAssessment {
        self.factors.terrain = terrain;
        self.recompute()
    }

    pub fn set_group(&mut self, group: GroupFactor) -> &RiskAssessment {
        self.factors.group = group;
        self.recompute()
    }

    pub fn set_sub_score(&mut self, kind: FactorKind, score: SubScore) -> &RiskAssessment {
        *self.factors.sub_score_mut(kind) = score;
        self.recompute()
    }

    /// Leaves the state untouched when the policy rejects `value`.
    pub fn update_sub_score(
        &mut self,
        kind: FactorKind,
        value: f64,
        policy: FactorPolicy,
    ) -> Result<&RiskAssessment> {
        let score = policy.apply(kind, value)?;
        Ok(self.set_sub_score(kind, score))
    }

    fn recompute(&mut self) -> &RiskAssessment {
        self.assessment = classify(&self.factors);
        &self.assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskTier;

    #[test]
    fn default_state_is_seeded_with_demo_conditions() {
        let state = RiskState::default();
        assert_eq!(state.factors(), &RiskFactors::demo());
        assert_eq!(state.assessment().tier, RiskTier::High);
    }

    #[test]
    fn updates_recompute_the_assessment() {
        let mut state = RiskState::default();
        let calm = SubScore::new(0.0).unwrap();
        for kind in FactorKind::ALL {
            state.set_sub_score(kind, calm);
        }
        assert_eq!(state.assessment().tier, RiskTier::Low);
        assert_eq!(state.assessment().percentage, 0);

        let tier = state
            .set_avalanche(AvalancheFactor {
                score: SubScore::new(10.0).unwrap(),
                danger_level: 5,
                problem: "new snow".to_string(),
            })
            .tier;
        // 0.35 * 10
        assert_eq!(tier, RiskTier::Moderate);
        assert_eq!(state.factors().avalanche.danger_level, 5);
    }

    #[test]
    fn rejected_update_leaves_state_unchanged() {
        let mut state = RiskState::default();
        let before = state.assessment().clone();
        assert!(state
            .update_sub_score(FactorKind::Terrain, 15.0, FactorPolicy::Reject)
            .is_err());
        assert_eq!(state.assessment(), &before);
        assert_eq!(state.factors().terrain.score.value(), 5.0);
    }

    #[test]
    fn clamped_update_applies_the_bounded_value() {
        let mut state = RiskState::default();
        let assessment = state
            .update_sub_score(FactorKind::Group, 25.0, FactorPolicy::Clamp)
            .unwrap();
        // 5.7 + 0.15 * (10 - 3)
        assert!((assessment.score - 6.75).abs() < 1e-9);
        assert_eq!(state.factors().group.score.value(), 10.0);
    }

    #[test]
    fn display_fields_do_not_change_the_score() {
        let mut state = RiskState::default();
        let before = state.assessment().score;
        let mut weather = state.factors().weather.clone();
        weather.temperature_c = 30.0;
        weather.wind_speed_kmh = 120.0;
        weather.conditions = "storm".to_string();
        assert_eq!(state.set_weather(weather).score, before);
    }
}
