use crate::types::{Recommendation, RiskTier};

const LOW_DETAILS: &[&str] = &[
    "Follow the planned route and timetable",
    "Check the forecast again before departure",
    "Carry standard alpine safety equipment",
    "Share your route plan with someone staying behind",
];

const MODERATE_DETAILS: &[&str] = &[
    "Set turnaround points and a latest turnaround time",
    "Avoid slopes steeper than 30 degrees where avalanche activity is reported",
    "Watch for changing weather throughout the tour",
    "Keep the group together and check in regularly",
];

const HIGH_DETAILS: &[&str] = &[
    "Pick a lower, less exposed alternative route",
    "Only continue with experienced members and full avalanche gear",
    "Stay clear of avalanche-prone terrain and cornices",
    "Agree on a firm turnaround time and respect it",
];

const EXTREME_DETAILS: &[&str] = &[
    "Postpone the tour until conditions improve",
    "If already on the route, descend by the safest known path",
    "In an emergency call Rega on 1414 or the European emergency number 112",
    "Tell others where you are and what you plan to do",
];

impl RiskTier {
    pub fn color_token(self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Moderate => "yellow",
            RiskTier::High => "orange",
            RiskTier::Extreme => "red",
        }
    }

    pub fn recommendation(self) -> Recommendation {
        let (action, message, details) = match self {
            RiskTier::Low => (
                "GO",
                "Conditions look favourable for the planned route.",
                LOW_DETAILS,
            ),
            RiskTier::Moderate => (
                "CAUTION",
                "Elevated risk. Proceed carefully and stay alert to changes.",
                MODERATE_DETAILS,
            ),
            RiskTier::High => (
                "RECONSIDER",
                "High risk. Consider postponing or choosing an easier route.",
                HIGH_DETAILS,
            ),
            RiskTier::Extreme => (
                "ABORT",
                "Extreme risk. Do not start the tour.",
                EXTREME_DETAILS,
            ),
        };

        Recommendation {
            action: action.to_string(),
            message: message.to_string(),
            details: details.iter().map(|detail| detail.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: [RiskTier; 4] = [
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::Extreme,
    ];

    #[test]
    fn every_tier_has_four_guidance_lines() {
        for tier in TIERS {
            assert_eq!(tier.recommendation().details.len(), 4, "{tier}");
        }
    }

    #[test]
    fn bundles_and_colors_are_distinct_per_tier() {
        let actions: Vec<String> = TIERS.iter().map(|tier| tier.recommendation().action).collect();
        let colors: Vec<&str> = TIERS.iter().map(|tier| tier.color_token()).collect();
        assert_eq!(actions, ["GO", "CAUTION", "RECONSIDER", "ABORT"]);
        assert_eq!(colors, ["green", "yellow", "orange", "red"]);
    }

    #[test]
    fn recommendation_is_static() {
        assert_eq!(RiskTier::High.recommendation(), RiskTier::High.recommendation());
    }
}
