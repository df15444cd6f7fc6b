//! Heatwave early warning for Swiss lowland cities.
//!
//! Feels-like temperature, a threshold-based heatwave score, personalised
//! advice and parametric insurance triggers. All functions are pure; weather
//! readings are supplied by the caller.

use crate::error::{Result, RiskError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwissCity {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// MeteoSwiss station code.
    pub station: &'static str,
}

pub const SWISS_CITIES: &[SwissCity] = &[
    SwissCity { name: "zurich", lat: 47.3769, lon: 8.5417, station: "ZUR" },
    SwissCity { name: "basel", lat: 47.5596, lon: 7.5886, station: "BAS" },
    SwissCity { name: "geneva", lat: 46.2044, lon: 6.1432, station: "GVE" },
    SwissCity { name: "bern", lat: 46.9481, lon: 7.4474, station: "BER" },
    SwissCity { name: "lausanne", lat: 46.5197, lon: 6.6323, station: "LAU" },
    SwissCity { name: "lucerne", lat: 47.0502, lon: 8.3093, station: "LUZ" },
];

/// Cities that typically run hotter than the rest.
const WARM_CITIES: &[&str] = &["basel", "geneva"];

const PREDICTION_CONFIDENCE: f64 = 0.85;
const MAX_RECOMMENDATIONS: usize = 10;

pub fn lookup_city(name: &str) -> Result<&'static SwissCity> {
    let lowered = name.trim().to_lowercase();
    SWISS_CITIES
        .iter()
        .find(|city| city.name == lowered)
        .ok_or_else(|| RiskError::UnsupportedLocation(name.to_string()))
}

/// Feels-like temperature in °C from air temperature and relative humidity.
pub fn heat_index(temp_c: f64, humidity_pct: f64) -> f64 {
    let t = temp_c * 9.0 / 5.0 + 32.0;
    if t < 80.0 {
        return temp_c;
    }

    let rh = humidity_pct;
    let mut hi = 0.5 * (t + 61.0 + (t - 68.0) * 1.2 + rh * 0.094);
    if hi >= 80.0 {
        // Rothfusz regression
        hi = -42.379 + 2.04901523 * t + 10.14333127 * rh
            - 0.22475541 * t * rh
            - 6.83783e-3 * t.powi(2)
            - 5.481717e-2 * rh.powi(2)
            + 1.22874e-3 * t.powi(2) * rh
            + 8.5282e-4 * t * rh.powi(2)
            - 1.99e-6 * t.powi(2) * rh.powi(2);
    }

    (hi - 32.0) * 5.0 / 9.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HeatSeverity {
    Green,
    Yellow,
    Orange,
    Red,
}

impl HeatSeverity {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            HeatSeverity::Red
        } else if score >= 60 {
            HeatSeverity::Orange
        } else if score >= 40 {
            HeatSeverity::Yellow
        } else {
            HeatSeverity::Green
        }
    }

    pub fn is_alert(self) -> bool {
        self != HeatSeverity::Green
    }
}

impl fmt::Display for HeatSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HeatSeverity::Green => "green",
            HeatSeverity::Yellow => "yellow",
            HeatSeverity::Orange => "orange",
            HeatSeverity::Red => "red",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatFactors {
    pub temperature: f64,
    pub feels_like: f64,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatwaveRisk {
    /// 0-100
    pub risk_score: u8,
    pub severity: HeatSeverity,
    pub prediction_confidence: f64,
    pub factors: HeatFactors,
}

pub fn predict_heatwave_risk(temp_c: f64, feels_like_c: f64, location: &str) -> HeatwaveRisk {
    let mut score: u32 = 0;

    for (threshold, points) in [(32.0, 40), (35.0, 30), (38.0, 30)] {
        if feels_like_c >= threshold {
            score += points;
        }
    }
    for (threshold, points) in [(30.0, 20), (33.0, 25), (36.0, 25)] {
        if temp_c >= threshold {
            score += points;
        }
    }

    let lowered = location.to_lowercase();
    if WARM_CITIES.contains(&lowered.as_str()) {
        score += 10;
    }

    let risk_score = score.min(100) as u8;
    let severity = HeatSeverity::from_score(risk_score);
    debug!(location, risk_score, %severity, "predicted heatwave risk");

    HeatwaveRisk {
        risk_score,
        severity,
        prediction_confidence: PREDICTION_CONFIDENCE,
        factors: HeatFactors {
            temperature: temp_c,
            feels_like: feels_like_c,
            location: location.to_string(),
        },
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub location: String,
    /// low, medium or high
    pub vulnerability_level: String,
    pub health_conditions: Vec<String>,
    pub occupation: String,
}

const BASE_ADVICE: &[&str] = &[
    "Stay hydrated - drink water every 15-20 minutes",
    "Avoid outdoor activities between 11 AM and 4 PM",
    "Wear light-colored, loose-fitting clothing",
    "Seek air-conditioned spaces during peak heat",
];

const SENIOR_ADVICE: &[&str] = &[
    "Check in with family or neighbours regularly",
    "Keep curtains closed during the day",
    "Take cool showers or baths",
    "Monitor for signs of heat exhaustion",
];

const CHILD_ADVICE: &[&str] = &[
    "Supervise children closely outdoors",
    "Apply sunscreen every 2 hours",
    "Provide frequent water breaks",
];

const OUTDOOR_WORK_ADVICE: &[&str] = &[
    "Schedule work for early morning or late evening",
    "Take frequent breaks in shade",
    "Use cooling towels and electrolyte replacement",
];

const URGENT_ADVICE: &[&str] = &[
    "URGENT: Seek immediate cooling if feeling unwell",
    "Consider relocating to a cooling center",
    "Keep emergency contacts ready: 144 (medical), 117 (police)",
];

const OUTDOOR_OCCUPATIONS: &[&str] = &["construction", "agriculture", "outdoor"];

pub const NO_ALERT_ADVICE: &str = "No specific recommendations - conditions are normal";

pub fn personal_recommendations(user: &UserProfile, severity: HeatSeverity) -> Vec<String> {
    if !severity.is_alert() {
        return vec![NO_ALERT_ADVICE.to_string()];
    }

    let mut advice: Vec<&str> = BASE_ADVICE.to_vec();

    if user.age >= 65 {
        advice.extend_from_slice(SENIOR_ADVICE);
    } else if user.age <= 12 {
        advice.extend_from_slice(CHILD_ADVICE);
    }

    let has_condition = |name: &str| {
        user.health_conditions
            .iter()
            .any(|condition| condition.eq_ignore_ascii_case(name))
    };
    if has_condition("cardiovascular") {
        advice.push("Consult a doctor before outdoor exercise");
    }
    if has_condition("respiratory") {
        advice.push("Monitor air quality and avoid polluted areas");
    }

    let occupation = user.occupation.to_lowercase();
    if OUTDOOR_OCCUPATIONS.contains(&occupation.as_str()) {
        advice.extend_from_slice(OUTDOOR_WORK_ADVICE);
    }

    if severity == HeatSeverity::Red {
        advice.extend_from_slice(URGENT_ADVICE);
    }

    advice.truncate(MAX_RECOMMENDATIONS);
    advice.into_iter().map(str::to_string).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParametricTrigger {
    pub trigger_id: String,
    pub location: String,
    /// Feels-like temperature in °C at or above which the trigger fires.
    pub temperature_threshold: f64,
    #[serde(default)]
    pub duration_threshold_hours: u32,
    pub payout_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOutcome {
    pub trigger_id: String,
    pub is_triggered: bool,
    pub current_temperature: f64,
    pub threshold: f64,
    pub payout_amount: f64,
}

impl ParametricTrigger {
    pub fn evaluate(&self, feels_like_c: f64) -> TriggerOutcome {
        let is_triggered = feels_like_c >= self.temperature_threshold;
        TriggerOutcome {
            trigger_id: self.trigger_id.clone(),
            is_triggered,
            current_temperature: feels_like_c,
            threshold: self.temperature_threshold,
            payout_amount: if is_triggered { self.payout_amount } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup_city(" Basel ").unwrap().station, "BAS");
        assert!(matches!(
            lookup_city("zermatt"),
            Err(RiskError::UnsupportedLocation(name)) if name == "zermatt"
        ));
    }

    #[test]
    fn mild_temperatures_feel_like_themselves() {
        assert_eq!(heat_index(22.0, 70.0), 22.0);
        assert_eq!(heat_index(-5.0, 90.0), -5.0);
    }

    #[test]
    fn humid_heat_feels_hotter() {
        // 86 °F at 60 % is 91 °F on the NWS chart
        assert_abs_diff_eq!(heat_index(30.0, 60.0), 32.83, epsilon = 0.05);
        assert!(heat_index(32.0, 80.0) > heat_index(32.0, 40.0));
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(HeatSeverity::from_score(39), HeatSeverity::Green);
        assert_eq!(HeatSeverity::from_score(40), HeatSeverity::Yellow);
        assert_eq!(HeatSeverity::from_score(60), HeatSeverity::Orange);
        assert_eq!(HeatSeverity::from_score(80), HeatSeverity::Red);
    }

    #[test]
    fn heatwave_score_accumulates_and_caps() {
        let calm = predict_heatwave_risk(25.0, 25.0, "zurich");
        assert_eq!(calm.risk_score, 0);
        assert_eq!(calm.severity, HeatSeverity::Green);

        let warm = predict_heatwave_risk(29.0, 32.0, "bern");
        assert_eq!(warm.risk_score, 40);
        assert_eq!(warm.severity, HeatSeverity::Yellow);

        let hot = predict_heatwave_risk(30.0, 32.8, "zurich");
        assert_eq!(hot.risk_score, 60);
        assert_eq!(hot.severity, HeatSeverity::Orange);

        let extreme = predict_heatwave_risk(34.0, 36.0, "Basel");
        assert_eq!(extreme.risk_score, 100);
        assert_eq!(extreme.severity, HeatSeverity::Red);
        assert_eq!(extreme.prediction_confidence, 0.85);
    }

    #[test]
    fn warm_city_bonus_applies() {
        let zurich = predict_heatwave_risk(30.0, 30.0, "zurich");
        let geneva = predict_heatwave_risk(30.0, 30.0, "geneva");
        assert_eq!(geneva.risk_score, zurich.risk_score + 10);
    }

    #[test]
    fn green_severity_gives_single_line() {
        let user = UserProfile {
            age: 80,
            ..UserProfile::default()
        };
        assert_eq!(
            personal_recommendations(&user, HeatSeverity::Green),
            vec![NO_ALERT_ADVICE.to_string()]
        );
    }

    #[test]
    fn recommendations_are_personalised_and_capped() {
        let user = UserProfile {
            age: 70,
            health_conditions: vec!["Cardiovascular".to_string()],
            occupation: "construction".to_string(),
            ..UserProfile::default()
        };
        let advice = personal_recommendations(&user, HeatSeverity::Red);
        assert_eq!(advice.len(), 10);
        assert_eq!(advice[4], SENIOR_ADVICE[0]);
        assert_eq!(advice[8], "Consult a doctor before outdoor exercise");
        assert_eq!(advice[9], OUTDOOR_WORK_ADVICE[0]);
        assert!(!advice.iter().any(|line| line.starts_with("URGENT")));
    }

    #[test]
    fn children_get_child_advice_and_urgent_items_fit() {
        let user = UserProfile {
            age: 8,
            ..UserProfile::default()
        };
        let advice = personal_recommendations(&user, HeatSeverity::Red);
        assert_eq!(advice.len(), 10);
        assert_eq!(advice[4], CHILD_ADVICE[0]);
        assert_eq!(advice[7], URGENT_ADVICE[0]);
    }

    #[test]
    fn parametric_trigger_pays_only_when_triggered() {
        let trigger = ParametricTrigger {
            trigger_id: "t-1".to_string(),
            location: "basel".to_string(),
            temperature_threshold: 35.0,
            duration_threshold_hours: 6,
            payout_amount: 250.0,
        };
        let below = trigger.evaluate(34.9);
        assert!(!below.is_triggered);
        assert_eq!(below.payout_amount, 0.0);

        let at = trigger.evaluate(35.0);
        assert!(at.is_triggered);
        assert_eq!(at.payout_amount, 250.0);
        assert_eq!(at.threshold, 35.0);
    }
}
