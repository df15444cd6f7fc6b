//! Trail Guardian CLI
//!
//! Usage:
//!   trail-guardian assess --weather 6 --avalanche 7 --terrain 5 --group 3
//!   trail-guardian demo --json
//!   trail-guardian heat --temp 31 --humidity 60 --location basel --age 70
//!   trail-guardian trigger --location geneva --feels-like 36 --threshold 35 --payout 200

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trail_guardian_core::{
    assess, dominant_factor, heat_index, load_config, lookup_city, personal_recommendations,
    predict_heatwave_risk, FactorPolicy, HeatwaveRisk, ParametricTrigger, RiskAssessment,
    RiskState, SubScores, UserProfile,
};

#[derive(Parser, Debug)]
#[command(name = "trail-guardian", about = "Alpine route risk and heatwave assessments")]
struct Args {
    /// Configuration file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify route risk from four 0-10 sub-scores
    Assess {
        #[arg(long)]
        weather: f64,
        #[arg(long)]
        avalanche: f64,
        #[arg(long)]
        terrain: f64,
        #[arg(long)]
        group: f64,
        /// Clamp out-of-range sub-scores instead of rejecting them
        #[arg(long)]
        clamp: bool,
    },
    /// Classify the seeded session conditions
    Demo,
    /// Heatwave risk and personal advice for a Swiss city
    Heat {
        /// Air temperature in °C
        #[arg(long)]
        temp: f64,
        /// Relative humidity in percent
        #[arg(long, default_value_t = 60.0)]
        humidity: f64,
        #[arg(long)]
        location: String,
        #[arg(long, default_value_t = 35)]
        age: u32,
        #[arg(long, default_value = "")]
        occupation: String,
        /// Health condition, repeatable
        #[arg(long = "condition")]
        conditions: Vec<String>,
    },
    /// Evaluate a parametric heat insurance trigger
    Trigger {
        #[arg(long, default_value = "cli")]
        id: String,
        #[arg(long)]
        location: String,
        /// Current feels-like temperature in °C
        #[arg(long)]
        feels_like: f64,
        /// Feels-like threshold in °C
        #[arg(long)]
        threshold: f64,
        #[arg(long)]
        payout: f64,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatPayload {
    location: String,
    station: String,
    feels_like: f64,
    risk: HeatwaveRisk,
    recommendations: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = if args.verbose {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Assess {
            weather,
            avalanche,
            terrain,
            group,
            clamp,
        } => {
            let config = load_config(args.config.as_deref()).context("loading configuration")?;
            let policy = if clamp {
                FactorPolicy::Clamp
            } else {
                config.factor_policy
            };
            let scores = SubScores::new(weather, avalanche, terrain, group);
            let assessment = assess(&scores, policy)?;
            print_assessment(&assessment, None, args.json)
        }
        Command::Demo => {
            let config = load_config(args.config.as_deref()).context("loading configuration")?;
            let state = RiskState::new(config.seed_factors()?);
            let dominant = dominant_factor(state.factors());
            info!(%dominant, "seeded session conditions");
            print_assessment(state.assessment(), Some(dominant.as_str()), args.json)
        }
        Command::Heat {
            temp,
            humidity,
            location,
            age,
            occupation,
            conditions,
        } => {
            let city = lookup_city(&location)?;
            let feels_like = heat_index(temp, humidity);
            let risk = predict_heatwave_risk(temp, feels_like, city.name);
            let user = UserProfile {
                age,
                location: city.name.to_string(),
                health_conditions: conditions,
                occupation,
                ..UserProfile::default()
            };
            let payload = HeatPayload {
                location: city.name.to_string(),
                station: city.station.to_string(),
                feels_like,
                recommendations: personal_recommendations(&user, risk.severity),
                risk,
            };

            if args.json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} ({}): {:.1} °C, feels like {:.1} °C",
                    payload.location, payload.station, temp, payload.feels_like
                );
                println!(
                    "Heatwave risk {}/100, severity {}",
                    payload.risk.risk_score, payload.risk.severity
                );
                for line in &payload.recommendations {
                    println!("  - {line}");
                }
            }
            Ok(())
        }
        Command::Trigger {
            id,
            location,
            feels_like,
            threshold,
            payout,
        } => {
            let city = lookup_city(&location)?;
            let trigger = ParametricTrigger {
                trigger_id: id,
                location: city.name.to_string(),
                temperature_threshold: threshold,
                duration_threshold_hours: 0,
                payout_amount: payout,
            };
            let outcome = trigger.evaluate(feels_like);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if outcome.is_triggered {
                println!(
                    "Trigger {} fired: {:.1} °C >= {:.1} °C, payout {:.2}",
                    outcome.trigger_id,
                    outcome.current_temperature,
                    outcome.threshold,
                    outcome.payout_amount
                );
            } else {
                println!(
                    "Trigger {} not met: {:.1} °C < {:.1} °C",
                    outcome.trigger_id, outcome.current_temperature, outcome.threshold
                );
            }
            Ok(())
        }
    }
}

fn print_assessment(assessment: &RiskAssessment, dominant: Option<&str>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(assessment)?);
        return Ok(());
    }

    println!(
        "Risk {} ({}%, score {:.2}, {})",
        assessment.tier, assessment.percentage, assessment.score, assessment.color_token
    );
    if let Some(kind) = dominant {
        println!("Largest contribution: {kind}");
    }
    println!(
        "{}: {}",
        assessment.recommendation.action, assessment.recommendation.message
    );
    for detail in &assessment.recommendation.details {
        println!("  - {detail}");
    }
    Ok(())
}
