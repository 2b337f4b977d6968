use crate::infra::{
    parse_banding, parse_scale, parse_scheme, parse_severity, resolve_session_config,
};
use clap::Args;
use net_benefit::config::AppConfig;
use net_benefit::error::AppError;
use net_benefit::import::OutcomeTableImporter;
use net_benefit::scoring::{
    ConstraintInputs, ImportanceScale, MagnitudeRating, NetBanding, OutcomeScore, Polarity,
    ScoreResult, Severity, WeightingScheme,
};
use net_benefit::telemetry;
use std::path::PathBuf;

const STAR_SLOTS: u8 = 3;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Outcome table exported as CSV
    pub(crate) path: PathBuf,
    /// Weighting scheme: sum, max or ordinal (defaults to NB_WEIGHTING_SCHEME)
    #[arg(long, value_parser = parse_scheme)]
    pub(crate) scheme: Option<WeightingScheme>,
    /// Importance scale: unit, percent or ordinal (defaults to the scheme's scale)
    #[arg(long, value_parser = parse_scale)]
    pub(crate) scale: Option<ImportanceScale>,
    /// Net score banding: directional or magnitude
    #[arg(long, value_parser = parse_banding)]
    pub(crate) banding: Option<NetBanding>,
    /// Cost constraint severity
    #[arg(long, value_parser = parse_severity, default_value = "none")]
    pub(crate) financial: Severity,
    /// Access constraint severity
    #[arg(long, value_parser = parse_severity, default_value = "none")]
    pub(crate) access: Severity,
    /// Care burden constraint severity
    #[arg(long, value_parser = parse_severity, default_value = "none")]
    pub(crate) care: Severity,
    /// Print the full result as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let outcomes = OutcomeTableImporter::from_path(&args.path)?;
    let session =
        resolve_session_config(config.scoring, args.scheme, args.scale, args.banding).session();
    let constraints = ConstraintInputs::new(args.financial, args.access, args.care);
    let result = session.score(&outcomes, &constraints)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!("{}", render_score_report(&result));
    }

    Ok(())
}

pub(crate) fn render_score_report(result: &ScoreResult) -> String {
    let mut lines = vec![
        "Net benefit report".to_string(),
        format!(
            "Weighting: {} ({} importances), banding: {}",
            result.scheme.label(),
            result.scale.label(),
            result.banding.label()
        ),
        format!(
            "Net score: {:+.4} ({:+} per 1000) {} {}",
            result.net_score,
            result.net_per_1000,
            result.net_arrow.symbol(),
            result.net_interpretation.label()
        ),
        String::new(),
        "Outcomes".to_string(),
    ];

    lines.extend(result.per_outcome.iter().map(outcome_line));

    lines.push(String::new());
    lines.push(format!(
        "Constraints: {} (total {:.1})",
        result.constraint_level.label(),
        result.constraint_total
    ));
    lines.extend(
        result
            .constraint_breakdown
            .iter()
            .map(|entry| format!("- {}: {}", entry.axis_label, entry.severity_label)),
    );

    lines.join("\n")
}

fn outcome_line(outcome: &OutcomeScore) -> String {
    let interval = outcome
        .confidence_interval
        .map(|ci| format!(" (95% CI {:+.4} to {:+.4})", ci.lower, ci.upper))
        .unwrap_or_default();

    format!(
        "- {} [{}] effect {:+.4}{}, importance {} {}, weight {:.4}, contribution {:+.4} {} {}",
        outcome.label,
        outcome.direction.label(),
        outcome.effect,
        interval,
        outcome.importance,
        stars(outcome.importance_stars),
        outcome.weight,
        outcome.contribution,
        outcome.arrow.symbol(),
        magnitude_bar(&outcome.magnitude)
    )
}

fn stars(filled: u8) -> String {
    let filled = filled.min(STAR_SLOTS);
    format!(
        "{}{}",
        "\u{2605}".repeat(filled as usize),
        "\u{2606}".repeat((STAR_SLOTS - filled) as usize)
    )
}

fn magnitude_bar(rating: &MagnitudeRating) -> String {
    let glyph = match rating.polarity {
        Polarity::Neutral => return "-".to_string(),
        Polarity::Positive => "+",
        Polarity::Negative => "\u{2212}",
    };
    glyph.repeat(rating.units as usize)
}
