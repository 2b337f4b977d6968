use metrics_exporter_prometheus::PrometheusHandle;
use net_benefit::config::ScoringConfig;
use net_benefit::scoring::{ImportanceScale, NetBanding, Severity, WeightingScheme};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) scoring: ScoringConfig,
}

pub(crate) fn parse_scheme(raw: &str) -> Result<WeightingScheme, String> {
    WeightingScheme::parse(raw)
        .ok_or_else(|| format!("unknown weighting scheme '{raw}' (expected sum, max or ordinal)"))
}

pub(crate) fn parse_scale(raw: &str) -> Result<ImportanceScale, String> {
    ImportanceScale::parse(raw).ok_or_else(|| {
        format!("unknown importance scale '{raw}' (expected unit, percent or ordinal)")
    })
}

pub(crate) fn parse_banding(raw: &str) -> Result<NetBanding, String> {
    NetBanding::parse(raw)
        .ok_or_else(|| format!("unknown net banding '{raw}' (expected directional or magnitude)"))
}

pub(crate) fn parse_severity(raw: &str) -> Result<Severity, String> {
    Severity::parse(raw).ok_or_else(|| {
        format!("unknown severity '{raw}' (expected none, moderate, severe, 0, 0.5 or 1)")
    })
}

/// Explicit choices win; a scheme change without a scale falls back to that scheme's scale.
pub(crate) fn resolve_session_config(
    defaults: ScoringConfig,
    scheme: Option<WeightingScheme>,
    scale: Option<ImportanceScale>,
    banding: Option<NetBanding>,
) -> ScoringConfig {
    let scheme = scheme.unwrap_or(defaults.scheme);
    let scale = scale.unwrap_or_else(|| {
        if scheme == defaults.scheme {
            defaults.scale
        } else {
            scheme.default_scale()
        }
    });

    ScoringConfig {
        scheme,
        scale,
        banding: banding.unwrap_or(defaults.banding),
    }
}
