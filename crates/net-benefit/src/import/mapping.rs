use super::normalizer::normalize_header;
use crate::scoring::{Direction, ImportanceLevel};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Fields the importer understands, whatever the sheet calls them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Column {
    Label,
    Effect,
    CiLower,
    CiUpper,
    Importance,
    Direction,
}

impl Column {
    pub(crate) const fn canonical(self) -> &'static str {
        match self {
            Self::Label => "outcome",
            Self::Effect => "risk difference",
            Self::CiLower => "95% CI lower",
            Self::CiUpper => "95% CI upper",
            Self::Importance => "importance",
            Self::Direction => "direction",
        }
    }
}

static HEADER_MAP: OnceLock<HashMap<String, Column>> = OnceLock::new();

pub(crate) fn column_for_header(header: &str) -> Option<Column> {
    header_map().get(&normalize_header(header)).copied()
}

fn header_map() -> &'static HashMap<String, Column> {
    HEADER_MAP.get_or_init(|| {
        const HEADER_TO_COLUMN: &[(&str, Column)] = &[
            // Outcome label
            ("Outcome", Column::Label),
            ("Outcome Label", Column::Label),
            ("Label", Column::Label),
            ("アウトカム", Column::Label),
            ("アウトカム名", Column::Label),
            ("評価項目", Column::Label),
            // Risk difference
            ("Risk Difference", Column::Effect),
            ("RD", Column::Effect),
            ("Effect", Column::Effect),
            ("Effect Estimate", Column::Effect),
            ("リスク差", Column::Effect),
            ("効果推定値", Column::Effect),
            // Confidence interval
            ("95% CI Lower", Column::CiLower),
            ("CI Lower", Column::CiLower),
            ("Lower", Column::CiLower),
            ("95%CI下限", Column::CiLower),
            ("95% CI 下限", Column::CiLower),
            ("下限", Column::CiLower),
            ("95% CI Upper", Column::CiUpper),
            ("CI Upper", Column::CiUpper),
            ("Upper", Column::CiUpper),
            ("95%CI上限", Column::CiUpper),
            ("95% CI 上限", Column::CiUpper),
            ("上限", Column::CiUpper),
            // Importance
            ("Importance", Column::Importance),
            ("Weight", Column::Importance),
            ("Relative Importance", Column::Importance),
            ("重要度", Column::Importance),
            ("相対的重要度", Column::Importance),
            // Direction
            ("Direction", Column::Direction),
            ("Polarity", Column::Direction),
            ("Benefit/Harm", Column::Direction),
            ("方向", Column::Direction),
            ("益/害", Column::Direction),
            ("益害", Column::Direction),
        ];

        let mut map = HashMap::with_capacity(HEADER_TO_COLUMN.len());
        for (header, column) in HEADER_TO_COLUMN {
            map.insert(normalize_header(header), *column);
        }
        map
    })
}

pub(crate) fn direction_for_cell(value: &str) -> Option<Direction> {
    match value.trim().to_lowercase().as_str() {
        "beneficial" | "benefit" | "+1" | "1" | "益" => Some(Direction::Beneficial),
        "harmful" | "harm" | "-1" | "害" => Some(Direction::Harmful),
        _ => None,
    }
}

pub(crate) fn importance_level_for_cell(value: &str) -> Option<ImportanceLevel> {
    match value.trim().to_lowercase().as_str() {
        "high" | "高" | "重要" => Some(ImportanceLevel::High),
        "medium" | "mid" | "中" | "やや重要" => Some(ImportanceLevel::Medium),
        "low" | "低" | "重要でない" => Some(ImportanceLevel::Low),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_headers_map_to_columns() {
        assert_eq!(column_for_header("リスク差"), Some(Column::Effect));
        assert_eq!(column_for_header(" 95％CI下限 "), Some(Column::CiLower));
        assert_eq!(column_for_header("RISK  DIFFERENCE"), Some(Column::Effect));
        assert_eq!(column_for_header("Comments"), None);
    }

    #[test]
    fn direction_cells_accept_symbols_and_words() {
        assert_eq!(direction_for_cell("害"), Some(Direction::Harmful));
        assert_eq!(direction_for_cell("Benefit"), Some(Direction::Beneficial));
        assert_eq!(direction_for_cell("-1"), Some(Direction::Harmful));
        assert_eq!(direction_for_cell("sideways"), None);
    }

    #[test]
    fn lone_sign_placeholders_are_not_directions() {
        assert_eq!(direction_for_cell("-"), None);
        assert_eq!(direction_for_cell(" + "), None);
        assert_eq!(direction_for_cell("+1"), Some(Direction::Beneficial));
    }
}
