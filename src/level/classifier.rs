use serde::{Deserialize, Serialize};

use super::{CellContent, MapCell, TileType};

/// A noise cutoff: samples strictly below `noise_value` take this rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRule {
    pub noise_value: f64,
    /// Missing means an empty (`none`) cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<TileType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<CellContent>,
}

impl ThresholdRule {
    pub fn new(noise_value: f64, cell_type: TileType) -> Self {
        Self { noise_value, cell_type: Some(cell_type), content: Vec::new() }
    }

    pub fn with_content(mut self, content: CellContent) -> Self {
        self.content.push(content);
        self
    }

    pub fn to_cell(&self) -> MapCell {
        MapCell {
            cell_type: self.cell_type.unwrap_or_default(),
            content: self.content.clone(),
        }
    }
}

/// Threshold rules kept sorted by ascending `noise_value`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ThresholdRule>", into = "Vec<ThresholdRule>")]
pub struct Thresholds(Vec<ThresholdRule>);

impl Thresholds {
    /// Stable sort, so rules with equal values keep their configured order.
    pub fn new(mut rules: Vec<ThresholdRule>) -> Self {
        rules.sort_by(|a, b| a.noise_value.total_cmp(&b.noise_value));
        Self(rules)
    }

    pub fn rules(&self) -> &[ThresholdRule] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First rule, in ascending order, whose value is strictly above `value`
    pub fn find(&self, value: f64) -> Option<&ThresholdRule> {
        self.0.iter().find(|rule| value < rule.noise_value)
    }
}

impl From<Vec<ThresholdRule>> for Thresholds {
    fn from(rules: Vec<ThresholdRule>) -> Self {
        Self::new(rules)
    }
}

impl From<Thresholds> for Vec<ThresholdRule> {
    fn from(thresholds: Thresholds) -> Self {
        thresholds.0
    }
}

/// Classify a rescaled noise sample. Samples above every threshold fall back
/// to an empty `none` cell.
pub fn classify(value: f64, thresholds: &Thresholds) -> MapCell {
    classify_matched(value, thresholds).0
}

/// Like [`classify`], also telling whether a threshold matched
pub fn classify_matched(value: f64, thresholds: &Thresholds) -> (MapCell, bool) {
    match thresholds.find(value) {
        Some(rule) => (rule.to_cell(), true),
        None => {
            tracing::debug!(value, "no threshold matched, using none");
            (MapCell::default(), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::CellContentType;

    #[test]
    fn test_single_threshold() {
        let thresholds = Thresholds::new(vec![ThresholdRule::new(5.0, TileType::Wall)]);
        assert_eq!(classify(3.0, &thresholds).cell_type, TileType::Wall);
        assert_eq!(classify(7.0, &thresholds).cell_type, TileType::None);
        // Strictly greater: the cutoff itself does not match
        assert_eq!(classify(5.0, &thresholds).cell_type, TileType::None);
    }

    #[test]
    fn test_sorted_on_construction() {
        let thresholds = Thresholds::new(vec![
            ThresholdRule::new(80.0, TileType::Desk),
            ThresholdRule::new(20.0, TileType::Wall),
            ThresholdRule::new(50.0, TileType::None),
        ]);
        let values: Vec<f64> = thresholds.rules().iter().map(|r| r.noise_value).collect();
        assert_eq!(values, vec![20.0, 50.0, 80.0]);
        assert_eq!(classify(10.0, &thresholds).cell_type, TileType::Wall);
        assert_eq!(classify(30.0, &thresholds).cell_type, TileType::None);
        assert_eq!(classify(60.0, &thresholds).cell_type, TileType::Desk);
    }

    #[test]
    fn test_equal_values_keep_order() {
        let thresholds = Thresholds::new(vec![
            ThresholdRule::new(10.0, TileType::Desk),
            ThresholdRule::new(10.0, TileType::Wall),
        ]);
        assert_eq!(classify(1.0, &thresholds).cell_type, TileType::Desk);
    }

    #[test]
    fn test_content_and_missing_type() {
        let json = r#"[
            {"noiseValue": 60, "content": [{"type": "mobSpawnPoint"}]},
            {"noiseValue": 40, "cellType": "wall"}
        ]"#;
        let thresholds: Thresholds = serde_json::from_str(json).unwrap();
        assert_eq!(thresholds.rules()[0].noise_value, 40.0);

        let cell = classify(50.0, &thresholds);
        assert_eq!(cell.cell_type, TileType::None);
        assert_eq!(cell.content, vec![CellContent::new(CellContentType::MobSpawnPoint)]);
    }

    #[test]
    fn test_empty_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(classify(0.0, &thresholds), MapCell::default());
    }

    #[test]
    fn test_classify_matched_flags_fallback() {
        let thresholds = Thresholds::new(vec![ThresholdRule {
            noise_value: 50.0,
            cell_type: None,
            content: Vec::new(),
        }]);
        // a matched rule can still produce the default cell
        assert_eq!(classify_matched(10.0, &thresholds), (MapCell::default(), true));
        assert_eq!(classify_matched(90.0, &thresholds), (MapCell::default(), false));
    }
}
