//! Row-weight layout for field editors
//!
//! Content rows share the available height in proportion to their weight,
//! with one trailing action row. With the default weights each of `n`
//! content rows gets `3 / (3n + 1)` and the action row `1 / (3n + 1)`.

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;

/// Weights for content rows and the action row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWeights {
    pub content: u32,
    pub action: u32,
}

impl Default for RowWeights {
    fn default() -> Self {
        Self {
            content: 3,
            action: 1,
        }
    }
}

impl From<&EditorConfig> for RowWeights {
    fn from(config: &EditorConfig) -> Self {
        Self {
            content: config.content_row_weight,
            action: config.action_row_weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Content,
    Action,
}

/// One laid-out row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub kind: RowKind,
    pub weight: u32,
    /// Fraction of the total height, in `0.0..=1.0`.
    pub share: f64,
}

impl Row {
    pub fn percent_height(&self) -> f64 {
        self.share * 100.0
    }
}

/// Content rows followed by a single action row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    rows: Vec<Row>,
    total_weight: u64,
}

impl RowLayout {
    /// Layout for `content_rows` content rows plus the action row.
    ///
    /// A zero action weight is treated as one so the action row stays
    /// visible. Weights are summed in `u64`, which cannot overflow for any
    /// row count that fits in memory.
    pub fn compressed(content_rows: usize, weights: RowWeights) -> Self {
        let action = weights.action.max(1);
        let content = weights.content;
        let total_weight = u64::from(content)
            .saturating_mul(content_rows as u64)
            .saturating_add(u64::from(action));
        let total = total_weight as f64;

        let mut rows = Vec::with_capacity(content_rows + 1);
        rows.extend((0..content_rows).map(|_| Row {
            kind: RowKind::Content,
            weight: content,
            share: f64::from(content) / total,
        }));
        rows.push(Row {
            kind: RowKind::Action,
            weight: action,
            share: f64::from(action) / total,
        });

        Self { rows, total_weight }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn content_rows(&self) -> usize {
        self.rows.len() - 1
    }

    /// The trailing action row.
    pub fn action_row(&self) -> Row {
        // Constructed with at least the action row.
        self.rows[self.rows.len() - 1]
    }

    /// Row heights in percent, in display order.
    pub fn percent_heights(&self) -> Vec<f64> {
        self.rows.iter().map(Row::percent_height).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_content_rows() {
        let layout = RowLayout::compressed(0, RowWeights::default());
        assert_eq!(layout.rows().len(), 1);
        assert_eq!(layout.action_row().percent_height(), 100.0);
        assert_eq!(layout.total_weight(), 1);
    }

    #[test]
    fn test_two_content_rows() {
        let layout = RowLayout::compressed(2, RowWeights::default());
        assert_eq!(layout.total_weight(), 7);
        assert_eq!(layout.content_rows(), 2);
        let heights = layout.percent_heights();
        assert!((heights[0] - 300.0 / 7.0).abs() < 1e-9);
        assert!((heights[2] - 100.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_from_config() {
        let config = EditorConfig {
            content_row_weight: 2,
            action_row_weight: 2,
        };
        let layout = RowLayout::compressed(1, RowWeights::from(&config));
        assert_eq!(layout.percent_heights(), vec![50.0, 50.0]);
    }

    #[test]
    fn test_totals_beyond_u32_keep_growing() {
        let weights = RowWeights { content: u32::MAX, action: 1 };
        let two = RowLayout::compressed(2, weights);
        let three = RowLayout::compressed(3, weights);
        assert_eq!(two.total_weight(), 2 * u64::from(u32::MAX) + 1);
        assert_eq!(three.total_weight(), 3 * u64::from(u32::MAX) + 1);
        assert!(three.action_row().share < two.action_row().share);
        assert!(three.action_row().share > 0.0);
    }

    #[test]
    fn test_zero_action_weight_clamped() {
        let layout = RowLayout::compressed(1, RowWeights { content: 3, action: 0 });
        assert_eq!(layout.action_row().weight, 1);
        assert!(layout.action_row().share > 0.0);
    }
}
