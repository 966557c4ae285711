use serde::{Deserialize, Serialize};

use crate::core::{AggregationMode, ZoomTuning};
use crate::error::{ChartError, ChartResult};
use crate::render::{LineStyle, ThemeMode};

/// Public view bootstrap configuration.
///
/// Serializable so hosts can persist/load their chart setup. Every field has
/// a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewConfig {
    #[serde(default)]
    pub aggregation: AggregationMode,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub zoom: ZoomTuning,
    #[serde(default = "default_initial_visible_variations")]
    pub initial_visible_variations: usize,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationMode::default(),
            line_style: LineStyle::default(),
            theme: ThemeMode::default(),
            zoom: ZoomTuning::default(),
            initial_visible_variations: default_initial_visible_variations(),
        }
    }
}

impl ChartViewConfig {
    #[must_use]
    pub fn new(aggregation: AggregationMode) -> Self {
        Self {
            aggregation,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_zoom_tuning(mut self, zoom: ZoomTuning) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets how many variations are visible right after a dataset loads.
    #[must_use]
    pub fn with_initial_visible_variations(mut self, count: usize) -> Self {
        self.initial_visible_variations = count;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.zoom.validate()?;
        if self.initial_visible_variations == 0 {
            return Err(ChartError::InvalidData(
                "initial visible variations must be >= 1".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::Json(format!("failed to serialize view config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Json(format!("failed to parse view config: {e}")))?;
        config.validate()
    }
}

fn default_initial_visible_variations() -> usize {
    2
}
