use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FillPattern};

/// One data row of a series.
///
/// `measure` is optional: missing measures render as zero-length geometry
/// instead of failing (missing-value tolerance). The optional bounds turn a
/// point marker into a range marker with a bounds line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    pub domain: f64,
    pub measure: Option<f64>,
    /// Explicit baseline offset configured by the caller, added to any
    /// stacking offset the accumulator computes.
    pub measure_offset: f64,
    pub domain_lower_bound: Option<f64>,
    pub domain_upper_bound: Option<f64>,
    pub measure_lower_bound: Option<f64>,
    pub measure_upper_bound: Option<f64>,
    pub color: Color,
    pub fill_pattern: Option<FillPattern>,
    pub stroke_width_px: Option<f64>,
    /// Custom symbol renderer id for point markers. Must name a registered
    /// renderer; unknown ids fail preprocessing.
    pub symbol_id: Option<String>,
}

impl Datum {
    #[must_use]
    pub fn new(domain: f64, measure: Option<f64>, color: Color) -> Self {
        Self {
            domain,
            measure,
            measure_offset: 0.0,
            domain_lower_bound: None,
            domain_upper_bound: None,
            measure_lower_bound: None,
            measure_upper_bound: None,
            color,
            fill_pattern: None,
            stroke_width_px: None,
            symbol_id: None,
        }
    }

    #[must_use]
    pub fn with_measure_offset(mut self, offset: f64) -> Self {
        self.measure_offset = offset;
        self
    }

    #[must_use]
    pub fn with_measure_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.measure_lower_bound = Some(lower);
        self.measure_upper_bound = Some(upper);
        self
    }

    #[must_use]
    pub fn with_symbol_id(mut self, id: impl Into<String>) -> Self {
        self.symbol_id = Some(id.into());
        self
    }

    /// Measure with missing values routed to zero.
    #[must_use]
    pub fn measure_or_zero(&self) -> f64 {
        self.measure.unwrap_or(0.0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.domain.is_finite() {
            return Err(ChartError::InvalidData(
                "datum domain must be finite".to_owned(),
            ));
        }
        if let Some(measure) = self.measure {
            if !measure.is_finite() {
                return Err(ChartError::InvalidData(
                    "datum measure must be finite when present".to_owned(),
                ));
            }
        }
        if !self.measure_offset.is_finite() {
            return Err(ChartError::InvalidData(
                "datum measure offset must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Ordered sequence of data rows sharing styling and stack membership.
///
/// Immutable during a render pass; the renderer reads it and keeps its own
/// computed attributes, never annotating the series itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    /// Stack-group label. Series sharing a category stack onto each other
    /// in grouped-stacked layouts; `None` falls back to the default stack.
    pub category: Option<String>,
    /// Overlay series are painted but excluded from hit-testing.
    pub overlay: bool,
    pub data: Vec<Datum>,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Vec<Datum>) -> Self {
        Self {
            id: id.into(),
            category: None,
            overlay: false,
            data,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn as_overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.id.is_empty() {
            return Err(ChartError::InvalidData(
                "series id must not be empty".to_owned(),
            ));
        }
        for datum in &self.data {
            datum.validate()?;
        }
        Ok(())
    }
}

/// Geometry-independent facts computed for one datum during preprocessing.
///
/// Rebuilt from scratch every pass and folded into animated elements during
/// the update phase; never retained across frames directly.
#[derive(Debug, Clone, PartialEq)]
pub struct BarElement {
    pub stack_index: usize,
    pub measure_offset: f64,
    pub cumulative_total: f64,
    pub color: Color,
    pub fill_pattern: FillPattern,
    pub stroke_width_px: f64,
}

/// Per-series attributes computed during preprocessing and consumed by the
/// update phase.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBarAttrs {
    pub group_index: usize,
    pub group_weight: f64,
    /// Total weight of groups painted before this one.
    pub previous_weight: f64,
    pub group_count: usize,
    pub stack_key: String,
    pub elements: Vec<BarElement>,
}
