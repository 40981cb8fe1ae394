//! Axis adapter boundary.
//!
//! The engine never computes axis scales itself; it consumes them through
//! the [`Axis`] trait. Two concrete adapters are provided so the engine can
//! be driven in tests and headless hosts without a full charting framework.

use crate::error::{ChartError, ChartResult};

/// Black-box domain/measure scale consumed by the renderers.
///
/// Implementations map logical values to pixel offsets along one screen
/// axis. Categorical implementations additionally resolve pixels back to
/// the category under them and report their band width.
pub trait Axis {
    /// Pixel offset of a domain or measure value.
    fn location_of(&self, value: f64) -> f64;

    /// Value under a pixel offset.
    ///
    /// Returns `Some` only for categorical axes with the pixel inside the
    /// axis range; continuous axes and out-of-range pixels yield `None`.
    fn inverse_of(&self, pixel: f64) -> Option<f64>;

    /// Width in pixels of one category band. Continuous axes report 0.0.
    fn range_band_width(&self) -> f64;

    fn is_ordinal(&self) -> bool {
        false
    }
}

/// Continuous linear scale over a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAxis {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    range_band_px: f64,
}

impl LinearAxis {
    /// Creates a linear axis mapping `[domain_start, domain_end]` onto
    /// `[range_start, range_end]`.
    ///
    /// The pixel range may be inverted (measure axes commonly map larger
    /// values to smaller y offsets).
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "axis domain must be finite and non-degenerate".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "axis range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
            range_band_px: 0.0,
        })
    }

    /// Sets a fixed band width for hosts laying out bars on a continuous
    /// domain axis.
    #[must_use]
    pub fn with_range_band(mut self, band_px: f64) -> Self {
        self.range_band_px = band_px.max(0.0);
        self
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }
}

impl Axis for LinearAxis {
    fn location_of(&self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    fn inverse_of(&self, _pixel: f64) -> Option<f64> {
        None
    }

    fn range_band_width(&self) -> f64 {
        self.range_band_px
    }
}

/// Categorical scale with evenly spaced bands over a pixel range.
///
/// Domain values are band indices expressed as `f64`; index `i` maps to
/// the center of band `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrdinalAxis {
    band_count: usize,
    range_start: f64,
    range_end: f64,
}

impl OrdinalAxis {
    pub fn new(band_count: usize, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if band_count == 0 {
            return Err(ChartError::InvalidData(
                "ordinal axis requires at least one band".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start >= range_end {
            return Err(ChartError::InvalidData(
                "ordinal axis range must be finite and ascending".to_owned(),
            ));
        }

        Ok(Self {
            band_count,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn band_count(&self) -> usize {
        self.band_count
    }
}

impl Axis for OrdinalAxis {
    fn location_of(&self, value: f64) -> f64 {
        let band = self.range_band_width();
        self.range_start + (value + 0.5) * band
    }

    fn inverse_of(&self, pixel: f64) -> Option<f64> {
        if pixel < self.range_start || pixel > self.range_end {
            return None;
        }
        let band = self.range_band_width();
        let index = ((pixel - self.range_start) / band).floor();
        Some(index.min((self.band_count - 1) as f64))
    }

    fn range_band_width(&self) -> f64 {
        (self.range_end - self.range_start) / self.band_count as f64
    }

    fn is_ordinal(&self) -> bool {
        true
    }
}
