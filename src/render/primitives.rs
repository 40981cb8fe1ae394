use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Per-channel linear blend from `previous` towards `target`.
    #[must_use]
    pub fn lerp(previous: Self, target: Self, percent: f64) -> Self {
        let blend = |from: f64, to: f64| from + (to - from) * percent;
        Self {
            red: blend(previous.red, target.red),
            green: blend(previous.green, target.green),
            blue: blend(previous.blue, target.blue),
            alpha: blend(previous.alpha, target.alpha),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Axis-aligned pixel rectangle stored as its four edges.
///
/// Animation lerps the edges independently rather than center+size, so two
/// rectangles interpolate the same way their edges would individually.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    #[must_use]
    pub fn lerp(previous: Self, target: Self, percent: f64) -> Self {
        let blend = |from: f64, to: f64| from + (to - from) * percent;
        Self {
            left: blend(previous.left, target.left),
            top: blend(previous.top, target.top),
            right: blend(previous.right, target.right),
            bottom: blend(previous.bottom, target.bottom),
        }
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// True when the rectangles share no area at all.
    #[must_use]
    pub fn is_fully_outside(self, bounds: Self) -> bool {
        self.right <= bounds.left
            || self.left >= bounds.right
            || self.bottom <= bounds.top
            || self.top >= bounds.bottom
    }

    pub fn validate(self) -> ChartResult<()> {
        for (edge, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "rect edge `{edge}` must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// One pixel-space location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Fill texture applied to a bar or marker body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillPattern {
    #[default]
    Solid,
    ForwardHatch,
}

/// How bar corners are rounded when painting a bar stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CornerStrategy {
    /// Fixed radius, clamped to half the bar's thickness.
    Constant(f64),
    NoCorner,
}

impl CornerStrategy {
    /// Radius for a stack whose thickest bar measures `max_bar_thickness`.
    #[must_use]
    pub fn radius(self, max_bar_thickness: f64) -> f64 {
        match self {
            Self::Constant(radius) => radius.max(0.0).min(max_bar_thickness / 2.0),
            Self::NoCorner => 0.0,
        }
    }
}
