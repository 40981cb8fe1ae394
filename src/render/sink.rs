use crate::error::{ChartError, ChartResult};
use crate::render::primitives::{Color, FillPattern, Point, Rect};

/// Per-corner rounding radii for one bar rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl CornerRadii {
    #[must_use]
    pub const fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }
}

/// One styled rectangle inside a bar-stack draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPrimitive {
    pub bounds: Rect,
    pub fill: Color,
    pub fill_pattern: FillPattern,
    pub stroke_width_px: f64,
    pub radii: CornerRadii,
    pub dash_pattern: Option<Vec<f64>>,
}

impl BarPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        self.bounds.validate()?;
        self.fill.validate()?;
        if !self.stroke_width_px.is_finite() || self.stroke_width_px < 0.0 {
            return Err(ChartError::InvalidData(
                "bar stroke width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Ordered batch of rectangles painted as one atomic visual bar stack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarStackPrimitive {
    pub bars: Vec<BarPrimitive>,
}

impl BarStackPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        for bar in &self.bars {
            bar.validate()?;
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub from: Point,
    pub to: Point,
    pub stroke_width_px: f64,
    pub color: Color,
    pub dash_pattern: Option<Vec<f64>>,
}

impl LinePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.from.x.is_finite()
            || !self.from.y.is_finite()
            || !self.to.x.is_finite()
            || !self.to.y.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one circular/symbol marker in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPrimitive {
    pub center: Point,
    pub radius_px: f64,
    pub fill: Color,
    pub stroke_width_px: f64,
}

impl PointPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(ChartError::InvalidData(
                "point center must be finite".to_owned(),
            ));
        }
        if !self.radius_px.is_finite() || self.radius_px < 0.0 {
            return Err(ChartError::InvalidData(
                "point radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Contract implemented by any drawing backend.
///
/// Renderers emit fully materialized, deterministic primitives so drawing
/// code stays isolated from layout and animation logic.
pub trait DrawingSink {
    fn draw_bar_stack(&mut self, stack: &BarStackPrimitive) -> ChartResult<()>;
    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()>;
    fn draw_point(&mut self, point: &PointPrimitive) -> ChartResult<()>;
}

/// No-op sink used by tests and headless hosts.
///
/// It still validates every primitive so tests catch invalid geometry
/// before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullSink {
    pub last_bar_stack_count: usize,
    pub last_bar_count: usize,
    pub last_line_count: usize,
    pub last_point_count: usize,
}

impl NullSink {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl DrawingSink for NullSink {
    fn draw_bar_stack(&mut self, stack: &BarStackPrimitive) -> ChartResult<()> {
        stack.validate()?;
        self.last_bar_stack_count += 1;
        self.last_bar_count += stack.bars.len();
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        self.last_line_count += 1;
        Ok(())
    }

    fn draw_point(&mut self, point: &PointPrimitive) -> ChartResult<()> {
        point.validate()?;
        self.last_point_count += 1;
        Ok(())
    }
}

/// Sink that retains every primitive it receives, for geometry assertions.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub bar_stacks: Vec<BarStackPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub points: Vec<PointPrimitive>,
}

impl CollectingSink {
    pub fn clear(&mut self) {
        self.bar_stacks.clear();
        self.lines.clear();
        self.points.clear();
    }
}

impl DrawingSink for CollectingSink {
    fn draw_bar_stack(&mut self, stack: &BarStackPrimitive) -> ChartResult<()> {
        stack.validate()?;
        self.bar_stacks.push(stack.clone());
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        self.lines.push(line.clone());
        Ok(())
    }

    fn draw_point(&mut self, point: &PointPrimitive) -> ChartResult<()> {
        point.validate()?;
        self.points.push(point.clone());
        Ok(())
    }
}
