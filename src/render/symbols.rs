use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};
use crate::render::primitives::{Color, Point};
use crate::render::sink::{DrawingSink, LinePrimitive, PointPrimitive};

/// Visual style strategy for one marker shape.
///
/// Symbol renderers are simple stateless painters; the point renderer
/// resolves one per datum and delegates the actual draw call to it.
pub trait SymbolRenderer {
    fn paint(
        &self,
        sink: &mut dyn DrawingSink,
        center: Point,
        radius_px: f64,
        color: Color,
        stroke_width_px: f64,
    ) -> ChartResult<()>;
}

/// Default filled-circle marker.
#[derive(Debug, Default)]
pub struct CircleSymbolRenderer;

impl SymbolRenderer for CircleSymbolRenderer {
    fn paint(
        &self,
        sink: &mut dyn DrawingSink,
        center: Point,
        radius_px: f64,
        color: Color,
        stroke_width_px: f64,
    ) -> ChartResult<()> {
        sink.draw_point(&PointPrimitive {
            center,
            radius_px,
            fill: color,
            stroke_width_px,
        })
    }
}

/// Horizontal dash marker spanning twice the point radius.
#[derive(Debug, Default)]
pub struct LineSymbolRenderer;

impl SymbolRenderer for LineSymbolRenderer {
    fn paint(
        &self,
        sink: &mut dyn DrawingSink,
        center: Point,
        radius_px: f64,
        color: Color,
        stroke_width_px: f64,
    ) -> ChartResult<()> {
        sink.draw_line(&LinePrimitive {
            from: Point::new(center.x - radius_px, center.y),
            to: Point::new(center.x + radius_px, center.y),
            stroke_width_px: stroke_width_px.max(1.0),
            color,
            dash_pattern: None,
        })
    }
}

/// Registry resolving datum symbol ids to their painter.
///
/// A datum naming an unregistered id is a configuration error surfaced at
/// preprocessing time.
pub struct SymbolRendererRegistry {
    renderers: IndexMap<String, Box<dyn SymbolRenderer>>,
}

impl std::fmt::Debug for SymbolRendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRendererRegistry")
            .field("ids", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for SymbolRendererRegistry {
    fn default() -> Self {
        let mut registry = Self {
            renderers: IndexMap::new(),
        };
        registry.register("circle", Box::new(CircleSymbolRenderer));
        registry.register("line", Box::new(LineSymbolRenderer));
        registry
    }
}

impl SymbolRendererRegistry {
    pub fn register(&mut self, id: impl Into<String>, renderer: Box<dyn SymbolRenderer>) {
        self.renderers.insert(id.into(), renderer);
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.renderers.contains_key(id)
    }

    pub fn resolve(&self, id: &str) -> ChartResult<&dyn SymbolRenderer> {
        self.renderers
            .get(id)
            .map(Box::as_ref)
            .ok_or_else(|| {
                ChartError::InvalidConfig(format!("unknown symbol renderer id `{id}`"))
            })
    }
}
