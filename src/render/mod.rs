mod bar_renderer;
mod point_renderer;
mod primitives;
mod sink;
mod symbols;

pub use bar_renderer::{BarDecorator, BarKeyframe, BarRenderer, BarRendererConfig, NearestDatum};
pub use point_renderer::{
    NearestPoint, PointKeyframe, PointRenderer, PointRendererConfig, point_to_segment_distance,
};
pub use primitives::{Color, CornerStrategy, FillPattern, Point, Rect};
pub use sink::{
    BarPrimitive, BarStackPrimitive, CollectingSink, CornerRadii, DrawingSink, LinePrimitive,
    NullSink, PointPrimitive,
};
pub use symbols::{
    CircleSymbolRenderer, LineSymbolRenderer, SymbolRenderer, SymbolRendererRegistry,
};
