use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::anim::{AnimatedPool, Keyframe};
use crate::axis::Axis;
use crate::core::Series;
use crate::error::{ChartError, ChartResult};
use crate::render::primitives::{Color, Point, Rect};
use crate::render::sink::{DrawingSink, LinePrimitive};
use crate::render::symbols::SymbolRendererRegistry;

/// Point-marker renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRendererConfig {
    pub radius_px: f64,
    /// Hit radius around the bounds line. Defaults to `radius_px`.
    pub bounds_line_radius_px: Option<f64>,
    pub stroke_width_px: f64,
    /// Symbol used for datums that name no explicit symbol id.
    pub default_symbol_id: String,
}

impl Default for PointRendererConfig {
    fn default() -> Self {
        Self {
            radius_px: 3.5,
            bounds_line_radius_px: None,
            stroke_width_px: 0.0,
            default_symbol_id: "circle".to_owned(),
        }
    }
}

impl PointRendererConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.radius_px.is_finite() || self.radius_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "point radius must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(radius) = self.bounds_line_radius_px {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "bounds line radius must be finite and >= 0".to_owned(),
                ));
            }
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "point stroke width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn bounds_line_radius(&self) -> f64 {
        self.bounds_line_radius_px.unwrap_or(self.radius_px)
    }
}

/// Animation keyframe for one point marker, optionally with a range
/// (bounds) line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PointKeyframe {
    pub center: Point,
    pub bounds_start: Option<Point>,
    pub bounds_end: Option<Point>,
    pub radius_px: f64,
    pub bounds_line_radius_px: f64,
    pub color: Color,
    pub stroke_width_px: f64,
    pub baseline_px: f64,
    pub symbol_id: String,
    pub series_index: usize,
    pub datum_index: usize,
    pub domain: f64,
    pub measure: f64,
}

fn lerp_point(previous: Point, target: Point, percent: f64) -> Point {
    Point::new(
        previous.x + (target.x - previous.x) * percent,
        previous.y + (target.y - previous.y) * percent,
    )
}

impl Keyframe for PointKeyframe {
    fn lerp(previous: &Self, target: &Self, percent: f64) -> Self {
        let blend = |from: f64, to: f64| from + (to - from) * percent;
        Self {
            center: lerp_point(previous.center, target.center, percent),
            bounds_start: match (previous.bounds_start, target.bounds_start) {
                (Some(from), Some(to)) => Some(lerp_point(from, to, percent)),
                // A newly gained bounds line grows out of the marker
                // instead of popping in at full extent.
                (None, Some(to)) => Some(lerp_point(previous.center, to, percent)),
                (_, None) => None,
            },
            bounds_end: match (previous.bounds_end, target.bounds_end) {
                (Some(from), Some(to)) => Some(lerp_point(from, to, percent)),
                (None, Some(to)) => Some(lerp_point(previous.center, to, percent)),
                (_, None) => None,
            },
            radius_px: blend(previous.radius_px, target.radius_px),
            color: Color::lerp(previous.color, target.color, percent),
            stroke_width_px: blend(previous.stroke_width_px, target.stroke_width_px),
            ..target.clone()
        }
    }

    fn collapsed(&self) -> Self {
        let mut collapsed = self.clone();
        let grounded = Point::new(self.center.x, self.baseline_px);
        collapsed.center = grounded;
        collapsed.radius_px = 0.0;
        collapsed.bounds_start = self.bounds_start.map(|_| grounded);
        collapsed.bounds_end = self.bounds_end.map(|_| grounded);
        collapsed
    }
}

/// Hit-test result for one point marker, nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestPoint {
    pub series_index: usize,
    pub datum_index: usize,
    pub domain: f64,
    pub measure: f64,
    /// Euclidean distance to the marker center.
    pub distance: f64,
    /// Distance to the bounds line segment, when the marker has one.
    pub bounds_distance: Option<f64>,
    /// Smaller of the two distances above.
    pub relative_distance: f64,
    /// Cursor within the point radius or the bounds-line radius.
    pub inside_point: bool,
}

/// Point-marker layout and animation orchestrator.
///
/// Same lifecycle as the bar renderer: `preprocess` per data change, then
/// `update`, then `paint` calls while the animation percent advances.
pub struct PointRenderer {
    config: PointRendererConfig,
    symbols: SymbolRendererRegistry,
    draw_bounds: Option<Rect>,
    overlay: Vec<bool>,
    preprocessed_series: usize,
    pool: AnimatedPool<PointKeyframe>,
    current_keys: HashSet<String>,
}

impl std::fmt::Debug for PointRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointRenderer")
            .field("config", &self.config)
            .field("elements", &self.pool.element_count())
            .finish()
    }
}

impl PointRenderer {
    pub fn new(config: PointRendererConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            symbols: SymbolRendererRegistry::default(),
            draw_bounds: None,
            overlay: Vec::new(),
            preprocessed_series: 0,
            pool: AnimatedPool::new(),
            current_keys: HashSet::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &PointRendererConfig {
        &self.config
    }

    pub fn set_draw_bounds(&mut self, bounds: Rect) {
        self.draw_bounds = Some(bounds);
    }

    pub fn register_symbol(
        &mut self,
        id: impl Into<String>,
        renderer: Box<dyn crate::render::symbols::SymbolRenderer>,
    ) {
        self.symbols.register(id, renderer);
    }

    /// Validates series data and symbol references. A datum naming an
    /// unregistered symbol id stops the render pass.
    pub fn preprocess(&mut self, series_list: &[Series]) -> ChartResult<()> {
        for series in series_list {
            series.validate()?;
            for datum in &series.data {
                if let Some(symbol_id) = &datum.symbol_id {
                    if !self.symbols.contains(symbol_id) {
                        return Err(ChartError::InvalidConfig(format!(
                            "unknown symbol renderer id `{symbol_id}` in series `{}`",
                            series.id
                        )));
                    }
                }
            }
        }
        if !self.symbols.contains(&self.config.default_symbol_id) {
            return Err(ChartError::InvalidConfig(format!(
                "unknown default symbol renderer id `{}`",
                self.config.default_symbol_id
            )));
        }

        self.overlay = series_list.iter().map(|series| series.overlay).collect();
        self.preprocessed_series = series_list.len();
        tracing::debug!(series = series_list.len(), "preprocessed point series");
        Ok(())
    }

    /// Projects every datum through the axes into animated point targets.
    pub fn update(
        &mut self,
        series_list: &[Series],
        domain_axis: &dyn Axis,
        measure_axis: &dyn Axis,
    ) -> ChartResult<()> {
        if self.preprocessed_series != series_list.len() {
            return Err(ChartError::InvalidData(
                "update requires a preprocess pass over the same series list".to_owned(),
            ));
        }

        self.current_keys.clear();
        let bounds_line_radius = self.config.bounds_line_radius();

        for (series_index, series) in series_list.iter().enumerate() {
            for (datum_index, datum) in series.data.iter().enumerate() {
                let measure = datum.measure_or_zero();
                let center = Point::new(
                    domain_axis.location_of(datum.domain),
                    measure_axis.location_of(measure + datum.measure_offset),
                );
                let baseline_px = measure_axis.location_of(datum.measure_offset);

                // Range markers need both measure bounds; missing bound
                // accessors simply omit the bounds line.
                let (bounds_start, bounds_end) = match (
                    datum.measure_lower_bound,
                    datum.measure_upper_bound,
                ) {
                    (Some(lower), Some(upper)) => {
                        let from = Point::new(
                            domain_axis
                                .location_of(datum.domain_lower_bound.unwrap_or(datum.domain)),
                            measure_axis.location_of(lower + datum.measure_offset),
                        );
                        let to = Point::new(
                            domain_axis
                                .location_of(datum.domain_upper_bound.unwrap_or(datum.domain)),
                            measure_axis.location_of(upper + datum.measure_offset),
                        );
                        (Some(from), Some(to))
                    }
                    _ => (None, None),
                };

                let target = PointKeyframe {
                    center,
                    bounds_start,
                    bounds_end,
                    radius_px: self.config.radius_px,
                    bounds_line_radius_px: bounds_line_radius,
                    color: datum.color,
                    stroke_width_px: datum
                        .stroke_width_px
                        .unwrap_or(self.config.stroke_width_px),
                    baseline_px,
                    symbol_id: datum
                        .symbol_id
                        .clone()
                        .unwrap_or_else(|| self.config.default_symbol_id.clone()),
                    series_index,
                    datum_index,
                    domain: datum.domain,
                    measure,
                };

                let point_key = format!("{}__{}", datum.domain, measure);
                let entering = target.collapsed();
                self.pool
                    .upsert(&series.id, &point_key, || entering)
                    .set_target(target);
                self.current_keys.insert(point_key);
            }
        }

        let exited = self.pool.animate_out_missing(&self.current_keys);
        tracing::debug!(
            live = self.current_keys.len(),
            exited,
            "updated point animation targets"
        );
        Ok(())
    }

    /// Samples every marker at `animation_percent` and draws bounds lines
    /// then symbols. Settled paints sweep finished exits.
    pub fn paint(
        &mut self,
        sink: &mut dyn DrawingSink,
        animation_percent: f64,
    ) -> ChartResult<()> {
        if animation_percent >= 1.0 {
            self.pool.sweep();
        }

        let mut sampled = Vec::with_capacity(self.pool.element_count());
        for (_, bucket) in self.pool.iter_mut() {
            for element in bucket.iter_mut() {
                sampled.push(element.sample(animation_percent).clone());
            }
        }

        for keyframe in &sampled {
            if let (Some(from), Some(to)) = (keyframe.bounds_start, keyframe.bounds_end) {
                sink.draw_line(&LinePrimitive {
                    from,
                    to,
                    stroke_width_px: keyframe.stroke_width_px.max(1.0),
                    color: keyframe.color,
                    dash_pattern: None,
                })?;
            }
            let symbol = self.symbols.resolve(&keyframe.symbol_id)?;
            symbol.paint(
                sink,
                keyframe.center,
                keyframe.radius_px,
                keyframe.color,
                keyframe.stroke_width_px,
            )?;
        }

        Ok(())
    }

    /// Markers nearest to `point`, sorted nearest first.
    ///
    /// Markers horizontally outside the draw area are rejected before any
    /// distance math. Overlay series and exiting markers never match.
    #[must_use]
    pub fn nearest_datum_detail(&self, point: Point) -> Vec<NearestPoint> {
        let mut details = Vec::new();

        for (_, bucket) in self.pool.iter() {
            for element in bucket {
                if element.is_animating_out() {
                    continue;
                }
                let keyframe = element.current();
                if self.overlay.get(keyframe.series_index).copied().unwrap_or(false) {
                    continue;
                }
                if let Some(bounds) = self.draw_bounds {
                    if keyframe.center.x < bounds.left || keyframe.center.x > bounds.right {
                        continue;
                    }
                }

                let distance = point.distance_to(keyframe.center);
                let bounds_distance = match (keyframe.bounds_start, keyframe.bounds_end) {
                    (Some(from), Some(to)) => Some(point_to_segment_distance(point, from, to)),
                    _ => None,
                };
                let relative_distance = match bounds_distance {
                    Some(segment) => distance.min(segment),
                    None => distance,
                };
                let inside_point = distance <= keyframe.radius_px
                    || bounds_distance
                        .map(|segment| segment <= keyframe.bounds_line_radius_px)
                        .unwrap_or(false);

                details.push(NearestPoint {
                    series_index: keyframe.series_index,
                    datum_index: keyframe.datum_index,
                    domain: keyframe.domain,
                    measure: keyframe.measure,
                    distance,
                    bounds_distance,
                    relative_distance,
                    inside_point,
                });
            }
        }

        details.sort_by(|a, b| {
            a.relative_distance
                .partial_cmp(&b.relative_distance)
                .unwrap_or(Ordering::Equal)
        });
        details
    }
}

/// Distance from `point` to the nearest location on segment `from`-`to`.
#[must_use]
pub fn point_to_segment_distance(point: Point, from: Point, to: Point) -> f64 {
    let segment_x = to.x - from.x;
    let segment_y = to.y - from.y;
    let length_squared = segment_x * segment_x + segment_y * segment_y;
    if length_squared == 0.0 {
        return point.distance_to(from);
    }

    let t = ((point.x - from.x) * segment_x + (point.y - from.y) * segment_y) / length_squared;
    let t = t.clamp(0.0, 1.0);
    point.distance_to(Point::new(from.x + t * segment_x, from.y + t * segment_y))
}
