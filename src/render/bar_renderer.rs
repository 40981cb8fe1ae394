use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::anim::{AnimatedElement, AnimatedPool, Keyframe};
use crate::axis::Axis;
use crate::core::{
    BarElement, BarGrouping, BarGroupSlot, DEFAULT_STACK_KEY, Series, SeriesBarAttrs,
    StackAccumulator, StackedDatum, bar_rectangle, cumulative_weights, group_weights,
    ordered_series_indices,
};
use crate::error::{ChartError, ChartResult};
use crate::render::primitives::{Color, CornerStrategy, FillPattern, Point, Rect};
use crate::render::sink::{BarPrimitive, BarStackPrimitive, CornerRadii, DrawingSink};

/// Bar renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRendererConfig {
    pub grouping: BarGrouping,
    pub corner_strategy: CornerStrategy,
    /// Relative widths for bar groups. Must cover at least as many entries
    /// as there are groups; `None` splits the band equally.
    pub weight_pattern: Option<Vec<u32>>,
    /// Bars shorter than this along the measure axis are extended away from
    /// their baseline so tiny measures stay visible.
    pub min_bar_length_px: f64,
    pub stroke_width_px: f64,
    pub fill_pattern: FillPattern,
    /// Visual separation carved out of every non-last bar of a stack.
    pub stacked_bar_padding_px: f64,
    pub rtl: bool,
    pub vertical: bool,
}

impl Default for BarRendererConfig {
    fn default() -> Self {
        Self {
            grouping: BarGrouping::Grouped,
            corner_strategy: CornerStrategy::Constant(2.0),
            weight_pattern: None,
            min_bar_length_px: 0.0,
            stroke_width_px: 0.0,
            fill_pattern: FillPattern::Solid,
            stacked_bar_padding_px: 1.0,
            rtl: false,
            vertical: true,
        }
    }
}

impl BarRendererConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.min_bar_length_px.is_finite() || self.min_bar_length_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "min bar length must be finite and >= 0".to_owned(),
            ));
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "bar stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.stacked_bar_padding_px.is_finite() || self.stacked_bar_padding_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "stacked bar padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Animation keyframe for one bar.
///
/// Geometry and color interpolate; the identity fields always come from
/// the target so hit-testing sees current data.
#[derive(Debug, Clone, PartialEq)]
pub struct BarKeyframe {
    pub bounds: Rect,
    pub color: Color,
    pub fill_pattern: FillPattern,
    pub stroke_width_px: f64,
    /// Pixel of this bar's measure-offset baseline; exits collapse onto it.
    pub baseline_px: f64,
    pub vertical: bool,
    pub series_index: usize,
    pub datum_index: usize,
    pub domain: f64,
    pub measure: f64,
    pub cumulative_total: f64,
}

impl BarKeyframe {
    /// Variant of this keyframe with the measure span collapsed onto the
    /// baseline, keeping the domain span. Entering bars grow in from it.
    #[must_use]
    fn flattened_to_baseline(&self) -> Self {
        let mut entering = self.clone();
        entering.bounds = if self.vertical {
            Rect::new(self.bounds.left, self.baseline_px, self.bounds.right, self.baseline_px)
        } else {
            Rect::new(self.baseline_px, self.bounds.top, self.baseline_px, self.bounds.bottom)
        };
        entering
    }
}

impl Keyframe for BarKeyframe {
    fn lerp(previous: &Self, target: &Self, percent: f64) -> Self {
        Self {
            bounds: Rect::lerp(previous.bounds, target.bounds, percent),
            color: Color::lerp(previous.color, target.color, percent),
            stroke_width_px: previous.stroke_width_px
                + (target.stroke_width_px - previous.stroke_width_px) * percent,
            ..target.clone()
        }
    }

    fn collapsed(&self) -> Self {
        let mut collapsed = self.clone();
        collapsed.bounds = if self.vertical {
            let mid = (self.bounds.left + self.bounds.right) / 2.0;
            Rect::new(mid, self.baseline_px, mid, self.baseline_px)
        } else {
            let mid = (self.bounds.top + self.bounds.bottom) / 2.0;
            Rect::new(self.baseline_px, mid, self.baseline_px, mid)
        };
        collapsed
    }
}

/// Hit-test result for one bar, nearest first in the returned list.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestDatum {
    pub series_index: usize,
    pub datum_index: usize,
    pub domain: f64,
    pub measure: f64,
    /// Gap to the bar's span along the domain axis; 0 inside the span.
    pub domain_distance: f64,
    /// Gap to the bar's span along the measure axis; 0 inside the span.
    pub measure_distance: f64,
    /// Straight-line distance to the nearest clamped point on the bar.
    pub relative_distance: f64,
}

/// Post-paint hook for labels and annotations over one bar stack.
///
/// Purely additive: decorators draw on top of the finalized elements and
/// feed nothing back into geometry.
pub trait BarDecorator {
    fn decorate(
        &self,
        sink: &mut dyn DrawingSink,
        elements: &[BarKeyframe],
        draw_bounds: Option<Rect>,
        animation_percent: f64,
        vertical: bool,
        rtl: bool,
    ) -> ChartResult<()>;
}

/// Grouped/stacked bar layout and animation orchestrator.
///
/// Call order per update cycle: `preprocess` once per data change, then
/// `update` with the axes, then `paint` repeatedly as the animation percent
/// advances to 1.0. Hit queries are valid any time after an update.
pub struct BarRenderer {
    config: BarRendererConfig,
    draw_bounds: Option<Rect>,
    decorator: Option<Box<dyn BarDecorator>>,
    attrs: Vec<SeriesBarAttrs>,
    overlay: Vec<bool>,
    paint_order: Vec<usize>,
    max_stack_index: usize,
    pool: AnimatedPool<BarKeyframe>,
    current_keys: HashSet<String>,
    stack_keys_by_domain: IndexMap<OrderedFloat<f64>, IndexSet<String>>,
}

impl std::fmt::Debug for BarRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarRenderer")
            .field("config", &self.config)
            .field("series", &self.attrs.len())
            .field("elements", &self.pool.element_count())
            .finish()
    }
}

impl BarRenderer {
    pub fn new(config: BarRendererConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            draw_bounds: None,
            decorator: None,
            attrs: Vec::new(),
            overlay: Vec::new(),
            paint_order: Vec::new(),
            max_stack_index: 0,
            pool: AnimatedPool::new(),
            current_keys: HashSet::new(),
            stack_keys_by_domain: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BarRendererConfig {
        &self.config
    }

    /// Component bounds used for domain-axis clipping and hit-test gating.
    pub fn set_draw_bounds(&mut self, bounds: Rect) {
        self.draw_bounds = Some(bounds);
    }

    pub fn set_decorator(&mut self, decorator: Box<dyn BarDecorator>) {
        self.decorator = Some(decorator);
    }

    /// Largest stack depth seen by the last preprocessing pass.
    #[must_use]
    pub fn max_stack_index(&self) -> usize {
        self.max_stack_index
    }

    /// Per-series computed attributes from the last preprocessing pass.
    #[must_use]
    pub fn series_attrs(&self) -> &[SeriesBarAttrs] {
        &self.attrs
    }

    /// Computes geometry-independent per-datum facts: paint order, group
    /// assignment and weights, stacking offsets and cumulative totals.
    pub fn preprocess(&mut self, series_list: &[Series]) -> ChartResult<()> {
        for series in series_list {
            series.validate()?;
        }

        self.paint_order =
            ordered_series_indices(series_list, self.config.grouping, self.config.vertical);

        // Group assignment: grouped layouts give each series (or each
        // category for grouped-stacked) its own lane; stacked layouts share
        // lane zero.
        let mut group_of = vec![0usize; series_list.len()];
        let group_count = match self.config.grouping {
            BarGrouping::Grouped => {
                for (lane, &series_index) in self.paint_order.iter().enumerate() {
                    group_of[series_index] = lane;
                }
                series_list.len()
            }
            BarGrouping::Stacked => usize::from(!series_list.is_empty()),
            BarGrouping::GroupedStacked => {
                let mut categories: IndexSet<&str> = IndexSet::new();
                for &series_index in &self.paint_order {
                    let category = series_list[series_index]
                        .category
                        .as_deref()
                        .unwrap_or(DEFAULT_STACK_KEY);
                    let (lane, _) = categories.insert_full(category);
                    group_of[series_index] = lane;
                }
                categories.len()
            }
        };

        let weights = group_weights(group_count, self.config.weight_pattern.as_deref())?;
        let previous_weights = cumulative_weights(&weights);

        let mut accumulator = StackAccumulator::new();
        let stacked = self.config.grouping.is_stacked();

        let mut attrs: Vec<Option<SeriesBarAttrs>> = vec![None; series_list.len()];
        for &series_index in &self.paint_order {
            let series = &series_list[series_index];
            let stack_key = series
                .category
                .as_deref()
                .unwrap_or(DEFAULT_STACK_KEY)
                .to_owned();
            let group_index = group_of[series_index];

            let mut elements = Vec::with_capacity(series.data.len());
            for datum in &series.data {
                let stacked_datum = if stacked {
                    accumulator.accumulate(
                        datum.domain,
                        &stack_key,
                        datum.measure,
                        datum.measure_offset,
                    )
                } else {
                    StackedDatum {
                        stack_index: 0,
                        measure_offset: datum.measure_offset,
                        cumulative_total: datum.measure_or_zero(),
                    }
                };

                elements.push(BarElement {
                    stack_index: stacked_datum.stack_index,
                    measure_offset: stacked_datum.measure_offset,
                    cumulative_total: stacked_datum.cumulative_total,
                    color: datum.color,
                    fill_pattern: datum.fill_pattern.unwrap_or(self.config.fill_pattern),
                    stroke_width_px: datum
                        .stroke_width_px
                        .unwrap_or(self.config.stroke_width_px),
                });
            }

            attrs[series_index] = Some(SeriesBarAttrs {
                group_index,
                group_weight: weights[group_index],
                previous_weight: previous_weights[group_index],
                group_count,
                stack_key,
                elements,
            });
        }

        self.max_stack_index = accumulator.max_stack_index();
        self.overlay = series_list.iter().map(|series| series.overlay).collect();
        self.attrs = attrs.into_iter().flatten().collect();
        if self.attrs.len() != series_list.len() {
            return Err(ChartError::InvalidData(
                "paint order did not cover every series".to_owned(),
            ));
        }
        // `into_iter().flatten()` keeps original series order because the
        // vec was indexed by series position.

        tracing::debug!(
            series = series_list.len(),
            groups = group_count,
            max_stack_index = self.max_stack_index,
            "preprocessed bar series"
        );
        Ok(())
    }

    /// Folds the preprocessed facts and current axes into animated-element
    /// targets. The pool only grows here; exit keys start their collapse.
    pub fn update(
        &mut self,
        series_list: &[Series],
        domain_axis: &dyn Axis,
        measure_axis: &dyn Axis,
    ) -> ChartResult<()> {
        if self.attrs.len() != series_list.len()
            || series_list
                .iter()
                .zip(&self.attrs)
                .any(|(series, attrs)| series.data.len() != attrs.elements.len())
        {
            return Err(ChartError::InvalidData(
                "update requires a preprocess pass over the same series list".to_owned(),
            ));
        }

        self.current_keys.clear();
        self.stack_keys_by_domain.clear();

        let domain_width = domain_axis.range_band_width();
        let vertical = self.config.vertical;
        let rtl = self.config.rtl;

        for &series_index in &self.paint_order {
            let series = &series_list[series_index];
            let attrs = &self.attrs[series_index];
            let slot = BarGroupSlot {
                group_index: attrs.group_index,
                group_count: attrs.group_count,
                group_weight: Some(attrs.group_weight),
                previous_weight: Some(attrs.previous_weight),
            };

            for (datum_index, datum) in series.data.iter().enumerate() {
                let element = &attrs.elements[datum_index];
                let stack_key = format!(
                    "{}__{}__{}",
                    datum.domain, attrs.stack_key, attrs.group_index
                );
                let bar_key = format!("{}__{}", stack_key, element.stack_index);

                let bounds = bar_rectangle(
                    datum.domain,
                    domain_width,
                    datum.measure,
                    element.measure_offset,
                    slot,
                    domain_axis,
                    measure_axis,
                    vertical,
                    rtl,
                );
                let baseline_px = measure_axis.location_of(element.measure_offset).round();

                let target = BarKeyframe {
                    bounds,
                    color: element.color,
                    fill_pattern: element.fill_pattern,
                    stroke_width_px: element.stroke_width_px,
                    baseline_px,
                    vertical,
                    series_index,
                    datum_index,
                    domain: datum.domain,
                    measure: datum.measure_or_zero(),
                    cumulative_total: element.cumulative_total,
                };

                let entering = target.flattened_to_baseline();
                self.pool
                    .upsert(&stack_key, &bar_key, || entering)
                    .set_target(target);

                self.current_keys.insert(bar_key);
                self.stack_keys_by_domain
                    .entry(OrderedFloat(datum.domain))
                    .or_default()
                    .insert(stack_key);
            }
        }

        let exited = self.pool.animate_out_missing(&self.current_keys);
        tracing::debug!(
            live = self.current_keys.len(),
            exited,
            "updated bar animation targets"
        );
        Ok(())
    }

    /// Samples every bar at `animation_percent` and emits one atomic draw
    /// call per visual bar stack. A settled paint (percent 1.0) also sweeps
    /// finished exit animations out of the pool.
    pub fn paint(
        &mut self,
        sink: &mut dyn DrawingSink,
        animation_percent: f64,
    ) -> ChartResult<()> {
        if animation_percent >= 1.0 {
            self.pool.sweep();
        }

        let config = self.config.clone();
        let draw_bounds = self.draw_bounds;
        let decorator = self.decorator.as_deref();

        for (_, bucket) in self.pool.iter_mut() {
            let mut sampled: SmallVec<[BarKeyframe; 4]> = SmallVec::new();
            for element in bucket.iter_mut() {
                sampled.push(element.sample(animation_percent).clone());
            }
            if sampled.is_empty() {
                continue;
            }

            let mut union = sampled[0].bounds;
            for bar in sampled.iter().skip(1) {
                union.left = union.left.min(bar.bounds.left);
                union.top = union.top.min(bar.bounds.top);
                union.right = union.right.max(bar.bounds.right);
                union.bottom = union.bottom.max(bar.bounds.bottom);
            }
            if let Some(bounds) = draw_bounds {
                if union.is_fully_outside(bounds) {
                    continue;
                }
            }

            let max_thickness = sampled
                .iter()
                .map(|bar| {
                    if config.vertical {
                        bar.bounds.width()
                    } else {
                        bar.bounds.height()
                    }
                })
                .fold(0.0, f64::max);
            let radius = config.corner_strategy.radius(max_thickness);

            let last = sampled.len() - 1;
            let mut stack = BarStackPrimitive::default();
            for (index, bar) in sampled.iter().enumerate() {
                let mut bounds = bar.bounds;

                if config.min_bar_length_px > 0.0 && bar.measure != 0.0 {
                    bounds = enforce_min_length(
                        bounds,
                        bar.baseline_px,
                        config.min_bar_length_px,
                        config.vertical,
                    );
                }

                // Non-last bars give up the stacked padding on the edge
                // facing the next segment.
                if index != last {
                    if config.vertical {
                        bounds.top = (bounds.top + config.stacked_bar_padding_px)
                            .min(bounds.bottom);
                    } else {
                        bounds.right = (bounds.right - config.stacked_bar_padding_px)
                            .max(bounds.left);
                    }
                }

                if let Some(clip) = draw_bounds {
                    bounds = clip_domain_edges(bounds, clip, config.vertical);
                }

                stack.bars.push(BarPrimitive {
                    bounds,
                    fill: bar.color,
                    fill_pattern: bar.fill_pattern,
                    stroke_width_px: bar.stroke_width_px,
                    radii: CornerRadii::uniform(radius),
                    dash_pattern: None,
                });
            }

            sink.draw_bar_stack(&stack)?;
            if let Some(decorator) = decorator {
                decorator.decorate(
                    sink,
                    &sampled,
                    draw_bounds,
                    animation_percent,
                    config.vertical,
                    config.rtl,
                )?;
            }
        }

        Ok(())
    }

    /// Bars nearest to `point`, sorted nearest first.
    ///
    /// Ordinal domain axes resolve the category under the cursor and scan
    /// only its stacks; continuous axes scan every bar, choose the nearest
    /// domain value, and filter to it. Overlay series and bars animating
    /// out never match. O(n) over live bars; no spatial index.
    #[must_use]
    pub fn nearest_datum_detail(
        &self,
        point: Point,
        domain_axis: &dyn Axis,
    ) -> Vec<NearestDatum> {
        if let Some(bounds) = self.draw_bounds {
            if !bounds.contains(point) {
                return Vec::new();
            }
        }

        let domain_pixel = if self.config.vertical { point.x } else { point.y };

        let mut details = if domain_axis.is_ordinal() {
            let Some(domain) = domain_axis.inverse_of(domain_pixel) else {
                return Vec::new();
            };
            let Some(stack_keys) = self.stack_keys_by_domain.get(&OrderedFloat(domain)) else {
                return Vec::new();
            };

            let mut details = Vec::new();
            for stack_key in stack_keys {
                let Some(bucket) = self.pool.bucket(stack_key) else {
                    continue;
                };
                for element in bucket {
                    self.push_detail(element, point, &mut details);
                }
            }
            details.sort_by(nearer);
            details
        } else {
            let mut details = Vec::new();
            for (_, bucket) in self.pool.iter() {
                for element in bucket {
                    self.push_detail(element, point, &mut details);
                }
            }
            details.sort_by(nearer);
            if let Some(nearest_domain) = details.first().map(|detail| detail.domain) {
                details.retain(|detail| detail.domain == nearest_domain);
            }
            details
        };

        details.shrink_to_fit();
        details
    }

    fn push_detail(
        &self,
        element: &AnimatedElement<BarKeyframe>,
        point: Point,
        details: &mut Vec<NearestDatum>,
    ) {
        // Bars animating out are no longer part of the current data.
        if element.is_animating_out() {
            return;
        }
        let bar = element.current();
        if self.overlay.get(bar.series_index).copied().unwrap_or(false) {
            return;
        }

        let (domain_span, measure_span, domain_pixel, measure_pixel) = if self.config.vertical {
            (
                (bar.bounds.left, bar.bounds.right),
                (bar.bounds.top, bar.bounds.bottom),
                point.x,
                point.y,
            )
        } else {
            (
                (bar.bounds.top, bar.bounds.bottom),
                (bar.bounds.left, bar.bounds.right),
                point.y,
                point.x,
            )
        };

        let domain_distance = span_distance(domain_pixel, domain_span);
        let measure_distance = span_distance(measure_pixel, measure_span);
        let relative_distance = domain_distance.hypot(measure_distance);

        details.push(NearestDatum {
            series_index: bar.series_index,
            datum_index: bar.datum_index,
            domain: bar.domain,
            measure: bar.measure,
            domain_distance,
            measure_distance,
            relative_distance,
        });
    }
}

/// Gap between a coordinate and an inclusive span; 0 inside the span.
fn span_distance(coordinate: f64, (start, end): (f64, f64)) -> f64 {
    if coordinate < start {
        start - coordinate
    } else if coordinate > end {
        coordinate - end
    } else {
        0.0
    }
}

/// Nearest-first ordering: by domain gap, then measure gap for bars at the
/// same domain, then straight-line distance.
fn nearer(a: &NearestDatum, b: &NearestDatum) -> Ordering {
    a.domain_distance
        .partial_cmp(&b.domain_distance)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            if a.domain == b.domain {
                a.measure_distance
                    .partial_cmp(&b.measure_distance)
                    .unwrap_or(Ordering::Equal)
            } else {
                a.relative_distance
                    .partial_cmp(&b.relative_distance)
                    .unwrap_or(Ordering::Equal)
            }
        })
}

/// Extends a bar away from its baseline until it reaches the minimum
/// measure-axis length.
fn enforce_min_length(mut bounds: Rect, baseline_px: f64, min_length: f64, vertical: bool) -> Rect {
    if vertical {
        if bounds.height() < min_length {
            if (bounds.bottom - baseline_px).abs() <= (bounds.top - baseline_px).abs() {
                bounds.top = bounds.bottom - min_length;
            } else {
                bounds.bottom = bounds.top + min_length;
            }
        }
    } else if bounds.width() < min_length {
        if (bounds.left - baseline_px).abs() <= (bounds.right - baseline_px).abs() {
            bounds.right = bounds.left + min_length;
        } else {
            bounds.left = bounds.right - min_length;
        }
    }
    bounds
}

/// Clamps only the domain-axis start/end edges to the component bounds.
fn clip_domain_edges(mut bounds: Rect, clip: Rect, vertical: bool) -> Rect {
    if vertical {
        bounds.left = bounds.left.max(clip.left);
        bounds.right = bounds.right.min(clip.right).max(bounds.left);
    } else {
        bounds.top = bounds.top.max(clip.top);
        bounds.bottom = bounds.bottom.min(clip.bottom).max(bounds.top);
    }
    bounds
}
