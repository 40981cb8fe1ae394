use crate::axis::Axis;
use crate::render::Rect;

/// Fixed gap between adjacent bars of one group, in pixels.
pub const BAR_GROUP_INNER_PADDING_PX: f64 = 2.0;

/// Position of one bar inside its group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGroupSlot {
    pub group_index: usize,
    pub group_count: usize,
    /// Fractional width of this group. `None` falls back to an equal split.
    pub group_weight: Option<f64>,
    /// Total weight of groups painted before this one. `None` falls back to
    /// `group_index / group_count`.
    pub previous_weight: Option<f64>,
}

impl BarGroupSlot {
    #[must_use]
    pub fn equal_split(group_index: usize, group_count: usize) -> Self {
        Self {
            group_index,
            group_count,
            group_weight: None,
            previous_weight: None,
        }
    }
}

/// Computes the pixel rectangle for one bar.
///
/// `domain_width` is the full category band width; the bar occupies its
/// group's weighted share of it, offset by the groups painted before it.
/// Missing measures render as zero-length bars from the offset baseline.
/// Degenerate spans collapse to zero size, never negative. All rounding is
/// `f64::round` (half away from zero) so layout is reproducible.
#[must_use]
pub fn bar_rectangle(
    domain: f64,
    domain_width: f64,
    measure: Option<f64>,
    measure_offset: f64,
    slot: BarGroupSlot,
    domain_axis: &dyn Axis,
    measure_axis: &dyn Axis,
    vertical: bool,
    rtl: bool,
) -> Rect {
    let group_count = slot.group_count.max(1);
    let weight = slot
        .group_weight
        .unwrap_or(1.0 / group_count as f64);
    let previous_weight = slot
        .previous_weight
        .unwrap_or(slot.group_index as f64 * weight);

    let spacing_loss = BAR_GROUP_INNER_PADDING_PX * (group_count - 1) as f64;
    let bar_width = ((domain_width - spacing_loss) * weight).round().max(0.0);

    // Mirror the group ordering under RTL so group 0 paints last. Weights
    // sum to 1, so the mirrored previous weight is the complement.
    let (adjusted_index, previous_weight) = if rtl {
        (
            group_count - slot.group_index - 1,
            (1.0 - previous_weight - weight).max(0.0),
        )
    } else {
        (slot.group_index, previous_weight)
    };

    let previous_average_width = if adjusted_index > 0 {
        ((domain_width - spacing_loss) * (previous_weight / adjusted_index as f64)).round()
    } else {
        0.0
    };

    let domain_start = (domain_axis.location_of(domain) - domain_width / 2.0
        + (previous_average_width + BAR_GROUP_INNER_PADDING_PX) * adjusted_index as f64)
        .round();
    let domain_end = domain_start + bar_width;

    let measure = measure.unwrap_or(0.0);
    let measure_start = measure_axis.location_of(measure_offset).round();
    let measure_end = measure_axis.location_of(measure + measure_offset).round();
    let (measure_near, measure_far) = if measure_start <= measure_end {
        (measure_start, measure_end)
    } else {
        (measure_end, measure_start)
    };

    if vertical {
        Rect::new(domain_start, measure_near, domain_end, measure_far)
    } else {
        Rect::new(measure_near, domain_start, measure_far, domain_end)
    }
}
