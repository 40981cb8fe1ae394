use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Last-seen cumulative detail for one (domain, stack key, sign) slot.
#[derive(Debug, Clone, Copy)]
struct StackedDetail {
    stack_index: usize,
    measure: f64,
    measure_offset: f64,
    cumulative_total: f64,
}

/// Stacking result for one datum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedDatum {
    pub stack_index: usize,
    pub measure_offset: f64,
    pub cumulative_total: f64,
}

/// Running-offset accumulator for stacked layouts.
///
/// Built fresh each preprocessing pass and fed datums in paint order.
/// Positive and negative measures stack independently, so bars split above
/// and below the zero line; missing measures count as zero and route to
/// the positive side.
#[derive(Debug, Default)]
pub struct StackAccumulator {
    positive: HashMap<(OrderedFloat<f64>, String), StackedDetail>,
    negative: HashMap<(OrderedFloat<f64>, String), StackedDetail>,
    max_stack_index: usize,
}

impl StackAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one datum into the running stack for its (domain, stack key)
    /// slot and returns its stacking facts.
    pub fn accumulate(
        &mut self,
        domain: f64,
        stack_key: &str,
        measure: Option<f64>,
        configured_offset: f64,
    ) -> StackedDatum {
        let measure = measure.unwrap_or(0.0);
        let map = if measure < 0.0 {
            &mut self.negative
        } else {
            &mut self.positive
        };

        let key = (OrderedFloat(domain), stack_key.to_owned());
        let detail = match map.get(&key) {
            Some(previous) => StackedDetail {
                stack_index: previous.stack_index + 1,
                measure,
                measure_offset: configured_offset + previous.measure_offset + previous.measure,
                cumulative_total: measure + previous.cumulative_total,
            },
            None => StackedDetail {
                stack_index: 0,
                measure,
                measure_offset: configured_offset,
                cumulative_total: measure,
            },
        };
        map.insert(key, detail);
        self.max_stack_index = self.max_stack_index.max(detail.stack_index);

        StackedDatum {
            stack_index: detail.stack_index,
            measure_offset: detail.measure_offset,
            cumulative_total: detail.cumulative_total,
        }
    }

    /// Largest stack index seen across all series, for layout sizing.
    #[must_use]
    pub fn max_stack_index(&self) -> usize {
        self.max_stack_index
    }
}
