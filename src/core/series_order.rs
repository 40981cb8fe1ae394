use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::series::Series;

/// Stack key used for series without an explicit category.
pub const DEFAULT_STACK_KEY: &str = "__default__";

/// How series sharing a domain category are arranged into bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarGrouping {
    Grouped,
    Stacked,
    GroupedStacked,
}

impl BarGrouping {
    #[must_use]
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::Stacked | Self::GroupedStacked)
    }

    #[must_use]
    pub fn is_grouped(self) -> bool {
        matches!(self, Self::Grouped | Self::GroupedStacked)
    }
}

/// Paint-order series indices for preprocessing and update passes.
///
/// Vertical stacked layouts process series in reverse so the visually
/// bottom-most series accumulates first. Grouped-stacked layouts keep
/// category blocks in first-seen order while reversing the series inside
/// each block: a category-to-indices map is built in first-seen order,
/// then each category's reversed index list is concatenated in map
/// insertion order. Horizontal layouts paint in natural order.
#[must_use]
pub fn ordered_series_indices(
    series_list: &[Series],
    grouping: BarGrouping,
    vertical: bool,
) -> Vec<usize> {
    if !vertical || !grouping.is_stacked() {
        return (0..series_list.len()).collect();
    }

    if grouping == BarGrouping::Stacked {
        return (0..series_list.len()).rev().collect();
    }

    let mut by_category: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (index, series) in series_list.iter().enumerate() {
        let category = series.category.as_deref().unwrap_or(DEFAULT_STACK_KEY);
        by_category.entry(category).or_default().push(index);
    }

    let mut ordered = Vec::with_capacity(series_list.len());
    for indices in by_category.values() {
        ordered.extend(indices.iter().rev().copied());
    }
    ordered
}
