pub mod bar_geometry;
pub mod series;
pub mod series_order;
pub mod stacking;
pub mod weights;

pub use bar_geometry::{BAR_GROUP_INNER_PADDING_PX, BarGroupSlot, bar_rectangle};
pub use series::{BarElement, Datum, Series, SeriesBarAttrs};
pub use series_order::{BarGrouping, DEFAULT_STACK_KEY, ordered_series_indices};
pub use stacking::{StackAccumulator, StackedDatum};
pub use weights::{cumulative_weights, group_weights};
