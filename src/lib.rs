//! chart-motion: bar/point layout and animation engine.
//!
//! This crate computes screen-space geometry for grouped/stacked bar charts
//! and point markers, and maintains keyed animated-element pools that
//! interpolate geometry and color between data updates. Axis scales and the
//! actual drawing backend are external collaborators behind small traits.

pub mod anim;
pub mod axis;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use axis::{Axis, LinearAxis, OrdinalAxis};
pub use error::{ChartError, ChartResult};
pub use render::{BarRenderer, BarRendererConfig, PointRenderer, PointRendererConfig};
