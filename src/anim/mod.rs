pub mod pool;

pub use pool::{AnimatedElement, AnimatedPool, Keyframe};
