use indexmap::IndexMap;
use smallvec::SmallVec;
use std::collections::HashSet;

/// Renderable animation snapshot for one visual element.
///
/// Keyframes are plain value types; the pool interpolates between a
/// previous and a target keyframe every frame and collapses exiting
/// elements to their measure-axis baseline.
pub trait Keyframe: Clone {
    /// Linear blend from `previous` towards `target` by `percent`.
    fn lerp(previous: &Self, target: &Self, percent: f64) -> Self;

    /// Zero-size variant of this keyframe at the measure-axis baseline,
    /// centered on the prior midpoint. Exit animations tend towards it.
    fn collapsed(&self) -> Self;
}

/// One keyed visual element with previous/target/current keyframes.
///
/// `current` is always a valid renderable snapshot: it equals `target` at
/// rest and a lerp of previous/target mid-animation.
#[derive(Debug, Clone)]
pub struct AnimatedElement<K: Keyframe> {
    key: String,
    previous: Option<K>,
    target: K,
    current: K,
    animating_out: bool,
}

impl<K: Keyframe> AnimatedElement<K> {
    /// Creates an element at rest on `initial`. Entering elements pass a
    /// collapsed keyframe here and receive their real target right after,
    /// so they grow in from the baseline.
    #[must_use]
    pub fn new(key: impl Into<String>, initial: K) -> Self {
        Self {
            key: key.into(),
            previous: Some(initial.clone()),
            current: initial.clone(),
            target: initial,
            animating_out: false,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn target(&self) -> &K {
        &self.target
    }

    /// Last sampled snapshot.
    #[must_use]
    pub fn current(&self) -> &K {
        &self.current
    }

    #[must_use]
    pub fn is_animating_out(&self) -> bool {
        self.animating_out
    }

    /// Shifts the old target into `previous` and starts animating towards
    /// `target`. Clears any pending exit.
    pub fn set_target(&mut self, target: K) {
        self.previous = Some(self.current.clone());
        self.target = target;
        self.animating_out = false;
    }

    /// Retargets the element onto its collapsed baseline keyframe and marks
    /// it for removal once the exit animation settles.
    pub fn animate_out(&mut self) {
        let collapsed = self.target.collapsed();
        self.set_target(collapsed);
        self.animating_out = true;
    }

    /// Interpolated snapshot at `percent` in `[0, 1]`.
    ///
    /// Percents at or above 1.0 snap `current` and `previous` onto the
    /// target, making repeated at-rest samples idempotent.
    pub fn sample(&mut self, percent: f64) -> &K {
        match (&self.previous, percent >= 1.0) {
            (Some(previous), false) => {
                self.current = K::lerp(previous, &self.target, percent.max(0.0));
            }
            _ => {
                self.current = self.target.clone();
                self.previous = Some(self.target.clone());
            }
        }
        &self.current
    }
}

/// Keyed store of animated elements, bucketed by bar-stack key.
///
/// Buckets iterate in insertion order so paint output stays deterministic
/// across updates. The pool only grows during update passes; `sweep`
/// reclaims exited elements once a paint settles at percent 1.0.
#[derive(Debug)]
pub struct AnimatedPool<K: Keyframe> {
    buckets: IndexMap<String, SmallVec<[AnimatedElement<K>; 4]>>,
}

impl<K: Keyframe> Default for AnimatedPool<K> {
    fn default() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }
}

impl<K: Keyframe> AnimatedPool<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the element for `element_key` inside the `bucket_key`
    /// bucket, creating it from `entering` on first sight.
    pub fn upsert(
        &mut self,
        bucket_key: &str,
        element_key: &str,
        entering: impl FnOnce() -> K,
    ) -> &mut AnimatedElement<K> {
        let bucket = self.buckets.entry(bucket_key.to_owned()).or_default();
        let position = match bucket.iter().position(|element| element.key() == element_key) {
            Some(position) => position,
            None => {
                bucket.push(AnimatedElement::new(element_key, entering()));
                bucket.len() - 1
            }
        };
        &mut bucket[position]
    }

    /// Starts exit animations for every element whose key is not in
    /// `live_keys`. Returns how many elements began exiting.
    pub fn animate_out_missing(&mut self, live_keys: &HashSet<String>) -> usize {
        let mut exited = 0;
        for bucket in self.buckets.values_mut() {
            for element in bucket.iter_mut() {
                if !live_keys.contains(element.key()) && !element.is_animating_out() {
                    element.animate_out();
                    exited += 1;
                }
            }
        }
        exited
    }

    /// Removes every element still flagged as animating out, then drops
    /// empty buckets. Call only from a fully-settled paint (percent 1.0);
    /// this is the sole place pool memory is reclaimed.
    pub fn sweep(&mut self) {
        let before = self.element_count();
        self.buckets.retain(|_, bucket| {
            bucket.retain(|element| !element.animating_out);
            !bucket.is_empty()
        });
        let removed = before - self.element_count();
        if removed > 0 {
            tracing::debug!(removed, "swept exited elements from animation pool");
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AnimatedElement<K>])> {
        self.buckets
            .iter()
            .map(|(key, bucket)| (key.as_str(), bucket.as_slice()))
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (&str, &mut SmallVec<[AnimatedElement<K>; 4]>)> {
        self.buckets
            .iter_mut()
            .map(|(key, bucket)| (key.as_str(), bucket))
    }

    #[must_use]
    pub fn bucket(&self, bucket_key: &str) -> Option<&[AnimatedElement<K>]> {
        self.buckets.get(bucket_key).map(|bucket| bucket.as_slice())
    }

    #[must_use]
    pub fn bucket_mut(
        &mut self,
        bucket_key: &str,
    ) -> Option<&mut SmallVec<[AnimatedElement<K>; 4]>> {
        self.buckets.get_mut(bucket_key)
    }

    #[must_use]
    pub fn contains_element(&self, element_key: &str) -> bool {
        self.buckets
            .values()
            .any(|bucket| bucket.iter().any(|element| element.key() == element_key))
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.buckets.values().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimatedElement, AnimatedPool, Keyframe};
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Bead {
        position: f64,
        length: f64,
    }

    impl Keyframe for Bead {
        fn lerp(previous: &Self, target: &Self, percent: f64) -> Self {
            Self {
                position: previous.position + (target.position - previous.position) * percent,
                length: previous.length + (target.length - previous.length) * percent,
            }
        }

        fn collapsed(&self) -> Self {
            Self {
                position: self.position,
                length: 0.0,
            }
        }
    }

    #[test]
    fn sample_interpolates_between_previous_and_target() {
        let mut element = AnimatedElement::new("k", Bead {
            position: 0.0,
            length: 10.0,
        });
        element.set_target(Bead {
            position: 100.0,
            length: 30.0,
        });

        let mid = element.sample(0.5).clone();
        assert!((mid.position - 50.0).abs() <= 1e-9);
        assert!((mid.length - 20.0).abs() <= 1e-9);
    }

    #[test]
    fn at_rest_sample_is_idempotent_and_equals_target() {
        let mut element = AnimatedElement::new("k", Bead {
            position: 0.0,
            length: 10.0,
        });
        element.set_target(Bead {
            position: 100.0,
            length: 30.0,
        });

        let first = element.sample(1.0).clone();
        let second = element.sample(1.0).clone();
        assert_eq!(first, second);
        assert_eq!(&first, element.target());
    }

    #[test]
    fn animate_out_targets_the_collapsed_keyframe() {
        let mut element = AnimatedElement::new("k", Bead {
            position: 40.0,
            length: 25.0,
        });
        element.animate_out();
        assert!(element.is_animating_out());

        let done = element.sample(1.0).clone();
        assert!((done.length - 0.0).abs() <= 1e-9);
        assert!((done.position - 40.0).abs() <= 1e-9);
    }

    #[test]
    fn setting_a_target_cancels_a_pending_exit() {
        let mut element = AnimatedElement::new("k", Bead {
            position: 0.0,
            length: 10.0,
        });
        element.animate_out();
        element.set_target(Bead {
            position: 5.0,
            length: 12.0,
        });
        assert!(!element.is_animating_out());
    }

    #[test]
    fn sweep_removes_exited_elements_and_empty_buckets() {
        let mut pool: AnimatedPool<Bead> = AnimatedPool::new();
        pool.upsert("stack", "k", || Bead {
            position: 0.0,
            length: 0.0,
        });

        let live = HashSet::new();
        assert_eq!(pool.animate_out_missing(&live), 1);
        assert!(pool.contains_element("k"));

        pool.sweep();
        assert!(!pool.contains_element("k"));
        assert!(pool.is_empty());
    }

    #[test]
    fn live_elements_survive_a_sweep() {
        let mut pool: AnimatedPool<Bead> = AnimatedPool::new();
        pool.upsert("stack", "keep", || Bead {
            position: 0.0,
            length: 0.0,
        });
        pool.upsert("stack", "drop", || Bead {
            position: 1.0,
            length: 0.0,
        });

        let mut live = HashSet::new();
        live.insert("keep".to_owned());
        pool.animate_out_missing(&live);
        pool.sweep();

        assert!(pool.contains_element("keep"));
        assert!(!pool.contains_element("drop"));
        assert_eq!(pool.element_count(), 1);
    }
}
