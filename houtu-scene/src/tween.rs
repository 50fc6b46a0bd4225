//! A frame-driven collection of scalar tweens.
//!
//! The collection does not own a clock: callers advance it with the current
//! time and receive one [`TweenFrame`] per live tween, carrying the eased value
//! and the tween's payload. What a payload means is up to the caller.
//!
//! Curves come from `interpolation`; a tween without one ramps linearly.
pub use interpolation::EaseFunction;
use interpolation::{Ease, Lerp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

#[derive(Debug, Clone)]
pub struct TweenOptions<P> {
    /// Seconds. Zero completes on the first update.
    pub duration: f64,
    pub easing: Option<EaseFunction>,
    pub payload: P,
}

impl<P> TweenOptions<P> {
    pub fn new(duration: f64, payload: P) -> Self {
        Self {
            duration,
            easing: None,
            payload,
        }
    }
    pub fn with_easing(mut self, easing: EaseFunction) -> Self {
        self.easing = Some(easing);
        self
    }
}

#[derive(Debug, Clone)]
pub struct TweenFrame<P> {
    pub id: TweenId,
    pub value: f64,
    /// The tween reached its stop value and was removed.
    pub complete: bool,
    pub payload: P,
}

#[derive(Debug)]
struct Tween<P> {
    id: TweenId,
    start_value: f64,
    stop_value: f64,
    duration: f64,
    easing: Option<EaseFunction>,
    start_time: Option<f64>,
    payload: P,
}

#[derive(Debug)]
pub struct TweenCollection<P> {
    tweens: Vec<Tween<P>>,
    next_id: u64,
}

impl<P> Default for TweenCollection<P> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            next_id: 0,
        }
    }
}

impl<P: Clone> TweenCollection<P> {
    /// Adds a tween whose value runs from 0 to 1.
    pub fn add(&mut self, options: TweenOptions<P>) -> TweenId {
        self.add_property(0.0, 1.0, options)
    }

    /// Adds a tween ramping a scalar property from `start_value` to
    /// `stop_value`.
    pub fn add_property(
        &mut self,
        start_value: f64,
        stop_value: f64,
        options: TweenOptions<P>,
    ) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            id,
            start_value,
            stop_value,
            duration: options.duration.max(0.0),
            easing: options.easing,
            start_time: None,
            payload: options.payload,
        });
        id
    }

    pub fn remove(&mut self, id: TweenId) -> bool {
        let len = self.tweens.len();
        self.tweens.retain(|tween| tween.id != id);
        self.tweens.len() != len
    }

    pub fn remove_all(&mut self) {
        self.tweens.clear();
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|tween| tween.id == id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TweenId, &P)> {
        self.tweens.iter().map(|tween| (tween.id, &tween.payload))
    }

    /// Advances every tween to `time` (seconds). A tween starts on the first
    /// update after it was added. Completed tweens are removed.
    pub fn update(&mut self, time: f64) -> Vec<TweenFrame<P>> {
        let mut frames = Vec::with_capacity(self.tweens.len());
        self.tweens.retain_mut(|tween| {
            let start_time = *tween.start_time.get_or_insert(time);
            let fraction = if tween.duration > 0.0 {
                ((time - start_time) / tween.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let eased = match tween.easing {
                Some(function) => fraction.calc(function),
                None => fraction,
            };
            let complete = fraction >= 1.0;
            frames.push(TweenFrame {
                id: tween.id,
                value: Lerp::lerp(&tween.start_value, &tween.stop_value, &eased),
                complete,
                payload: tween.payload.clone(),
            });
            !complete
        });
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_update() {
        let mut tweens = TweenCollection::default();
        tweens.add(TweenOptions::new(2.0, "a"));
        let frames = tweens.update(10.0);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].value, 0.0);
        assert!(!frames[0].complete);

        let frames = tweens.update(11.0);
        assert_eq!(frames[0].value, 0.5);

        let frames = tweens.update(12.5);
        assert_eq!(frames[0].value, 1.0);
        assert!(frames[0].complete);
        assert!(tweens.is_empty());
    }

    #[test]
    fn property_ramp_uses_range_and_easing() {
        let mut tweens = TweenCollection::default();
        tweens.add_property(
            1.0,
            0.0,
            TweenOptions::new(1.0, ()).with_easing(EaseFunction::QuarticOut),
        );
        tweens.update(0.0);
        let frames = tweens.update(0.5);
        assert_eq!(frames[0].value, 1.0 - 0.9375);

        let frames = tweens.update(1.0);
        assert_eq!(frames[0].value, 0.0);
        assert!(frames[0].complete);
    }

    #[test]
    fn quartic_out_front_loads_progress() {
        let mut tweens = TweenCollection::default();
        tweens.add(TweenOptions::new(4.0, ()).with_easing(EaseFunction::QuarticOut));
        tweens.update(0.0);
        let mut last = 0.0;
        let mut steps = Vec::new();
        for time in [1.0, 2.0, 3.0, 4.0] {
            let value = tweens.update(time)[0].value;
            steps.push(value - last);
            last = value;
        }
        assert_eq!(last, 1.0);
        assert!(steps.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut tweens = TweenCollection::default();
        tweens.add(TweenOptions::new(0.0, 7));
        let frames = tweens.update(3.0);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].complete);
        assert_eq!(frames[0].value, 1.0);
        assert_eq!(frames[0].payload, 7);
    }

    #[test]
    fn remove_work() {
        let mut tweens = TweenCollection::default();
        let a = tweens.add(TweenOptions::new(1.0, 'a'));
        let b = tweens.add(TweenOptions::new(1.0, 'b'));
        assert_ne!(a, b);
        assert!(tweens.remove(a));
        assert!(!tweens.remove(a));
        assert!(!tweens.contains(a));
        assert!(tweens.contains(b));
        assert_eq!(tweens.iter().map(|(_, p)| *p).collect::<Vec<_>>(), vec!['b']);
        tweens.remove_all();
        assert_eq!(tweens.len(), 0);
    }

    #[test]
    fn frames_follow_insertion_order() {
        let mut tweens = TweenCollection::default();
        tweens.add(TweenOptions::new(1.0, 1));
        tweens.add(TweenOptions::new(1.0, 2));
        tweens.add(TweenOptions::new(1.0, 3));
        let payloads: Vec<i32> = tweens.update(0.0).into_iter().map(|f| f.payload).collect();
        assert_eq!(payloads, vec![1, 2, 3]);
    }
}
