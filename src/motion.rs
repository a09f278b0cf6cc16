use std::time::Duration;

/// One animation frame at 60fps.
pub const FRAME_TICK: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseOutCubic,
}

impl Easing {
    /// Maps normalized progress onto the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A single animation segment anchored at a frame timestamp (milliseconds).
///
/// Progress is a pure function of the timestamp handed in, so the same tween can
/// be driven by animation frames in the browser or by plain numbers in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    start: f64,
    duration: f64,
    easing: Easing,
}

impl Tween {
    pub fn new(start: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            duration: duration.as_nanos() as f64 / 1_000_000.0,
            easing,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start).max(0.0);
        self.easing.apply(elapsed / self.duration)
    }

    pub fn interpolate(&self, from: f64, to: f64, now: f64) -> f64 {
        from + (to - from) * self.progress(now)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.start >= self.duration
    }
}

/// Counts a displayed integer up from zero to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    target: u32,
    duration: Duration,
    tick: Duration,
    easing: Easing,
}

impl CounterAnimation {
    pub fn new(target: u32, duration: Duration) -> Self {
        Self {
            target,
            duration,
            tick: FRAME_TICK,
            easing: Easing::Linear,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Value shown `elapsed` after the counter started. Never exceeds the target
    /// and lands exactly on it once the duration has passed.
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        if elapsed >= self.duration {
            return self.target;
        }
        let progress = self
            .easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        let value = (f64::from(self.target) * progress).floor() as u32;
        value.min(self.target)
    }

    /// The tick-sampled sequence of displayed values, ending at the target.
    pub fn frames(&self) -> CounterFrames {
        CounterFrames {
            animation: *self,
            ticks: 0,
            done: false,
        }
    }
}

pub struct CounterFrames {
    animation: CounterAnimation,
    ticks: u32,
    done: bool,
}

impl Iterator for CounterFrames {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.done {
            return None;
        }
        self.ticks = self.ticks.saturating_add(1);
        let elapsed = if self.animation.tick.is_zero() {
            self.animation.duration
        } else {
            self.animation.tick.saturating_mul(self.ticks)
        };
        if elapsed >= self.animation.duration {
            self.done = true;
        }
        Some(self.animation.value_at(elapsed))
    }
}

/// Delays for a list of items entering one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerPlan {
    offset: Duration,
    increment: Duration,
}

impl StaggerPlan {
    pub const fn new(increment: Duration) -> Self {
        Self {
            offset: Duration::ZERO,
            increment,
        }
    }

    pub const fn with_offset(mut self, offset: Duration) -> Self {
        self.offset = offset;
        self
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.offset + self.increment.saturating_mul(index)
    }

    pub fn schedule(&self, count: usize) -> impl Iterator<Item = (usize, Duration)> {
        let plan = *self;
        (0..count).map(move |index| (index, plan.delay_for(index)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeUnit {
    Char,
    Word,
}

/// Reveals a piece of text one unit at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    unit: TypeUnit,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, unit: TypeUnit) -> Self {
        Self {
            text: text.into(),
            unit,
        }
    }

    pub fn steps(&self) -> usize {
        match self.unit {
            TypeUnit::Char => self.text.chars().count(),
            TypeUnit::Word => {
                if self.text.is_empty() {
                    0
                } else {
                    self.text.split(' ').count()
                }
            }
        }
    }

    /// Text visible after `step` units have been typed.
    pub fn frame(&self, step: usize) -> String {
        match self.unit {
            TypeUnit::Char => self.text.chars().take(step).collect(),
            TypeUnit::Word => self
                .text
                .split(' ')
                .take(step)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn is_complete(&self, step: usize) -> bool {
        step >= self.steps()
    }
}

pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    scroll_y.max(0.0) * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_bounds() {
        for easing in [Easing::Linear, Easing::EaseOutCubic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
        assert!(Easing::EaseOutCubic.apply(0.5) > Easing::Linear.apply(0.5));
    }

    #[test]
    fn test_tween_progress_is_pure_in_time() {
        let tween = Tween::new(1_000.0, Duration::from_millis(800), Easing::Linear);
        assert_eq!(tween.progress(500.0), 0.0);
        assert_eq!(tween.progress(1_400.0), 0.5);
        assert_eq!(tween.progress(1_400.0), tween.progress(1_400.0));
        assert_eq!(tween.progress(5_000.0), 1.0);
        assert!(!tween.is_finished(1_799.0));
        assert!(tween.is_finished(1_800.0));

        // scroll-to-top style interpolation
        let y = tween.interpolate(600.0, 0.0, 1_400.0);
        assert_eq!(y, 300.0);
    }

    #[test]
    fn test_zero_duration_tween_is_complete() {
        let tween = Tween::new(0.0, Duration::ZERO, Easing::EaseOutCubic);
        assert_eq!(tween.progress(0.0), 1.0);
        assert!(tween.is_finished(0.0));
    }

    #[test]
    fn test_counter_example_sequence() {
        let counter = CounterAnimation::new(50, Duration::from_millis(2000));
        let frames = counter.frames().collect::<Vec<_>>();

        // 2000ms / 16ms = 125 ticks, 0.4 per tick
        assert_eq!(frames.len(), 125);
        assert_eq!(frames[0], 0);
        assert_eq!(frames[frames.len() - 2], 49);
        assert_eq!(*frames.last().unwrap(), 50);
    }

    #[test]
    fn test_counter_monotonic_and_bounded() {
        for (target, millis) in [(5, 2000), (20, 2000), (95, 1000), (1200, 2000), (7, 30)] {
            let counter = CounterAnimation::new(target, Duration::from_millis(millis));
            let frames = counter.frames().collect::<Vec<_>>();
            assert!(frames.windows(2).all(|w| w[0] <= w[1]));
            assert!(frames.iter().all(|v| *v <= target));
            assert_eq!(*frames.last().unwrap(), target);
        }
    }

    #[test]
    fn test_counter_degenerate_inputs() {
        let zero_target = CounterAnimation::new(0, Duration::from_millis(2000));
        assert!(zero_target.frames().all(|v| v == 0));

        let instant = CounterAnimation::new(42, Duration::ZERO);
        assert_eq!(instant.frames().collect::<Vec<_>>(), vec![42]);

        let no_tick =
            CounterAnimation::new(9, Duration::from_millis(100)).with_tick(Duration::ZERO);
        assert_eq!(no_tick.frames().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_counter_value_at_overshoot() {
        let counter = CounterAnimation::new(20, Duration::from_millis(2000))
            .with_easing(Easing::EaseOutCubic);
        assert_eq!(counter.value_at(Duration::from_secs(10)), 20);
        assert!(counter.value_at(Duration::from_millis(1000)) <= 20);
        assert!(counter.value_at(Duration::from_millis(1000)) > 10);
    }

    #[test]
    fn test_stagger_delays() {
        let plan =
            StaggerPlan::new(Duration::from_millis(200)).with_offset(Duration::from_millis(800));
        assert_eq!(plan.delay_for(0), Duration::from_millis(800));
        assert_eq!(plan.delay_for(3), Duration::from_millis(1400));

        let scheduled = plan.schedule(3).collect::<Vec<_>>();
        assert_eq!(
            scheduled,
            vec![
                (0, Duration::from_millis(800)),
                (1, Duration::from_millis(1000)),
                (2, Duration::from_millis(1200)),
            ]
        );
    }

    #[test]
    fn test_stagger_empty_list() {
        let plan = StaggerPlan::new(Duration::from_millis(100));
        assert_eq!(plan.schedule(0).count(), 0);
    }

    #[test]
    fn test_typewriter_chars() {
        let tw = Typewriter::new("Héllo", TypeUnit::Char);
        assert_eq!(tw.steps(), 5);
        assert_eq!(tw.frame(0), "");
        assert_eq!(tw.frame(2), "Hé");
        assert_eq!(tw.frame(99), "Héllo");
        assert!(tw.is_complete(5));
    }

    #[test]
    fn test_typewriter_words() {
        let tw = Typewriter::new("fast and reliable work", TypeUnit::Word);
        assert_eq!(tw.steps(), 4);
        assert_eq!(tw.frame(1), "fast");
        assert_eq!(tw.frame(3), "fast and reliable");
        assert!(!tw.is_complete(3));

        let empty = Typewriter::new("", TypeUnit::Word);
        assert_eq!(empty.steps(), 0);
        assert!(empty.is_complete(0));
    }

    #[test]
    fn test_parallax() {
        assert_eq!(parallax_offset(400.0, 0.5), 200.0);
        assert_eq!(parallax_offset(-20.0, 0.5), 0.0);
    }
}
