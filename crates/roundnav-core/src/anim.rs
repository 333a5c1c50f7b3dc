//! Time-driven tweens.
//!
//! Timestamps are `Duration`s on a monotonic clock chosen by the caller (the GTK
//! frontend feeds `glib::monotonic_time`), which keeps every animation
//! deterministic under test.

use palette::{Mix, Srgba};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

const OVERSHOOT_TENSION: f64 = 2.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    #[strum(serialize = "linear")]
    Linear,
    #[default]
    #[strum(serialize = "overshoot")]
    Overshoot,
    #[strum(serialize = "decelerate")]
    Decelerate,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress. Overshoot leaves
    /// `[0, 1]` before settling on 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Overshoot => {
                let t = t - 1.0;
                t * t * ((OVERSHOOT_TENSION + 1.0) * t + OVERSHOOT_TENSION) + 1.0
            }
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

// Component-wise in sRGB, like an ARGB evaluator.
impl Lerp for Srgba<f64> {
    fn lerp(self, to: Self, t: f64) -> Self {
        self.mix(to, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub started_at: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, started_at: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            easing,
        }
    }

    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Duration) -> T {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(progress))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

/// A value with at most one tween in flight. Starting a new tween replaces the
/// old one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated<T> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Where the value will rest once the running tween (if any) finishes.
    pub fn target(&self) -> T {
        self.tween.map(|t| t.to).unwrap_or(self.value)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Jumps to `value`, dropping any running tween.
    pub fn set(&mut self, value: T) {
        self.tween = None;
        self.value = value;
    }

    /// Stops the running tween where it currently is.
    pub fn cancel(&mut self) {
        self.tween = None;
    }

    pub fn animate(&mut self, from: T, to: T, now: Duration, duration: Duration, easing: Easing) {
        self.value = from;
        self.tween = Some(Tween::new(from, to, now, duration, easing));
    }

    /// Animates from the current (possibly mid-flight) value.
    pub fn animate_to(&mut self, to: T, now: Duration, duration: Duration, easing: Easing) {
        self.animate(self.value, to, now, duration, easing);
    }

    /// Returns `true` when the value moved and a redraw is needed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        self.value = tween.value_at(now);
        if tween.is_finished(now) {
            self.tween = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"overshoot\"", Easing::Overshoot),
            ("\"Overshoot\"", Easing::Overshoot),
            ("\"LINEAR\"", Easing::Linear),
            ("\"decelerate\"", Easing::Decelerate),
        ];

        for (json, expected) in cases {
            let deserialized: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Easing>("\"bounce\"").is_err());
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::Overshoot, Easing::Decelerate] {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing}");
        }
    }

    #[test]
    fn test_overshoot_passes_target() {
        let peak = (1..100)
            .map(|i| Easing::Overshoot.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_tween_linear_midpoint() {
        let tween = Tween::new(0.0, 100.0, ms(1000), ms(500), Easing::Linear);
        assert_eq!(tween.value_at(ms(900)), 0.0);
        assert!((tween.value_at(ms(1250)) - 50.0).abs() < 1e-9);
        assert_eq!(tween.value_at(ms(1500)), 100.0);
        assert!(tween.is_finished(ms(2000)));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = Tween::new(1.0, 2.0, ms(10), Duration::ZERO, Easing::Linear);
        assert_eq!(tween.value_at(ms(10)), 2.0);
    }

    #[test]
    fn test_animated_retarget_starts_from_current_value() {
        let mut value = Animated::new(0.0);
        value.animate_to(100.0, ms(0), ms(100), Easing::Linear);
        value.tick(ms(50));
        assert!((value.value() - 50.0).abs() < 1e-9);

        value.animate_to(0.0, ms(50), ms(100), Easing::Linear);
        assert_eq!(value.target(), 0.0);
        value.tick(ms(100));
        assert!((value.value() - 25.0).abs() < 1e-9);

        assert!(value.tick(ms(150)));
        assert_eq!(value.value(), 0.0);
        assert!(!value.is_animating());
        assert!(!value.tick(ms(200)));
    }

    #[test]
    fn test_color_lerp_is_componentwise() {
        let from = Srgba::new(0.0, 0.2, 1.0, 1.0);
        let to = Srgba::new(1.0, 0.4, 0.0, 1.0);
        let mid = from.lerp(to, 0.5);
        assert!((mid.red - 0.5).abs() < 1e-9);
        assert!((mid.green - 0.3).abs() < 1e-9);
        assert!((mid.blue - 0.5).abs() < 1e-9);
        assert!((mid.alpha - 1.0).abs() < 1e-9);
    }
}
