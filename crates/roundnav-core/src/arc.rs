use crate::anim::{Animated, Easing};
use crate::cache::{CacheKey, GradientCache};
use crate::color::rgb_hex;
use crate::geometry::{Point, Rect, Size, angle_between, distance, point_on_circle};
use palette::{Srgba, WithAlpha};
use std::time::Duration;

pub const BACKGROUND_START_ANGLE: f64 = -90.0;
pub const BACKGROUND_SWEEP_ANGLE: f64 = 360.0;
pub const INDICATOR_START_ANGLE: f64 = 160.0;
pub const INDICATOR_SWEEP_ANGLE: f64 = 80.0;
pub const TAB_ROTATION: f64 = 70.0; // degrees per tab index
pub const ROTATION_DURATION: Duration = Duration::from_millis(500);

// End cap rectangle, relative to the outer corner point in the rotated frame.
pub const CAP_CORNER_RADIUS: f64 = 12.0;
pub const CAP_INSET: f64 = 5.0;
pub const CAP_ABOVE: f64 = 10.0;
pub const CAP_BELOW: f64 = 20.0;

pub const SHADOW_SWEEP_FRACTIONS: [f64; 2] = [2.0 / 3.0, 1.0 / 2.0];
pub const SHADOW_OFFSET: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiling {
    /// Outermost color continues past the radius.
    Pad,
    /// Gradient repeats, every other repetition reversed.
    Mirror,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradientSpec {
    pub center: Point,
    pub radius: f64,
    pub inner: Srgba<f64>,
    pub outer: Srgba<f64>,
    pub tiling: Tiling,
}

/// Stroked arc inside `bounds`, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub bounds: Rect,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub width: f64,
}

/// Rounded rectangle drawn at one tip of the indicator, rotated about `pivot`
/// so that it lies across the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndCap {
    pub pivot: Point,
    pub rotation: f64,
    /// Unrotated rectangle; rotate by `rotation` about `pivot` to place it.
    pub rect: Rect,
    pub corner_radius: f64,
    pub gradient: RadialGradientSpec,
}

impl EndCap {
    pub fn calculate(
        angle: f64,
        size: Size,
        radius: f64,
        inner: Srgba<f64>,
        outer: Srgba<f64>,
    ) -> Self {
        let center = size.center();
        let outer_point = point_on_circle(center.x, center.y, size.width / 2.0, 0.0, angle);
        let inner_point = point_on_circle(center.x, center.y, size.width / 2.0, radius, angle);
        let to_center = distance(outer_point, center);

        Self {
            pivot: outer_point,
            rotation: angle_between(outer_point, inner_point),
            rect: Rect::from_edges(
                outer_point.x + CAP_INSET,
                outer_point.y - CAP_ABOVE,
                outer_point.x + radius - CAP_INSET,
                outer_point.y + CAP_BELOW,
            ),
            corner_radius: CAP_CORNER_RADIUS,
            // in the rotated frame +X points at the view center, so this lines
            // the cap's gradient up with the one on the arc
            gradient: RadialGradientSpec {
                center: outer_point.offset(to_center, 0.0),
                radius: size.width / 2.0,
                inner,
                outer,
                tiling: Tiling::Mirror,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub center: Point,
    pub radius: f64,
    pub gradient: RadialGradientSpec,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcColors {
    pub indicator_start: Srgba<f64>,
    pub indicator_end: Srgba<f64>,
    pub background_start: Srgba<f64>,
    pub background_end: Srgba<f64>,
    pub shadow: Srgba<f64>,
}

impl Default for ArcColors {
    fn default() -> Self {
        Self {
            indicator_start: rgb_hex(0x643cbf),
            indicator_end: rgb_hex(0x7646cf),
            background_start: rgb_hex(0xcfcfcf),
            background_end: rgb_hex(0xf0f0f0),
            shadow: rgb_hex(0xffffff).with_alpha(0.5),
        }
    }
}

/// Every size-derived piece of the decoration, in unrotated view coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLayout {
    pub size: Size,
    pub background: ArcStroke,
    pub background_gradient: RadialGradientSpec,
    pub indicator: ArcStroke,
    pub indicator_gradient: RadialGradientSpec,
    pub caps: [EndCap; 2],
    pub shadows: [Shadow; 2],
}

impl ArcLayout {
    pub fn calculate(size: Size, radius: f64, colors: &ArcColors) -> Self {
        let center = size.center();
        let bounds = Rect::from_edges(
            radius / 2.0,
            radius / 2.0,
            size.width - radius / 2.0,
            size.height - radius / 2.0,
        );
        let view_gradient = |inner, outer| RadialGradientSpec {
            center,
            radius: size.width / 2.0,
            inner,
            outer,
            tiling: Tiling::Mirror,
        };
        let cap = |angle| {
            EndCap::calculate(
                angle,
                size,
                radius,
                colors.indicator_start,
                colors.indicator_end,
            )
        };
        let shadow = |fraction: f64| {
            let angle = INDICATOR_START_ANGLE + INDICATOR_SWEEP_ANGLE * fraction;
            let orbit = size.width / 2.0;
            let anchor = point_on_circle(center.x, center.y, orbit, radius / 2.0, angle)
                .offset(SHADOW_OFFSET, SHADOW_OFFSET);
            Shadow {
                center: anchor,
                radius,
                gradient: RadialGradientSpec {
                    center: anchor,
                    radius,
                    inner: colors.shadow,
                    outer: colors.shadow.with_alpha(0.0),
                    tiling: Tiling::Pad,
                },
            }
        };

        Self {
            size,
            background: ArcStroke {
                bounds,
                start_angle: BACKGROUND_START_ANGLE,
                sweep_angle: BACKGROUND_SWEEP_ANGLE,
                width: radius,
            },
            background_gradient: view_gradient(colors.background_start, colors.background_end),
            indicator: ArcStroke {
                bounds,
                start_angle: INDICATOR_START_ANGLE,
                sweep_angle: INDICATOR_SWEEP_ANGLE,
                width: radius,
            },
            indicator_gradient: view_gradient(colors.indicator_start, colors.indicator_end),
            caps: [
                cap(INDICATOR_START_ANGLE),
                cap(INDICATOR_START_ANGLE + INDICATOR_SWEEP_ANGLE),
            ],
            shadows: SHADOW_SWEEP_FRACTIONS.map(shadow),
        }
    }
}

/// Background track, tab indicator, end caps and shadows, rotated as one
/// rigid drawing toward the selected tab.
#[derive(Debug, Clone)]
pub struct ArcDecoration {
    size: Size,
    radius: f64,
    colors: ArcColors,
    revision: u64,
    rotation: Animated<f64>,
    rotation_duration: Duration,
    rotation_easing: Easing,
    layout: GradientCache<ArcLayout>,
}

impl ArcDecoration {
    pub fn new(
        size: Size,
        radius: f64,
        colors: ArcColors,
        rotation_duration: Duration,
        rotation_easing: Easing,
    ) -> Self {
        Self {
            size,
            radius,
            colors,
            revision: 0,
            rotation: Animated::new(0.0),
            rotation_duration,
            rotation_easing,
            layout: GradientCache::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn stroke_width(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_colors(&mut self, colors: ArcColors) {
        self.colors = colors;
        self.revision += 1;
    }

    pub fn set_rotation_animation(&mut self, duration: Duration, easing: Easing) {
        self.rotation_duration = duration;
        self.rotation_easing = easing;
    }

    /// Key every cached paint object derived from this decoration must match.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey {
            size: self.size,
            radius: self.radius,
            revision: self.revision,
        }
    }

    pub fn layout(&mut self) -> &ArcLayout {
        let key = self.cache_key();
        let (size, radius, colors) = (self.size, self.radius, self.colors);
        self.layout.get_or_build(key, || {
            log::debug!("Rebuilding arc layout for {:?} at radius {}", size, radius);
            ArcLayout::calculate(size, radius, &colors)
        })
    }

    /// Rotates the drawing toward tab `index`, starting from wherever the
    /// current rotation is. Returns the target angle.
    pub fn select_tab(&mut self, index: usize, now: Duration) -> f64 {
        let target = TAB_ROTATION * index as f64;
        self.rotation
            .animate_to(target, now, self.rotation_duration, self.rotation_easing);
        target
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.value()
    }

    pub fn target_rotation(&self) -> f64 {
        self.rotation.target()
    }

    pub fn is_animating(&self) -> bool {
        self.rotation.is_animating()
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        self.rotation.tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn decoration(side: f64, radius: f64) -> ArcDecoration {
        ArcDecoration::new(
            Size::square(side),
            radius,
            ArcColors::default(),
            ROTATION_DURATION,
            Easing::Overshoot,
        )
    }

    #[test]
    fn test_select_tab_targets() {
        let mut arc = decoration(1000.0, 230.0);
        for index in [2, 0, 1] {
            assert_eq!(arc.select_tab(index, ms(0)), 70.0 * index as f64);
            assert_eq!(arc.target_rotation(), 70.0 * index as f64);
        }
    }

    #[test]
    fn test_rotation_settles_on_target() {
        let mut arc = decoration(1000.0, 230.0);
        arc.select_tab(2, ms(0));
        assert!(arc.tick(ms(250)));
        // overshoot easing passes the target before settling
        assert!(arc.rotation() > 140.0);
        arc.tick(ms(500));
        assert_eq!(arc.rotation(), 140.0);
        assert!(!arc.is_animating());
    }

    #[test]
    fn test_retarget_midflight() {
        let mut arc = decoration(1000.0, 230.0);
        arc.select_tab(2, ms(0));
        arc.tick(ms(100));
        let midway = arc.rotation();
        arc.select_tab(0, ms(100));
        assert_eq!(arc.rotation(), midway);
        arc.tick(ms(700));
        assert_eq!(arc.rotation(), 0.0);
    }

    #[test]
    fn test_layout_strokes() {
        let mut arc = decoration(1000.0, 230.0);
        let layout = arc.layout().clone();
        assert_eq!(layout.background.bounds, Rect::new(115.0, 115.0, 770.0, 770.0));
        assert_eq!(layout.background.start_angle, -90.0);
        assert_eq!(layout.background.sweep_angle, 360.0);
        assert_eq!(layout.indicator.start_angle, 160.0);
        assert_eq!(layout.indicator.sweep_angle, 80.0);
        assert_eq!(layout.indicator.width, 230.0);
        assert_eq!(layout.indicator_gradient.center, Point::new(500.0, 500.0));
        assert_eq!(layout.indicator_gradient.radius, 500.0);
        assert_eq!(layout.indicator_gradient.tiling, Tiling::Mirror);
    }

    #[test]
    fn test_end_caps_point_at_center() {
        let mut arc = decoration(1000.0, 230.0);
        let layout = arc.layout().clone();
        let center = Point::new(500.0, 500.0);
        for (cap, angle) in layout.caps.iter().zip([160.0, 240.0]) {
            assert!((distance(cap.pivot, center) - 500.0).abs() < EPS);
            // from the outer tip toward the center is the opposite direction
            let toward_center = angle_between(cap.pivot, center);
            assert!((cap.rotation - toward_center).abs() < 1e-6);
            let expected = (angle + 180.0_f64).rem_euclid(360.0);
            assert!((cap.rotation.rem_euclid(360.0) - expected).abs() < 1e-6);
            assert!((cap.rect.width - (230.0 - 10.0)).abs() < EPS);
            assert!((cap.rect.height - 30.0).abs() < EPS);
            assert!((cap.gradient.center.x - (cap.pivot.x + 500.0)).abs() < EPS);
            assert_eq!(cap.gradient.center.y, cap.pivot.y);
        }
    }

    #[test]
    fn test_shadows() {
        let mut arc = decoration(1000.0, 230.0);
        let layout = arc.layout().clone();
        let center = Point::new(500.0, 500.0);
        for (shadow, fraction) in layout.shadows.iter().zip(SHADOW_SWEEP_FRACTIONS) {
            let unshifted = shadow.center.offset(-SHADOW_OFFSET, -SHADOW_OFFSET);
            assert!((distance(unshifted, center) - 385.0).abs() < 1e-6);
            let angle = angle_between(center, unshifted).rem_euclid(360.0);
            assert!((angle - (160.0 + 80.0 * fraction)).abs() < 1e-6);
            assert_eq!(shadow.radius, 230.0);
            assert_eq!(shadow.gradient.outer.alpha, 0.0);
            assert_eq!(shadow.gradient.tiling, Tiling::Pad);
        }
    }

    #[test]
    fn test_layout_follows_radius_and_size() {
        let mut arc = decoration(1000.0, 230.0);
        let first = arc.layout().clone();
        assert_eq!(*arc.layout(), first);

        arc.set_radius(100.0);
        let resized = arc.layout().clone();
        assert_eq!(resized.indicator.width, 100.0);
        assert_eq!(resized.shadows[0].radius, 100.0);
        assert_eq!(resized.background.bounds.x, 50.0);

        arc.resize(Size::square(600.0));
        assert_eq!(arc.layout().indicator_gradient.radius, 300.0);
    }

    #[test]
    fn test_recolor_bumps_cache_key() {
        let mut arc = decoration(1000.0, 230.0);
        let key = arc.cache_key();
        let colors = ArcColors {
            indicator_start: rgb_hex(0x000000),
            ..ArcColors::default()
        };
        arc.set_colors(colors);
        assert_ne!(arc.cache_key(), key);
        assert_eq!(arc.layout().indicator_gradient.inner, rgb_hex(0x000000));
    }
}
