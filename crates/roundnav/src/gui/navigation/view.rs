use super::{CAP_STROKE_WIDTH, NavigationState, PLACEHOLDER_DOT_RATIO};
use super::icons::IconSet;
use cairo::{Context, Extend, LineCap, LineJoin, RadialGradient};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use roundnav_core::arc::{
    ArcDecoration, ArcLayout, ArcStroke, EndCap, RadialGradientSpec, Shadow, Tiling,
};
use roundnav_core::cache::GradientCache;
use roundnav_core::ring::{ButtonRing, ButtonSlot};
use roundnav_core::{Rect, Size};
use std::f64::consts::PI;

/// cairo patterns for one [`ArcLayout`].
pub struct ArcPatterns {
    background: RadialGradient,
    indicator: RadialGradient,
    caps: [RadialGradient; 2],
    shadows: [RadialGradient; 2],
}

impl ArcPatterns {
    pub fn build(layout: &ArcLayout) -> Self {
        Self {
            background: radial_gradient(&layout.background_gradient),
            indicator: radial_gradient(&layout.indicator_gradient),
            caps: layout.caps.each_ref().map(|cap| radial_gradient(&cap.gradient)),
            shadows: layout
                .shadows
                .each_ref()
                .map(|shadow| radial_gradient(&shadow.gradient)),
        }
    }
}

fn radial_gradient(spec: &RadialGradientSpec) -> RadialGradient {
    let (cx, cy) = (spec.center.x, spec.center.y);
    let gradient = RadialGradient::new(cx, cy, 0.0, cx, cy, spec.radius);
    for (offset, color) in [(0.0, spec.inner), (1.0, spec.outer)] {
        let (r, g, b, a) = color.into_components();
        gradient.add_color_stop_rgba(offset, r, g, b, a);
    }
    gradient.set_extend(match spec.tiling {
        Tiling::Pad => Extend::Pad,
        Tiling::Mirror => Extend::Reflect,
    });
    gradient
}

fn set_source_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Draws the whole widget into a drawing area of size `parent`. Does nothing
/// until the navigation is ready.
pub fn draw(cr: &Context, state: &mut NavigationState, parent: Size) -> Result<(), cairo::Error> {
    let Some(origin) = state.nav.placement(parent) else {
        return Ok(());
    };
    let NavigationState {
        nav,
        patterns,
        icons,
        ..
    } = state;
    let Some(layers) = nav.attached_mut() else {
        return Ok(());
    };

    cr.save()?;
    cr.translate(origin.x, origin.y);
    draw_arc(cr, &mut layers.arc, patterns)?;
    draw_ring(cr, &layers.ring, icons)?;
    cr.restore()
}

fn draw_arc(
    cr: &Context,
    arc: &mut ArcDecoration,
    patterns: &mut GradientCache<ArcPatterns>,
) -> Result<(), cairo::Error> {
    if arc.radius() <= 0.0 || arc.size().width <= 0.0 {
        return Ok(());
    }
    let key = arc.cache_key();
    let rotation = arc.rotation();
    let layout = arc.layout();
    let patterns = patterns.get_or_build(key, || ArcPatterns::build(layout));
    let center = layout.size.center();

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(rotation.to_radians());
    cr.translate(-center.x, -center.y);

    stroke_arc(cr, &layout.background, &patterns.background)?;
    stroke_arc(cr, &layout.indicator, &patterns.indicator)?;
    for (cap, pattern) in layout.caps.iter().zip(&patterns.caps) {
        fill_cap(cr, cap, pattern)?;
    }
    for (shadow, pattern) in layout.shadows.iter().zip(&patterns.shadows) {
        fill_shadow(cr, shadow, pattern)?;
    }

    cr.restore()
}

fn stroke_arc(
    cr: &Context,
    stroke: &ArcStroke,
    pattern: &RadialGradient,
) -> Result<(), cairo::Error> {
    let bounds = stroke.bounds;
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return Ok(());
    }
    let center = bounds.center();
    let start = stroke.start_angle.to_radians();
    let end = (stroke.start_angle + stroke.sweep_angle).to_radians();

    cr.new_path();
    cr.save()?;
    // arc() only draws circles; scale so the unit circle fills the bounds
    cr.translate(center.x, center.y);
    cr.scale(bounds.width / 2.0, bounds.height / 2.0);
    cr.arc(0.0, 0.0, 1.0, start, end);
    cr.restore()?;

    cr.set_source(pattern)?;
    cr.set_line_width(stroke.width);
    cr.set_line_cap(LineCap::Butt);
    cr.set_line_join(LineJoin::Round);
    cr.stroke()
}

fn fill_cap(cr: &Context, cap: &EndCap, pattern: &RadialGradient) -> Result<(), cairo::Error> {
    if cap.rect.width <= 0.0 {
        return Ok(());
    }
    cr.save()?;
    cr.translate(cap.pivot.x, cap.pivot.y);
    cr.rotate(cap.rotation.to_radians());
    cr.translate(-cap.pivot.x, -cap.pivot.y);

    rounded_rect(cr, cap.rect, cap.corner_radius);
    cr.set_source(pattern)?;
    cr.fill_preserve()?;
    cr.set_line_width(CAP_STROKE_WIDTH);
    cr.set_line_join(LineJoin::Round);
    cr.stroke()?;
    cr.restore()
}

fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    cr.new_sub_path();
    cr.arc(right - r, top + r, r, -PI / 2.0, 0.0);
    cr.arc(right - r, bottom - r, r, 0.0, PI / 2.0);
    cr.arc(left + r, bottom - r, r, PI / 2.0, PI);
    cr.arc(left + r, top + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

fn fill_shadow(
    cr: &Context,
    shadow: &Shadow,
    pattern: &RadialGradient,
) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(shadow.center.x, shadow.center.y, shadow.radius, 0.0, 2.0 * PI);
    cr.set_source(pattern)?;
    cr.fill()
}

struct ButtonRenderer<'a> {
    slot: &'a ButtonSlot,
    tint: Srgba<f64>,
    pixbuf: Option<Pixbuf>,
}

impl ButtonRenderer<'_> {
    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        match &self.pixbuf {
            Some(pixbuf) => self.draw_icon(cr, pixbuf),
            None => self.draw_placeholder(cr),
        }
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let size = self.slot.icon_size;
        let bounds = Rect::from_center(self.slot.center, size, size);
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if bounds.width <= 0.0 || bounds.height <= 0.0 || pw <= 0.0 || ph <= 0.0 {
            return Ok(());
        }

        cr.save()?;
        cr.translate(bounds.x, bounds.y);
        cr.scale(bounds.width / pw, bounds.height / ph);

        // tint only where the icon is opaque
        cr.push_group();
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        let icon = cr.pop_group()?;
        set_source_color(cr, self.tint);
        cr.mask(&icon)?;

        cr.restore()
    }

    fn draw_placeholder(&self, cr: &Context) -> Result<(), cairo::Error> {
        let radius = self.slot.icon_size * PLACEHOLDER_DOT_RATIO;
        if radius <= 0.0 {
            return Ok(());
        }
        cr.new_path();
        cr.arc(self.slot.center.x, self.slot.center.y, radius, 0.0, 2.0 * PI);
        set_source_color(cr, self.tint);
        cr.fill()
    }
}

fn draw_ring(cr: &Context, ring: &ButtonRing, icons: &mut IconSet) -> Result<(), cairo::Error> {
    for (i, slot) in ring.slots().iter().enumerate() {
        let Some(tint) = ring.tint(i) else {
            continue;
        };
        ButtonRenderer {
            slot,
            tint,
            pixbuf: icons.get(&slot.icon),
        }
        .draw(cr)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundnav_core::arc::ArcColors;
    use roundnav_core::{NavigationConfig, RoundNavigation};

    fn ready_state() -> NavigationState {
        let mut nav = RoundNavigation::new(NavigationConfig {
            icons: Vec::new(),
            ..NavigationConfig::default()
        });
        nav.attach(Size::new(440.0, 440.0)).unwrap();
        nav.set_radius(90.0);
        NavigationState::new(nav)
    }

    fn surface() -> (cairo::ImageSurface, Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 440, 440).unwrap();
        let cr = Context::new(&surface).unwrap();
        (surface, cr)
    }

    #[test]
    fn test_gradient_tiling() {
        let layout = ArcLayout::calculate(Size::square(360.0), 90.0, &ArcColors::default());
        let patterns = ArcPatterns::build(&layout);
        assert_eq!(patterns.background.extend(), Extend::Reflect);
        assert_eq!(patterns.caps[1].extend(), Extend::Reflect);
        assert_eq!(patterns.shadows[0].extend(), Extend::Pad);
        let (_, _, _, _, _, r1) = patterns.indicator.radial_circles().unwrap();
        assert_eq!(r1, 180.0);
    }

    #[test]
    fn test_draw_before_ready_is_noop() {
        let mut state = NavigationState::new(RoundNavigation::new(NavigationConfig::default()));
        let (_surface, cr) = surface();
        assert!(draw(&cr, &mut state, Size::new(440.0, 440.0)).is_ok());
        assert!(!state.patterns.is_fresh(Default::default()));
    }

    #[test]
    fn test_draw_caches_patterns_per_radius() {
        let mut state = ready_state();
        let (_surface, cr) = surface();
        let parent = Size::new(440.0, 440.0);

        draw(&cr, &mut state, parent).unwrap();
        let key = state.nav.attached().unwrap().arc.cache_key();
        assert!(state.patterns.is_fresh(key));

        state.nav.set_radius(120.0);
        let key = state.nav.attached().unwrap().arc.cache_key();
        assert!(!state.patterns.is_fresh(key));
        draw(&cr, &mut state, parent).unwrap();
        assert!(state.patterns.is_fresh(key));
    }

    #[test]
    fn test_draw_paints_bottom_half_only() {
        let mut state = ready_state();
        let (mut surface, cr) = surface();
        draw(&cr, &mut state, Size::new(440.0, 440.0)).unwrap();
        drop(cr);

        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let alpha_at = |x: usize, y: usize| data[y * stride + x * 4 + 3];
        // view is 360px, centered horizontally, its center on the bottom edge
        assert_eq!(alpha_at(220, 100), 0);
        assert!(alpha_at(40 + 45, 439) > 0);
    }

    #[test]
    fn test_degenerate_radius_draws_nothing() {
        let mut state = ready_state();
        state.nav.set_radius(0.0);
        let (_surface, cr) = surface();
        assert!(draw(&cr, &mut state, Size::new(440.0, 440.0)).is_ok());
    }
}
