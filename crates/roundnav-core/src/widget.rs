use crate::anim::Easing;
use crate::arc::{ArcColors, ArcDecoration, ROTATION_DURATION};
use crate::error::NavigationError;
use crate::geometry::{Point, Rect, Size};
use crate::observer::SelectionObserver;
use crate::ring::{ButtonRing, IconName, TINT_DURATION, TintColors};
use std::time::Duration;
use strum::Display as StrumDisplay;

pub const SCREEN_PADDING: f64 = 80.0;
pub const DEFAULT_RADIUS: f64 = 230.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    pub radius: f64,
    pub icons: Vec<IconName>,
    pub tint_colors: TintColors,
    pub arc_colors: ArcColors,
    pub tint_duration: Duration,
    pub rotation_duration: Duration,
    pub rotation_easing: Easing,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            icons: IconName::defaults(),
            tint_colors: TintColors::default(),
            arc_colors: ArcColors::default(),
            tint_duration: TINT_DURATION,
            rotation_duration: ROTATION_DURATION,
            rotation_easing: Easing::Overshoot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Uninitialized,
    Measured,
    Ready,
}

/// The two layers of a ready widget. The arc rotates; the ring stays put.
pub struct Attached {
    pub arc: ArcDecoration,
    pub ring: ButtonRing,
}

enum Lifecycle {
    Uninitialized,
    Measured { side: f64 },
    Ready { side: f64, layers: Attached },
}

/// Arc decoration plus button ring, sized from the screen and wired so that
/// tapping a button rotates the indicator.
///
/// Children only exist once the real size is known: construct with a config,
/// then [`attach`](Self::attach) with the screen size.
pub struct RoundNavigation {
    config: NavigationConfig,
    lifecycle: Lifecycle,
    pending_observer: Option<Box<dyn SelectionObserver>>,
}

impl RoundNavigation {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Uninitialized,
            pending_observer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.lifecycle {
            Lifecycle::Uninitialized => Phase::Uninitialized,
            Lifecycle::Measured { .. } => Phase::Measured,
            Lifecycle::Ready { .. } => Phase::Ready,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Side of the square view, known once measured.
    pub fn view_side(&self) -> Option<f64> {
        match self.lifecycle {
            Lifecycle::Uninitialized => None,
            Lifecycle::Measured { side } | Lifecycle::Ready { side, .. } => Some(side),
        }
    }

    pub fn measure(&mut self, screen: Size) -> Result<f64, NavigationError> {
        if let Lifecycle::Ready { .. } = self.lifecycle {
            return Err(self.invalid("measure"));
        }
        let side = (screen.shortest_side() - SCREEN_PADDING).max(0.0);
        log::debug!("Measured screen {:?}, view side {}", screen, side);
        self.lifecycle = Lifecycle::Measured { side };
        self.warn_if_radius_invalid();
        Ok(side)
    }

    /// Measures against `screen` and creates both layers.
    pub fn attach(&mut self, screen: Size) -> Result<(), NavigationError> {
        let side = self.measure(screen)?;
        let size = Size::square(side);
        let cfg = &self.config;

        let arc = ArcDecoration::new(
            size,
            cfg.radius,
            cfg.arc_colors,
            cfg.rotation_duration,
            cfg.rotation_easing,
        );
        let mut ring = ButtonRing::new(
            size,
            cfg.radius,
            cfg.icons.clone(),
            cfg.tint_colors,
            cfg.tint_duration,
        );
        if let Some(observer) = self.pending_observer.take() {
            ring.set_observer(observer);
        }

        self.lifecycle = Lifecycle::Ready {
            side,
            layers: Attached { arc, ring },
        };
        log::debug!("Round navigation ready ({}px)", side);
        Ok(())
    }

    /// Where the view sits inside `parent`: horizontally centered, anchored to
    /// the bottom and pushed down by half its height.
    pub fn placement(&self, parent: Size) -> Option<Rect> {
        let side = self.view_side()?;
        let x = (parent.width - side) / 2.0;
        let y = parent.height - side + side / 2.0;
        Some(Rect::new(x, y, side, side))
    }

    /// Converts a point in `parent` coordinates to view coordinates.
    pub fn to_view(&self, parent: Size, point: Point) -> Option<Point> {
        let origin = self.placement(parent)?;
        Some(point.offset(-origin.x, -origin.y))
    }

    pub fn attached(&self) -> Option<&Attached> {
        match &self.lifecycle {
            Lifecycle::Ready { layers, .. } => Some(layers),
            _ => None,
        }
    }

    pub fn attached_mut(&mut self) -> Option<&mut Attached> {
        match &mut self.lifecycle {
            Lifecycle::Ready { layers, .. } => Some(layers),
            _ => None,
        }
    }

    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Propagates synchronously to both layers. Any radius is accepted, but
    /// values outside `(0, view side)` lay out inverted buttons.
    pub fn set_radius(&mut self, radius: f64) {
        self.config.radius = radius;
        self.warn_if_radius_invalid();
        if let Some(layers) = self.attached_mut() {
            layers.ring.set_radius(radius);
            layers.arc.set_radius(radius);
        }
    }

    pub fn is_radius_valid(&self) -> bool {
        let radius = self.config.radius;
        radius > 0.0 && self.view_side().is_none_or(|side| radius < side)
    }

    fn warn_if_radius_invalid(&self) {
        if !self.is_radius_valid() {
            log::warn!(
                "Arc radius {} is outside (0, {:?}); layout will be degenerate",
                self.config.radius,
                self.view_side()
            );
        }
    }

    /// Replaces the single selection observer.
    pub fn subscribe(&mut self, observer: impl SelectionObserver + 'static) {
        let observer: Box<dyn SelectionObserver> = Box::new(observer);
        match self.attached_mut() {
            Some(layers) => layers.ring.set_observer(observer),
            None => self.pending_observer = Some(observer),
        }
    }

    pub fn unsubscribe(&mut self) {
        self.pending_observer = None;
        if let Some(layers) = self.attached_mut() {
            layers.ring.take_observer();
        }
    }

    pub fn apply_config(&mut self, config: NavigationConfig) {
        let radius = config.radius;
        if let Some(layers) = self.attached_mut() {
            layers
                .ring
                .set_colors(config.tint_colors, config.tint_duration);
            layers.ring.set_icons(config.icons.clone());
            layers.arc.set_colors(config.arc_colors);
            layers
                .arc
                .set_rotation_animation(config.rotation_duration, config.rotation_easing);
        }
        self.config = config;
        self.set_radius(radius);
    }

    pub fn selected(&self) -> Option<usize> {
        self.attached().map(|layers| layers.ring.selected())
    }

    /// Selects tab `index`: the ring retints, then the arc rotates.
    pub fn tap(&mut self, index: usize, now: Duration) -> Result<(), NavigationError> {
        let invalid = self.invalid("tap");
        let layers = self.attached_mut().ok_or(invalid)?;
        layers.ring.on_button_tapped(index, now)?;
        let target = layers.arc.select_tab(index, now);
        log::debug!("Tab {} selected, rotating to {}°", index, target);
        Ok(())
    }

    /// Taps whichever button lies under `point` (view coordinates).
    pub fn tap_at(
        &mut self,
        point: Point,
        now: Duration,
    ) -> Result<Option<usize>, NavigationError> {
        let invalid = self.invalid("tap");
        let layers = self.attached().ok_or(invalid)?;
        match layers.ring.button_at(point) {
            Some(index) => self.tap(index, now).map(|_| Some(index)),
            None => Ok(None),
        }
    }

    /// Advances both animations. Returns `true` when a redraw is needed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.attached_mut().is_some_and(|layers| {
            let ring = layers.ring.tick(now);
            let arc = layers.arc.tick(now);
            ring || arc
        })
    }

    pub fn is_animating(&self) -> bool {
        self.attached()
            .is_some_and(|layers| layers.ring.is_animating() || layers.arc.is_animating())
    }

    fn invalid(&self, action: &'static str) -> NavigationError {
        NavigationError::InvalidPhase {
            action,
            phase: self.phase(),
        }
    }
}
