use crate::anim::{Animated, Easing};
use crate::color::rgb_hex;
use crate::error::NavigationError;
use crate::geometry::{Point, Rect, Size, point_on_circle};
use crate::observer::SelectionObserver;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SLOT_START_ANGLES: [f64; 3] = [160.0, 230.0, 300.0];
pub const SLOT_COUNT: usize = SLOT_START_ANGLES.len();
pub const SLOT_ANGLE_OFFSET: f64 = 40.0; // icons sit 40° into their tab's arc
pub const BUTTON_PADDING: f64 = 60.0;
pub const BUTTON_SIZE_RATIO: f64 = 7.0 / 12.0;
pub const TINT_DURATION: Duration = Duration::from_millis(500);
pub const DEFAULT_ICONS: [&str; SLOT_COUNT] = [
    "media-optical-symbolic",
    "weather-clear-symbolic",
    "emblem-favorite-symbolic",
];

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

impl IconName {
    pub fn defaults() -> Vec<Self> {
        DEFAULT_ICONS.iter().map(|&name| Self::new(name)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintColors {
    pub selected: Srgba<f64>,
    pub unselected: Srgba<f64>,
}

impl Default for TintColors {
    fn default() -> Self {
        Self {
            selected: rgb_hex(0xffffff),
            unselected: rgb_hex(0xd5d3e3),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSlot {
    pub start_angle: f64,
    pub icon: IconName,
    pub center: Point,
    /// Size of the drawn icon.
    pub icon_size: f64,
    /// Icon plus padding; also the tap target.
    pub bounds: Rect,
}

impl ButtonSlot {
    pub fn calculate(start_angle: f64, icon: IconName, container: Size, radius: f64) -> Self {
        let center = point_on_circle(
            container.width / 2.0,
            container.height / 2.0,
            container.width / 2.0,
            radius / 2.0,
            start_angle + SLOT_ANGLE_OFFSET,
        );
        let icon_size = radius * BUTTON_SIZE_RATIO;
        let side = icon_size + BUTTON_PADDING * 2.0;

        Self {
            start_angle,
            icon,
            center,
            icon_size,
            bounds: Rect::from_center(center, side, side),
        }
    }
}

/// Icon buttons placed along the arc, one of them selected.
pub struct ButtonRing {
    container: Size,
    radius: f64,
    icons: Vec<IconName>,
    slots: Vec<ButtonSlot>,
    selected: usize,
    tints: Vec<Animated<Srgba<f64>>>,
    colors: TintColors,
    tint_duration: Duration,
    observer: Option<Box<dyn SelectionObserver>>,
}

impl ButtonRing {
    pub fn new(
        container: Size,
        radius: f64,
        icons: Vec<IconName>,
        colors: TintColors,
        tint_duration: Duration,
    ) -> Self {
        let mut ring = Self {
            container,
            radius,
            icons,
            slots: Vec::new(),
            selected: 0,
            tints: vec![Animated::new(colors.unselected); SLOT_COUNT],
            colors,
            tint_duration,
            observer: None,
        };
        ring.layout(container.width, container.height, radius);
        ring
    }

    /// Rebuilds every slot for the given container and radius. Tints snap to
    /// their resting colors, cancelling a running tint animation.
    pub fn layout(&mut self, container_width: f64, container_height: f64, radius: f64) {
        self.container = Size::new(container_width, container_height);
        self.radius = radius;
        self.slots = SLOT_START_ANGLES
            .iter()
            .enumerate()
            .map(|(i, &angle)| {
                ButtonSlot::calculate(angle, self.icon(i), self.container, self.radius)
            })
            .collect();
        self.reset_tints();
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.layout(self.container.width, self.container.height, radius);
    }

    pub fn set_icons(&mut self, icons: Vec<IconName>) {
        self.icons = icons;
        self.layout(self.container.width, self.container.height, self.radius);
    }

    pub fn set_colors(&mut self, colors: TintColors, tint_duration: Duration) {
        self.colors = colors;
        self.tint_duration = tint_duration;
        self.reset_tints();
    }

    fn icon(&self, index: usize) -> IconName {
        self.icons
            .get(index)
            .cloned()
            .unwrap_or_else(|| IconName::new(DEFAULT_ICONS[index]))
    }

    fn reset_tints(&mut self) {
        for (i, tint) in self.tints.iter_mut().enumerate() {
            tint.set(if i == self.selected {
                self.colors.selected
            } else {
                self.colors.unselected
            });
        }
    }

    pub fn slots(&self) -> &[ButtonSlot] {
        &self.slots
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn tint(&self, index: usize) -> Option<Srgba<f64>> {
        self.tints.get(index).map(Animated::value)
    }

    pub fn is_animating(&self) -> bool {
        self.tints.iter().any(Animated::is_animating)
    }

    /// Topmost slot whose bounds contain `point`.
    pub fn button_at(&self, point: Point) -> Option<usize> {
        self.slots.iter().rposition(|s| s.bounds.contains(point))
    }

    pub fn set_observer(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observer = Some(observer);
    }

    pub fn take_observer(&mut self) -> Option<Box<dyn SelectionObserver>> {
        self.observer.take()
    }

    /// Selects `index` and starts its tint animation. Re-tapping the selected
    /// button restarts the animation from the unselected color.
    pub fn on_button_tapped(
        &mut self,
        index: usize,
        now: Duration,
    ) -> Result<(), NavigationError> {
        if index >= SLOT_COUNT {
            return Err(NavigationError::TabOutOfRange {
                index,
                count: SLOT_COUNT,
            });
        }

        self.selected = index;
        for (i, tint) in self.tints.iter_mut().enumerate() {
            if i == index {
                tint.animate(
                    self.colors.unselected,
                    self.colors.selected,
                    now,
                    self.tint_duration,
                    Easing::Linear,
                );
            } else {
                tint.set(self.colors.unselected);
            }
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.selection_changed(index);
        }
        Ok(())
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        self.tints
            .iter_mut()
            .fold(false, |changed, tint| tint.tick(now) || changed)
    }
}
