pub mod icons;
pub mod view;

pub use view::draw;

use icons::IconSet;
use roundnav_core::cache::GradientCache;
use roundnav_core::{RoundNavigation, Size};
use view::ArcPatterns;

pub const ICON_LOOKUP_SIZE: u16 = 128;
pub const ICON_RASTER_SIZE: i32 = 256;
pub const CAP_STROKE_WIDTH: f64 = 10.0;
pub const PLACEHOLDER_DOT_RATIO: f64 = 0.25; // of the icon size, when an icon is missing

/// Everything the draw callback and the event handlers share.
pub struct NavigationState {
    pub nav: RoundNavigation,
    /// Allocated size of the drawing area the view is placed in.
    pub parent: Size,
    pub patterns: GradientCache<ArcPatterns>,
    pub icons: IconSet,
}

impl NavigationState {
    pub fn new(nav: RoundNavigation) -> Self {
        Self {
            nav,
            parent: Size::default(),
            patterns: GradientCache::new(),
            icons: IconSet::default(),
        }
    }
}
