//! Toolkit-independent model of the round navigation tabs: circle geometry,
//! button ring layout, arc decoration and the composite lifecycle.

pub mod anim;
pub mod arc;
pub mod cache;
pub mod color;
pub mod error;
pub mod geometry;
pub mod macros;
pub mod observer;
pub mod ring;
pub mod widget;

pub use error::NavigationError;
pub use geometry::{Point, Rect, Size};
pub use widget::{NavigationConfig, Phase, RoundNavigation};
