pub mod navigation;
pub mod theme;
pub mod widget;
pub mod window;
