use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use roundnav_core::Size;

/// Size the navigation is measured against: the toplevel window once it has
/// been allocated, otherwise the monitor it is shown on.
pub fn screen_size(widget: &impl IsA<gtk::Widget>) -> Option<Size> {
    let root = widget.as_ref().root()?;
    let (width, height) = (root.width(), root.height());
    if width > 0 && height > 0 {
        return Some(Size::new(width as f64, height as f64));
    }
    monitor_size(&root)
}

fn monitor_size(root: &gtk::Root) -> Option<Size> {
    let surface = root.surface()?;
    let monitor = gdk::Display::default()?.monitor_at_surface(&surface)?;
    let geometry = monitor.geometry();
    Some(Size::new(geometry.width() as f64, geometry.height() as f64))
}
