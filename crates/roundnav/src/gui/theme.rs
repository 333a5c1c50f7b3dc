use gtk::gdk;
use gtk4 as gtk;

pub const WINDOW_CLASS: &str = "roundnav-window";
pub const AREA_CLASS: &str = "roundnav-area";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.roundnav-window {
    background-color: @theme_bg_color;
}

.roundnav-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
