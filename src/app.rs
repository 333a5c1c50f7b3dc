use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use roundnav::config::{self, Config};
use roundnav::events::AppEvent;
use roundnav::gui::theme;
use roundnav::gui::widget::{NavigationModel, NavigationMsg, NavigationOutput};

pub struct DemoModel {
    radius: f64,
    selected: Option<usize>,
    navigation: Controller<NavigationModel>,
}

#[derive(Debug)]
pub enum DemoMsg {
    RadiusChanged(f64),
    TabSelected(usize),
    ConfigReload,
}

impl From<AppEvent> for DemoMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => DemoMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for DemoModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = DemoMsg;
    type Output = ();

    view! {
        gtk::ApplicationWindow {
            set_title: Some("Round navigation"),
            set_default_size: (540, 960),
            add_css_class: theme::WINDOW_CLASS,

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 24,

                gtk::Label {
                    #[watch]
                    set_label: &format!("Arc radius: {:.0}", model.radius),
                },

                gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 500.0, 1.0) {
                    #[watch]
                    #[block_signal(radius_handler)]
                    set_value: model.radius,
                    connect_value_changed[sender] => move |scale| {
                        sender.input(DemoMsg::RadiusChanged(scale.value()));
                    } @radius_handler,
                },

                gtk::Label {
                    #[watch]
                    set_label: &match model.selected {
                        Some(index) => format!("Selected tab: {}", index + 1),
                        None => String::from("Tap a tab"),
                    },
                },

                #[local_ref]
                navigation -> gtk::DrawingArea {},
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let radius = config.radius;
        let navigation = NavigationModel::builder().launch(config).forward(
            sender.input_sender(),
            |output| match output {
                NavigationOutput::SelectionChanged(index) => DemoMsg::TabSelected(index),
            },
        );

        let model = DemoModel {
            radius,
            selected: None,
            navigation,
        };

        let navigation = model.navigation.widget();
        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(DemoMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            DemoMsg::RadiusChanged(radius) => {
                self.radius = radius;
                self.navigation.emit(NavigationMsg::SetRadius(radius));
            }
            DemoMsg::TabSelected(index) => {
                self.selected = Some(index);
            }
            DemoMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.radius = new_config.radius;
                    self.navigation
                        .emit(NavigationMsg::ApplyConfig(Box::new(new_config)));
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
