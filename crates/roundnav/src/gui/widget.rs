use crate::config::Config;
use crate::gui::navigation::{self, NavigationState, icons};
use crate::gui::{theme, window};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use roundnav_core::observer::ChannelObserver;
use roundnav_core::{Phase, Point, RoundNavigation, Size};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct NavigationModel {
    state: Rc<RefCell<NavigationState>>,
    area: gtk::DrawingArea,
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum NavigationMsg {
    Resized(i32, i32),
    Pressed(Point),
    SetRadius(f64),
    SelectTab(usize),
    ApplyConfig(Box<Config>),
}

#[derive(Debug)]
pub enum NavigationOutput {
    SelectionChanged(usize),
}

#[relm4::component(pub)]
impl SimpleComponent for NavigationModel {
    type Init = Config;
    type Input = NavigationMsg;
    type Output = NavigationOutput;

    view! {
        #[root]
        gtk::DrawingArea {
            set_hexpand: true,
            set_vexpand: true,
            add_css_class: theme::AREA_CLASS,

            connect_resize[sender] => move |_, width, height| {
                sender.input(NavigationMsg::Resized(width, height));
            },

            add_controller = gtk::GestureClick {
                connect_released[sender] => move |_, _, x, y| {
                    sender.input(NavigationMsg::Pressed(Point::new(x, y)));
                }
            }
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let mut nav = RoundNavigation::new(config.navigation());

        let (tx, rx) = async_channel::unbounded();
        nav.subscribe(ChannelObserver::from(tx));
        let output = sender.clone();
        relm4::spawn_local(async move {
            while let Ok(index) = rx.recv().await {
                if output
                    .output(NavigationOutput::SelectionChanged(index))
                    .is_err()
                {
                    break;
                }
            }
        });

        let model = NavigationModel {
            state: Rc::new(RefCell::new(NavigationState::new(nav))),
            area: root.clone(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let state_draw = model.state.clone();
        root.set_draw_func(move |_, cr, width, height| {
            let parent = Size::new(width as f64, height as f64);
            if let Err(e) = navigation::draw(cr, &mut state_draw.borrow_mut(), parent) {
                log::error!("Drawing error: {}", e);
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            NavigationMsg::Resized(width, height) => {
                let mut state = self.state.borrow_mut();
                state.parent = Size::new(width as f64, height as f64);
                if state.nav.phase() != Phase::Ready
                    && let Some(screen) = window::screen_size(&self.area)
                    && let Err(e) = state.nav.attach(screen)
                {
                    log::error!("Failed to attach navigation: {}", e);
                }
                drop(state);
                self.area.queue_draw();
            }
            NavigationMsg::Pressed(point) => {
                let now = self.now();
                let tapped = {
                    let mut state = self.state.borrow_mut();
                    let parent = state.parent;
                    match state.nav.to_view(parent, point) {
                        Some(point) => state.nav.tap_at(point, now),
                        None => Ok(None),
                    }
                };
                match tapped {
                    Ok(Some(_)) => self.start_ticking(),
                    Ok(None) => {}
                    Err(e) => log::debug!("Ignoring press: {}", e),
                }
            }
            NavigationMsg::SetRadius(radius) => {
                self.state.borrow_mut().nav.set_radius(radius);
                self.area.queue_draw();
            }
            NavigationMsg::SelectTab(index) => {
                let now = self.now();
                let result = self.state.borrow_mut().nav.tap(index, now);
                match result {
                    Ok(()) => self.start_ticking(),
                    Err(e) => log::warn!("Cannot select tab {}: {}", index, e),
                }
            }
            NavigationMsg::ApplyConfig(config) => {
                icons::refresh_cache();
                let mut state = self.state.borrow_mut();
                state.icons.clear();
                state.nav.apply_config(config.navigation());
                drop(state);
                self.area.queue_draw();
            }
        }
    }
}

impl NavigationModel {
    /// Current time on the frame clock's timeline.
    fn now(&self) -> Duration {
        let micros = self
            .area
            .frame_clock()
            .map(|clock| clock.frame_time())
            .unwrap_or_else(glib::monotonic_time);
        Duration::from_micros(micros.max(0) as u64)
    }

    /// Advances the animations on every frame until both have settled.
    fn start_ticking(&self) {
        self.area.queue_draw();
        if self.ticking.replace(true) {
            return;
        }

        let state = self.state.clone();
        let ticking = self.ticking.clone();
        self.area.add_tick_callback(move |area, clock| {
            let now = Duration::from_micros(clock.frame_time().max(0) as u64);
            let mut state = state.borrow_mut();
            if state.nav.tick(now) {
                area.queue_draw();
            }
            if state.nav.is_animating() {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}
