//! GTK 4 rendering of the round navigation tabs, plus its configuration and
//! background services.

pub mod config;
pub mod events;
pub mod gui;
pub mod sys;
