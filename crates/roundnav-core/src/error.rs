use crate::widget::Phase;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum NavigationError {
    #[error("Tab {index} does not exist (ring has {count} tabs)")]
    TabOutOfRange { index: usize, count: usize },
    #[error("Cannot {action} while {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },
}
