//! Page handlers.
//!
//! Each page module exposes `view`, which builds the data its renderer needs,
//! and `handle`, which applies one [`Action`](crate::router::Action) to the
//! session and returns the resulting [`Transition`]. Neither touches a UI
//! layer.

pub mod add;
pub mod detail;
pub mod search;
pub mod statistics;
pub mod welcome;

use crate::record::Program;
use crate::state::{Page, Transition};
use log::debug;
use serde::Serialize;

/// One entry of a programme dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramOption {
    pub label: &'static str,
    pub selected: bool,
}

/// The programme choices with `current` marked as selected.
pub fn program_options(current: Option<Program>) -> Vec<ProgramOption> {
    Program::ALL
        .into_iter()
        .map(|program| ProgramOption {
            label: program.label(),
            selected: current == Some(program),
        })
        .collect()
}

/// Follow a navigation control if `from` offers it.
pub fn navigate(from: Page, target: Page) -> Transition {
    if from.links().contains(&target) {
        Transition::GoTo(target)
    } else {
        debug!("no link from {} to {}", from, target);
        Transition::Stay
    }
}
