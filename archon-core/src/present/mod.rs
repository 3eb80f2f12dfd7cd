//! Terminal renditions of the [`Presentation`](crate::dispatch::Presentation)
//! collaborator.
//!
//! - **Dashboard**: full-screen panel view, redrawn on change
//! - **Pretty**: one human-readable line per update
//! - **Json**: one JSON object per update, for piping into other tools

mod dashboard;
mod json;
mod pretty;
mod tally;

#[cfg(test)]
mod tests;

pub use dashboard::{DashboardOptions, DashboardPresentation, render_dashboard};
pub use json::JsonPresentation;
pub use pretty::{PrettyPresentation, format_rejected, format_view};
pub use tally::IngestTally;

use crate::dispatch::Presentation;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Dashboard,
    Pretty,
    Json,
}

impl ViewMode {
    /// Whether this mode takes over the terminal (and logs must go elsewhere).
    pub fn owns_terminal(&self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

pub fn default_view_mode() -> ViewMode {
    if io::stdout().is_terminal() {
        ViewMode::Dashboard
    } else {
        ViewMode::Json
    }
}

pub fn stdout_presentation(mode: ViewMode, dashboard: DashboardOptions) -> Box<dyn Presentation> {
    match mode {
        ViewMode::Dashboard => Box::new(DashboardPresentation::new(io::stdout(), dashboard)),
        ViewMode::Pretty => Box::new(PrettyPresentation::new(io::stdout())),
        ViewMode::Json => Box::new(JsonPresentation::new(io::stdout())),
    }
}
