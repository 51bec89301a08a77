//! Command routing.
//!
//! Translates recognized navigation commands into page changes on the
//! shared [`SystemState`]. Routing is where the mode gate lives: in
//! Exercise mode every navigation command is dropped so a rep cannot
//! accidentally flip pages.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use formcoach_core::{Command, Mode, PageId};

use crate::state::SystemState;

/// A page change applied by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTransition {
    /// Page before the command
    pub from: PageId,
    /// Page after the command
    pub to: PageId,
}

/// Routes gesture commands onto the shared navigation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRouter;

impl CommandRouter {
    /// Create a new router
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies a command against the current state.
    ///
    /// Returns the transition that took place, or `None` when the command
    /// was dropped (Exercise mode) or was a no-op (already on the target
    /// page). The engine's cooldown still runs for dropped commands, which
    /// keeps gesture cadence identical across modes.
    pub fn apply(&self, command: Command, state: &SystemState) -> Option<PageTransition> {
        if state.mode() == Mode::Exercise {
            debug!(%command, "command dropped in exercise mode");
            return None;
        }

        let from = state.current_page();
        let to = command.target_page();
        if from == to {
            return None;
        }

        state.set_page(to);
        info!(%command, %from, %to, "navigated");
        Some(PageTransition { from, to })
    }

    /// Resolves a page name as the front end reports it, falling back to
    /// Home for anything unrecognized.
    #[must_use]
    pub fn resolve_page(&self, name: &str) -> PageId {
        match name.parse::<PageId>() {
            Ok(page) => page,
            Err(_) => {
                tracing::warn!(name, "unknown page name, assuming Home");
                PageId::Home
            }
        }
    }
}
