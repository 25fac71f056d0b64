use serde::{Deserialize, Serialize};
use tracing::debug;

use super::base::{BaseLayout, RemovedPane, WindowId};
use super::monad::MonadLayout;
use super::stacked::StackedSecondary;
use crate::common::config::LayoutSettings;
use crate::common::geometry::Rect;

/// User-bindable layout commands. Hosts deserialize these by name
/// (`"toggle_auto_maximize"`, `{"reset": {...}}`) and hand them to
/// [`LayoutEngine::handle_command`].
#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    ToggleAutoMaximize,
    Reset {
        #[serde(default)]
        ratio: Option<f64>,
        #[serde(default = "default_redraw")]
        redraw: bool,
    },
}

fn default_redraw() -> bool { true }

/// Notifications from the host's event dispatch loop. Delivered one at a
/// time, never concurrently.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    WindowAdded(WindowId),
    WindowRemoved(WindowId),
    WindowFocused(WindowId),
    ScreenAttached(Rect),
    ScreenDetached,
}

#[must_use]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventResponse {
    pub focus_window: Option<WindowId>,
    /// The layout asked for a redraw; the host should re-place windows from
    /// [`LayoutEngine::calculate_layout`].
    pub relayout: bool,
}

/// Host-facing facade wiring the stacked-secondary policy to a concrete
/// master-stack base layout.
pub struct LayoutEngine {
    policy: StackedSecondary<MonadLayout>,
}

impl LayoutEngine {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            policy: StackedSecondary::new(MonadLayout::new(settings), settings),
        }
    }

    pub fn policy(&self) -> &StackedSecondary<MonadLayout> { &self.policy }

    pub fn policy_mut(&mut self) -> &mut StackedSecondary<MonadLayout> { &mut self.policy }

    pub fn focused_window(&self) -> Option<WindowId> {
        let base = self.policy.base();
        base.client_at(base.focused())
    }

    pub fn handle_event(&mut self, event: LayoutEvent) -> EventResponse {
        debug!(?event);
        let mut removed: Option<RemovedPane> = None;
        match event {
            LayoutEvent::WindowAdded(wid) => {
                self.policy.base_mut().add_window(wid);
                self.policy.focus(wid);
            }
            LayoutEvent::WindowRemoved(wid) => {
                removed = self.policy.remove(wid);
            }
            LayoutEvent::WindowFocused(wid) => {
                self.policy.focus(wid);
            }
            LayoutEvent::ScreenAttached(screen) => {
                self.policy.base_mut().set_screen(Some(screen));
                if self.policy.base().focused() != 0 {
                    self.policy.maximize_focused_secondary();
                }
            }
            LayoutEvent::ScreenDetached => {
                self.policy.base_mut().set_screen(None);
            }
        }
        if let Some(removed) = removed {
            debug!(?removed, "window left layout");
        }
        self.drain_response()
    }

    pub fn handle_command(&mut self, command: LayoutCommand) -> EventResponse {
        debug!(?command);
        match command {
            LayoutCommand::ToggleAutoMaximize => self.policy.toggle_auto_maximize(),
            LayoutCommand::Reset { ratio, redraw } => self.policy.reset(ratio, redraw),
        }
        self.drain_response()
    }

    /// Compute a frame for every pane on the bound screen. Empty while the
    /// layout is detached.
    pub fn calculate_layout(&self) -> Vec<(WindowId, Rect)> {
        self.policy.base().calculate_layout()
    }

    fn drain_response(&mut self) -> EventResponse {
        EventResponse {
            focus_window: self.focused_window(),
            relayout: self.policy.base_mut().take_redraw(),
        }
    }
}
