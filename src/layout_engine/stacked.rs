use tracing::debug;

use super::base::{BaseLayout, RemovedPane, WindowId};
use crate::common::config::{Align, LayoutSettings};
use crate::common::geometry::IsWithin;

/// Auto-maximizing stacked-secondary policy over a master-stack base layout.
///
/// Whenever focus lands on a secondary pane, that pane is grown to near-full
/// height while the other secondaries collapse to `min_secondary_size`,
/// giving an effect similar to the "stacked" window mode in the i3 window
/// manager. With `auto_maximize` off this is a plain pass-through to the
/// base layout.
pub struct StackedSecondary<B> {
    base: B,
    auto_maximize: bool,
    min_secondary_size: f64,
    default_ratio: f64,
    default_align: Align,
}

impl<B: BaseLayout> StackedSecondary<B> {
    pub fn new(base: B, settings: &LayoutSettings) -> Self {
        Self {
            base,
            auto_maximize: settings.auto_maximize,
            min_secondary_size: settings.min_secondary_size,
            default_ratio: settings.ratio,
            default_align: settings.align,
        }
    }

    /// Variant with the main pane on the right. Behaves identically except
    /// for the alignment `reset` restores.
    pub fn new_right(base: B, settings: &LayoutSettings) -> Self {
        let mut policy = Self::new(base, settings);
        policy.default_align = Align::Right;
        policy.base.set_align(Align::Right);
        policy
    }

    pub fn base(&self) -> &B { &self.base }

    pub fn base_mut(&mut self) -> &mut B { &mut self.base }

    pub fn auto_maximize(&self) -> bool { self.auto_maximize }

    /// Toggle auto-maximization. Restores even secondary sizes either way,
    /// then re-applies maximize sizing if a secondary pane holds focus.
    pub fn toggle_auto_maximize(&mut self) {
        self.auto_maximize = !self.auto_maximize;
        debug!(auto_maximize = self.auto_maximize, "toggled auto maximize");
        self.base.even_out(true);
        if self.base.focused() != 0 {
            self.maximize_focused_secondary();
        }
    }

    pub fn focus(&mut self, wid: WindowId) {
        self.base.focus(wid);
        // Only maximize when focus is *not* in the main pane. Doing so while
        // the main pane is focused reuses the previous secondary focus slot
        // and visibly resizes a window the user just left.
        if self.base.focused() != 0 {
            self.maximize_focused_secondary();
        }
    }

    pub fn remove(&mut self, wid: WindowId) -> Option<RemovedPane> {
        let removed = self.base.remove(wid);
        // Closing the topmost secondary drops focus back to the main pane.
        // Refocus the new topmost secondary instead so the stack keeps a
        // maximized window on top.
        if self.base.focused() == 0 && self.base.client_count() > 2 {
            if let Some(top) = self.base.client_at(1) {
                self.focus(top);
            }
        }
        removed
    }

    /// Maximize the focused secondary pane, collapsing the others to their
    /// minimum strip. No-op when there is nothing to do.
    pub fn maximize_focused_secondary(&mut self) {
        // The layout may be mid-transfer between screens.
        let Some(usable_height) = self.base.usable_height() else {
            return;
        };

        if !self.auto_maximize {
            return;
        }

        // With one or two panes a lone secondary already fills the stack.
        if self.base.client_count() < 3 {
            return;
        }

        self.base.normalize(false);
        if self.base.relative_sizes().is_empty() {
            return;
        }

        // Right after a toggle, focus can still sit on the main pane; treat
        // the first secondary as the target in that case. The same slot is
        // used for both the threshold comparison and the growth below.
        let slot = self.base.focused().max(1) - 1;

        let n = self.base.client_count() - 2;
        let collapsed_size = self.min_secondary_size * n as f64;
        let maxed_size = usable_height - collapsed_size;

        let Some(relative) = self.base.relative_sizes().get(slot).copied() else {
            return;
        };
        let current = self.base.absolute_size(relative);
        if current.is_within(self.base.change_size(), maxed_size) {
            // Already maximized.
            return;
        }

        debug!(slot, maxed_size, "maximizing focused secondary");
        self.base.grow_secondary(slot, maxed_size);
        self.base.request_redraw();
    }

    /// Restore the configured ratio and alignment, turn auto-maximization
    /// off, and evenly redistribute the stack.
    pub fn reset(&mut self, ratio: Option<f64>, redraw: bool) {
        self.base.set_ratio(ratio.unwrap_or(self.default_ratio));
        self.base.set_align(self.default_align);
        self.auto_maximize = false;
        self.base.even_out(redraw);
    }
}
