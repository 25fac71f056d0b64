use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::common::config::Align;

#[allow(non_camel_case_types)]
pub type pid_t = i32;

/// An identifier representing a window.
///
/// This identifier is only valid for the lifetime of the host process that
/// owns it. It is not stable across restarts of the window manager.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct WindowId {
    pub pid: pid_t,
    pub idx: NonZeroU32,
}

impl WindowId {
    pub fn new(pid: pid_t, idx: u32) -> WindowId {
        WindowId {
            pid,
            idx: NonZeroU32::new(idx).unwrap(),
        }
    }
}

/// What `remove` reports about the pane a window occupied before removal.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RemovedPane {
    /// Pane index the window held: 0 = main pane, i >= 1 = secondary slot i - 1.
    pub index: usize,
    pub wid: WindowId,
}

/// The master-stack layout the stacked-secondary policy rides on.
///
/// Pane order is index 0 = main pane, indices 1..K = secondary panes stacked
/// top to bottom. Secondary heights are kept as fractions of the usable
/// screen height (`relative_sizes`, summing to ~1.0); the policy only ever
/// rewrites one of them, indirectly, through [`BaseLayout::grow_secondary`].
///
/// All methods are infallible; operations that cannot apply in the current
/// state (detached screen, out-of-range slot) are silent no-ops.
pub trait BaseLayout {
    /// Focus bookkeeping. Source of truth for the current focus index.
    fn focus(&mut self, wid: WindowId);

    /// Removal bookkeeping. Returns the pane the window occupied, or `None`
    /// if the window is not part of this layout.
    fn remove(&mut self, wid: WindowId) -> Option<RemovedPane>;

    /// Repair `relative_sizes` after a structural change: rebuild to equal
    /// shares when the pane count changed, otherwise rescale to sum 1.0.
    /// Existing proportions survive when the structure did not change.
    fn normalize(&mut self, redraw: bool);

    /// Full recompute: evenly distribute the stack height across all
    /// secondary panes.
    fn even_out(&mut self, redraw: bool);

    /// Ordered fractional heights of the secondary panes.
    fn relative_sizes(&self) -> &[f64];

    /// Set secondary slot `slot` to an absolute height of `size`, clamped so
    /// every other secondary keeps at least its minimum strip, and
    /// redistribute the remaining stack height across the others.
    fn grow_secondary(&mut self, slot: usize, size: f64);

    /// Drawable height of the screen this layout is bound to, or `None`
    /// while the layout is detached (e.g. mid-transfer between screens).
    fn usable_height(&self) -> Option<f64>;

    /// Minimum meaningful size delta; changes below it are no-ops.
    fn change_size(&self) -> f64;

    fn set_ratio(&mut self, ratio: f64);

    fn set_align(&mut self, align: Align);

    /// Current focus index: 0 = main pane, i >= 1 = secondary slot i - 1.
    fn focused(&self) -> usize;

    /// Total pane count, main pane included.
    fn client_count(&self) -> usize;

    fn client_at(&self, index: usize) -> Option<WindowId>;

    /// Fire-and-forget: flag that the host should re-place this layout's
    /// windows. The policy never waits for placement to happen.
    fn request_redraw(&mut self);

    /// Convert one of `relative_sizes` into absolute pixels. Zero while the
    /// layout is detached.
    fn absolute_size(&self, relative: f64) -> f64 {
        relative * self.usable_height().unwrap_or(0.0)
    }
}
