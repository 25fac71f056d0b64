use serde::{Deserialize, Serialize};
use tracing::trace;

use super::base::{BaseLayout, RemovedPane, WindowId};
use crate::common::config::{Align, LayoutSettings};
use crate::common::geometry::{Point, Rect, Round, Size};

/// Master-stack base layout: one main pane on the configured side of the
/// screen, the remaining windows stacked top to bottom in the other column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonadLayout {
    clients: Vec<WindowId>,
    relative_sizes: Vec<f64>,
    focused: usize,
    ratio: f64,
    align: Align,
    change_size: f64,
    min_secondary_size: f64,
    #[serde(skip)]
    screen: Option<Rect>,
    #[serde(skip)]
    needs_redraw: bool,
}

impl MonadLayout {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            clients: Vec::new(),
            relative_sizes: Vec::new(),
            focused: 0,
            ratio: settings.ratio,
            align: settings.align,
            change_size: settings.change_size,
            min_secondary_size: settings.min_secondary_size,
            screen: None,
            needs_redraw: false,
        }
    }

    pub fn ratio(&self) -> f64 { self.ratio }

    pub fn align(&self) -> Align { self.align }

    pub fn clients(&self) -> &[WindowId] { &self.clients }

    /// Attach to (or detach from) a screen. Detached layouts compute no
    /// geometry and ignore size mutations.
    pub fn set_screen(&mut self, screen: Option<Rect>) {
        self.screen = screen;
        if self.screen.is_some() {
            self.normalize(true);
        } else {
            self.needs_redraw = false;
        }
    }

    /// Append a window at the bottom of the stack and focus it.
    pub fn add_window(&mut self, wid: WindowId) {
        self.clients.push(wid);
        self.focused = self.clients.len() - 1;
        self.normalize(true);
    }

    pub fn contains_window(&self, wid: WindowId) -> bool { self.clients.contains(&wid) }

    /// Drain the pending redraw request.
    pub fn take_redraw(&mut self) -> bool { std::mem::take(&mut self.needs_redraw) }

    /// Compute a frame for every pane. Empty while detached.
    pub fn calculate_layout(&self) -> Vec<(WindowId, Rect)> {
        let Some(screen) = self.screen else { return Vec::new() };
        match self.clients.len() {
            0 => Vec::new(),
            1 => vec![(self.clients[0], screen)],
            _ => {
                let main_width = (screen.size.width * self.ratio).round();
                let stack_width = screen.size.width - main_width;
                let (main_x, stack_x) = match self.align {
                    Align::Left => (screen.origin.x, screen.origin.x + main_width),
                    Align::Right => (screen.origin.x + stack_width, screen.origin.x),
                };

                let mut frames = Vec::with_capacity(self.clients.len());
                frames.push((
                    self.clients[0],
                    Rect::new(
                        Point::new(main_x, screen.origin.y),
                        Size::new(main_width, screen.size.height),
                    ),
                ));

                let mut y = screen.origin.y;
                for (slot, &wid) in self.clients[1..].iter().enumerate() {
                    let height =
                        self.relative_sizes.get(slot).copied().unwrap_or(0.0) * screen.size.height;
                    frames.push((
                        wid,
                        Rect::new(Point::new(stack_x, y), Size::new(stack_width, height)).round(),
                    ));
                    y += height;
                }
                frames
            }
        }
    }

    fn secondary_count(&self) -> usize { self.clients.len().saturating_sub(1) }
}

impl BaseLayout for MonadLayout {
    fn focus(&mut self, wid: WindowId) {
        if let Some(index) = self.clients.iter().position(|&c| c == wid) {
            self.focused = index;
        }
    }

    fn remove(&mut self, wid: WindowId) -> Option<RemovedPane> {
        let index = self.clients.iter().position(|&c| c == wid)?;
        self.clients.remove(index);
        // Focus falls toward the top of the stack. Removing the focused
        // topmost secondary lands focus on the main pane.
        if self.focused > index || (self.focused == index && self.focused > 0) {
            self.focused -= 1;
        }
        if self.focused >= self.clients.len() {
            self.focused = self.clients.len().saturating_sub(1);
        }
        self.normalize(true);
        trace!(?wid, index, "removed window");
        Some(RemovedPane { index, wid })
    }

    fn normalize(&mut self, redraw: bool) {
        let n = self.secondary_count();
        if self.relative_sizes.len() != n {
            self.relative_sizes = if n == 0 {
                Vec::new()
            } else {
                vec![1.0 / n as f64; n]
            };
        } else if n > 0 {
            let total: f64 = self.relative_sizes.iter().sum();
            if total > 0.0 && (total - 1.0).abs() > 1e-9 {
                for size in &mut self.relative_sizes {
                    *size /= total;
                }
            }
        }
        if redraw {
            self.request_redraw();
        }
    }

    fn even_out(&mut self, redraw: bool) {
        let n = self.secondary_count();
        self.relative_sizes = if n == 0 {
            Vec::new()
        } else {
            vec![1.0 / n as f64; n]
        };
        if redraw {
            self.request_redraw();
        }
    }

    fn relative_sizes(&self) -> &[f64] { &self.relative_sizes }

    fn grow_secondary(&mut self, slot: usize, size: f64) {
        let Some(screen) = self.screen else { return };
        let n = self.secondary_count();
        if slot >= n {
            return;
        }
        let height = screen.size.height;
        if height <= 0.0 {
            return;
        }
        let others = n - 1;
        if others == 0 {
            // A lone secondary always fills the stack.
            self.relative_sizes[slot] = 1.0;
            return;
        }
        // Clamp so every other secondary keeps at least its minimum strip.
        let max_size = height - self.min_secondary_size * others as f64;
        let target = size.min(max_size).max(self.min_secondary_size.min(height));
        let share = (height - target) / others as f64;
        for (i, rel) in self.relative_sizes.iter_mut().enumerate() {
            let absolute = if i == slot { target } else { share };
            *rel = absolute / height;
        }
    }

    fn usable_height(&self) -> Option<f64> { self.screen.map(|s| s.size.height) }

    fn change_size(&self) -> f64 { self.change_size }

    fn set_ratio(&mut self, ratio: f64) { self.ratio = ratio; }

    fn set_align(&mut self, align: Align) { self.align = align; }

    fn focused(&self) -> usize { self.focused }

    fn client_count(&self) -> usize { self.clients.len() }

    fn client_at(&self, index: usize) -> Option<WindowId> { self.clients.get(index).copied() }

    fn request_redraw(&mut self) {
        if self.screen.is_some() {
            self.needs_redraw = true;
        }
    }
}
