pub mod base;
pub mod engine;
pub mod monad;
pub mod stacked;

pub use base::{BaseLayout, RemovedPane, WindowId, pid_t};
pub use engine::{EventResponse, LayoutCommand, LayoutEngine, LayoutEvent};
pub use monad::MonadLayout;
pub use stacked::StackedSecondary;
