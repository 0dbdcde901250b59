//! Application state module

mod animated;
mod app_state;
mod calendar_state;
mod gesture;
mod grid_layout;
mod pager;
mod record_tabs;
mod row_motion;
mod transition;
mod viewport;

pub use animated::*;
pub use app_state::*;
pub use calendar_state::*;
pub use gesture::*;
pub use grid_layout::*;
pub use pager::*;
pub use record_tabs::*;
pub use row_motion::*;
pub use transition::*;
pub use viewport::*;
