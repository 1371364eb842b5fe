//! Reusable UI components for the applications TUI

pub mod application_list;
pub mod load_more_button;

pub use application_list::{ApplicationList, ApplicationListConfig};
pub use load_more_button::render_load_more;
