//! View components.

mod badges;
mod diagram;
pub mod force_graph;
mod status;

pub use badges::ResourceBadges;
pub use diagram::DiagramPanel;
pub use status::StatusBanner;
