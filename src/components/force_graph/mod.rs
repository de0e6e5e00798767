//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning, seeded in layers along edge direction
//! - Pan, zoom, and node dragging interactions
//! - Smooth highlight transitions on hover
//! - Edge labels and multi-line node labels
//!
//! # Example
//!
//! ```ignore
//! let data = GraphData {
//!     nodes: vec![
//!         CanvasNode { id: "a".into(), label: Some("Deployment\nweb".into()), .. },
//!         CanvasNode { id: "b".into(), label: Some("Pod\nweb-0".into()), .. },
//!     ],
//!     links: vec![
//!         CanvasLink { source: "a".into(), target: "b".into(), label: Some("manages".into()) },
//!     ],
//! };
//!
//! view! { <ForceGraphCanvas data=Signal::stored(data) theme=Theme::light() /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
pub use types::{CanvasLink, CanvasNode, GraphData};
