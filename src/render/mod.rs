//! Backends that turn a [`ResourceGraph`] into something displayable.
//!
//! Renderers are pure consumers of the builder's output and are
//! interchangeable behind [`Renderer`].

pub mod force;
pub mod mermaid;

use crate::error::RenderError;
use crate::graph::{GraphEdge, ResourceGraph};

pub use force::ForceLayout;
pub use mermaid::Mermaid;

/// A rendering backend.
pub trait Renderer {
	/// Backend-specific presentation.
	type Output;

	/// Render `graph`. Fails only if the graph is internally inconsistent.
	fn render(&self, graph: &ResourceGraph) -> Result<Self::Output, RenderError>;
}

/// Node positions of both endpoints of `edge`.
fn endpoints(graph: &ResourceGraph, edge: &GraphEdge) -> Result<(usize, usize), RenderError> {
	match (graph.node_index(&edge.source), graph.node_index(&edge.target)) {
		(Some(source), Some(target)) => Ok((source, target)),
		_ => Err(RenderError::DanglingEdge {
			from: edge.source.clone(),
			to: edge.target.clone(),
		}),
	}
}
