//! Adapter from the resource graph to the interactive canvas.

use super::{Renderer, endpoints};
use crate::components::force_graph::{CanvasLink, CanvasNode, GraphData};
use crate::error::RenderError;
use crate::graph::ResourceGraph;

/// Feeds the force-directed canvas. Every call produces a complete
/// replacement data set; the canvas never diffs against earlier output.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForceLayout;

impl Renderer for ForceLayout {
	type Output = GraphData;

	fn render(&self, graph: &ResourceGraph) -> Result<GraphData, RenderError> {
		let nodes = graph
			.nodes()
			.map(|node| CanvasNode {
				id: node.id.clone(),
				label: Some(node.label.clone()),
				color: Some(node.attributes.color.clone()),
				group: Some(node.kind.clone()),
				size: node.attributes.size,
			})
			.collect();

		let links = graph
			.edges()
			.iter()
			.map(|edge| {
				endpoints(graph, edge)?;
				Ok(CanvasLink {
					source: edge.source.clone(),
					target: edge.target.clone(),
					label: (!edge.label.is_empty()).then(|| edge.label.clone()),
				})
			})
			.collect::<Result<Vec<_>, RenderError>>()?;

		Ok(GraphData { nodes, links })
	}
}
