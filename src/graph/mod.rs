//! Abstract resource graph: typed nodes keyed by id, labeled directed edges.
//!
//! The graph is a plain value. Renderers in [`crate::render`] consume it
//! without mutating it.

mod builder;
mod summary;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Deserialize;

use crate::style::VisualAttributes;

pub use builder::{build_graph, build_graph_with};
pub use summary::ResourceCountSummary;

/// Tunables for graph construction.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
	/// Replica Pods expanded per workload before collapsing the rest into
	/// one overflow marker.
	pub max_expanded_replicas: u64,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			max_expanded_replicas: 5,
		}
	}
}

/// A node in the resource graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique key, e.g. `Deployment/default/web`.
	pub id: String,
	/// Display text; lines separated by `\n`.
	pub label: String,
	/// Kubernetes kind this node represents.
	pub kind: String,
	/// Color and size resolved from the kind.
	pub attributes: VisualAttributes,
}

/// A directed, labeled edge between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Id of the node the edge starts at.
	pub source: String,
	/// Id of the node the edge points to.
	pub target: String,
	/// Relationship name; empty for the overflow edge.
	pub label: String,
}

/// Node set plus edge sequence, both in discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceGraph {
	nodes: IndexMap<String, GraphNode>,
	edges: Vec<GraphEdge>,
}

impl ResourceGraph {
	/// Insert `node` unless a node with the same id already exists.
	/// Returns `true` when the node was new.
	pub fn merge_node(&mut self, node: GraphNode) -> bool {
		match self.nodes.entry(node.id.clone()) {
			Entry::Occupied(_) => false,
			Entry::Vacant(slot) => {
				slot.insert(node);
				true
			}
		}
	}

	/// Append an edge. Duplicates are kept.
	pub fn add_edge(
		&mut self,
		source: impl Into<String>,
		target: impl Into<String>,
		label: impl Into<String>,
	) {
		self.edges.push(GraphEdge {
			source: source.into(),
			target: target.into(),
			label: label.into(),
		});
	}

	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.get(id)
	}

	/// Position of a node in insertion order.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.nodes.get_index_of(id)
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> impl ExactSizeIterator<Item = &GraphNode> {
		self.nodes.values()
	}

	/// Edges in discovery order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::style;

	fn node(id: &str, label: &str) -> GraphNode {
		GraphNode {
			id: id.to_string(),
			label: label.to_string(),
			kind: "Pod".to_string(),
			attributes: style::resolve("Pod"),
		}
	}

	#[test]
	fn first_insertion_wins() {
		let mut graph = ResourceGraph::default();
		assert!(graph.merge_node(node("Pod/default/a", "first")));
		assert!(!graph.merge_node(node("Pod/default/a", "second")));
		assert_eq!(graph.node_count(), 1);
		assert_eq!(graph.node("Pod/default/a").unwrap().label, "first");
	}

	#[test]
	fn nodes_keep_insertion_order() {
		let mut graph = ResourceGraph::default();
		for id in ["c", "a", "b", "a"] {
			graph.merge_node(node(id, id));
		}
		let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["c", "a", "b"]);
		assert_eq!(graph.node_index("b"), Some(2));
	}

	#[test]
	fn duplicate_edges_are_kept() {
		let mut graph = ResourceGraph::default();
		graph.add_edge("a", "b", "routes to");
		graph.add_edge("a", "b", "routes to");
		assert_eq!(graph.edges().len(), 2);
	}
}
