//! Graph data structures for input to the force graph component.

/// A node in the canvas graph.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Display label; `\n` separates lines.
	pub label: Option<String>,
	/// CSS color (e.g., "#326CE5").
	/// If not set, color is taken from the theme palette.
	pub color: Option<String>,
	/// Group name, the resource kind for graphs built from manifests.
	pub group: Option<String>,
	/// Relative node size; 40.0 draws at the base radius.
	pub size: f64,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Optional text drawn at the edge midpoint.
	pub label: Option<String>,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes in draw order.
	pub nodes: Vec<CanvasNode>,
	/// Links between node ids.
	pub links: Vec<CanvasLink>,
}
