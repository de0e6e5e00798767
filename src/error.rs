//! Error types surfaced by the visualize pipeline and share links.

/// Failures of a single visualize invocation.
#[derive(Debug, thiserror::Error)]
pub enum VisualizeError {
	/// Input was empty or whitespace only.
	#[error("Please enter some YAML content")]
	EmptyInput,

	/// The text is not valid YAML.
	#[error("Error parsing YAML: {0}")]
	Parse(#[from] serde_yaml::Error),

	/// Parsing succeeded but no document is a Kubernetes object.
	#[error("No valid Kubernetes resources found")]
	NoResources,

	/// A backend rejected the built graph.
	#[error("Error rendering graph: {0}")]
	Render(#[from] RenderError),
}

/// Failures while turning a graph into backend output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	/// An edge endpoint has no node.
	#[error("edge {from} -> {to} references a node that is not in the graph")]
	DanglingEdge {
		/// Source node id.
		from: String,
		/// Target node id.
		to: String,
	},

	/// Writing text output failed.
	#[error("failed to write output: {0}")]
	Format(#[from] std::fmt::Error),
}

/// Failures while encoding or decoding share links.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
	/// Nothing to share.
	#[error("Please enter some YAML content first")]
	Empty,

	/// The link parameter is not base64.
	#[error("Failed to decode base64: {0}")]
	Decode(#[from] base64::DecodeError),

	/// The decoded bytes are not UTF-8.
	#[error("Shared content is not valid UTF-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
}
