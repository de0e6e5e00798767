//! Mermaid flowchart renderer.
//!
//! Produces a Mermaid diagram that can be pasted into Markdown or the
//! Mermaid live editor. Node identifiers are positional (`n0`, `n1`, …)
//! because resource ids contain characters Mermaid does not accept.

use std::fmt::Write;

use super::{Renderer, endpoints};
use crate::error::RenderError;
use crate::graph::ResourceGraph;
use crate::style;

/// Class used when a kind has no alphanumeric characters.
pub const FALLBACK_CLASS: &str = "resource";

/// Renders a flowchart in the given direction (`TD`, `LR`, …).
#[derive(Clone, Debug)]
pub struct Mermaid {
	/// Flowchart direction keyword.
	pub direction: &'static str,
}

impl Default for Mermaid {
	fn default() -> Self {
		Self { direction: "TD" }
	}
}

impl Renderer for Mermaid {
	type Output = String;

	fn render(&self, graph: &ResourceGraph) -> Result<String, RenderError> {
		let mut out = String::with_capacity(64 * (graph.node_count() + graph.edges().len()));
		writeln!(out, "flowchart {}", self.direction)?;

		for (index, node) in graph.nodes().enumerate() {
			writeln!(out, "    n{index}[\"{}\"]", escape_label(&node.label))?;
		}

		for edge in graph.edges() {
			let (source, target) = endpoints(graph, edge)?;
			if edge.label.is_empty() {
				writeln!(out, "    n{source} --> n{target}")?;
			} else {
				writeln!(
					out,
					"    n{source} -->|{}| n{target}",
					escape_edge_label(&edge.label)
				)?;
			}
		}

		// Kinds that differ only in punctuation or case share a class; the
		// first kind seen picks its color.
		let mut declared: Vec<String> = Vec::new();
		for node in graph.nodes() {
			let class = class_name(&node.kind);
			if declared.contains(&class) {
				continue;
			}
			writeln!(
				out,
				"    classDef {class} fill:{},stroke:#1e293b,color:#fff",
				style::color_for(&node.kind)
			)?;
			declared.push(class);
		}

		for (index, node) in graph.nodes().enumerate() {
			writeln!(out, "    class n{index} {}", class_name(&node.kind))?;
		}

		Ok(out)
	}
}

/// Wrap a diagram in a fenced ```` ```mermaid ```` block.
pub fn fenced(diagram: &str) -> String {
	format!("```mermaid\n{}\n```", diagram.trim_end())
}

/// Escape `& < > "`, `&` first so inserted entities are not re-escaped.
/// Line breaks become `<br/>`.
pub fn escape_label(text: &str) -> String {
	escape_entities(text).replace('\n', "<br/>")
}

/// Like [`escape_label`], additionally escaping `|`, which delimits edge
/// labels.
pub fn escape_edge_label(text: &str) -> String {
	escape_label(text).replace('|', "&#124;")
}

fn escape_entities(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
}

/// Style class for `kind`: lowercase, alphanumerics only.
pub fn class_name(kind: &str) -> String {
	let name: String = kind
		.chars()
		.filter(char::is_ascii_alphanumeric)
		.map(|c| c.to_ascii_lowercase())
		.collect();
	if name.is_empty() {
		FALLBACK_CLASS.to_string()
	} else {
		name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphNode, build_graph};
	use crate::resource::{accept_documents, parse_documents};

	fn render(text: &str) -> String {
		let resources = accept_documents(parse_documents(text).unwrap());
		Mermaid::default().render(&build_graph(&resources)).unwrap()
	}

	#[test]
	fn renders_nodes_edges_and_classes() {
		let out = render(concat!(
			"kind: Deployment\nmetadata: {name: web, labels: {app: web}}\n---\n",
			"kind: Service\nmetadata: {name: front}\nspec: {selector: {app: web}}\n",
		));
		let expected = concat!(
			"flowchart TD\n",
			"    n0[\"Deployment<br/>web\"]\n",
			"    n1[\"Pod<br/>web-0\"]\n",
			"    n2[\"Service<br/>front\"]\n",
			"    n0 -->|manages| n1\n",
			"    n2 -->|routes to| n0\n",
			"    classDef deployment fill:#326CE5,stroke:#1e293b,color:#fff\n",
			"    classDef pod fill:#00B4D8,stroke:#1e293b,color:#fff\n",
			"    classDef service fill:#48CAE4,stroke:#1e293b,color:#fff\n",
			"    class n0 deployment\n",
			"    class n1 pod\n",
			"    class n2 service\n",
		);
		assert_eq!(out, expected);
	}

	#[test]
	fn empty_edge_labels_drop_the_pipe_syntax() {
		let out = render("kind: Deployment\nmetadata: {name: big}\nspec: {replicas: 6}\n");
		assert!(out.contains("    n0 --> n6\n"));
		assert!(out.contains("n6[\"... +1 more pods\"]"));
	}

	#[test]
	fn escapes_ampersand_first() {
		assert_eq!(escape_label("a&b"), "a&amp;b");
		assert_eq!(escape_label("<x> \"q\""), "&lt;x&gt; &quot;q&quot;");
		assert_eq!(escape_label("&lt;"), "&amp;lt;");
	}

	#[test]
	fn pipes_are_escaped_only_in_edge_labels() {
		assert_eq!(escape_label("a|b"), "a|b");
		assert_eq!(escape_edge_label("a|b&c"), "a&#124;b&amp;c");
	}

	#[test]
	fn class_names_strip_non_alphanumerics() {
		assert_eq!(class_name("PersistentVolumeClaim"), "persistentvolumeclaim");
		assert_eq!(class_name("my-crd.v1"), "mycrdv1");
		assert_eq!(class_name("--"), FALLBACK_CLASS);
	}

	#[test]
	fn dangling_edges_are_render_errors() {
		let mut graph = ResourceGraph::default();
		graph.merge_node(GraphNode {
			id: "a".into(),
			label: "a".into(),
			kind: "Pod".into(),
			attributes: style::resolve("Pod"),
		});
		graph.add_edge("a", "missing", "uses");
		assert!(matches!(
			Mermaid::default().render(&graph),
			Err(RenderError::DanglingEdge { .. })
		));
	}

	#[test]
	fn colliding_class_names_are_declared_once() {
		let out = render(concat!(
			"kind: ConfigMap\nmetadata: {name: a}\n---\n",
			"kind: Config-Map\nmetadata: {name: b}\n",
		));
		assert_eq!(out.matches("classDef configmap ").count(), 1);
		assert!(out.contains(&format!(
			"classDef configmap fill:{},",
			style::color_for("ConfigMap")
		)));
		assert!(out.contains("class n0 configmap\n"));
		assert!(out.contains("class n1 configmap\n"));
	}

	#[test]
	fn fenced_wraps_output() {
		assert_eq!(fenced("flowchart TD\n"), "```mermaid\nflowchart TD\n```");
	}
}
