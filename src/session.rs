//! One visualize invocation, end to end.
//!
//! `visualize` runs parse → filter → build → render and returns an
//! immutable [`Visualization`]. [`Visualizer`] keeps the last successful
//! result so a failed attempt leaves the previous output on screen.

use log::{error, info};

use crate::components::force_graph::GraphData;
use crate::error::VisualizeError;
use crate::graph::{GraphOptions, ResourceCountSummary, ResourceGraph, build_graph_with};
use crate::render::{ForceLayout, Mermaid, Renderer};
use crate::resource::{Resource, accept_documents, parse_documents};

/// Everything derived from one manifest text.
#[derive(Clone, Debug, PartialEq)]
pub struct Visualization {
	/// Accepted objects in input order.
	pub resources: Vec<Resource>,
	/// Graph built from `resources`.
	pub graph: ResourceGraph,
	/// Per-kind counts of `resources`.
	pub summary: ResourceCountSummary,
	/// Input for the interactive canvas.
	pub canvas: GraphData,
	/// Mermaid flowchart source.
	pub diagram: String,
}

/// Run the full pipeline on `text`.
pub fn visualize(text: &str, options: &GraphOptions) -> Result<Visualization, VisualizeError> {
	if text.trim().is_empty() {
		return Err(VisualizeError::EmptyInput);
	}

	let documents = parse_documents(text)?;
	let document_count = documents.len();
	let resources = accept_documents(documents);
	if resources.is_empty() {
		return Err(VisualizeError::NoResources);
	}
	info!(
		"kube-graph: accepted {} of {} documents",
		resources.len(),
		document_count
	);

	let graph = build_graph_with(&resources, options);
	let canvas = ForceLayout.render(&graph)?;
	let diagram = Mermaid::default().render(&graph)?;
	let summary = ResourceCountSummary::from_resources(&resources);

	Ok(Visualization {
		resources,
		graph,
		summary,
		canvas,
		diagram,
	})
}

/// Holds the last successful visualization between invocations.
#[derive(Clone, Debug, Default)]
pub struct Visualizer {
	options: GraphOptions,
	last: Option<Visualization>,
}

impl Visualizer {
	/// New session with the given graph options.
	pub fn new(options: GraphOptions) -> Self {
		Self {
			options,
			last: None,
		}
	}

	/// Visualize `text`, replacing the stored result on success and keeping
	/// it on failure.
	pub fn visualize(&mut self, text: &str) -> Result<&Visualization, VisualizeError> {
		match visualize(text, &self.options) {
			Ok(visualization) => Ok(self.last.insert(visualization)),
			Err(e) => {
				error!("kube-graph: visualize failed: {}", e);
				Err(e)
			}
		}
	}

	/// The last successful visualization.
	pub fn last(&self) -> Option<&Visualization> {
		self.last.as_ref()
	}

	/// Forget the stored visualization.
	pub fn clear(&mut self) {
		self.last = None;
	}
}

/// Severity of a status banner message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
	/// Operation completed.
	Success,
	/// Operation failed.
	Error,
}

impl StatusKind {
	/// CSS class of the banner.
	pub fn class(self) -> &'static str {
		match self {
			StatusKind::Success => "success",
			StatusKind::Error => "error",
		}
	}
}

/// A transient message for the status banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
	/// Success or error styling.
	pub kind: StatusKind,
	/// Text shown to the user.
	pub text: String,
}

impl StatusMessage {
	/// Success message.
	pub fn success(text: impl Into<String>) -> Self {
		Self {
			kind: StatusKind::Success,
			text: text.into(),
		}
	}

	/// Error message.
	pub fn error(text: impl Into<String>) -> Self {
		Self {
			kind: StatusKind::Error,
			text: text.into(),
		}
	}

	/// Message reported after a successful visualization.
	pub fn visualized(visualization: &Visualization) -> Self {
		Self::success(format!(
			"Successfully visualized {} resource(s)",
			visualization.resources.len()
		))
	}
}

/// The status banner's content.
///
/// Each message shown gets a ticket; a delayed clear only takes effect if
/// no newer message arrived since its ticket was issued.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSlot {
	current: Option<StatusMessage>,
	ticket: u64,
}

impl StatusSlot {
	/// Show `message`, returning the ticket that may later expire it.
	pub fn show(&mut self, message: StatusMessage) -> u64 {
		self.ticket += 1;
		self.current = Some(message);
		self.ticket
	}

	/// Clear the message shown under `ticket`. Returns whether it was cleared.
	pub fn expire(&mut self, ticket: u64) -> bool {
		if ticket != self.ticket || self.current.is_none() {
			return false;
		}
		self.current = None;
		true
	}

	/// Clear whatever is shown and invalidate outstanding tickets.
	pub fn clear(&mut self) {
		self.ticket += 1;
		self.current = None;
	}

	/// The message on display, if any.
	pub fn current(&self) -> Option<&StatusMessage> {
		self.current.as_ref()
	}
}
