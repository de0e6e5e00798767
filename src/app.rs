//! UI state and the actions behind each control.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::{Event, HtmlInputElement};

use crate::browser;
use crate::components::force_graph::GraphData;
use crate::config::{AppConfig, ViewMode};
use crate::render::mermaid::fenced;
use crate::resource::ManifestBatch;
use crate::session::{StatusMessage, StatusSlot, Visualizer};
use crate::share;

/// Reactive state shared by the controls.
///
/// Signals are `Copy`; the session sits behind `Rc<RefCell<_>>` since only
/// event handlers touch it.
#[derive(Clone)]
pub struct AppState {
	pub input: RwSignal<String>,
	pub canvas: RwSignal<GraphData>,
	pub diagram: RwSignal<String>,
	pub counts: RwSignal<Vec<(String, usize)>>,
	pub status: RwSignal<StatusSlot>,
	pub view: RwSignal<ViewMode>,
	session: Rc<RefCell<Visualizer>>,
	share_param: Rc<str>,
	status_timeout: Duration,
}

impl AppState {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			input: RwSignal::new(String::new()),
			canvas: RwSignal::new(GraphData::default()),
			diagram: RwSignal::new(String::new()),
			counts: RwSignal::new(Vec::new()),
			status: RwSignal::new(StatusSlot::default()),
			view: RwSignal::new(config.view),
			session: Rc::new(RefCell::new(Visualizer::new(config.graph.clone()))),
			share_param: config.share_param.as_str().into(),
			status_timeout: config.status_timeout(),
		}
	}

	/// Show `message`, clearing it after the configured timeout unless a
	/// newer message replaced it first.
	pub fn notify(&self, message: StatusMessage) {
		let mut ticket = 0;
		self.status.update(|slot| ticket = slot.show(message));
		let status = self.status;
		set_timeout(
			move || {
				status.update(|slot| {
					slot.expire(ticket);
				})
			},
			self.status_timeout,
		);
	}

	/// Visualize the current input, keeping the previous output on failure.
	pub fn visualize(&self) {
		let text = self.input.get_untracked();
		let outcome = match self.session.borrow_mut().visualize(&text) {
			Ok(visualization) => {
				self.canvas.set(visualization.canvas.clone());
				self.diagram.set(visualization.diagram.clone());
				self.counts.set(
					visualization
						.summary
						.iter()
						.map(|(kind, count)| (kind.to_string(), count))
						.collect(),
				);
				StatusMessage::visualized(visualization)
			}
			Err(e) => StatusMessage::error(e.to_string()),
		};
		self.notify(outcome);
	}

	/// Copy a link carrying the current input.
	pub fn share(&self) {
		let text = self.input.get_untracked();
		let base = browser::page_url().unwrap_or_default();
		match share::share_url(&base, &self.share_param, &text) {
			Ok(url) => {
				info!("kube-graph: share link is {} bytes", url.len());
				let state = self.clone();
				browser::copy_to_clipboard(&url, "Copy this URL to share:", move || {
					state.notify(StatusMessage::success(
						"URL copied to clipboard! Share it with others.",
					))
				});
			}
			Err(e) => self.notify(StatusMessage::error(e.to_string())),
		}
	}

	/// Copy the Mermaid source as a fenced block.
	pub fn copy_diagram(&self) {
		let diagram = self.diagram.get_untracked();
		if diagram.is_empty() {
			self.notify(StatusMessage::error("Visualize some YAML before copying the diagram"));
			return;
		}
		let state = self.clone();
		browser::copy_to_clipboard(&fenced(&diagram), "Copy this Mermaid diagram:", move || {
			state.notify(StatusMessage::success("Mermaid diagram copied to clipboard"))
		});
	}

	/// Reset input, outputs, badges and status.
	pub fn clear(&self) {
		self.session.borrow_mut().clear();
		self.input.set(String::new());
		self.canvas.set(GraphData::default());
		self.diagram.set(String::new());
		self.counts.set(Vec::new());
		self.status.update(StatusSlot::clear);
	}

	/// Load the shared manifest named in the page URL, if any.
	pub fn load_from_url(&self) {
		let Some(param) = browser::query_param(&self.share_param) else {
			return;
		};
		match share::decode(&param) {
			Ok(text) => {
				info!("kube-graph: loaded {} bytes from share link", text.len());
				self.input.set(text);
				self.visualize();
			}
			Err(e) => {
				warn!("kube-graph: bad share link: {}", e);
				self.notify(StatusMessage::error("Error loading YAML from URL"));
			}
		}
	}

	/// Read the files picked in a file input and visualize them together.
	pub fn load_files(&self, ev: &Event) {
		let picker = event_target::<HtmlInputElement>(ev);
		let Some(files) = picker.files() else {
			return;
		};
		let state = self.clone();
		browser::read_files(&files, move |batch| state.finish_batch(&batch));
		// Allow picking the same files again.
		picker.set_value("");
	}

	fn finish_batch(&self, batch: &ManifestBatch) {
		if batch.loaded() > 0 {
			self.input.set(batch.text().to_string());
			self.notify(StatusMessage::success(format!(
				"Loaded {} file(s)",
				batch.loaded()
			)));
			self.visualize();
		}
		if !batch.failed().is_empty() {
			self.notify(StatusMessage::error(format!(
				"Error reading file: {}",
				batch.failed().join(", ")
			)));
		}
	}
}
