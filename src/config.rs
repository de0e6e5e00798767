//! Application settings.
//!
//! Read from an optional `<script id="app-config" type="application/json">`
//! element so a static deployment can tune the app without rebuilding.
//! Every field has a default; a missing element means all defaults.

use std::time::Duration;

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::graph::GraphOptions;

/// Id of the DOM element holding the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Which renderer the output panel shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
	/// Force-directed canvas.
	#[default]
	Interactive,
	/// Mermaid flowchart text.
	Diagram,
}

/// Canvas color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Dark background with gradient nodes.
	#[default]
	Dark,
	/// Flat white background.
	Light,
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// How long status messages stay visible.
	pub status_timeout_ms: u64,
	/// Query parameter carrying shared manifests.
	pub share_param: String,
	/// Initial output view.
	pub view: ViewMode,
	/// Canvas theme.
	pub theme: ThemeName,
	/// Graph construction settings.
	pub graph: GraphOptions,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			status_timeout_ms: 5000,
			share_param: "yaml".to_string(),
			view: ViewMode::default(),
			theme: ThemeName::default(),
			graph: GraphOptions::default(),
		}
	}
}

impl AppConfig {
	/// Parse configuration JSON.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Status message lifetime as a [`Duration`].
	pub fn status_timeout(&self) -> Duration {
		Duration::from_millis(self.status_timeout_ms)
	}

	/// Load from the DOM, falling back to defaults.
	pub fn load() -> Self {
		let Some(text) = config_script_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("kube-graph: loaded configuration from #{CONFIG_ELEMENT_ID}");
				config
			}
			Err(e) => {
				warn!("kube-graph: ignoring malformed configuration: {}", e);
				Self::default()
			}
		}
	}
}

fn config_script_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
