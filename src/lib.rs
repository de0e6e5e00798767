//! kube-graph: interactive dependency graphs for Kubernetes manifests.
//!
//! Paste or upload multi-document YAML and the crate builds a graph of the
//! workloads, their pods and containers, the ServiceAccounts, ConfigMaps and
//! Secrets they reference, and the Services that route to them. The graph is
//! shown on a force-directed canvas or as a Mermaid flowchart.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

mod app;
pub mod browser;
pub mod components;
pub mod config;
pub mod error;
pub mod graph;
pub mod render;
pub mod resource;
pub mod session;
pub mod share;
pub mod style;

use app::AppState;
use components::force_graph::Theme;
use components::{DiagramPanel, ResourceBadges, StatusBanner};
use config::ViewMode;

pub use components::force_graph::{CanvasLink, CanvasNode, ForceGraphCanvas, GraphData};
pub use config::AppConfig;
pub use session::{Visualization, Visualizer, visualize};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("kube-graph: logging initialized");
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let theme = Theme::named(config.theme);
	let state = AppState::new(&config);
	state.load_from_url();

	let AppState {
		input,
		canvas,
		diagram,
		counts,
		status,
		view,
		..
	} = state.clone();
	let shown = move |mode: ViewMode| move || if view.get() == mode { "block" } else { "none" };

	let (on_visualize, on_share, on_copy, on_clear, on_files) = (
		state.clone(),
		state.clone(),
		state.clone(),
		state.clone(),
		state,
	);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme.name />
		<Title text="Kubernetes Manifest Visualizer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="layout">
			<section class="input-panel">
				<h1>"Kubernetes Manifest Visualizer"</h1>
				<textarea
					id="yamlInput"
					spellcheck="false"
					placeholder="Paste Kubernetes YAML here. Separate documents with ---"
					prop:value=move || input.get()
					on:input=move |ev| input.set(event_target_value(&ev))
				></textarea>
				<input
					type="file"
					id="fileInput"
					multiple=true
					accept=".yaml,.yml"
					on:change=move |ev| on_files.load_files(&ev)
				/>
				<div class="actions">
					<button class="primary" on:click=move |_| on_visualize.visualize()>
						"Visualize"
					</button>
					<button on:click=move |_| on_share.share()>"Share URL"</button>
					<button on:click=move |_| on_clear.clear()>"Clear"</button>
				</div>
				<StatusBanner status=status />
				<ResourceBadges counts=counts />
			</section>

			<section class="output-panel">
				<div class="view-toggle">
					<button
						class:active=move || view.get() == ViewMode::Interactive
						on:click=move |_| view.set(ViewMode::Interactive)
					>
						"Interactive"
					</button>
					<button
						class:active=move || view.get() == ViewMode::Diagram
						on:click=move |_| view.set(ViewMode::Diagram)
					>
						"Mermaid"
					</button>
				</div>
				<div class="graph-panel" style:display=shown(ViewMode::Interactive)>
					<ForceGraphCanvas data=canvas theme=theme />
					<p class="hint">
						"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
					</p>
				</div>
				<div class="diagram-panel" style:display=shown(ViewMode::Diagram)>
					<button on:click=move |_| on_copy.copy_diagram()>"Copy Mermaid"</button>
					<DiagramPanel diagram=diagram />
				</div>
			</section>
		</main>
	}
}
