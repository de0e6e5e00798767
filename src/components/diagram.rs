use leptos::prelude::*;

use crate::render::mermaid::fenced;

/// Mermaid source for the current graph, fenced for pasting into Markdown.
#[component]
pub fn DiagramPanel(#[prop(into)] diagram: Signal<String>) -> impl IntoView {
	let source = move || {
		diagram.with(|diagram| {
			if diagram.is_empty() {
				String::new()
			} else {
				fenced(diagram)
			}
		})
	};

	view! {
		<pre class="mermaid-source">
			<code>{source}</code>
		</pre>
	}
}
