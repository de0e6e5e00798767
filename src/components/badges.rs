use leptos::prelude::*;

/// One badge per resource kind, or a placeholder when nothing is loaded.
#[component]
pub fn ResourceBadges(#[prop(into)] counts: Signal<Vec<(String, usize)>>) -> impl IntoView {
	view! {
		<div class="resource-count">
			<Show
				when=move || counts.with(|counts| !counts.is_empty())
				fallback=|| view! { <div class="resource-badge">"No resources loaded"</div> }
			>
				<For
					each=move || counts.get()
					key=|entry| entry.clone()
					children=|(kind, count)| {
						view! { <div class="resource-badge">{format!("{kind}: {count}")}</div> }
					}
				/>
			</Show>
		</div>
	}
}
