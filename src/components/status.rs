use leptos::prelude::*;

use crate::session::StatusSlot;

/// Transient success/error message.
#[component]
pub fn StatusBanner(#[prop(into)] status: Signal<StatusSlot>) -> impl IntoView {
	let class = move || {
		status.with(|slot| match slot.current() {
			Some(message) => format!("status {}", message.kind.class()),
			None => "status".to_string(),
		})
	};
	let text = move || status.with(|slot| slot.current().map(|message| message.text.clone()));

	view! {
		<div id="message" class=class role="status">
			{text}
		</div>
	}
}
