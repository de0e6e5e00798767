//! Thin wrappers over the browser APIs the app touches: the page URL, the
//! clipboard and file reads.
//!
//! Callbacks handed to JavaScript are leaked with `Closure::forget` once
//! registered; each fires at most once per user action.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileList, FileReader, UrlSearchParams};

use crate::resource::ManifestBatch;

/// Value of query parameter `name` in the current page URL.
pub fn query_param(name: &str) -> Option<String> {
	let search = web_sys::window()?.location().search().ok()?;
	UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

/// The page URL without query string or fragment.
pub fn page_url() -> Option<String> {
	let location = web_sys::window()?.location();
	Some(format!(
		"{}{}",
		location.origin().ok()?,
		location.pathname().ok()?
	))
}

/// Write `text` to the clipboard, calling `on_copied` when the browser
/// confirms. When the clipboard is unavailable or refuses, the text is
/// offered in a prompt with `prompt_message` instead.
pub fn copy_to_clipboard(
	text: &str,
	prompt_message: &'static str,
	on_copied: impl FnOnce() + 'static,
) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let navigator = window.navigator();
	let has_clipboard =
		js_sys::Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false);
	if !has_clipboard {
		debug!("kube-graph: clipboard unavailable, prompting instead");
		prompt_with(prompt_message, text);
		return;
	}

	let fallback_text = text.to_string();
	let resolve = Closure::once(move |_: JsValue| on_copied());
	let reject = Closure::once(move |reason: JsValue| {
		warn!("kube-graph: clipboard write rejected: {:?}", reason);
		prompt_with(prompt_message, &fallback_text);
	});
	let _ = navigator.clipboard().write_text(text).then2(&resolve, &reject);
	resolve.forget();
	reject.forget();
}

fn prompt_with(message: &str, text: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.prompt_with_message_and_default(message, text);
	}
}

/// Read every file in `files` as text into one [`ManifestBatch`], calling
/// `on_complete` once all reads have succeeded or failed.
pub fn read_files(files: &FileList, on_complete: impl FnOnce(ManifestBatch) + 'static) {
	let count = files.length();
	if count == 0 {
		return;
	}

	let batch = Rc::new(RefCell::new(ManifestBatch::new(count as usize)));
	let on_complete: Rc<RefCell<Option<Box<dyn FnOnce(ManifestBatch)>>>> =
		Rc::new(RefCell::new(Some(Box::new(on_complete))));

	let finish = {
		let (batch, on_complete) = (batch.clone(), on_complete.clone());
		move |done: bool| {
			if !done {
				return;
			}
			if let Some(callback) = on_complete.borrow_mut().take() {
				callback(batch.take());
			}
		}
	};
	let finish: Rc<dyn Fn(bool)> = Rc::new(finish);

	for file in (0..count).filter_map(|i| files.get(i)) {
		let name = file.name();
		let Ok(reader) = FileReader::new() else {
			warn!("kube-graph: FileReader unavailable for {}", name);
			let done = batch.borrow_mut().fail(name);
			finish(done);
			continue;
		};

		let onload = {
			let (reader, batch, finish, name) =
				(reader.clone(), batch.clone(), finish.clone(), name.clone());
			Closure::once(move |_: Event| {
				let done = match reader.result().ok().and_then(|r| r.as_string()) {
					Some(content) => {
						debug!("kube-graph: read {} ({} bytes)", name, content.len());
						batch.borrow_mut().push(&content)
					}
					None => batch.borrow_mut().fail(name),
				};
				finish(done);
			})
		};
		let onerror = {
			let (batch, finish, name) = (batch.clone(), finish.clone(), name.clone());
			Closure::once(move |_: Event| {
				warn!("kube-graph: failed to read {}", name);
				let done = batch.borrow_mut().fail(name);
				finish(done);
			})
		};
		reader.set_onload(Some(onload.as_ref().unchecked_ref()));
		reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
		onload.forget();
		onerror.forget();

		if reader.read_as_text(&file).is_err() {
			let done = batch.borrow_mut().fail(name);
			finish(done);
		}
	}
}
