//! Shape check separating Kubernetes objects from everything else.

use log::debug;
use serde_yaml::Value;

use super::Resource;

/// Keep documents that are mappings with a non-empty string `kind` and a
/// mapping `metadata`, preserving input order. Everything else is dropped
/// without error.
pub fn accept_documents(documents: impl IntoIterator<Item = Value>) -> Vec<Resource> {
	documents
		.into_iter()
		.enumerate()
		.filter_map(|(index, document)| {
			let accepted = accept(document);
			if accepted.is_none() {
				debug!("kube-graph: skipping document {index}: not a Kubernetes object");
			}
			accepted
		})
		.collect()
}

fn accept(document: Value) -> Option<Resource> {
	let Value::Mapping(mut map) = document else {
		return None;
	};
	let kind = match map.get("kind") {
		Some(Value::String(kind)) if !kind.is_empty() => kind.clone(),
		_ => return None,
	};
	let metadata = match map.remove("metadata") {
		Some(Value::Mapping(metadata)) => metadata,
		_ => return None,
	};
	let spec = map.remove("spec").unwrap_or(Value::Null);
	Some(Resource::new(kind, metadata, spec))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resource::parse_documents;

	fn accepted_kinds(text: &str) -> Vec<String> {
		accept_documents(parse_documents(text).unwrap())
			.iter()
			.map(|r| r.kind().to_string())
			.collect()
	}

	#[test]
	fn keeps_well_formed_objects_in_order() {
		let kinds = accepted_kinds(
			"kind: Service\nmetadata: {name: a}\n---\nkind: Deployment\nmetadata: {name: b}\n",
		);
		assert_eq!(kinds, ["Service", "Deployment"]);
	}

	#[test]
	fn drops_documents_missing_kind_or_metadata() {
		let kinds = accepted_kinds(concat!(
			"metadata: {name: no-kind}\n",
			"---\n",
			"kind: Pod\n",
			"---\n",
			"kind: \"\"\nmetadata: {name: blank}\n",
			"---\n",
			"kind: Pod\nmetadata: just-a-string\n",
			"---\n",
			"kind: Secret\nmetadata: {name: ok}\n",
		));
		assert_eq!(kinds, ["Secret"]);
	}

	#[test]
	fn drops_empty_and_scalar_documents() {
		let kinds = accepted_kinds("---\n---\n- a\n- b\n---\nplain\n---\nkind: Namespace\nmetadata: {}\n");
		assert_eq!(kinds, ["Namespace"]);
	}

	#[test]
	fn empty_input_yields_nothing() {
		assert!(accept_documents(Vec::new()).is_empty());
	}
}
