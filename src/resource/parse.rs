//! Multi-document YAML front-end.

use serde::Deserialize;
use serde_yaml::{Deserializer, Value};

/// Parse `---`-separated YAML into one generic value per document.
///
/// Empty documents come back as [`Value::Null`]; the first syntax error
/// aborts the whole parse. Merge keys (`<<`) are resolved in place.
pub fn parse_documents(text: &str) -> Result<Vec<Value>, serde_yaml::Error> {
	let mut documents = Vec::new();
	for document in Deserializer::from_str(text) {
		let mut value = Value::deserialize(document)?;
		value.apply_merge()?;
		documents.push(value);
	}
	Ok(documents)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_document_separators() {
		let docs = parse_documents("kind: A\n---\nkind: B\n").unwrap();
		assert_eq!(docs.len(), 2);
		assert_eq!(docs[1]["kind"], Value::from("B"));
	}

	#[test]
	fn empty_documents_parse_as_null() {
		let docs = parse_documents("kind: A\n---\n---\nkind: B\n").unwrap();
		assert_eq!(docs.len(), 3);
		assert!(docs[1].is_null());
	}

	#[test]
	fn merge_keys_are_resolved() {
		let docs = parse_documents(concat!(
			"common: &common {app: web}\n",
			"labels:\n  <<: *common\n  tier: front\n",
		))
		.unwrap();
		assert_eq!(docs[0]["labels"]["app"], Value::from("web"));
		assert_eq!(docs[0]["labels"]["tier"], Value::from("front"));
		assert!(docs[0]["labels"].get("<<").is_none());
	}

	#[test]
	fn syntax_errors_are_reported() {
		let err = parse_documents("kind: [unclosed\n").unwrap_err();
		assert!(!err.to_string().is_empty());
	}
}
