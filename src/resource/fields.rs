//! Defaulted access into untyped manifest trees.
//!
//! Manifests are only shape-checked at the top level, so every nested read
//! may hit a missing key, a `null`, or a value of the wrong type. All of
//! those collapse to "absent" here; callers pick the default explicitly.

use serde_yaml::{Mapping, Value};

/// Path-based lookups over a YAML value that never fail.
pub trait FieldAccess {
	/// Value at `path`, or `None` if any segment is missing or not a mapping.
	fn at(&self, path: &[&str]) -> Option<&Value>;

	/// Non-empty string at `path`.
	fn str_at(&self, path: &[&str]) -> Option<&str> {
		self.at(path)
			.and_then(Value::as_str)
			.filter(|s| !s.is_empty())
	}

	/// String at `path`, falling back to `default` when absent or empty.
	fn str_or<'a>(&'a self, path: &[&str], default: &'a str) -> &'a str {
		self.str_at(path).unwrap_or(default)
	}

	/// Sequence at `path`; anything else reads as an empty slice.
	fn seq_at(&self, path: &[&str]) -> &[Value] {
		match self.at(path) {
			Some(Value::Sequence(items)) => items,
			_ => &[],
		}
	}

	/// Mapping at `path`.
	fn mapping_at(&self, path: &[&str]) -> Option<&Mapping> {
		self.at(path).and_then(Value::as_mapping)
	}
}

impl FieldAccess for Value {
	fn at(&self, path: &[&str]) -> Option<&Value> {
		path.iter().try_fold(self, |value, key| {
			value.as_mapping().and_then(|map| map.get(*key))
		})
	}
}

impl FieldAccess for Mapping {
	fn at(&self, path: &[&str]) -> Option<&Value> {
		let (first, rest) = path.split_first()?;
		self.get(*first)?.at(rest)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn doc(text: &str) -> Value {
		serde_yaml::from_str(text).unwrap()
	}

	#[test]
	fn nested_lookup_follows_mappings() {
		let v = doc("spec:\n  template:\n    spec:\n      serviceAccountName: builder\n");
		assert_eq!(
			v.str_at(&["spec", "template", "spec", "serviceAccountName"]),
			Some("builder")
		);
	}

	#[test]
	fn missing_and_null_segments_read_as_absent() {
		let v = doc("spec:\n  template: null\n");
		assert!(v.at(&["spec", "template", "spec"]).is_none());
		assert!(v.at(&["nope", "deeper"]).is_none());
		assert!(v.seq_at(&["spec", "template", "spec", "containers"]).is_empty());
	}

	#[test]
	fn wrong_types_fall_back_to_defaults() {
		let v = doc("metadata:\n  name: 42\n  labels: [a, b]\nspec:\n  volumes: {x: 1}\n");
		assert_eq!(v.str_or(&["metadata", "name"], "unnamed"), "unnamed");
		assert!(v.mapping_at(&["metadata", "labels"]).is_none());
		assert!(v.seq_at(&["spec", "volumes"]).is_empty());
	}

	#[test]
	fn empty_strings_count_as_absent() {
		let v = doc("metadata:\n  namespace: \"\"\n");
		assert_eq!(v.str_or(&["metadata", "namespace"], "default"), "default");
	}

	#[test]
	fn empty_path_on_mapping_is_absent() {
		let v = doc("a: 1\n");
		let map = v.as_mapping().unwrap();
		assert!(map.at(&[]).is_none());
		assert_eq!(map.at(&["a"]), Some(&Value::from(1)));
	}
}
