//! Per-kind counts of the accepted input objects.

use std::collections::BTreeMap;

use crate::resource::Resource;

/// Occurrences per kind among accepted objects. Synthesized nodes are never
/// counted. Iterates sorted by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceCountSummary {
	counts: BTreeMap<String, usize>,
}

impl ResourceCountSummary {
	/// Count `resources` by kind.
	pub fn from_resources(resources: &[Resource]) -> Self {
		let mut counts = BTreeMap::new();
		for resource in resources {
			*counts.entry(resource.kind().to_string()).or_insert(0) += 1;
		}
		Self { counts }
	}

	/// Count for `kind` (zero if absent).
	pub fn count(&self, kind: &str) -> usize {
		self.counts.get(kind).copied().unwrap_or(0)
	}

	/// `(kind, count)` pairs sorted by kind.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(kind, count)| (kind.as_str(), *count))
	}

	/// Total number of counted objects.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Whether nothing was counted.
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}
}
