//! Kubernetes manifests as the graph builder sees them.
//!
//! Raw text goes through [`parse::parse_documents`], then
//! [`filter::accept_documents`] keeps the documents shaped like objects and
//! wraps them as [`Resource`]s.

pub mod fields;
pub mod filter;
pub mod intake;
pub mod parse;

use serde_yaml::{Mapping, Value};

use fields::FieldAccess;

pub use filter::accept_documents;
pub use intake::ManifestBatch;
pub use parse::parse_documents;

/// Name used when `metadata.name` is missing.
pub const DEFAULT_NAME: &str = "unnamed";
/// Namespace used when `metadata.namespace` is missing.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Kinds that own replica Pods through a pod template.
pub const WORKLOAD_KINDS: [&str; 3] = ["Deployment", "StatefulSet", "DaemonSet"];

static EMPTY_MAPPING: std::sync::LazyLock<Mapping> = std::sync::LazyLock::new(Mapping::new);

/// An accepted configuration object: a `kind`, a `metadata` mapping and an
/// opaque `spec`.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
	kind: String,
	metadata: Mapping,
	spec: Value,
}

impl Resource {
	/// Build a resource from already-validated parts.
	pub fn new(kind: impl Into<String>, metadata: Mapping, spec: Value) -> Self {
		Self {
			kind: kind.into(),
			metadata,
			spec,
		}
	}

	/// The object kind, e.g. `Deployment`.
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// `metadata.name`, or [`DEFAULT_NAME`].
	pub fn name(&self) -> &str {
		self.metadata.str_at(&["name"]).unwrap_or(DEFAULT_NAME)
	}

	/// `metadata.namespace`, or [`DEFAULT_NAMESPACE`].
	pub fn namespace(&self) -> &str {
		self.metadata
			.str_at(&["namespace"])
			.unwrap_or(DEFAULT_NAMESPACE)
	}

	/// `metadata.labels`, empty when absent.
	pub fn labels(&self) -> &Mapping {
		self.metadata.mapping_at(&["labels"]).unwrap_or(&EMPTY_MAPPING)
	}

	/// The raw `spec` tree (`Null` when absent).
	pub fn spec(&self) -> &Value {
		&self.spec
	}

	/// Whether this object owns replica Pods.
	pub fn is_workload(&self) -> bool {
		WORKLOAD_KINDS.contains(&self.kind.as_str())
	}

	/// Graph node id: `{kind}/{namespace}/{name}`.
	pub fn node_id(&self) -> String {
		format!("{}/{}/{}", self.kind, self.namespace(), self.name())
	}
}
