//! Kind → display color and size.

/// Color for kinds missing from the table.
pub const DEFAULT_COLOR: &str = "#94A3B8";
/// Size for kinds missing from the table.
pub const DEFAULT_SIZE: f64 = 50.0;
/// Muted color of the "... +N more pods" marker.
pub const OVERFLOW_COLOR: &str = "#cbd5e1";
/// Size of the "... +N more pods" marker.
pub const OVERFLOW_SIZE: f64 = 35.0;

const KIND_COLORS: [(&str, &str); 12] = [
	("Deployment", "#326CE5"),
	("Pod", "#00B4D8"),
	("Container", "#90E0EF"),
	("Service", "#48CAE4"),
	("ServiceAccount", "#FFC300"),
	("ConfigMap", "#FF5733"),
	("Secret", "#C70039"),
	("StatefulSet", "#9D4EDD"),
	("DaemonSet", "#10B981"),
	("Ingress", "#3B82F6"),
	("PersistentVolumeClaim", "#F59E0B"),
	("Namespace", "#8B5CF6"),
];

const KIND_SIZES: [(&str, f64); 9] = [
	("Deployment", 60.0),
	("StatefulSet", 60.0),
	("DaemonSet", 60.0),
	("Service", 55.0),
	("Pod", 40.0),
	("Container", 30.0),
	("ServiceAccount", 50.0),
	("ConfigMap", 45.0),
	("Secret", 45.0),
];

/// How a node is painted.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualAttributes {
	/// CSS hex color.
	pub color: String,
	/// Diameter in pixels at zoom 1.
	pub size: f64,
}

/// Resolve the display attributes for `kind`.
pub fn resolve(kind: &str) -> VisualAttributes {
	VisualAttributes {
		color: color_for(kind).to_string(),
		size: size_for(kind),
	}
}

/// Attributes of the overflow marker node.
pub fn overflow() -> VisualAttributes {
	VisualAttributes {
		color: OVERFLOW_COLOR.to_string(),
		size: OVERFLOW_SIZE,
	}
}

/// Table color for `kind`, or [`DEFAULT_COLOR`].
pub fn color_for(kind: &str) -> &'static str {
	KIND_COLORS
		.iter()
		.find(|(k, _)| *k == kind)
		.map_or(DEFAULT_COLOR, |(_, color)| *color)
}

/// Table size for `kind`, or [`DEFAULT_SIZE`].
pub fn size_for(kind: &str) -> f64 {
	KIND_SIZES
		.iter()
		.find(|(k, _)| *k == kind)
		.map_or(DEFAULT_SIZE, |(_, size)| *size)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_kinds_use_the_table() {
		let deployment = resolve("Deployment");
		assert_eq!(deployment.color, "#326CE5");
		assert_eq!(deployment.size, 60.0);
		assert_eq!(resolve("Container").size, 30.0);
	}

	#[test]
	fn colored_kinds_without_size_get_default_size() {
		let ingress = resolve("Ingress");
		assert_eq!(ingress.color, "#3B82F6");
		assert_eq!(ingress.size, DEFAULT_SIZE);
	}

	#[test]
	fn unknown_kinds_fall_back() {
		let custom = resolve("CronTab");
		assert_eq!(custom.color, DEFAULT_COLOR);
		assert_eq!(custom.size, DEFAULT_SIZE);
		assert_eq!(resolve("deployment").color, DEFAULT_COLOR);
	}
}
