//! Graph construction from accepted resources.
//!
//! One pass over the input. Each resource contributes, in order:
//! 1. its own node,
//! 2. for workloads, replica Pods with their containers, service account and
//!    mounted ConfigMaps/Secrets, plus an overflow marker past the cap,
//! 3. for Services, a `routes to` edge to every workload whose labels
//!    satisfy the selector.

use log::{debug, info};
use serde_yaml::{Mapping, Value};

use super::{GraphNode, GraphOptions, ResourceGraph};
use crate::resource::fields::FieldAccess;
use crate::resource::{DEFAULT_NAME, Resource};
use crate::style;

/// Build the graph with default options.
pub fn build_graph(resources: &[Resource]) -> ResourceGraph {
	build_graph_with(resources, &GraphOptions::default())
}

/// Build the graph for `resources`. Never fails; missing fields take their
/// defaults.
pub fn build_graph_with(resources: &[Resource], options: &GraphOptions) -> ResourceGraph {
	let mut graph = ResourceGraph::default();

	for resource in resources {
		let self_id = resource.node_id();
		graph.merge_node(kind_node(
			self_id.clone(),
			format!("{}\n{}", resource.kind(), resource.name()),
			resource.kind(),
		));

		if resource.is_workload() {
			expand_workload(&mut graph, resource, &self_id, options);
		}

		if resource.kind() == "Service" {
			infer_routes(&mut graph, resource, &self_id, resources);
		}
	}

	info!(
		"kube-graph: built {} nodes, {} edges from {} resources",
		graph.node_count(),
		graph.edges().len(),
		resources.len()
	);
	graph
}

fn kind_node(id: String, label: String, kind: &str) -> GraphNode {
	GraphNode {
		id,
		label,
		kind: kind.to_string(),
		attributes: style::resolve(kind),
	}
}

/// `spec.replicas` as a count. Absent, negative, non-integer or out of range
/// values count as one replica.
fn replica_count(spec: &Value) -> u64 {
	let Some(value) = spec.at(&["replicas"]) else {
		return 1;
	};
	value
		.as_u64()
		.or_else(|| {
			value
				.as_f64()
				.filter(|n| *n >= 0.0 && *n < u64::MAX as f64 && n.fract() == 0.0)
				.map(|n| n as u64)
		})
		.unwrap_or(1)
}

fn expand_workload(
	graph: &mut ResourceGraph,
	workload: &Resource,
	self_id: &str,
	options: &GraphOptions,
) {
	let spec = workload.spec();
	let namespace = workload.namespace();
	let owner = workload.name();
	let replicas = replica_count(spec);
	let expanded = replicas.min(options.max_expanded_replicas);
	debug!("kube-graph: {self_id} has {replicas} replicas, expanding {expanded}");

	let containers = spec.seq_at(&["template", "spec", "containers"]);
	let service_account = spec.str_at(&["template", "spec", "serviceAccountName"]);
	let volumes = spec.seq_at(&["template", "spec", "volumes"]);

	for i in 0..expanded {
		let pod_id = format!("Pod/{namespace}/{owner}-pod-{i}");
		graph.merge_node(kind_node(pod_id.clone(), format!("Pod\n{owner}-{i}"), "Pod"));
		graph.add_edge(self_id, &pod_id, "manages");

		for container in containers {
			let name = container.str_or(&["name"], DEFAULT_NAME);
			let container_id = format!("Container/{namespace}/{owner}-pod-{i}-{name}");
			graph.merge_node(kind_node(
				container_id.clone(),
				format!("Container\n{name}"),
				"Container",
			));
			graph.add_edge(&pod_id, container_id, "contains");
		}

		if let Some(account) = service_account {
			let account_id = link_dependency(graph, "ServiceAccount", namespace, account);
			graph.add_edge(&pod_id, account_id, "uses");
		}

		for volume in volumes {
			if let Some(config_map) = volume.str_at(&["configMap", "name"]) {
				let config_map_id = link_dependency(graph, "ConfigMap", namespace, config_map);
				graph.add_edge(&pod_id, config_map_id, "mounts");
			}
			if let Some(secret) = volume.str_at(&["secret", "secretName"]) {
				let secret_id = link_dependency(graph, "Secret", namespace, secret);
				graph.add_edge(&pod_id, secret_id, "mounts");
			}
		}
	}

	if replicas > options.max_expanded_replicas {
		let overflow_id = format!("{self_id}-more");
		graph.merge_node(GraphNode {
			id: overflow_id.clone(),
			label: format!(
				"... +{} more pods",
				replicas - options.max_expanded_replicas
			),
			kind: "Pod".to_string(),
			attributes: style::overflow(),
		});
		graph.add_edge(self_id, overflow_id, "");
	}
}

/// Merge a node for an object referenced by a pod template, which may or
/// may not be declared in the input. Returns its id.
fn link_dependency(graph: &mut ResourceGraph, kind: &str, namespace: &str, name: &str) -> String {
	let id = format!("{kind}/{namespace}/{name}");
	graph.merge_node(kind_node(id.clone(), format!("{kind}\n{name}"), kind));
	id
}

fn infer_routes(
	graph: &mut ResourceGraph,
	service: &Resource,
	service_id: &str,
	resources: &[Resource],
) {
	let Some(selector) = service.spec().mapping_at(&["selector"]) else {
		return;
	};
	for target in resources.iter().filter(|r| r.is_workload()) {
		if selector_matches(selector, target.labels()) {
			graph.add_edge(service_id, target.node_id(), "routes to");
		}
	}
}

/// A selector matches when it is non-empty and every entry appears in
/// `labels` with an equal value.
pub fn selector_matches(selector: &Mapping, labels: &Mapping) -> bool {
	!selector.is_empty()
		&& selector
			.iter()
			.all(|(key, value)| labels.get(key) == Some(value))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resource::{accept_documents, parse_documents};

	fn resources(text: &str) -> Vec<Resource> {
		accept_documents(parse_documents(text).unwrap())
	}

	fn graph(text: &str) -> ResourceGraph {
		build_graph(&resources(text))
	}

	fn edge_labels(graph: &ResourceGraph, label: &str) -> Vec<(String, String)> {
		graph
			.edges()
			.iter()
			.filter(|e| e.label == label)
			.map(|e| (e.source.clone(), e.target.clone()))
			.collect()
	}

	fn pair(source: &str, target: &str) -> (String, String) {
		(source.to_string(), target.to_string())
	}

	fn count_kind(graph: &ResourceGraph, kind: &str) -> usize {
		graph.nodes().filter(|n| n.kind == kind).count()
	}

	const WEB: &str = r#"
kind: Deployment
metadata:
  name: web
  labels: {app: web, tier: frontend}
spec:
  replicas: 2
  template:
    spec:
      serviceAccountName: web-sa
      containers:
        - name: nginx
        - name: sidecar
      volumes:
        - name: conf
          configMap: {name: web-config}
        - name: creds
          secret: {secretName: web-secret}
"#;

	#[test]
	fn self_node_uses_kind_and_name() {
		let g = graph("kind: ConfigMap\nmetadata: {name: settings, namespace: ops}\n");
		let node = g.node("ConfigMap/ops/settings").unwrap();
		assert_eq!(node.label, "ConfigMap\nsettings");
		assert_eq!(node.attributes.color, "#FF5733");
		assert!(g.edges().is_empty());
	}

	#[test]
	fn workload_expands_pods_and_containers() {
		let g = graph(WEB);
		assert_eq!(count_kind(&g, "Pod"), 2);
		assert_eq!(count_kind(&g, "Container"), 4);
		assert_eq!(
			edge_labels(&g, "manages"),
			[
				pair("Deployment/default/web", "Pod/default/web-pod-0"),
				pair("Deployment/default/web", "Pod/default/web-pod-1"),
			]
		);
		assert!(g.node("Container/default/web-pod-1-sidecar").is_some());
		assert_eq!(g.node("Pod/default/web-pod-1").unwrap().label, "Pod\nweb-1");
		assert_eq!(edge_labels(&g, "contains").len(), 4);
	}

	#[test]
	fn pods_use_service_account_and_mount_volumes() {
		let g = graph(WEB);
		assert_eq!(edge_labels(&g, "uses").len(), 2);
		assert!(g.node("ServiceAccount/default/web-sa").is_some());

		let mounts: Vec<_> = edge_labels(&g, "mounts")
			.into_iter()
			.filter(|(source, _)| source == "Pod/default/web-pod-0")
			.map(|(_, target)| target)
			.collect();
		assert_eq!(
			mounts,
			["ConfigMap/default/web-config", "Secret/default/web-secret"]
		);
	}

	#[test]
	fn one_volume_may_mount_both_sources() {
		let g = graph(concat!(
			"kind: DaemonSet\nmetadata: {name: agent}\n",
			"spec:\n  template:\n    spec:\n      volumes:\n",
			"        - configMap: {name: cm}\n          secret: {secretName: s}\n",
		));
		assert_eq!(edge_labels(&g, "mounts").len(), 2);
	}

	#[test]
	fn volumes_without_names_are_ignored() {
		let g = graph(concat!(
			"kind: StatefulSet\nmetadata: {name: db}\n",
			"spec:\n  template:\n    spec:\n      volumes:\n",
			"        - configMap: {}\n        - secret: {}\n        - emptyDir: {}\n",
		));
		assert!(edge_labels(&g, "mounts").is_empty());
	}

	#[test]
	fn missing_replicas_means_one_pod() {
		let g = graph("kind: Deployment\nmetadata: {name: api}\n");
		assert_eq!(count_kind(&g, "Pod"), 1);
		assert!(g.node("Deployment/default/api-more").is_none());
	}

	#[test]
	fn replica_values_are_sanitized() {
		let spec = |text: &str| -> Value { serde_yaml::from_str(text).unwrap() };
		assert_eq!(replica_count(&spec("{}")), 1);
		assert_eq!(replica_count(&spec("replicas: -3")), 1);
		assert_eq!(replica_count(&spec("replicas: many")), 1);
		assert_eq!(replica_count(&spec("replicas: 2.5")), 1);
		assert_eq!(replica_count(&spec("replicas: 3.0")), 3);
		assert_eq!(replica_count(&spec("replicas: 1e30")), 1);
		assert_eq!(replica_count(&spec("replicas: .inf")), 1);
		assert_eq!(replica_count(&spec("replicas: 0")), 0);
		assert_eq!(replica_count(&spec("replicas: 12")), 12);
	}

	#[test]
	fn zero_replicas_expand_nothing() {
		let g = graph("kind: Deployment\nmetadata: {name: idle}\nspec: {replicas: 0}\n");
		assert_eq!(g.node_count(), 1);
		assert!(g.edges().is_empty());
	}

	#[test]
	fn replicas_past_the_cap_collapse_into_overflow() {
		let g = graph(concat!(
			"kind: Deployment\nmetadata: {name: big}\nspec:\n  replicas: 7\n",
			"  template:\n    spec:\n      containers: [{name: app}]\n",
		));
		assert_eq!(count_kind(&g, "Pod"), 6);
		assert_eq!(count_kind(&g, "Container"), 5);

		let overflow = g.node("Deployment/default/big-more").unwrap();
		assert_eq!(overflow.label, "... +2 more pods");
		assert_eq!(overflow.attributes.color, style::OVERFLOW_COLOR);

		let from_owner: Vec<_> = g
			.edges()
			.iter()
			.filter(|e| e.source == "Deployment/default/big")
			.collect();
		assert_eq!(from_owner.len(), 6);
		assert_eq!(from_owner[5].target, "Deployment/default/big-more");
		assert_eq!(from_owner[5].label, "");
	}

	#[test]
	fn replica_cap_is_configurable() {
		let rs = resources("kind: Deployment\nmetadata: {name: w}\nspec: {replicas: 4}\n");
		let g = build_graph_with(
			&rs,
			&GraphOptions {
				max_expanded_replicas: 2,
			},
		);
		assert_eq!(count_kind(&g, "Pod"), 3);
		assert_eq!(
			g.node("Deployment/default/w-more").unwrap().label,
			"... +2 more pods"
		);
	}

	#[test]
	fn service_routes_to_matching_workloads() {
		let text = format!(
			"kind: Service\nmetadata: {{name: front}}\nspec:\n  selector: {{app: web}}\n---\n{WEB}---\nkind: Deployment\nmetadata:\n  name: other\n  labels: {{app: api}}\n"
		);
		let g = graph(&text);
		assert_eq!(
			edge_labels(&g, "routes to"),
			[pair("Service/default/front", "Deployment/default/web")]
		);
	}

	#[test]
	fn merged_labels_satisfy_selectors() {
		let g = graph(concat!(
			"kind: Service\nmetadata: {name: front}\nspec: {selector: {app: web}}\n---\n",
			"kind: Deployment\nmetadata:\n  name: m\n  labels: {<<: {app: web}, tier: x}\n",
		));
		assert_eq!(
			edge_labels(&g, "routes to"),
			[pair("Service/default/front", "Deployment/default/m")]
		);
	}

	#[test]
	fn empty_or_missing_selector_routes_nowhere() {
		let g = graph(concat!(
			"kind: Service\nmetadata: {name: all}\nspec: {selector: {}}\n---\n",
			"kind: Service\nmetadata: {name: none}\n---\n",
			"kind: Deployment\nmetadata: {name: web, labels: {app: web}}\n",
		));
		assert!(edge_labels(&g, "routes to").is_empty());
	}

	#[test]
	fn selectors_only_target_workloads() {
		let g = graph(concat!(
			"kind: Service\nmetadata: {name: s}\nspec: {selector: {app: x}}\n---\n",
			"kind: ConfigMap\nmetadata: {name: c, labels: {app: x}}\n---\n",
			"kind: StatefulSet\nmetadata: {name: db, labels: {app: x}}\n",
		));
		assert_eq!(
			edge_labels(&g, "routes to"),
			[pair("Service/default/s", "StatefulSet/default/db")]
		);
	}

	#[test]
	fn identical_selectors_produce_duplicate_routes() {
		let g = graph(concat!(
			"kind: Service\nmetadata: {name: s}\nspec: {selector: {app: x}}\n---\n",
			"kind: Service\nmetadata: {name: s}\nspec: {selector: {app: x}}\n---\n",
			"kind: Deployment\nmetadata: {name: d, labels: {app: x}}\nspec: {replicas: 0}\n",
		));
		assert_eq!(edge_labels(&g, "routes to").len(), 2);
		assert_eq!(count_kind(&g, "Service"), 1);
	}

	#[test]
	fn selector_matching_is_subset_equality() {
		let map = |text: &str| -> Mapping { serde_yaml::from_str(text).unwrap() };
		assert!(selector_matches(&map("{app: x}"), &map("{app: x, tier: web}")));
		assert!(!selector_matches(&map("{app: x, tier: db}"), &map("{app: x, tier: web}")));
		assert!(!selector_matches(&map("{app: x}"), &map("{}")));
		assert!(!selector_matches(&map("{}"), &map("{app: x}")));
	}

	#[test]
	fn namespaces_separate_same_named_objects() {
		let g = graph(concat!(
			"kind: Deployment\nmetadata: {name: web, namespace: a}\nspec: {replicas: 0}\n---\n",
			"kind: Deployment\nmetadata: {name: web, namespace: b}\nspec: {replicas: 0}\n",
		));
		assert!(g.node("Deployment/a/web").is_some());
		assert!(g.node("Deployment/b/web").is_some());
		assert_eq!(g.node_count(), 2);
	}

	#[test]
	fn building_twice_is_identical() {
		let rs = resources(&format!("{WEB}---\nkind: Service\nmetadata: {{name: s}}\nspec: {{selector: {{app: web}}}}\n"));
		assert_eq!(build_graph(&rs), build_graph(&rs));
	}
}
