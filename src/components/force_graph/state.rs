//! Simulation state and interaction tracking for the canvas.
//!
//! Wraps the `force_graph` physics simulation with per-node display data,
//! the pan/zoom transform, and hover highlight intensities. Positions are
//! seeded in layers following edge direction so owners start above the
//! pods they manage and the simulation settles quickly.

use std::collections::{HashMap, HashSet, VecDeque};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::types::GraphData;

/// Horizontal gap between seeded nodes in one layer.
const LAYER_SPACING_X: f64 = 90.0;
/// Vertical gap between seeded layers.
const LAYER_SPACING_Y: f64 = 120.0;
/// Canvas size units that map to a size factor of 1.0.
const SIZE_UNIT: f64 = 40.0;

/// Display data attached to each simulated node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
	/// Radius multiplier (1.0 = base radius).
	pub size: f64,
}

/// Display data attached to each simulated edge.
#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub label: Option<String>,
}

/// Pan and zoom transform applied to the whole view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to 0.1..10.0.
	pub k: f64,
}

impl ViewTransform {
	/// Identity zoom with the graph origin at the canvas center.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Minimum time (seconds) a highlight is held before it may fade out, so a
/// pointer skimming a hover zone does not flash.
const MIN_HOLD_TIME: f64 = 0.12;

/// Per-node highlight intensities (0.0 to 1.0) that ease towards the
/// hovered node and its neighbours using exponential smoothing.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	/// Hovered node plus its neighbours.
	target_set: HashSet<DefaultNodeIdx>,
	/// Nodes absent from the map have intensity 0.
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	hover_ring_intensity: HashMap<DefaultNodeIdx, f64>,
	/// Time remaining before fade-out may begin.
	hold_timer: HashMap<DefaultNodeIdx, f64>,
	cached_max: f64,
}

impl HighlightState {
	/// Update the hovered node and recompute the target set.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
	) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			for &(src, tgt) in edges {
				if src == idx {
					self.target_set.insert(tgt);
				} else if tgt == idx {
					self.target_set.insert(src);
				}
			}
			for &idx in &self.target_set {
				self.hold_timer.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	/// Ease every intensity towards its target.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}
		if let Some(idx) = self.hovered_node {
			let intensity = self.hover_ring_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		self.hold_timer.retain(|idx, timer| {
			if self.target_set.contains(idx) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|idx, intensity| {
			if !self.target_set.contains(idx) && !self.hold_timer.contains_key(idx) {
				*intensity *= fade_out_decay;
			}
			new_max = new_max.max(*intensity);
			*intensity > 0.005
		});

		self.hover_ring_intensity.retain(|idx, intensity| {
			if self.hovered_node != Some(*idx) && !self.hold_timer.contains_key(idx) {
				*intensity *= fade_out_decay;
			}
			*intensity > 0.005
		});

		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	pub fn hover_ring_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.hover_ring_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		(self.node_intensity(idx1) * self.node_intensity(idx2)).sqrt()
	}

	/// Highest intensity of any node, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Initial positions for `data.nodes`, in the same order.
///
/// Nodes without incoming links form layer 0; each link target lands one
/// layer below the first node that reaches it. Nodes only reachable through
/// a cycle start their own layer-0 tree. Each layer is centered on x = 0 and
/// the stack of layers on y = 0.
pub fn layered_positions(data: &GraphData) -> Vec<(f32, f32)> {
	let count = data.nodes.len();
	let index: HashMap<&str, usize> = data
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.as_str(), i))
		.collect();

	let mut children = vec![Vec::new(); count];
	let mut has_parent = vec![false; count];
	for link in &data.links {
		if let (Some(&src), Some(&tgt)) = (
			index.get(link.source.as_str()),
			index.get(link.target.as_str()),
		) {
			if src != tgt {
				children[src].push(tgt);
				has_parent[tgt] = true;
			}
		}
	}

	let mut depth: Vec<Option<usize>> = vec![None; count];
	let roots = (0..count).filter(|&i| !has_parent[i]).chain(0..count);
	for root in roots {
		if depth[root].is_some() {
			continue;
		}
		depth[root] = Some(0);
		let mut queue = VecDeque::from([(root, 0)]);
		while let Some((i, d)) = queue.pop_front() {
			for &child in &children[i] {
				if depth[child].is_none() {
					depth[child] = Some(d + 1);
					queue.push_back((child, d + 1));
				}
			}
		}
	}

	let depth: Vec<usize> = depth.into_iter().map(|d| d.unwrap_or(0)).collect();
	let layers = depth.iter().copied().max().map_or(0, |max| max + 1);
	let mut layer_len = vec![0usize; layers];
	for &d in &depth {
		layer_len[d] += 1;
	}

	let mut slot = vec![0usize; layers];
	depth
		.iter()
		.map(|&d| {
			let x = (slot[d] as f64 - (layer_len[d] as f64 - 1.0) / 2.0) * LAYER_SPACING_X;
			let y = (d as f64 - (layers as f64 - 1.0) / 2.0) * LAYER_SPACING_Y;
			slot[d] += 1;
			(x as f32, y as f32)
		})
		.collect()
}

/// Physics simulation plus view and interaction state.
///
/// Created when the canvas mounts and mutated each animation frame. A new
/// data set replaces the simulation wholesale via [`ForceGraphState::replace`].
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(SimulationParameters {
				force_charge: 250.0,
				force_spring: 0.05,
				force_max: 100.0,
				node_speed: 3000.0,
				damping_factor: 0.9,
			}),
			edges: Vec::new(),
			transform: ViewTransform::centered(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.populate(data, theme);
		state
	}

	/// Discard the current simulation and lay out `data` from scratch.
	pub fn replace(&mut self, data: &GraphData, theme: &Theme) {
		self.graph.clear();
		self.edges.clear();
		self.highlight = HighlightState::default();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.transform = ViewTransform::centered(self.width, self.height);
		self.populate(data, theme);
	}

	fn populate(&mut self, data: &GraphData, theme: &Theme) {
		let positions = layered_positions(data);
		let mut id_to_idx = HashMap::new();

		for (i, (node, &(x, y))) in data.nodes.iter().zip(&positions).enumerate() {
			let color = node
				.color
				.clone()
				.unwrap_or_else(|| theme.palette.get(i).to_css_rgb());
			let size = node.size / SIZE_UNIT;
			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: (10.0 * size) as f32,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color,
					size,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				if src == tgt {
					continue;
				}
				self.graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							label: link.label.clone(),
						},
					},
				);
				self.edges.push((src, tgt));
			}
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius * node.data.user_data.size {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{CanvasLink, CanvasNode};

	fn node(id: &str) -> CanvasNode {
		CanvasNode {
			id: id.to_string(),
			label: Some(id.to_string()),
			color: None,
			group: None,
			size: 40.0,
		}
	}

	fn link(source: &str, target: &str) -> CanvasLink {
		CanvasLink {
			source: source.to_string(),
			target: target.to_string(),
			label: Some("manages".to_string()),
		}
	}

	fn service_and_deployment() -> GraphData {
		GraphData {
			nodes: vec![node("deploy"), node("pod-0"), node("pod-1"), node("svc")],
			links: vec![
				link("deploy", "pod-0"),
				link("deploy", "pod-1"),
				link("svc", "pod-0"),
				link("svc", "pod-1"),
			],
		}
	}

	fn node_count(state: &ForceGraphState) -> usize {
		let mut count = 0;
		state.graph.visit_nodes(|_| count += 1);
		count
	}

	#[test]
	fn owners_are_seeded_above_pods() {
		let positions = layered_positions(&service_and_deployment());
		assert_eq!(positions[0], (-45.0, -60.0));
		assert_eq!(positions[3], (45.0, -60.0));
		assert_eq!(positions[1], (-45.0, 60.0));
		assert_eq!(positions[2], (45.0, 60.0));
	}

	#[test]
	fn cycles_still_get_positions() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			links: vec![link("a", "b"), link("b", "a")],
		};
		assert_eq!(layered_positions(&data), vec![(0.0, -60.0), (0.0, 60.0)]);
	}

	#[test]
	fn isolated_nodes_share_one_layer() {
		let data = GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "missing")],
		};
		assert_eq!(
			layered_positions(&data),
			vec![(-90.0, 0.0), (0.0, 0.0), (90.0, 0.0)]
		);
	}

	#[test]
	fn replace_rebuilds_the_simulation() {
		let theme = Theme::default();
		let mut state = ForceGraphState::new(&service_and_deployment(), 800.0, 600.0, &theme);
		assert_eq!(node_count(&state), 4);
		assert_eq!(state.edges.len(), 4);

		state.transform.k = 3.0;
		state.replace(
			&GraphData {
				nodes: vec![node("only")],
				links: vec![],
			},
			&theme,
		);
		assert_eq!(node_count(&state), 1);
		assert!(state.edges.is_empty());
		assert_eq!(state.transform.k, 1.0);
		assert_eq!(state.transform.x, 400.0);
	}

	#[test]
	fn uncolored_nodes_take_the_palette() {
		let state = ForceGraphState::new(&service_and_deployment(), 800.0, 600.0, &Theme::default());
		state.graph.visit_nodes(|node| {
			assert!(node.data.user_data.color.starts_with('#'));
			assert_eq!(node.data.user_data.size, 1.0);
		});
	}

	#[test]
	fn hovering_highlights_neighbours() {
		let mut state = ForceGraphState::new(&service_and_deployment(), 800.0, 600.0, &Theme::default());
		let (deploy, pod) = state.edges[0];
		state.set_hover(Some(deploy));
		state.highlight.tick(0.1);
		assert!(state.highlight.node_intensity(pod) > 0.0);
		assert!(state.highlight.max_intensity() > 0.0);

		state.set_hover(None);
		for _ in 0..200 {
			state.highlight.tick(0.05);
		}
		assert_eq!(state.highlight.max_intensity(), 0.0);
	}

	#[test]
	fn hit_testing_uses_the_view_transform() {
		let state = ForceGraphState::new(
			&GraphData {
				nodes: vec![node("only")],
				links: vec![],
			},
			800.0,
			600.0,
			&Theme::default(),
		);
		let config = ScaleConfig::default();
		assert!(state.node_at_position(400.0, 300.0, &config).is_some());
		assert!(state.node_at_position(10.0, 10.0, &config).is_none());
	}
}
