//! Zoom-dependent scaling for canvas visuals.
//!
//! Sizes are either world-space (scale with zoom) or screen-space (divided
//! by the zoom factor `k` to stay a constant pixel size). Everything here is
//! computed once per frame into [`ScaledValues`].

/// How a size reacts to zoom.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels).
	Screen,
	/// World-space size, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels; `f64::INFINITY` for unbounded.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// How opacity reacts to zoom.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Linear in `k`, clamped to [0, 1].
	ScaleWithZoom,
	/// Zero at `zero_alpha_k`, fully visible at `full_alpha_k`.
	Fade {
		/// Zoom at which alpha reaches zero.
		zero_alpha_k: f64,
		/// Zoom at which alpha reaches one.
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Alpha multiplier at zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::ScaleWithZoom => k.clamp(0.0, 1.0),
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Radius in world units of a node whose size factor is 1.0.
	pub radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// How the hit detection radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Zoom below which labels stop shrinking.
	pub label_min_k: f64,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in screen pixels.
	pub line_width: f64,
	/// Dash pattern (dash, gap) in world units.
	pub dash_pattern: (f64, f64),
	/// Flow animation speed (world units per second).
	pub flow_speed: f64,
	/// Dash visibility; faded out dashes become solid lines.
	pub dash_alpha_behavior: AlphaBehavior,
	/// Relationship label font size in screen pixels.
	pub label_size: f64,
	/// Relationship label visibility.
	pub label_alpha_behavior: AlphaBehavior,
}

/// Configuration for arrow visual scaling.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
	/// How arrow alpha scales with zoom.
	pub alpha_behavior: AlphaBehavior,
	/// Minimum alpha to bother drawing.
	pub cull_alpha: f64,
}

/// Scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node sizes and labels.
	pub node: NodeScaleConfig,
	/// Edge lines and relationship labels.
	pub edge: EdgeScaleConfig,
	/// Arrowheads.
	pub arrow: ArrowScaleConfig,
	/// Hover ring stroke width and offset, in screen pixels.
	pub ring: (f64, f64),
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 12.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: f64::INFINITY,
				},
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
				label_size: 11.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				dash_pattern: (8.0, 4.0),
				flow_speed: 12.0,
				dash_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.4,
					full_alpha_k: 0.9,
				},
				label_size: 9.0,
				label_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.5,
					full_alpha_k: 0.8,
				},
			},
			arrow: ArrowScaleConfig {
				size: 6.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 18.0,
				},
				alpha_behavior: AlphaBehavior::ScaleWithZoom,
				cull_alpha: 0.05,
			},
			ring: (1.5, 2.0),
		}
	}
}

/// Scale values for one zoom level, in world-space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Base node radius in world-space.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Node label font, e.g. "11px sans-serif".
	pub label_font: String,
	/// Node label line height.
	pub label_line_height: f64,
	/// Edge line width in world-space.
	pub edge_line_width: f64,
	/// Dash pattern in world-space.
	pub dash_pattern: (f64, f64),
	/// Dash visibility in [0, 1]; 0 means solid.
	pub dash_alpha: f64,
	/// Relationship label font.
	pub edge_label_font: String,
	/// Relationship label alpha multiplier in [0, 1].
	pub edge_label_alpha: f64,
	/// Arrow size in world-space.
	pub arrow_size: f64,
	/// Arrow alpha multiplier in [0, 1].
	pub arrow_alpha: f64,
	/// Whether arrows are too faint to draw.
	pub cull_arrows: bool,
	/// Hover ring width in world-space.
	pub ring_width: f64,
	/// Hover ring offset in world-space.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.node.radius_behavior.apply(config.node.radius, k);
		let hit_radius = config.node.hit_behavior.apply(config.node.radius, k);
		let label_font_size = config.node.label_size / k.max(config.node.label_min_k);
		let edge_label_font_size = ScaleBehavior::Screen.apply(config.edge.label_size, k);
		let arrow_alpha = config.arrow.alpha_behavior.apply(k);

		Self {
			k,
			node_radius,
			hit_radius,
			label_font: format!("{}px sans-serif", label_font_size),
			label_line_height: label_font_size * 1.2,
			edge_line_width: ScaleBehavior::Screen.apply(config.edge.line_width, k),
			dash_pattern: config.edge.dash_pattern,
			dash_alpha: config.edge.dash_alpha_behavior.apply(k),
			edge_label_font: format!("{}px sans-serif", edge_label_font_size),
			edge_label_alpha: config.edge.label_alpha_behavior.apply(k),
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow.cull_alpha,
			ring_width: config.ring.0 / k,
			ring_offset: config.ring.1 / k,
		}
	}

	/// Dash offset for the flow animation.
	pub fn dash_offset(&self, flow_time: f64, flow_speed: f64) -> f64 {
		-flow_time * flow_speed
	}
}
