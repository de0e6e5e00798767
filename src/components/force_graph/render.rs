//! Canvas drawing for the force graph.
//!
//! Passes, in z-order:
//! 1. Background (screen space)
//! 2. Edge lines with arrowheads, then relationship labels (world space)
//! 3. Dimmed nodes, then highlighted nodes on top

use std::f64::consts::PI;

use force_graph::Node;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{EdgeInfo, ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};

/// Smooths values that would otherwise change abruptly.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

fn rgba(color: Color, alpha: f64) -> String {
	color.with_alpha(alpha * color.a).to_css()
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, config, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let background = &theme.background;
	let gradient = background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let dash_offset = scale.dash_offset(state.flow_time, config.edge.flow_speed);

	state.graph.visit_edges(|n1, n2, _| {
		draw_edge_line(state, ctx, scale, theme, n1, n2, dash_offset);
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	if scale.edge_label_alpha > 0.01 {
		ctx.set_font(&scale.edge_label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		state.graph.visit_edges(|n1, n2, edge| {
			draw_edge_label(state, ctx, scale, theme, n1, n2, &edge.user_data);
		});
		ctx.set_text_align("start");
		ctx.set_text_baseline("alphabetic");
	}
}

fn draw_edge_line(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	n1: &Node<NodeInfo>,
	n2: &Node<NodeInfo>,
	dash_offset: f64,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
	let max_t = smooth_step(state.highlight.max_intensity());

	let (edge_alpha, base_arrow_alpha, base_width) = if edge_t > 0.01 {
		(
			0.7 + 0.3 * edge_t,
			0.9 + 0.1 * edge_t,
			scale.edge_line_width * (1.0 + 0.4 * edge_t),
		)
	} else if max_t > 0.01 {
		(
			0.7 - 0.5 * max_t,
			0.9 - 0.6 * max_t,
			scale.edge_line_width * (1.0 - 0.3 * max_t),
		)
	} else {
		(0.7, 0.9, scale.edge_line_width)
	};

	// Solid lines read thinner than dashed ones.
	let width = base_width * (1.0 + 0.3 * (1.0 - scale.dash_alpha));
	let arrow_alpha = base_arrow_alpha * scale.arrow_alpha;
	let edge_color = theme.edge.color;

	ctx.set_stroke_style_str(&rgba(edge_color, edge_alpha));
	ctx.set_line_width(width);

	let effective_gap = scale.dash_pattern.1 * scale.dash_alpha;
	if effective_gap > 0.1 {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(scale.dash_pattern.0),
			&JsValue::from_f64(effective_gap),
		));
		ctx.set_line_dash_offset(dash_offset);
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let r1 = scale.node_radius * n1.data.user_data.size;
	let r2 = scale.node_radius * n2.data.user_data.size;

	ctx.begin_path();
	ctx.move_to(x1 + ux * r1, y1 + uy * r1);
	ctx.line_to(
		x2 - ux * (r2 + scale.arrow_size),
		y2 - uy * (r2 + scale.arrow_size),
	);
	ctx.stroke();

	if !scale.cull_arrows && arrow_alpha > 0.0 {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&rgba(edge_color, arrow_alpha));

		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
		let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_edge_label(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	n1: &Node<NodeInfo>,
	n2: &Node<NodeInfo>,
	edge: &EdgeInfo,
) {
	let Some(label) = edge.label.as_deref() else {
		return;
	};
	let (mx, my) = (
		(n1.x() as f64 + n2.x() as f64) / 2.0,
		(n1.y() as f64 + n2.y() as f64) / 2.0,
	);

	let max_t = smooth_step(state.highlight.max_intensity());
	let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
	let alpha = scale.edge_label_alpha * (1.0 - 0.7 * max_t + 0.7 * edge_t).min(1.0);

	if let Ok(metrics) = ctx.measure_text(label) {
		let (w, h) = (metrics.width() + 4.0 / scale.k, scale.label_line_height);
		ctx.set_fill_style_str(&rgba(theme.edge.label_background, alpha));
		ctx.fill_rect(mx - w / 2.0, my - h / 2.0, w, h);
	}
	ctx.set_fill_style_str(&rgba(theme.edge.label_color, alpha));
	let _ = ctx.fill_text(label, mx, my);
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let has_highlight = max_t > 0.01;
	let (dim_alpha, dim_radius) = if has_highlight {
		(1.0 - 0.7 * max_t, 1.0 - 0.15 * max_t)
	} else {
		(1.0, 1.0)
	};

	state.graph.visit_nodes(|node| {
		if state.highlight.node_intensity(node.index()) > 0.001 {
			return;
		}
		draw_node(ctx, node, scale, theme, dim_alpha, dim_radius);
	});

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let node_t = state.highlight.node_intensity(idx);
		if node_t <= 0.001 {
			return;
		}

		let eased_t = smooth_step(node_t);
		let hover_t = smooth_step(state.highlight.hover_ring_intensity(idx));

		let neighbor_radius = 1.0 + 0.25 * eased_t;
		let hovered_radius = 1.0 + 0.4 * eased_t;
		let highlight_radius = neighbor_radius + (hovered_radius - neighbor_radius) * hover_t;

		let alpha = dim_alpha + (1.0 - dim_alpha) * eased_t;
		let radius_mult = dim_radius + (highlight_radius - dim_radius) * eased_t;

		draw_node(ctx, node, scale, theme, alpha, radius_mult);

		if hover_t > 0.01 {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let radius = scale.node_radius * radius_mult * node.data.user_data.size;
			let ring = theme.node.label_color;

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&rgba(ring, 0.8 * hover_t));
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset * 2.5, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&rgba(ring, 0.3 * hover_t));
			ctx.set_line_width(scale.ring_width * 0.5);
			ctx.stroke();
		}
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let info = &node.data.user_data;
	let radius = scale.node_radius * radius_mult * info.size;

	ctx.set_global_alpha(alpha);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let base = Color::parse(&info.color);
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&info.color),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	if let Some(label) = &info.label {
		if alpha > 0.5 {
			draw_node_label(ctx, label, x + radius + 4.0, y, scale, theme, alpha);
		}
	}

	ctx.set_global_alpha(1.0);
}

/// Draws `label` one line per `\n`, vertically centered on `y`.
fn draw_node_label(
	ctx: &CanvasRenderingContext2d,
	label: &str,
	x: f64,
	y: f64,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
) {
	let lines = label.lines().count().max(1) as f64;
	let top = y - scale.label_line_height * (lines - 1.0) / 2.0;

	ctx.set_fill_style_str(&rgba(theme.node.label_color, 0.9 * alpha));
	ctx.set_font(&scale.label_font);
	ctx.set_text_baseline("middle");
	for (i, line) in label.lines().enumerate() {
		let _ = ctx.fill_text(line, x, top + scale.label_line_height * i as f64);
	}
	ctx.set_text_baseline("alphabetic");
}
