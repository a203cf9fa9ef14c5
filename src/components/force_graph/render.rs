//! Canvas rendering for the force graph.
//!
//! Colors come from the style callbacks in [`crate::interaction`], evaluated
//! against the current selection snapshot every frame. Passes:
//! 1. Background (screen space)
//! 2. Links, straight or curved by their assigned curvature (world space)
//! 3. Nodes by ascending emphasis, so highlighted nodes draw on top
//! 4. Labels for hovered nodes and selected entities

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::{Paint, Theme};
use crate::graph::LinkKind;
use crate::interaction::{Emphasis, Selection, link_color, node_color, node_emphasis};

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, state.transform.k);
	let selection = state.selection.snapshot();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let mut positions: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
	state.graph.visit_nodes(|node| {
		positions.insert(node.index(), (node.x() as f64, node.y() as f64));
	});

	draw_links(state, ctx, &scale, theme, &selection, &positions);
	draw_nodes(state, ctx, &scale, theme, &selection);

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let background = &theme.background;
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let vignette = background
		.vignette
		.then(|| ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8).ok())
		.flatten();
	match vignette {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &background.center.to_css());
			let _ = gradient.add_color_stop(1.0, &background.edge.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&background.edge.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_links(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	selection: &Selection,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	let position = |id| state.node_index(id).and_then(|idx| positions.get(&idx)).copied();

	for link in state.links.iter().filter(|l| l.visible) {
		let (Some((x1, y1)), Some((x2, y2))) = (position(link.source), position(link.target)) else {
			continue;
		};

		let paint = Paint::translucent(link_color(selection, &state.palette, link.pair_key), theme.link.alpha);
		ctx.set_stroke_style_str(&paint.to_css());
		ctx.set_line_width(scale.line_width);

		if link.kind == LinkKind::Relationship {
			let (dash, gap) = theme.link.relationship_dash;
			let _ = ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)));
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.begin_path();
		ctx.move_to(x1, y1);
		match link.curvature {
			// control point sits off the midpoint, perpendicular to the link
			Some(c) if c != 0.0 => {
				let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
				let (dx, dy) = (x2 - x1, y2 - y1);
				let _ = ctx.quadratic_curve_to(mx + c * dy, my - c * dx, x2, y2);
			}
			_ => ctx.line_to(x2, y2),
		}
		ctx.stroke();
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	selection: &Selection,
) {
	for pass in [Emphasis::Dimmed, Emphasis::Base, Emphasis::Selected, Emphasis::Hovered] {
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if !info.visible || node_emphasis(selection, info.id) != pass {
				return;
			}
			let (x, y) = (node.x() as f64, node.y() as f64);
			let radius = scale.node_radius(info.val);
			let paint = Paint::from(node_color(selection, &state.palette, info.id, info.color));
			draw_node(ctx, scale, theme, x, y, radius, paint);

			let labeled = pass == Emphasis::Hovered || (pass == Emphasis::Selected && info.id.is_entity());
			if labeled {
				draw_label(ctx, scale, theme, info, x + radius + 4.0, y + 3.0);
			}
		});
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	x: f64,
	y: f64,
	radius: f64,
	paint: Paint,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);

	// light from the upper left
	let shaded = theme.node.shading.and_then(|(highlight, rim)| {
		let gradient = ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.ok()?;
		let _ = gradient.add_color_stop(0.0, &paint.shade(highlight).to_css());
		let _ = gradient.add_color_stop(0.7, &paint.to_css());
		let _ = gradient.add_color_stop(1.0, &paint.shade(rim).to_css());
		Some(gradient)
	});
	match shaded {
		Some(gradient) => {
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&paint.to_css()),
	}
	ctx.fill();

	if let Some((outline, width)) = theme.node.outline {
		ctx.set_stroke_style_str(&outline.to_css());
		ctx.set_line_width(width / scale.k);
		ctx.stroke();
	}
}

fn draw_label(ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme, info: &NodeInfo, x: f64, y: f64) {
	ctx.set_fill_style_str(&theme.node.label.to_css());
	ctx.set_font(&scale.label_font);
	let _ = ctx.fill_text(&info.label, x, y);
}
