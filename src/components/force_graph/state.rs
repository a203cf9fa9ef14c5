//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with the projected dataset
//! graph, view transforms for pan/zoom, and the selection state machine that
//! pointer events drive.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::scale::{ScaleConfig, ScaledValues};
use crate::config::GraphConfig;
use crate::graph::{GraphLink, assign_curvature, focus_links, project};
use crate::interaction::{HighlightPalette, SelectionStateMachine};
use crate::model::{DatasetGraph, Hsl, NodeId};

/// Pointer travel (screen pixels) below which a press counts as a click.
const CLICK_TOLERANCE: f64 = 4.0;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Dataset node this simulation node stands for.
	pub id: NodeId,
	/// Text drawn beside the node.
	pub label: String,
	/// Base color from the transformer.
	pub color: Hsl,
	/// Layout weight.
	pub val: f64,
	/// Hidden nodes take part in the layout but are never drawn.
	pub visible: bool,
}

impl Default for NodeInfo {
	fn default() -> Self {
		Self {
			id: NodeId::ROOT,
			label: String::new(),
			color: Hsl::NEUTRAL,
			val: 1.0,
			visible: true,
		}
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal pan in screen pixels.
	pub x: f64,
	/// Vertical pan in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is being dragged.
	pub active: bool,
	/// Simulation index of the dragged node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer position at press, in screen pixels.
	pub start_x: f64,
	/// Same, vertical.
	pub start_y: f64,
	/// Node position at press, in world units.
	pub node_start_x: f32,
	/// Same, vertical.
	pub node_start_y: f32,
	/// Set once the pointer leaves the click tolerance.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// The background is being dragged.
	pub active: bool,
	/// Pointer position at press, in screen pixels.
	pub start_x: f64,
	/// Same, vertical.
	pub start_y: f64,
	/// Pan offset at press.
	pub transform_start_x: f64,
	/// Same, vertical.
	pub transform_start_y: f64,
	/// Set once the pointer leaves the click tolerance.
	pub moved: bool,
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Rebuilt whenever the dataset changes, then mutated each frame by the
/// animation loop.
pub struct ForceGraphState {
	/// Physics simulation; node user data carries the display metadata.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Graph the simulation was built from.
	pub dataset: Arc<DatasetGraph>,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress, if any.
	pub drag: DragState,
	/// Background pan in progress, if any.
	pub pan: PanState,
	/// Hover and click state.
	pub selection: SelectionStateMachine,
	/// Highlight colors from the config.
	pub palette: HighlightPalette,
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	/// Whether the frame loop keeps calling [`tick`](Self::tick).
	pub animation_running: bool,
	/// Links drawn this frame: the projection plus focus links, with curvature.
	pub links: Vec<GraphLink>,
	base_links: Vec<GraphLink>,
	max_curvature: f64,
	node_idx: HashMap<NodeId, DefaultNodeIdx>,
}

impl ForceGraphState {
	/// Builds the simulation for `dataset`, centered in a `width` by `height` canvas.
	pub fn new(dataset: Arc<DatasetGraph>, config: &GraphConfig, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 120.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let data = project(&dataset);
		let mut node_idx = HashMap::with_capacity(data.nodes.len());

		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = i as f64 * 2.0 * PI / count;
			let (x, y) = if node.fixed {
				(0.0, 0.0)
			} else {
				((150.0 * angle.cos()) as f32, (150.0 * angle.sin()) as f32)
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: node.fixed,
				user_data: NodeInfo {
					id: node.id,
					label: node.name.clone(),
					color: node.color,
					val: node.val,
					visible: node.visible,
				},
			});
			node_idx.insert(node.id, idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (node_idx.get(&link.source), node_idx.get(&link.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		let mut state = Self {
			graph,
			dataset,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			selection: SelectionStateMachine::new(),
			palette: config.highlight.clone(),
			width,
			height,
			animation_running: true,
			links: Vec::new(),
			base_links: data.links,
			max_curvature: config.curvature,
			node_idx,
		};
		state.refresh_links();
		state
	}

	/// Simulation index of a dataset node; `None` for nodes kept out of the layout.
	pub fn node_index(&self, id: NodeId) -> Option<DefaultNodeIdx> {
		self.node_idx.get(&id).copied()
	}

	/// Rebuilds the drawn link set from the projection and the focused
	/// entities, then reassigns curvature.
	pub fn refresh_links(&mut self) {
		let focused = self.selection.selection().focused.iter().copied();
		let mut links = self.base_links.clone();
		links.extend(focus_links(&self.dataset, focused));
		assign_curvature(&mut links, self.max_curvature);
		debug!("links refreshed: {} drawn", links.len());
		self.links = links;
	}

	/// Converts canvas pixels to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost visible node under the screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<(DefaultNodeIdx, NodeId)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if !info.visible {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit_radius = scale.node_radius(info.val) + scale.hit_padding;
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some((node.index(), info.id));
			}
		});
		found
	}

	/// Pointer moved without dragging a node.
	pub fn pointer_move(&mut self, hovered: Option<NodeId>) {
		self.selection.hover(&self.dataset, hovered);
	}

	/// Pointer moved while dragging `dragged` over `hovered`.
	pub fn drag_move(&mut self, dragged: NodeId, hovered: Option<NodeId>) {
		self.selection.hover(&self.dataset, hovered);
		self.selection.hover_during_drag(&self.dataset, dragged);
	}

	/// Button released; `moved` tells a drag or pan apart from a click.
	pub fn release(&mut self, clicked: Option<NodeId>, moved: bool) {
		if self.drag.active && moved {
			self.selection.end_drag();
		} else if !moved {
			match clicked {
				Some(id) => self.selection.click(&self.dataset, id),
				None => self.selection.click_background(),
			}
			self.refresh_links();
		}
		self.selection.pointer_up();
	}

	/// True once a pointer has travelled too far to count as a click.
	pub fn exceeds_click_tolerance(dx: f64, dy: f64) -> bool {
		(dx * dx + dy * dy).sqrt() > CLICK_TOLERANCE
	}

	/// Button pressed at a screen position: grabs the node under it, or
	/// starts panning the view.
	pub fn press(&mut self, sx: f64, sy: f64, scale: &ScaleConfig) {
		self.selection.pointer_down();
		match self.node_at_position(sx, sy, scale) {
			Some((idx, _)) => {
				let mut origin = (0.0, 0.0);
				self.graph.visit_nodes(|node| {
					if node.index() == idx {
						origin = (node.x(), node.y());
					}
				});
				self.drag = DragState {
					active: true,
					node_idx: Some(idx),
					start_x: sx,
					start_y: sy,
					node_start_x: origin.0,
					node_start_y: origin.1,
					moved: false,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
					moved: false,
				};
			}
		}
	}

	/// Pointer moved to a screen position: drags, pans or hovers.
	pub fn move_to(&mut self, sx: f64, sy: f64, scale: &ScaleConfig) {
		let hovered = self.node_at_position(sx, sy, scale).map(|(_, id)| id);

		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			self.drag.moved |= Self::exceeds_click_tolerance(dx, dy);
			if !self.drag.moved {
				// still a click candidate
				self.pointer_move(hovered);
				return;
			}
			let (nx, ny) = (
				self.drag.node_start_x + (dx / self.transform.k) as f32,
				self.drag.node_start_y + (dy / self.transform.k) as f32,
			);
			let mut dragged = None;
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					// pinned where dropped
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
					dragged = Some(node.data.user_data.id);
				}
			});
			if let Some(dragged) = dragged {
				self.drag_move(dragged, hovered);
			}
		} else if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			self.pan.moved |= Self::exceeds_click_tolerance(dx, dy);
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		} else {
			self.pointer_move(hovered);
		}
	}

	/// Button released, at `point` when it is still over the canvas.
	pub fn release_at(&mut self, point: Option<(f64, f64)>, scale: &ScaleConfig) {
		let clicked = point
			.and_then(|(sx, sy)| self.node_at_position(sx, sy, scale))
			.map(|(_, id)| id);
		let moved = self.drag.moved || self.pan.moved;
		self.release(clicked, moved);
		self.drag = DragState::default();
		self.pan = PanState::default();
	}

	/// Pointer left the canvas: abandons any gesture without clicking.
	pub fn leave(&mut self) {
		if self.drag.active {
			self.selection.end_drag();
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.selection.pointer_up();
		self.pointer_move(None);
	}

	/// Zooms one wheel step around a screen position.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
	}

	/// Advances the simulation by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	/// Records a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::graph::LinkKind;
	use crate::interaction::{Emphasis, link_emphasis};
	use crate::transform::{TransformOptions, transform};

	fn position(state: &ForceGraphState, id: NodeId) -> (f32, f32, bool) {
		let idx = state.node_index(id).unwrap();
		let mut found = (0.0, 0.0, false);
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = (node.x(), node.y(), node.data.is_anchor);
			}
		});
		found
	}

	/// Screen position of a node under the current view transform.
	fn on_screen(state: &ForceGraphState, id: NodeId) -> (f64, f64) {
		let (x, y, _) = position(state, id);
		(
			x as f64 * state.transform.k + state.transform.x,
			y as f64 * state.transform.k + state.transform.y,
		)
	}

	fn state() -> ForceGraphState {
		let dataset = json!([
			{"name": "A", "city": "X"},
			{"name": "B", "city": "X"},
		]);
		let graph = transform(&dataset, &TransformOptions::default()).unwrap();
		ForceGraphState::new(Arc::new(graph), &GraphConfig::default(), 800.0, 600.0)
	}

	#[test]
	fn clicking_an_entity_adds_relationship_links() {
		let mut state = state();
		let base = state.links.len();

		state.selection.pointer_down();
		state.release(Some(NodeId::Entity(0)), false);
		assert_eq!(state.links.len(), base + 1);
		assert!(state.selection.focus_mode());

		state.selection.pointer_down();
		state.release(Some(NodeId::Entity(1)), false);
		let between: Vec<_> = state
			.links
			.iter()
			.filter(|l| l.pair_key.to_string() == "e0_e1")
			.collect();
		assert_eq!(between.len(), 2);
		assert!(between.iter().all(|l| l.curvature.is_some()));

		state.release(None, false);
		assert_eq!(state.links.len(), base);
		assert!(!state.selection.focus_mode());
	}

	#[test]
	fn drags_do_not_click() {
		let mut state = state();
		state.drag.active = true;
		state.selection.pointer_down();
		state.drag_move(NodeId::Entity(0), Some(NodeId::Entity(1)));
		assert!(state.selection.selection().hovered_nodes.contains(&NodeId::Entity(1)));

		state.release(Some(NodeId::Entity(0)), true);
		assert!(state.selection.selection().is_idle());
		assert!(!state.selection.is_pointer_down());
	}

	#[test]
	fn focused_relationship_links_are_lit() {
		let mut state = state();
		state.selection.pointer_down();
		state.release(Some(NodeId::Entity(0)), false);

		let selection = state.selection.snapshot();
		let related: Vec<_> = state
			.links
			.iter()
			.filter(|l| l.kind == LinkKind::Relationship)
			.collect();
		assert_eq!(related.len(), 1);
		assert_eq!(link_emphasis(&selection, related[0].pair_key), Emphasis::Selected);
	}

	#[test]
	fn jitter_within_click_tolerance_neither_moves_nor_pins() {
		let mut state = state();
		let scale = ScaleConfig::default();
		let b = NodeId::Entity(1);
		let before = position(&state, b);
		let (sx, sy) = on_screen(&state, b);

		state.press(sx, sy, &scale);
		assert!(state.drag.active);
		state.move_to(sx + 2.0, sy + 1.0, &scale);
		assert_eq!(position(&state, b), before);

		state.release_at(Some((sx + 2.0, sy + 1.0)), &scale);
		assert!(state.selection.selection().focused.contains(&b));
		assert!(!position(&state, b).2);
	}

	#[test]
	fn dragging_past_tolerance_pins_the_node() {
		let mut state = state();
		let scale = ScaleConfig::default();
		let b = NodeId::Entity(1);
		let (x0, y0, _) = position(&state, b);
		let (sx, sy) = on_screen(&state, b);

		state.press(sx, sy, &scale);
		state.move_to(sx + 30.0, sy, &scale);
		assert_eq!(position(&state, b), (x0 + 30.0, y0, true));

		state.release_at(Some((sx + 30.0, sy)), &scale);
		assert!(!state.selection.focus_mode());
	}

	#[test]
	fn background_press_pans_without_clicking() {
		let mut state = state();
		let scale = ScaleConfig::default();
		let start = state.transform.x;

		state.press(0.0, 0.0, &scale);
		assert!(state.pan.active);
		state.move_to(50.0, 0.0, &scale);
		assert_eq!(state.transform.x, start + 50.0);

		state.release_at(Some((50.0, 0.0)), &scale);
		assert!(!state.pan.active);
		assert!(!state.selection.focus_mode());
	}

	#[test]
	fn zoom_keeps_the_anchor_point_and_clamps() {
		let mut state = state();
		let (ax, ay) = (state.transform.x, state.transform.y);
		state.zoom_at(ax, ay, true);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		assert_eq!((state.transform.x, state.transform.y), (ax, ay));

		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, true);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
	}

	#[test]
	fn root_is_anchored() {
		let state = state();
		assert!(state.node_index(NodeId::ROOT).is_some());
		let mut anchored = 0;
		state.graph.visit_nodes(|node| {
			if node.data.is_anchor {
				anchored += 1;
				assert_eq!(node.data.user_data.id, NodeId::ROOT);
			}
		});
		assert_eq!(anchored, 1);
	}
}
