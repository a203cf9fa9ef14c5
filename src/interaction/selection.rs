//! Hover and click selection driven by pointer events.
//!
//! Every transition publishes a new [`Selection`] snapshot; snapshots handed
//! out earlier never change. Selecting a node cascades to its structural
//! neighbors (an entity's primitives, a primitive's owners) and the
//! ownership links between them.

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use log::debug;

use crate::model::{DatasetGraph, NodeId, PairKey};

/// Immutable view of the hover and click membership sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	/// Node under the pointer plus its cascade.
	pub hovered_nodes: HashSet<NodeId>,
	/// Links in the hover cascade.
	pub hovered_links: HashSet<PairKey>,
	/// Click-selected nodes and their cascades.
	pub clicked_nodes: HashSet<NodeId>,
	/// Links in the click cascades, plus the relationship links of focused entities.
	pub clicked_links: HashSet<PairKey>,
	/// Nodes the user clicked directly, as opposed to cascaded neighbors.
	pub focused: BTreeSet<NodeId>,
}

impl Selection {
	/// True while at least one node is click-selected.
	pub fn focus_mode(&self) -> bool {
		!self.clicked_nodes.is_empty()
	}

	/// True when nothing is hovered or selected.
	pub fn is_idle(&self) -> bool {
		self.hovered_nodes.is_empty() && !self.focus_mode()
	}

	fn clear_hover(&mut self) {
		self.hovered_nodes.clear();
		self.hovered_links.clear();
	}
}

/// Owns the current [`Selection`] and whether a pointer button is held.
#[derive(Debug, Default)]
pub struct SelectionStateMachine {
	current: Rc<Selection>,
	pointer_down: bool,
}

/// A node plus its structural neighbors and the links joining them.
struct Cascade {
	nodes: Vec<NodeId>,
	links: Vec<PairKey>,
}

fn cascade(graph: &DatasetGraph, node: NodeId) -> Cascade {
	let neighbors = graph.neighbors(node);
	let mut nodes = Vec::with_capacity(neighbors.len() + 1);
	nodes.push(node);
	nodes.extend_from_slice(neighbors);
	Cascade {
		nodes,
		links: neighbors.iter().map(|&n| PairKey::new(node, n)).collect(),
	}
}

/// Pair keys of the relationship links drawn while `node` is focused.
fn relationship_links(graph: &DatasetGraph, node: NodeId) -> impl Iterator<Item = PairKey> + '_ {
	graph
		.entity(node)
		.into_iter()
		.flat_map(move |e| e.relationships.iter().map(move |r| PairKey::new(node, r.id)))
}

impl SelectionStateMachine {
	/// Idle, with no pointer button held.
	pub fn new() -> Self {
		Self::default()
	}

	/// The current snapshot.
	pub fn snapshot(&self) -> Rc<Selection> {
		Rc::clone(&self.current)
	}

	/// Borrows the current snapshot.
	pub fn selection(&self) -> &Selection {
		&self.current
	}

	/// True while at least one node is click-selected.
	pub fn focus_mode(&self) -> bool {
		self.current.focus_mode()
	}

	/// Whether a pointer button is held.
	pub fn is_pointer_down(&self) -> bool {
		self.pointer_down
	}

	/// A pointer button was pressed; hover changes are ignored until release.
	pub fn pointer_down(&mut self) {
		self.pointer_down = true;
	}

	/// The pointer button was released.
	pub fn pointer_up(&mut self) {
		self.pointer_down = false;
	}

	fn update(&mut self, change: impl FnOnce(&mut Selection)) {
		let mut next = Selection::clone(&self.current);
		change(&mut next);
		if next != *self.current {
			self.current = Rc::new(next);
		}
	}

	/// Pointer moved over `node`, or over the background when `None`.
	///
	/// Replaces the hover sets unless a button is held, in which case the
	/// hover accumulates like [`hover_during_drag`](Self::hover_during_drag).
	pub fn hover(&mut self, graph: &DatasetGraph, node: Option<NodeId>) {
		let additive = self.pointer_down;
		let cascade = node.filter(|&n| graph.contains(n)).map(|n| cascade(graph, n));
		self.update(|sel| {
			if !additive {
				sel.clear_hover();
			}
			if let Some(c) = cascade {
				sel.hovered_nodes.extend(c.nodes);
				sel.hovered_links.extend(c.links);
			}
		});
	}

	/// A node is being dragged over; never clears what was hovered before.
	pub fn hover_during_drag(&mut self, graph: &DatasetGraph, node: NodeId) {
		if !graph.contains(node) {
			return;
		}
		let c = cascade(graph, node);
		self.update(|sel| {
			sel.hovered_nodes.extend(c.nodes);
			sel.hovered_links.extend(c.links);
		});
	}

	/// A node drag ended; clears the hover sets.
	pub fn end_drag(&mut self) {
		self.update(Selection::clear_hover);
	}

	/// Toggles `node` and its cascade in the click set. A clicked entity
	/// also selects the relationship links drawn for it.
	///
	/// Membership is judged against the whole click set, so clicking a node
	/// that was only selected through a neighbor's cascade deselects it.
	pub fn click(&mut self, graph: &DatasetGraph, node: NodeId) {
		if !graph.contains(node) {
			debug!("click on unknown node {node} ignored");
			return;
		}
		let c = cascade(graph, node);
		self.update(|sel| {
			if sel.clicked_nodes.contains(&node) {
				for n in &c.nodes {
					sel.clicked_nodes.remove(n);
				}
				for l in &c.links {
					sel.clicked_links.remove(l);
				}
				for l in c.nodes.iter().flat_map(|&n| relationship_links(graph, n)) {
					sel.clicked_links.remove(&l);
				}
				sel.focused.remove(&node);
				let clicked = &sel.clicked_nodes;
				sel.focused.retain(|n| clicked.contains(n));
				// a pair shared with another focused entity stays lit
				for &n in &sel.focused {
					sel.clicked_links.extend(relationship_links(graph, n));
				}
			} else {
				sel.clicked_nodes.extend(c.nodes);
				sel.clicked_links.extend(c.links);
				sel.clicked_links.extend(relationship_links(graph, node));
				sel.focused.insert(node);
			}
		});
	}

	/// Clears the click set and leaves focus mode. Link clicks land here too.
	pub fn click_background(&mut self) {
		self.update(|sel| {
			sel.clicked_nodes.clear();
			sel.clicked_links.clear();
			sel.focused.clear();
		});
	}
}
