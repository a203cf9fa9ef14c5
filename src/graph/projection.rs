//! Flattens a [`DatasetGraph`] into the `{nodes, links}` shape drawn by the
//! rendering layer.

use serde::Serialize;

use crate::model::{DatasetGraph, Hsl, NodeId, PairKey, Scalar};

/// Layout weight of key nodes.
const KEY_VAL: f64 = 0.5;

/// Kind-specific fields of a projected node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
	/// An input record.
	Entity {
		/// Relevance weight, see [`EntityNode::value`](crate::model::EntityNode::value).
		value: u32,
		/// Owned primitives; repeats are kept.
		primitives: Vec<NodeId>,
	},
	/// A shared `(path, value)` pair.
	Primitive {
		/// The leaf value.
		value: Scalar,
		/// Path the value was found under.
		path: Vec<String>,
		/// Key node for `path`.
		parent: NodeId,
		/// Owning entities, one entry per occurrence.
		entities: Vec<NodeId>,
	},
	/// A schema key.
	Key {
		/// Segments from the root.
		path: Vec<String>,
		/// `None` only for the root.
		parent: Option<NodeId>,
		/// Child keys and attached primitives.
		children: Vec<NodeId>,
	},
}

/// A renderable node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphNode {
	/// Same id as in the dataset graph.
	pub id: NodeId,
	/// Label text.
	pub name: String,
	/// Base color from the transformer.
	pub color: Hsl,
	/// Layout weight; the renderer scales node area by it.
	pub val: f64,
	/// Key nodes are laid out but not drawn.
	pub visible: bool,
	/// Pinned at the layout center.
	pub fixed: bool,
	/// Kind-specific fields.
	#[serde(flatten)]
	pub kind: NodeKind,
}

/// What a link connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
	/// Entity to one of its primitives.
	Ownership,
	/// Key to a child key or attached primitive. Layout only.
	Schema,
	/// Entity to a related entity; only built for focused entities.
	Relationship,
}

/// A renderable edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
	/// Node the link starts at.
	pub source: NodeId,
	/// Node the link ends at.
	pub target: NodeId,
	/// Unordered endpoints; parallel links share it.
	pub pair_key: PairKey,
	/// What the link connects.
	pub kind: LinkKind,
	/// Schema links are laid out but not drawn.
	pub visible: bool,
	/// `None` draws a straight line.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub curvature: Option<f64>,
}

impl GraphLink {
	/// A straight link; schema links start hidden.
	pub fn new(source: NodeId, target: NodeId, kind: LinkKind) -> Self {
		Self {
			source,
			target,
			pair_key: PairKey::new(source, target),
			kind,
			visible: kind != LinkKind::Schema,
			curvature: None,
		}
	}
}

/// Projected graph handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphData {
	/// Every entity, primitive and key.
	pub nodes: Vec<GraphNode>,
	/// Ownership and schema links.
	pub links: Vec<GraphLink>,
}

/// Projects every entity, primitive and key node, one ownership link per
/// owned-primitive reference, and the schema tree links.
pub fn project(graph: &DatasetGraph) -> GraphData {
	let mut nodes = Vec::with_capacity(graph.entities.len() + graph.primitives.len() + graph.keys.len());
	let mut links = Vec::new();

	for entity in &graph.entities {
		nodes.push(GraphNode {
			id: entity.id,
			name: entity.name.clone(),
			color: entity.color,
			val: f64::from(entity.value),
			visible: true,
			fixed: false,
			kind: NodeKind::Entity {
				value: entity.value,
				primitives: entity.primitives.clone(),
			},
		});
		links.extend(
			entity
				.primitives
				.iter()
				.map(|&primitive| GraphLink::new(entity.id, primitive, LinkKind::Ownership)),
		);
	}

	for primitive in &graph.primitives {
		nodes.push(GraphNode {
			id: primitive.id,
			name: primitive.name.clone(),
			color: primitive.color,
			val: primitive.entities.len() as f64,
			visible: true,
			fixed: false,
			kind: NodeKind::Primitive {
				value: primitive.value.clone(),
				path: primitive.path.clone(),
				parent: primitive.parent,
				entities: primitive.entities.clone(),
			},
		});
	}

	for key in &graph.keys {
		nodes.push(GraphNode {
			id: key.id,
			name: key.name.clone(),
			color: key.color,
			val: KEY_VAL,
			visible: false,
			fixed: key.id == NodeId::ROOT,
			kind: NodeKind::Key {
				path: key.path.clone(),
				parent: key.parent,
				children: key.children.clone(),
			},
		});
		links.extend(
			key.children
				.iter()
				.map(|&child| GraphLink::new(key.id, child, LinkKind::Schema)),
		);
	}

	GraphData { nodes, links }
}

/// Relationship links for the focused entities, one per relationship.
///
/// Built on demand so that large datasets never materialize every
/// entity-to-entity edge. Ids that are not entities are skipped.
pub fn focus_links(graph: &DatasetGraph, focused: impl IntoIterator<Item = NodeId>) -> Vec<GraphLink> {
	focused
		.into_iter()
		.filter_map(|id| graph.entity(id))
		.flat_map(|entity| {
			entity
				.relationships
				.iter()
				.map(|rel| GraphLink::new(entity.id, rel.id, LinkKind::Relationship))
		})
		.collect()
}
