//! The transformer's output: entity, primitive and key collections.

use super::id::NodeId;
use super::nodes::{EntityNode, KeyNode, PrimitiveNode};

/// Fresh node collections for one dataset.
///
/// Each collection is indexed by the position encoded in its [`NodeId`]s, so
/// every lookup is a bounds-checked vector access.
#[derive(Clone, Debug, Default)]
pub struct DatasetGraph {
	/// One per record, in dataset order.
	pub entities: Vec<EntityNode>,
	/// One per distinct `(path, value)` pair.
	pub primitives: Vec<PrimitiveNode>,
	/// Always starts with the root once built by the transformer.
	pub keys: Vec<KeyNode>,
}

/// Collection sizes, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	/// Number of records.
	pub entities: usize,
	/// Number of distinct primitives.
	pub primitives: usize,
	/// Number of keys, the root included.
	pub keys: usize,
	/// Relationship entries summed over all entities; each pair counts twice.
	pub relationships: usize,
	/// Primitives owned by more than one entity.
	pub shared_primitives: usize,
}

/// A node of any kind, borrowed from the graph.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
	/// An entity node.
	Entity(&'a EntityNode),
	/// A primitive node.
	Primitive(&'a PrimitiveNode),
	/// A key node.
	Key(&'a KeyNode),
}

impl NodeRef<'_> {
	/// Display name.
	pub fn name(&self) -> &str {
		match self {
			NodeRef::Entity(e) => &e.name,
			NodeRef::Primitive(p) => &p.name,
			NodeRef::Key(k) => &k.name,
		}
	}
}

impl DatasetGraph {
	/// True when the dataset had no records.
	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// Entity with `id`; `None` for other kinds and unknown ids.
	pub fn entity(&self, id: NodeId) -> Option<&EntityNode> {
		match id {
			NodeId::Entity(i) => self.entities.get(i),
			_ => None,
		}
	}

	/// Primitive with `id`; `None` for other kinds and unknown ids.
	pub fn primitive(&self, id: NodeId) -> Option<&PrimitiveNode> {
		match id {
			NodeId::Primitive(i) => self.primitives.get(i),
			_ => None,
		}
	}

	/// Key with `id`; `None` for other kinds and unknown ids.
	pub fn key(&self, id: NodeId) -> Option<&KeyNode> {
		match id {
			NodeId::Key(i) => self.keys.get(i),
			_ => None,
		}
	}

	/// Node of any kind.
	pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
		match id {
			NodeId::Entity(_) => self.entity(id).map(NodeRef::Entity),
			NodeId::Primitive(_) => self.primitive(id).map(NodeRef::Primitive),
			NodeId::Key(_) => self.key(id).map(NodeRef::Key),
		}
	}

	/// Whether `id` names a node of this graph.
	pub fn contains(&self, id: NodeId) -> bool {
		self.node(id).is_some()
	}

	/// Structural neighbors used for selection cascades: an entity's owned
	/// primitives, or a primitive's owning entities. Keys have none.
	pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
		match self.node(id) {
			Some(NodeRef::Entity(e)) => &e.primitives,
			Some(NodeRef::Primitive(p)) => &p.entities,
			_ => &[],
		}
	}

	/// Collection sizes, logged after each transform.
	pub fn stats(&self) -> GraphStats {
		GraphStats {
			entities: self.entities.len(),
			primitives: self.primitives.len(),
			keys: self.keys.len(),
			relationships: self.entities.iter().map(|e| e.relationships.len()).sum(),
			shared_primitives: self
				.primitives
				.iter()
				.filter(|p| {
					p.entities
						.iter()
						.any(|owner| Some(owner) != p.entities.first())
				})
				.count(),
		}
	}
}
