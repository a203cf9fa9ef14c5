//! Deduplicates `(path, scalar)` pairs into shared primitive nodes.

use std::collections::HashMap;

use crate::model::{Hsl, NodeId, PrimitiveNode, Scalar};

use super::keys::{KeyPathIndex, path_key};

/// Primitive nodes indexed by canonical path and scalar identity.
#[derive(Debug, Default)]
pub struct PrimitiveIndex {
	primitives: Vec<PrimitiveNode>,
	by_pair: HashMap<(String, String), usize>,
}

impl PrimitiveIndex {
	/// An empty index.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct primitives.
	pub fn len(&self) -> usize {
		self.primitives.len()
	}

	/// True until the first scalar is recorded.
	pub fn is_empty(&self) -> bool {
		self.primitives.is_empty()
	}

	/// Records that `entity` owns `value` at `path` and returns the primitive.
	///
	/// The first occurrence of a pair creates the primitive and attaches it to
	/// the key for `path`; later occurrences only grow its owner list.
	pub fn record(
		&mut self,
		keys: &mut KeyPathIndex,
		path: &[String],
		value: Scalar,
		entity: NodeId,
	) -> NodeId {
		let lookup = (path_key(path), value.identity());
		if let Some(&i) = self.by_pair.get(&lookup) {
			self.primitives[i].entities.push(entity);
			return NodeId::Primitive(i);
		}

		let parent = keys.intern(path);
		let id = NodeId::Primitive(self.primitives.len());
		self.primitives.push(PrimitiveNode {
			id,
			name: PrimitiveNode::display_name(path, &value),
			value,
			path: path.to_vec(),
			parent,
			entities: vec![entity],
			color: Hsl::NEUTRAL,
		});
		self.by_pair.insert(lookup, id.index());
		keys.attach(parent, id);
		id
	}

	/// Derives every primitive's color from its parent key's hue.
	/// Keys must already be colored.
	pub fn assign_colors(&mut self, keys: &KeyPathIndex) {
		for primitive in &mut self.primitives {
			primitive.color = Hsl::primitive(keys.color(primitive.parent));
		}
	}

	/// The primitive nodes, indexed by [`NodeId::Primitive`].
	pub fn into_nodes(self) -> Vec<PrimitiveNode> {
		self.primitives
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn repeated_pairs_share_one_primitive() {
		let mut keys = KeyPathIndex::new();
		let mut prims = PrimitiveIndex::new();
		let city = vec!["city".to_string()];

		let x1 = prims.record(&mut keys, &city, Scalar::String("X".into()), NodeId::Entity(0));
		let x2 = prims.record(&mut keys, &city, Scalar::String("X".into()), NodeId::Entity(1));
		let y = prims.record(&mut keys, &city, Scalar::String("Y".into()), NodeId::Entity(1));

		assert_eq!(x1, x2);
		assert_ne!(x1, y);
		assert_eq!(prims.len(), 2);

		keys.assign_colors();
		prims.assign_colors(&keys);
		let nodes = prims.into_nodes();
		assert_eq!(nodes[0].entities, vec![NodeId::Entity(0), NodeId::Entity(1)]);
		assert_eq!(nodes[0].name, "city: X");
		assert_eq!(nodes[0].color, Hsl::new(0.0, 50.0, 50.0));

		let key_nodes = keys.into_nodes();
		assert_eq!(key_nodes[1].children, vec![x1, y]);
	}
}
