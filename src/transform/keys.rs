//! Interns field paths into the schema tree of key nodes.

use std::collections::HashMap;

use crate::model::{Hsl, KeyNode, NodeId};

/// Canonical lookup text for a path. JSON encoding keeps segment boundaries
/// unambiguous (`["a.b"]` and `["a", "b"]` differ).
pub(crate) fn path_key(path: &[String]) -> String {
	serde_json::to_string(path).unwrap_or_else(|_| path.join("\u{0}"))
}

/// Key nodes indexed by their full ordered path.
#[derive(Debug)]
pub struct KeyPathIndex {
	keys: Vec<KeyNode>,
	by_path: HashMap<String, usize>,
}

impl Default for KeyPathIndex {
	fn default() -> Self {
		Self::new()
	}
}

impl KeyPathIndex {
	/// An index holding only the synthetic root.
	pub fn new() -> Self {
		let root = KeyNode {
			id: NodeId::ROOT,
			name: "Root".to_string(),
			path: Vec::new(),
			parent: None,
			children: Vec::new(),
			color: Hsl::NEUTRAL,
		};
		Self {
			by_path: HashMap::from([(path_key(&[]), 0)]),
			keys: vec![root],
		}
	}

	/// Number of keys, the root included.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Never true; the root is interned on construction.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Key interned for `path`, if any.
	pub fn get(&self, path: &[String]) -> Option<NodeId> {
		self.by_path.get(&path_key(path)).map(|&i| NodeId::Key(i))
	}

	/// Returns the key for `path`, creating it and any missing ancestors.
	pub fn intern(&mut self, path: &[String]) -> NodeId {
		if let Some(id) = self.get(path) {
			return id;
		}
		let Some((name, parent_path)) = path.split_last() else {
			return NodeId::ROOT;
		};
		let parent = self.intern(parent_path);
		let id = NodeId::Key(self.keys.len());
		self.keys.push(KeyNode {
			id,
			name: name.clone(),
			path: path.to_vec(),
			parent: Some(parent),
			children: Vec::new(),
			color: Hsl::NEUTRAL,
		});
		self.by_path.insert(path_key(path), id.index());
		self.attach(parent, id);
		id
	}

	/// Records `child` under `key`.
	pub fn attach(&mut self, key: NodeId, child: NodeId) {
		assert!(matches!(key, NodeId::Key(_)), "attach target {key} is not a key");
		self.keys[key.index()].children.push(child);
	}

	/// Color assigned to `key`.
	pub fn color(&self, key: NodeId) -> Hsl {
		self.keys[key.index()].color
	}

	/// Spreads hues evenly across top-level keys and copies each parent's
	/// color down the tree. Runs in depth order so parents are colored first.
	pub fn assign_colors(&mut self) {
		let mut order: Vec<usize> = (1..self.keys.len()).collect();
		order.sort_by_key(|&i| self.keys[i].depth());

		let top_level = order
			.iter()
			.take_while(|&&i| self.keys[i].depth() == 1)
			.count();

		for (rank, &i) in order.iter().enumerate() {
			let color = if rank < top_level {
				Hsl::top_level_key(rank, top_level)
			} else {
				self.keys[i]
					.parent
					.map_or(Hsl::NEUTRAL, |parent| self.keys[parent.index()].color)
			};
			self.keys[i].color = color;
		}
	}

	/// The key nodes, indexed by [`NodeId::Key`].
	pub fn into_nodes(self) -> Vec<KeyNode> {
		self.keys
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn path(segments: &[&str]) -> Vec<String> {
		segments.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn intern_builds_ancestor_chain() {
		let mut index = KeyPathIndex::new();
		let leaf = index.intern(&path(&["a", "b", "c"]));
		assert_eq!(index.len(), 4);
		assert_eq!(index.intern(&path(&["a", "b", "c"])), leaf);

		let nodes = index.into_nodes();
		let c = &nodes[leaf.index()];
		assert_eq!(c.name, "c");
		let b = &nodes[c.parent.unwrap().index()];
		assert_eq!(b.path, path(&["a", "b"]));
		assert_eq!(b.children, vec![leaf]);
		let a = &nodes[b.parent.unwrap().index()];
		assert_eq!(a.parent, Some(NodeId::ROOT));
		assert_eq!(nodes[0].children, vec![a.id]);
	}

	#[test]
	fn shared_leaf_names_stay_distinct() {
		let mut index = KeyPathIndex::new();
		let home = index.intern(&path(&["home", "city"]));
		let work = index.intern(&path(&["work", "city"]));
		assert_ne!(home, work);
		// segment boundaries matter
		assert_ne!(index.intern(&path(&["a.b"])), index.intern(&path(&["a", "b"])));
	}

	#[test]
	fn hues_follow_top_level_branch() {
		let mut index = KeyPathIndex::new();
		let a = index.intern(&path(&["a"]));
		let deep = index.intern(&path(&["b", "x", "y"]));
		let c = index.intern(&path(&["c"]));
		index.assign_colors();

		assert_eq!(index.color(a).h, 0.0);
		assert_eq!(index.color(deep).h, 120.0);
		assert_eq!(index.color(deep), index.color(index.get(&path(&["b"])).unwrap()));
		assert_eq!(index.color(c).h, 240.0);
		assert_eq!(index.color(NodeId::ROOT), Hsl::NEUTRAL);
	}

	#[test]
	fn coloring_an_empty_tree_is_a_no_op() {
		let mut index = KeyPathIndex::new();
		index.assign_colors();
		assert_eq!(index.len(), 1);
	}
}
