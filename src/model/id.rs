//! Typed node identifiers and canonical link pair keys.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Identifies a node of any kind in a [`DatasetGraph`](super::DatasetGraph).
///
/// The derived ordering (entities, then primitives, then keys, each by index)
/// is the fixed total order used to build [`PairKey`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
	/// An input record, by position in the dataset.
	Entity(usize),
	/// A deduplicated `(path, value)` pair.
	Primitive(usize),
	/// `Key(0)` is the synthetic schema root.
	Key(usize),
}

impl NodeId {
	/// The synthetic schema root.
	pub const ROOT: NodeId = NodeId::Key(0);

	/// Position of the node inside its kind's collection.
	pub fn index(self) -> usize {
		match self {
			NodeId::Entity(i) | NodeId::Primitive(i) | NodeId::Key(i) => i,
		}
	}

	/// Whether this is an entity id.
	pub fn is_entity(self) -> bool {
		matches!(self, NodeId::Entity(_))
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Entity(i) => write!(f, "e{i}"),
			NodeId::Primitive(i) => write!(f, "p{i}"),
			NodeId::Key(0) => f.write_str("root"),
			NodeId::Key(i) => write!(f, "k{i}"),
		}
	}
}

/// Returned when a string is not a valid textual node id.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("not a node id: {0:?}")]
pub struct ParseNodeIdError(pub String);

impl FromStr for NodeId {
	type Err = ParseNodeIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == "root" {
			return Ok(NodeId::ROOT);
		}
		let err = || ParseNodeIdError(s.to_string());
		let (tag, digits) = s.split_at_checked(1).ok_or_else(err)?;
		let index: usize = digits.parse().map_err(|_| err())?;
		match tag {
			"e" => Ok(NodeId::Entity(index)),
			"p" => Ok(NodeId::Primitive(index)),
			// k0 would alias the root
			"k" if index > 0 => Ok(NodeId::Key(index)),
			_ => Err(err()),
		}
	}
}

impl Serialize for NodeId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Canonical unordered identifier for the two endpoints of a link.
///
/// Links that join the same two nodes share a pair key regardless of which
/// endpoint was recorded as the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(NodeId, NodeId);

impl PairKey {
	/// Pair key for a link between `a` and `b`, in either order.
	pub fn new(a: NodeId, b: NodeId) -> Self {
		if a <= b { Self(a, b) } else { Self(b, a) }
	}

	/// Whether both endpoints are the same node.
	pub fn is_loop(self) -> bool {
		self.0 == self.1
	}
}

impl fmt::Display for PairKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}_{}", self.0, self.1)
	}
}

impl Serialize for PairKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
