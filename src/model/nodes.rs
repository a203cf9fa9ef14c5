//! Node and relationship records produced by the transformer.

use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};

use super::color::Hsl;
use super::id::NodeId;

/// A leaf value found in a record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
	/// JSON `null`.
	Null,
	/// A boolean.
	Bool(bool),
	/// A number; `1` and `1.0` are the same value.
	Number(Number),
	/// A string.
	String(String),
}

impl Scalar {
	/// Returns `None` for arrays and objects.
	pub fn from_json(value: &Value) -> Option<Self> {
		match value {
			Value::Null => Some(Scalar::Null),
			Value::Bool(b) => Some(Scalar::Bool(*b)),
			Value::Number(n) => Some(Scalar::Number(n.clone())),
			Value::String(s) => Some(Scalar::String(s.clone())),
			Value::Array(_) | Value::Object(_) => None,
		}
	}

	/// Identity text for deduplication. The leading tag keeps `"1"` and `1`
	/// apart; numbers are compared by value so `1` and `1.0` coincide.
	pub fn identity(&self) -> String {
		match self {
			Scalar::Null => "z".to_string(),
			Scalar::Bool(b) => format!("b{b}"),
			Scalar::Number(n) => format!("n{}", canonical_number(n)),
			Scalar::String(s) => format!("s{s}"),
		}
	}
}

fn canonical_number(n: &Number) -> String {
	if let Some(i) = n.as_i64() {
		return i.to_string();
	}
	if let Some(u) = n.as_u64() {
		return u.to_string();
	}
	let f = n.as_f64().unwrap_or(f64::NAN);
	if f.fract() == 0.0 && f.abs() < 9.0e15 {
		(f as i64).to_string()
	} else {
		f.to_string()
	}
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scalar::Null => f.write_str("null"),
			Scalar::Bool(b) => write!(f, "{b}"),
			Scalar::Number(n) => write!(f, "{n}"),
			Scalar::String(s) => f.write_str(s),
		}
	}
}

/// A unique field-path branch of the dataset schema.
#[derive(Clone, Debug, Serialize)]
pub struct KeyNode {
	/// This key's id.
	pub id: NodeId,
	/// Last path segment (`Root` for the synthetic root).
	pub name: String,
	/// Segments from the root down to this key.
	pub path: Vec<String>,
	/// `None` only for the root.
	pub parent: Option<NodeId>,
	/// Child keys and attached primitives, in creation order.
	pub children: Vec<NodeId>,
	/// Hue shared with its top-level branch.
	pub color: Hsl,
}

impl KeyNode {
	/// Number of path segments; 0 for the root.
	pub fn depth(&self) -> usize {
		self.path.len()
	}
}

/// A deduplicated `(path, scalar)` pair.
#[derive(Clone, Debug, Serialize)]
pub struct PrimitiveNode {
	/// This primitive's id.
	pub id: NodeId,
	/// Display name, see [`PrimitiveNode::display_name`].
	pub name: String,
	/// The leaf value.
	pub value: Scalar,
	/// Path of the key the value was found under.
	pub path: Vec<String>,
	/// Key node for [`path`](Self::path).
	pub parent: NodeId,
	/// Owning entities, one entry per occurrence.
	pub entities: Vec<NodeId>,
	/// Branch hue at a lightness picked per primitive.
	pub color: Hsl,
}

impl PrimitiveNode {
	/// Display name: path segments joined with ` · `, then the value.
	pub fn display_name(path: &[String], value: &Scalar) -> String {
		format!("{}: {}", path.join(" · "), value)
	}
}

/// A primitive shared between two entities.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SharedAttribute {
	/// The shared primitive.
	pub id: NodeId,
	/// Its display name.
	pub name: String,
	/// Its color.
	pub color: Hsl,
}

/// Aggregated edge from one entity to another.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
	/// Target entity.
	pub id: NodeId,
	/// Target entity's name.
	pub name: String,
	/// One entry per shared instance; a repeated value appears more than once.
	pub shared_attributes: Vec<SharedAttribute>,
}

/// One input record.
#[derive(Clone, Debug, Serialize)]
pub struct EntityNode {
	/// This entity's id.
	pub id: NodeId,
	/// Value of the name attribute, or a placeholder.
	pub name: String,
	/// Relevance weight: 1 plus one per shared-attribute instance.
	pub value: u32,
	/// Neutral gray; entities carry no branch hue.
	pub color: Hsl,
	/// Owned primitives in traversal order; repeats are kept.
	pub primitives: Vec<NodeId>,
	/// Related entities in order of first shared attribute.
	pub relationships: Vec<Relationship>,
	/// The record this entity was built from.
	#[serde(skip)]
	pub record: Value,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn scalar_identity_is_typed() {
		let one = Scalar::from_json(&json!(1)).unwrap();
		let one_f = Scalar::from_json(&json!(1.0)).unwrap();
		let one_s = Scalar::from_json(&json!("1")).unwrap();
		assert_eq!(one.identity(), one_f.identity());
		assert_ne!(one.identity(), one_s.identity());
		assert_ne!(
			Scalar::Null.identity(),
			Scalar::String("null".into()).identity()
		);
		assert!(Scalar::from_json(&json!([1])).is_none());
	}

	#[test]
	fn primitive_names() {
		let path = vec!["address".to_string(), "city".to_string()];
		let name = PrimitiveNode::display_name(&path, &Scalar::String("Lima".into()));
		assert_eq!(name, "address · city: Lima");
		assert_eq!(PrimitiveNode::display_name(&path[..1], &Scalar::Null), "address: null");
	}
}
