//! Builds entity nodes by walking each record depth-first.

use log::debug;
use serde_json::{Map, Value};

use crate::model::{EntityNode, Hsl, NodeId, Scalar};

use super::keys::KeyPathIndex;
use super::primitives::PrimitiveIndex;

/// Accumulates entities, primitives and keys for one transform call.
#[derive(Debug)]
pub struct EntityBuilder<'a> {
	name_attribute: &'a str,
	pub(crate) entities: Vec<EntityNode>,
	pub(crate) primitives: PrimitiveIndex,
	pub(crate) keys: KeyPathIndex,
}

impl<'a> EntityBuilder<'a> {
	/// Builder that names entities by `name_attribute`.
	pub fn new(name_attribute: &'a str) -> Self {
		Self {
			name_attribute,
			entities: Vec::new(),
			primitives: PrimitiveIndex::new(),
			keys: KeyPathIndex::new(),
		}
	}

	/// Creates the entity for `record` and walks its structure.
	pub fn add_record(&mut self, record: &Map<String, Value>) -> NodeId {
		let id = NodeId::Entity(self.entities.len());
		let name = display_name(record.get(self.name_attribute)).unwrap_or_else(|| {
			debug!("entity {id} has no usable {:?}, using placeholder", self.name_attribute);
			format!("Unnamed ({id})")
		});

		let mut owned = Vec::new();
		let mut path = Vec::new();
		for (key, value) in record {
			path.push(key.clone());
			self.traverse(&mut path, value, id, &mut owned);
			path.pop();
		}

		self.entities.push(EntityNode {
			id,
			name,
			value: 1,
			color: Hsl::NEUTRAL,
			primitives: owned,
			relationships: Vec::new(),
			record: Value::Object(record.clone()),
		});
		id
	}

	/// Scalars become primitives at `path`, arrays are walked at the same
	/// path, and object members extend it.
	fn traverse(&mut self, path: &mut Vec<String>, value: &Value, entity: NodeId, owned: &mut Vec<NodeId>) {
		self.keys.intern(path);

		match value {
			Value::Array(items) => {
				for item in items {
					self.traverse(path, item, entity, owned);
				}
			}
			Value::Object(members) => {
				for (key, member) in members {
					path.push(key.clone());
					self.traverse(path, member, entity, owned);
					path.pop();
				}
			}
			other => {
				if let Some(scalar) = Scalar::from_json(other) {
					let primitive = self.primitives.record(&mut self.keys, path, scalar, entity);
					owned.push(primitive);
				}
			}
		}
	}
}

/// Falsy values (missing, null, false, 0, "") fall back to a placeholder.
fn display_name(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::Null | Value::Bool(false) => None,
		Value::String(s) if s.is_empty() => None,
		Value::String(s) => Some(s.clone()),
		Value::Number(n) if n.as_f64() == Some(0.0) => None,
		other => Some(other.to_string()),
	}
}
