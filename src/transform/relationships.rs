//! Post-pass that turns shared primitives into entity relationships.

use std::collections::HashMap;

use crate::model::{EntityNode, NodeId, PrimitiveNode, Relationship, SharedAttribute};

/// Records, on every entity, one relationship per other entity it shares at
/// least one primitive with.
///
/// Each owned primitive reference contributes one shared attribute per other
/// owner occurrence, and each attribute adds one to the entity's `value`.
/// Must run after every record has been traversed.
pub fn aggregate(entities: &mut [EntityNode], primitives: &[PrimitiveNode]) {
	let names: Vec<String> = entities.iter().map(|e| e.name.clone()).collect();

	for entity in entities.iter_mut() {
		let mut by_target: HashMap<NodeId, usize> = HashMap::new();
		let mut added = 0u32;

		for &primitive_id in &entity.primitives {
			let primitive = &primitives[primitive_id.index()];
			let attribute = SharedAttribute {
				id: primitive.id,
				name: primitive.name.clone(),
				color: primitive.color,
			};

			for &other in primitive.entities.iter().filter(|&&owner| owner != entity.id) {
				let slot = *by_target.entry(other).or_insert_with(|| {
					entity.relationships.push(Relationship {
						id: other,
						name: names[other.index()].clone(),
						shared_attributes: Vec::new(),
					});
					entity.relationships.len() - 1
				});
				entity.relationships[slot]
					.shared_attributes
					.push(attribute.clone());
				added += 1;
			}
		}

		entity.value += added;
	}
}
