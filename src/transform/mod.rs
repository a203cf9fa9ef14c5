//! Dataset-to-graph transformer.
//!
//! [`transform`] walks every record once, interning field paths into key
//! nodes and `(path, value)` pairs into shared primitive nodes, then derives
//! colors and entity relationships. Each call starts from empty indexes and
//! returns fresh collections; nothing is cached between calls.

mod entities;
mod keys;
mod primitives;
mod relationships;

use log::info;
use serde::Deserialize;
use serde_json::Value;

pub use entities::EntityBuilder;
pub use keys::KeyPathIndex;
pub use primitives::PrimitiveIndex;
pub use relationships::aggregate as aggregate_relationships;

use crate::error::{TransformError, json_kind};
use crate::model::DatasetGraph;

/// Options for a transform run.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
	/// Record field used as the entity display name.
	pub name_attribute: String,
}

impl Default for TransformOptions {
	fn default() -> Self {
		Self {
			name_attribute: "name".to_string(),
		}
	}
}

/// Builds the entity/primitive/key graph for `dataset`.
///
/// `dataset` must be a JSON array whose elements are objects. An empty array
/// yields a graph holding only the schema root.
pub fn transform(dataset: &Value, options: &TransformOptions) -> Result<DatasetGraph, TransformError> {
	let records = dataset.as_array().ok_or(TransformError::NotAnArray {
		found: json_kind(dataset),
	})?;

	let mut builder = EntityBuilder::new(&options.name_attribute);
	for (index, record) in records.iter().enumerate() {
		let record = record.as_object().ok_or(TransformError::RecordNotObject {
			index,
			found: json_kind(record),
		})?;
		builder.add_record(record);
	}

	let EntityBuilder {
		mut entities,
		mut primitives,
		mut keys,
		..
	} = builder;

	if !primitives.is_empty() {
		keys.assign_colors();
		primitives.assign_colors(&keys);
	}

	let primitives = primitives.into_nodes();
	aggregate_relationships(&mut entities, &primitives);

	let graph = DatasetGraph {
		entities,
		primitives,
		keys: keys.into_nodes(),
	};
	let stats = graph.stats();
	info!(
		"transform: {} entities, {} primitives ({} shared), {} keys, {} relationships",
		stats.entities, stats.primitives, stats.shared_primitives, stats.keys, stats.relationships
	);
	Ok(graph)
}

/// Parses `text` as JSON and transforms it.
pub fn transform_str(text: &str, options: &TransformOptions) -> Result<DatasetGraph, crate::Error> {
	let dataset: Value = serde_json::from_str(text)?;
	Ok(transform(&dataset, options)?)
}
