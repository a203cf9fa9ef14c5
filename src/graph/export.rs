//! Export payloads for a focused node.
//!
//! Only the shape is defined here; turning the text into a download is the
//! front end's job.

use serde::Serialize;
use serde_json::Value;

use crate::error::ExportError;
use crate::model::{DatasetGraph, NodeId};

/// Summary of one relationship in an entity export.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipExport {
	/// Name of the related entity.
	pub name: String,
	/// Names of the primitives both entities own.
	pub shared_attributes: Vec<String>,
}

/// An entity's original record and its relationships.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityExport {
	/// The record as it was read.
	pub entity: Value,
	/// One entry per related entity.
	pub relationships: Vec<RelationshipExport>,
}

/// Names of every entity owning the primitive.
pub fn export_primitive(graph: &DatasetGraph, id: NodeId) -> Option<Vec<String>> {
	let primitive = graph.primitive(id)?;
	Some(
		primitive
			.entities
			.iter()
			.map(|&owner| graph.entities[owner.index()].name.clone())
			.collect(),
	)
}

/// The focused entity's record and a summary of its relationships.
///
/// `None` when `id` is not an entity of `graph`.
pub fn export_entity(graph: &DatasetGraph, id: NodeId) -> Option<EntityExport> {
	let entity = graph.entity(id)?;
	Some(EntityExport {
		entity: entity.record.clone(),
		relationships: entity
			.relationships
			.iter()
			.map(|rel| RelationshipExport {
				name: rel.name.clone(),
				shared_attributes: rel.shared_attributes.iter().map(|a| a.name.clone()).collect(),
			})
			.collect(),
	})
}

/// Suggested download name for a node's export.
pub fn file_name(graph: &DatasetGraph, id: NodeId) -> Option<String> {
	graph.node(id).map(|node| format!("{}.json", node.name()))
}

/// Pretty-printed JSON text of an export payload.
pub fn to_json<T: Serialize>(payload: &T) -> Result<String, ExportError> {
	Ok(serde_json::to_string_pretty(payload)?)
}
