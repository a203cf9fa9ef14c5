//! Error types surfaced by the transformer and the export helpers.
//!
//! An empty dataset is not an error, and a record lacking the configured name
//! attribute is recovered with a placeholder name.

/// The input could not be read as a sequence of records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
	/// The top-level value is not an array.
	#[error("dataset must be a JSON array of records, found {found}")]
	NotAnArray {
		/// JSON type of the top-level value.
		found: &'static str,
	},

	/// A record is not an object.
	#[error("record {index} must be a JSON object, found {found}")]
	RecordNotObject {
		/// Position of the record in the dataset.
		index: usize,
		/// JSON type of the record.
		found: &'static str,
	},
}

/// Failed to encode an export payload.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
	/// serde_json rejected the payload.
	#[error("failed to encode export: {0}")]
	Serialize(#[from] serde_json::Error),
}

/// Short JSON type name for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}

/// Any failure from parsing, transforming or exporting a dataset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The dataset text is not JSON.
	#[error("dataset is not valid JSON: {0}")]
	Parse(#[from] serde_json::Error),

	/// The dataset is JSON but not a list of records.
	#[error(transparent)]
	Transform(#[from] TransformError),

	/// An export payload could not be encoded.
	#[error(transparent)]
	Export(#[from] ExportError),
}
