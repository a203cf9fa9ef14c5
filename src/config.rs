//! Runtime configuration supplied by the host page.
//!
//! Every field is optional; missing fields take their defaults.

use serde::Deserialize;

use crate::graph::DEFAULT_MAX_CURVATURE;
use crate::interaction::HighlightPalette;
use crate::transform::TransformOptions;

/// Top-level configuration, read from `<script id="graph-config">`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
	/// Transform options, flattened into the top level (`nameAttribute`).
	#[serde(flatten)]
	pub transform: TransformOptions,
	/// Bound of the curvature range for parallel links.
	pub curvature: f64,
	/// Theme name, see [`Theme::by_name`](crate::components::force_graph::Theme::by_name).
	pub theme: String,
	/// Highlight colors layered over the base colors.
	pub highlight: HighlightPalette,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			transform: TransformOptions::default(),
			curvature: DEFAULT_MAX_CURVATURE,
			theme: "slate".to_string(),
			highlight: HighlightPalette::default(),
		}
	}
}

impl GraphConfig {
	/// Parses configuration JSON, falling back to defaults field by field.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
