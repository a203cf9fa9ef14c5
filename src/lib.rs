//! record-graph: shared-attribute graph explorer for JSON record collections.
//!
//! Every record becomes an entity node; every distinct `(field path, value)`
//! pair becomes a primitive node shared by the entities that contain it; the
//! field paths themselves form a tree of key nodes. Entities sharing
//! primitives are related. The crate also provides the hover/click selection
//! state machine and a WASM canvas component that renders the graph with
//! physics-based layout.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod error;
pub mod graph;
pub mod interaction;
pub mod model;
pub mod transform;

pub use components::force_graph::ForceGraphCanvas;
pub use config::GraphConfig;
pub use error::{Error, ExportError, TransformError};
pub use graph::{GraphData, GraphLink, GraphNode, assign_curvature, focus_links, project};
pub use interaction::{Selection, SelectionStateMachine};
pub use model::{DatasetGraph, NodeId, PairKey};
pub use transform::{TransformOptions, transform};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("record-graph: logging initialized");
}

/// Text content of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load configuration from a script element with id="graph-config".
fn load_config() -> GraphConfig {
	let Some(text) = script_text("graph-config") else {
		return GraphConfig::default();
	};
	GraphConfig::from_json(&text).unwrap_or_else(|e| {
		warn!("record-graph: ignoring invalid config: {}", e);
		GraphConfig::default()
	})
}

/// Load and transform the dataset from a script element with id="dataset".
/// Expected format: a JSON array of objects.
fn load_dataset(config: &GraphConfig) -> DatasetGraph {
	let Some(text) = script_text("dataset") else {
		warn!("record-graph: no dataset element found");
		return DatasetGraph::default();
	};

	match transform::transform_str(&text, &config.transform) {
		Ok(graph) => graph,
		Err(e) => {
			warn!("record-graph: failed to load dataset: {}", e);
			DatasetGraph::default()
		}
	}
}

/// Main application component.
/// Loads the dataset from the DOM and renders the force-directed visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let graph = Arc::new(load_dataset(&config));
	let graph_signal = Signal::derive(move || graph.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Record Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_signal config=config fullscreen=true />
			<div class="graph-overlay">
				<h1>"Record Graph"</h1>
				<p class="subtitle">"Hover to trace shared values. Click to focus. Drag, scroll and pan to explore."</p>
			</div>
		</div>
	}
}
