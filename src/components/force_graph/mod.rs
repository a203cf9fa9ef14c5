//! Force-directed graph visualization component.
//!
//! Renders the dataset graph on an HTML canvas with:
//! - Physics-based node positioning via the `force_graph` simulation
//! - Hover highlighting that cascades to structurally adjacent nodes
//! - Click-to-focus with relationship links for focused entities
//! - Curved parallel links, pan, zoom, and node dragging
//!
//! # Example
//!
//! ```ignore
//! use record_graph::{ForceGraphCanvas, GraphConfig, transform};
//!
//! let graph = Arc::new(transform(&dataset, &GraphConfig::default().transform)?);
//! view! { <ForceGraphCanvas data=Signal::derive(move || graph.clone()) fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use state::ForceGraphState;
pub use theme::Theme;
