//! Render-facing projection of the dataset graph.

pub mod curvature;
pub mod export;
mod projection;

pub use curvature::{DEFAULT_MAX_CURVATURE, assign_curvature};
pub use export::{EntityExport, RelationshipExport, export_entity, export_primitive};
pub use projection::{GraphData, GraphLink, GraphNode, LinkKind, NodeKind, focus_links, project};
