//! Graph data model: typed ids, colors, nodes and the graph container.

mod color;
mod graph;
mod id;
mod nodes;

pub use color::{Hsl, ParseHslError};
pub use graph::{DatasetGraph, GraphStats, NodeRef};
pub use id::{NodeId, PairKey, ParseNodeIdError};
pub use nodes::{EntityNode, KeyNode, PrimitiveNode, Relationship, Scalar, SharedAttribute};
