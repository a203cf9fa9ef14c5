//! Pointer-driven selection state and the style callbacks derived from it.

mod selection;
mod style;

pub use selection::{Selection, SelectionStateMachine};
pub use style::{Emphasis, HighlightPalette, link_color, link_emphasis, node_color, node_emphasis};
