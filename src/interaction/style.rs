//! Per-frame style derivation from the current [`Selection`].
//!
//! All functions here are pure: the renderer calls them for every node and
//! link on every frame.

use serde::Deserialize;

use crate::model::{Hsl, NodeId, PairKey};

use super::selection::Selection;

/// How prominently an element is drawn, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Emphasis {
	/// Outside the click set while in focus mode.
	Dimmed,
	/// No selection applies.
	Base,
	/// In the click set.
	Selected,
	/// Under the pointer or in its cascade.
	Hovered,
}

/// Highlight levels applied on top of the transformer's base colors.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightPalette {
	/// Lightness of hovered nodes; hue and saturation are kept.
	pub hover_lightness: f64,
	/// Click-selected nodes in focus mode are raised to at least this
	/// lightness before [`selected_lift`](Self::selected_lift) is added.
	pub selected_floor: f64,
	/// Lightness added on top of the floor.
	pub selected_lift: f64,
	/// Everything outside the click set in focus mode.
	pub dimmed: Hsl,
	/// Link colors, one per [`Emphasis`] level.
	pub link_hovered: Hsl,
	/// Links in the click set.
	pub link_selected: Hsl,
	/// Links when nothing applies.
	pub link_base: Hsl,
	/// Links outside the click set in focus mode.
	pub link_dimmed: Hsl,
}

impl Default for HighlightPalette {
	fn default() -> Self {
		Self {
			hover_lightness: 75.0,
			selected_floor: 60.0,
			selected_lift: 2.0,
			dimmed: Hsl::new(225.0, 7.0, 18.0),
			link_hovered: Hsl::new(210.0, 60.0, 72.0),
			link_selected: Hsl::new(225.0, 5.0, 38.0),
			link_base: Hsl::new(225.0, 7.0, 24.0),
			link_dimmed: Hsl::new(225.0, 7.0, 16.0),
		}
	}
}

/// Hover wins over everything; focus mode splits the rest into selected
/// and dimmed.
pub fn node_emphasis(selection: &Selection, id: NodeId) -> Emphasis {
	if selection.hovered_nodes.contains(&id) {
		Emphasis::Hovered
	} else if !selection.focus_mode() {
		Emphasis::Base
	} else if selection.clicked_nodes.contains(&id) {
		Emphasis::Selected
	} else {
		Emphasis::Dimmed
	}
}

/// Emphasis of a link, by the same precedence as [`node_emphasis`].
pub fn link_emphasis(selection: &Selection, pair_key: PairKey) -> Emphasis {
	if selection.hovered_links.contains(&pair_key) {
		Emphasis::Hovered
	} else if !selection.focus_mode() {
		Emphasis::Base
	} else if selection.clicked_links.contains(&pair_key) {
		Emphasis::Selected
	} else {
		Emphasis::Dimmed
	}
}

/// Fill for a node whose transformer color is `base`.
pub fn node_color(selection: &Selection, palette: &HighlightPalette, id: NodeId, base: Hsl) -> Hsl {
	match node_emphasis(selection, id) {
		Emphasis::Hovered => base.with_lightness(palette.hover_lightness),
		Emphasis::Selected => base.with_lightness(base.l.max(palette.selected_floor) + palette.selected_lift),
		Emphasis::Base => base,
		Emphasis::Dimmed => palette.dimmed,
	}
}

/// Stroke color for the link with `pair_key`.
pub fn link_color(selection: &Selection, palette: &HighlightPalette, pair_key: PairKey) -> Hsl {
	match link_emphasis(selection, pair_key) {
		Emphasis::Hovered => palette.link_hovered,
		Emphasis::Selected => palette.link_selected,
		Emphasis::Base => palette.link_base,
		Emphasis::Dimmed => palette.link_dimmed,
	}
}
