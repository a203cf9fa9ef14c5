//! Visual theming for the force graph.
//!
//! Node colors come from the transformer and the highlight palette; the theme
//! only covers the canvas around them and how nodes are shaded.

use crate::model::Hsl;

/// An [`Hsl`] color with opacity, ready to hand to the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
	/// Base color.
	pub color: Hsl,
	/// Opacity from 0 to 1.
	pub alpha: f64,
}

impl Paint {
	/// `color` at full opacity.
	pub const fn solid(color: Hsl) -> Self {
		Self { color, alpha: 1.0 }
	}

	/// `color` at opacity `alpha`.
	pub const fn translucent(color: Hsl, alpha: f64) -> Self {
		Self { color, alpha }
	}

	/// Same color at a different opacity.
	pub fn with_alpha(self, alpha: f64) -> Self {
		Self { alpha, ..self }
	}

	/// Moves lightness by `delta` percentage points.
	pub fn shade(self, delta: f64) -> Self {
		Self {
			color: self.color.with_lightness(self.color.l + delta),
			..self
		}
	}

	/// CSS color text; `hsla()` when translucent.
	pub fn to_css(self) -> String {
		if self.alpha >= 1.0 {
			self.color.to_string()
		} else {
			let Hsl { h, s, l } = self.color;
			format!("hsla({h}, {s}%, {l}%, {})", self.alpha.max(0.0))
		}
	}
}

impl From<Hsl> for Paint {
	fn from(color: Hsl) -> Self {
		Self::solid(color)
	}
}

/// Canvas fill behind the graph.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Fill at the canvas center.
	pub center: Paint,
	/// Fill toward the canvas edges.
	pub edge: Paint,
	/// Radial fade from `center` to `edge`; `edge` alone when off.
	pub vignette: bool,
}

/// How links are stroked.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Opacity applied to every link color.
	pub alpha: f64,
	/// (dash, gap) for relationship links, in world units.
	pub relationship_dash: (f64, f64),
}

/// How nodes are filled, outlined and labelled.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Lightness offsets (highlight, rim) for the radial shading; `None`
	/// paints nodes flat.
	pub shading: Option<(f64, f64)>,
	/// Outline paint and width in screen pixels.
	pub outline: Option<(Paint, f64)>,
	/// Label text color.
	pub label: Paint,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name accepted in the config's `theme` field.
	pub name: &'static str,
	/// Canvas fill behind the graph.
	pub background: BackgroundStyle,
	/// Link strokes.
	pub link: LinkStyle,
	/// Node fills and labels.
	pub node: NodeStyle,
}

impl Theme {
	/// Dark slate with shaded nodes.
	pub fn slate() -> Self {
		Self {
			name: "slate",
			background: BackgroundStyle {
				center: Paint::solid(Hsl::new(228.0, 8.0, 16.0)),
				edge: Paint::solid(Hsl::new(225.0, 7.0, 11.0)),
				vignette: true,
			},
			link: LinkStyle {
				alpha: 0.9,
				relationship_dash: (6.0, 3.0),
			},
			node: NodeStyle {
				shading: Some((12.0, -10.0)),
				outline: None,
				label: Paint::solid(Hsl::new(225.0, 5.0, 77.0)),
			},
		}
	}

	/// Flat nodes with a faint outline on a plain background.
	pub fn minimal() -> Self {
		let plain = Paint::solid(Hsl::new(222.0, 17.0, 12.0));
		Self {
			name: "minimal",
			background: BackgroundStyle {
				center: plain,
				edge: plain,
				vignette: false,
			},
			link: LinkStyle {
				alpha: 0.7,
				relationship_dash: (4.0, 4.0),
			},
			node: NodeStyle {
				shading: None,
				outline: Some((Paint::translucent(Hsl::new(0.0, 0.0, 100.0), 0.25), 1.0)),
				label: Paint::solid(Hsl::new(0.0, 0.0, 86.0)),
			},
		}
	}

	/// Looks a theme up by name; unknown names get [`Theme::slate`].
	pub fn by_name(name: &str) -> Self {
		match name {
			"minimal" => Self::minimal(),
			_ => Self::slate(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::slate()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paint_css() {
		assert_eq!(Paint::from(Hsl::NEUTRAL).to_css(), "hsl(0, 0%, 25%)");
		assert_eq!(
			Paint::solid(Hsl::new(210.0, 60.0, 72.0)).with_alpha(0.5).to_css(),
			"hsla(210, 60%, 72%, 0.5)"
		);
	}

	#[test]
	fn shading_stays_in_range() {
		let bright = Paint::solid(Hsl::new(0.0, 50.0, 95.0)).shade(12.0);
		assert_eq!(bright.color.l, 100.0);
		assert_eq!(Paint::solid(Hsl::NEUTRAL).shade(-10.0).color.l, 15.0);
	}

	#[test]
	fn unknown_theme_falls_back() {
		assert_eq!(Theme::by_name("minimal").name, "minimal");
		assert_eq!(Theme::by_name("nope").name, "slate");
	}
}
