//! Zoom-dependent scaling for graph visuals.
//!
//! - **World-space** values scale with zoom (appear larger when zoomed in).
//! - **Screen-space** values stay a constant number of pixels.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom level `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Scale configuration for nodes, links and labels.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Radius of a node with layout weight 1; area grows linearly with weight.
	pub node_rel_size: f64,
	/// How node radii respond to zoom.
	pub node_behavior: ScaleBehavior,
	/// Extra hit radius around a node, in screen pixels.
	pub hit_padding: f64,
	/// Link width in screen pixels.
	pub line_width: f64,
	/// How link widths respond to zoom.
	pub line_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Below this zoom level labels stop shrinking.
	pub label_min_k: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_rel_size: 7.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 2.0,
				max_screen: f64::INFINITY,
			},
			hit_padding: 4.0,
			line_width: 1.0,
			line_behavior: ScaleBehavior::Screen,
			label_size: 11.0,
			label_min_k: 0.5,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom level these values were resolved at.
	pub k: f64,
	node_rel_size: f64,
	node_behavior: ScaleBehavior,
	/// Hit padding in world units.
	pub hit_padding: f64,
	/// Link width in world units.
	pub line_width: f64,
	/// CSS font shorthand for node labels.
	pub label_font: String,
}

impl ScaledValues {
	/// Resolves `config` at zoom level `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.label_size / k.max(config.label_min_k);
		Self {
			k,
			node_rel_size: config.node_rel_size,
			node_behavior: config.node_behavior.clone(),
			hit_padding: config.hit_padding / k,
			line_width: config.line_behavior.apply(config.line_width, k),
			label_font: format!("{}px sans-serif", label_font_size),
		}
	}

	/// World-space radius of a node with layout weight `val`.
	pub fn node_radius(&self, val: f64) -> f64 {
		let base = val.max(0.0).sqrt() * self.node_rel_size;
		self.node_behavior.apply(base, self.k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_area_scales_with_weight() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(scale.node_radius(1.0), 7.0);
		assert_eq!(scale.node_radius(4.0), 14.0);
	}

	#[test]
	fn clamped_radius_keeps_minimum_screen_size() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 0.01);
		// 2px on screen at k=0.01 is 200 world units
		assert_eq!(scale.node_radius(1.0), 200.0);
		assert_eq!(ScaleBehavior::World.apply(3.0, 10.0), 3.0);
		assert_eq!(ScaleBehavior::Screen.apply(3.0, 2.0), 1.5);
	}
}
