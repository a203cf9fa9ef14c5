//! HSL colors assigned by the transformer.
//!
//! Only the hue varies across the schema tree; saturation and lightness are
//! fixed per node kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
	/// Hue in degrees.
	pub h: f64,
	/// Saturation in percent.
	pub s: f64,
	/// Lightness in percent.
	pub l: f64,
}

impl Hsl {
	/// Color from hue, saturation and lightness.
	pub const fn new(h: f64, s: f64, l: f64) -> Self {
		Self { h, s, l }
	}

	/// Neutral grey used for entities and the schema root.
	pub const NEUTRAL: Hsl = Hsl::new(0.0, 0.0, 25.0);

	/// Saturation and lightness of key nodes.
	pub const KEY_SL: (f64, f64) = (20.0, 25.0);

	/// Saturation and lightness of primitive nodes.
	pub const PRIMITIVE_SL: (f64, f64) = (50.0, 50.0);

	/// Color of the `index`-th of `count` top-level keys.
	pub fn top_level_key(index: usize, count: usize) -> Self {
		let hue = 360.0 / count as f64 * index as f64;
		Self::new(hue, Self::KEY_SL.0, Self::KEY_SL.1)
	}

	/// Primitive color derived from its parent key's hue.
	pub fn primitive(parent: Hsl) -> Self {
		Self::new(parent.h, Self::PRIMITIVE_SL.0, Self::PRIMITIVE_SL.1)
	}

	/// Same hue and saturation at lightness `l`, clamped to 0..=100.
	pub fn with_lightness(self, l: f64) -> Self {
		Self {
			l: l.clamp(0.0, 100.0),
			..self
		}
	}
}

impl fmt::Display for Hsl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
	}
}

impl Serialize for Hsl {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Returned when text is not of the form `hsl(H, S%, L%)`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("not an hsl() color: {0:?}")]
pub struct ParseHslError(pub String);

impl FromStr for Hsl {
	type Err = ParseHslError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let err = || ParseHslError(s.to_string());
		let inner = s
			.trim()
			.strip_prefix("hsl(")
			.and_then(|rest| rest.strip_suffix(')'))
			.ok_or_else(err)?;
		let mut parts = inner.split(',').map(|p| p.trim().trim_end_matches('%').parse::<f64>());
		match (parts.next(), parts.next(), parts.next(), parts.next()) {
			(Some(Ok(h)), Some(Ok(s)), Some(Ok(l)), None) => Ok(Hsl::new(h, s, l)),
			_ => Err(err()),
		}
	}
}

impl<'de> Deserialize<'de> for Hsl {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = String::deserialize(deserializer)?;
		text.parse().map_err(serde::de::Error::custom)
	}
}
