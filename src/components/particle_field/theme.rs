//! Colors and stroke styling for the particle field.

use serde::Deserialize;

use super::config::FieldConfig;

fn opaque() -> f64 {
	1.0
}

/// RGBA color representation.
///
/// Deserializes from `{ "r", "g", "b" }` only; alpha is always set per
/// draw call through [`Color::with_alpha`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`; never read from config.
	#[serde(skip_deserializing, default = "opaque")]
	pub a: f64,
}

impl Color {
	/// Opaque color from its channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same hue with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Hex for opaque colors, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Resolved drawing style for one frame.
#[derive(Clone, Debug)]
pub struct FieldStyle {
	/// Shared hue of particles and links.
	pub color: Color,
	/// Link alpha at zero distance.
	pub link_opacity: f64,
	/// Link stroke width in pixels.
	pub link_width: f64,
}

impl FieldStyle {
	/// Pull the drawing parameters out of a field config.
	pub fn from_config(config: &FieldConfig) -> Self {
		Self {
			color: config.color,
			link_opacity: config.link_opacity,
			link_width: config.link_width,
		}
	}

	/// CSS fill for a particle with the given opacity.
	pub fn particle_fill(&self, opacity: f64) -> String {
		self.color.with_alpha(opacity).to_css()
	}

	/// CSS stroke for a link whose distance factor is `closeness`
	/// (1.0 at zero distance, 0.0 at the link threshold).
	pub fn link_stroke(&self, closeness: f64) -> String {
		self.color.with_alpha(closeness * self.link_opacity).to_css()
	}
}
