//! Tunable parameters for the particle field.
//!
//! Every field has a default matching the hero canvas as shipped, so an empty
//! JSON object (or no config at all) reproduces the stock look. Pages may
//! override any subset through the `particle-config` script element.

use serde::{Deserialize, Deserializer};

use super::theme::Color;

/// Particle count and link distance rules for one viewport class.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityConfig {
	/// Upper bound on the particle count.
	pub max_count: usize,
	/// One particle per this many pixels of viewport width.
	pub px_per_particle: f64,
	/// Pairs closer than this (in pixels) are joined by a line.
	pub link_distance: f64,
}

impl DensityConfig {
	/// Density for viewports below the compact breakpoint.
	pub const fn compact() -> Self {
		Self {
			max_count: 30,
			px_per_particle: 20.0,
			link_distance: 100.0,
		}
	}

	/// Density for every other viewport.
	pub const fn wide() -> Self {
		Self {
			max_count: 80,
			px_per_particle: 15.0,
			link_distance: 150.0,
		}
	}
}

/// A partial `DensityConfig` as written in JSON.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DensityOverrides {
	max_count: Option<usize>,
	px_per_particle: Option<f64>,
	link_distance: Option<f64>,
}

impl DensityOverrides {
	fn over(self, base: DensityConfig) -> DensityConfig {
		DensityConfig {
			max_count: self.max_count.unwrap_or(base.max_count),
			px_per_particle: self.px_per_particle.unwrap_or(base.px_per_particle),
			link_distance: self.link_distance.unwrap_or(base.link_distance),
		}
	}
}

fn compact_density<'de, D: Deserializer<'de>>(d: D) -> Result<DensityConfig, D::Error> {
	Ok(DensityOverrides::deserialize(d)?.over(DensityConfig::compact()))
}

fn wide_density<'de, D: Deserializer<'de>>(d: D) -> Result<DensityConfig, D::Error> {
	Ok(DensityOverrides::deserialize(d)?.over(DensityConfig::wide()))
}

/// Complete particle field configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Viewports narrower than this use the `compact` density.
	pub compact_breakpoint: f64,
	/// Missing keys fall back to [`DensityConfig::compact`].
	#[serde(deserialize_with = "compact_density")]
	pub compact: DensityConfig,
	/// Missing keys fall back to [`DensityConfig::wide`].
	#[serde(deserialize_with = "wide_density")]
	pub wide: DensityConfig,
	/// Particle radius range `[min, max)`.
	pub size_range: (f64, f64),
	/// Maximum absolute velocity per axis, in pixels per frame.
	pub max_speed: f64,
	/// Particle opacity range `[min, max)`.
	pub opacity_range: (f64, f64),
	/// Particle and link hue as `{ "r", "g", "b" }`. Opacity comes from
	/// `opacity_range` and `link_opacity`, so an `a` key is rejected.
	pub color: Color,
	/// Link alpha at zero distance.
	pub link_opacity: f64,
	/// Link stroke width in pixels.
	pub link_width: f64,
	/// Element id of the section whose visibility gates the loop.
	pub section_id: String,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			compact_breakpoint: 700.0,
			compact: DensityConfig::compact(),
			wide: DensityConfig::wide(),
			size_range: (0.3, 1.8),
			max_speed: 0.15,
			opacity_range: (0.1, 0.5),
			color: Color::rgb(0, 229, 160),
			link_opacity: 0.12,
			link_width: 0.5,
			section_id: "hero".to_string(),
		}
	}
}

impl FieldConfig {
	/// Parse overrides from JSON. Missing keys keep their defaults, including
	/// keys missing inside a partial `compact` or `wide` object.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	/// Density rules that apply to a viewport of the given width, and whether
	/// that width counts as compact.
	pub fn density_for(&self, width: f64) -> (&DensityConfig, bool) {
		if width < self.compact_breakpoint {
			(&self.compact, true)
		} else {
			(&self.wide, false)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::particles::FieldLayout;

	#[test]
	fn empty_object_yields_defaults() {
		let config = FieldConfig::from_json("{}").unwrap();
		assert_eq!(config, FieldConfig::default());
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config =
			FieldConfig::from_json(r#"{ "compact": { "max_count": 12 }, "link_width": 1.0 }"#)
				.unwrap();
		assert_eq!(config.compact.max_count, 12);
		assert_eq!(config.compact.px_per_particle, 20.0);
		assert_eq!(config.compact.link_distance, 100.0);
		assert_eq!(config.link_width, 1.0);
		assert_eq!(config.wide, DensityConfig::wide());
	}

	#[test]
	fn wide_partial_override_keeps_wide_defaults() {
		let config = FieldConfig::from_json(r#"{ "wide": { "link_distance": 120.0 } }"#).unwrap();
		assert_eq!(config.wide.max_count, 80);
		assert_eq!(config.wide.px_per_particle, 15.0);
		assert_eq!(config.wide.link_distance, 120.0);
		assert_eq!(config.compact, DensityConfig::compact());
	}

	#[test]
	fn compact_override_drives_compact_layout() {
		let config = FieldConfig::from_json(r#"{ "compact": { "max_count": 12 } }"#).unwrap();
		let layout = FieldLayout::for_viewport(500.0, &config);
		assert_eq!(layout.count, 12);
		assert_eq!(layout.link_distance, 100.0);
		assert!(layout.compact);
	}

	#[test]
	fn unknown_density_key_is_an_error() {
		assert!(FieldConfig::from_json(r#"{ "compact": { "count": 12 } }"#).is_err());
	}

	#[test]
	fn color_alpha_is_rejected() {
		assert!(FieldConfig::from_json(r#"{ "color": { "r": 1, "g": 2, "b": 3, "a": 0.3 } }"#).is_err());
	}

	#[test]
	fn color_override_parses() {
		let config = FieldConfig::from_json(r#"{ "color": { "r": 10, "g": 20, "b": 30 } }"#)
			.unwrap();
		assert_eq!((config.color.r, config.color.g, config.color.b), (10, 20, 30));
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(FieldConfig::from_json("{ not json").is_err());
	}

	#[test]
	fn breakpoint_is_exclusive() {
		let config = FieldConfig::default();
		assert!(config.density_for(699.9).1);
		assert!(!config.density_for(700.0).1);
	}
}
