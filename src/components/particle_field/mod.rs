//! Decorative particle field for the hero section.
//!
//! Renders slowly drifting dots on a canvas with:
//! - Reflective bounces off the canvas edges
//! - Faint links between every pair closer than a viewport-dependent distance
//! - A visibility gate that stops the frame loop while the section is off screen
//! - Density and styling tunable through [`FieldConfig`]
//!
//! # Example
//!
//! ```ignore
//! use hero_particles::{FieldConfig, ParticleFieldCanvas};
//!
//! view! {
//!     <section id="hero" class="hero">
//!         <ParticleFieldCanvas config=FieldConfig::default() />
//!     </section>
//! }
//! ```

mod component;
pub mod config;
pub mod gate;
pub mod particles;
mod render;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use particles::{FieldLayout, ParticleField};
