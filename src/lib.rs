//! hero-particles: decorative particle field for a portfolio hero section.
//!
//! This crate provides a WASM canvas component that animates drifting
//! particles joined by proximity links, pausing whenever the hero section is
//! scrolled out of view.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, ParticleFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("hero-particles: logging initialized");
}

/// Read the JSON body of the script element with id="particle-config".
fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load field overrides from the page, falling back to defaults when the
/// script element is absent or malformed.
fn load_field_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("hero-particles: loaded config overrides");
			config
		}
		Err(e) => {
			warn!("hero-particles: failed to parse particle config: {}", e);
			FieldConfig::default()
		}
	}
}

/// Main application component.
/// Renders the hero section with the particle field behind its content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();
	let section_id = config.section_id.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section id=section_id class="hero" style="position: relative; min-height: 100vh;">
			<ParticleFieldCanvas config=config />
		</section>
	}
}
