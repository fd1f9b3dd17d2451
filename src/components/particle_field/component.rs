//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a canvas sized to the window and starts an animation
//! loop via `requestAnimationFrame` that steps and redraws the field each
//! frame. An `IntersectionObserver` on the hosting section pauses the loop
//! while the section is off screen, and a window `resize` listener keeps the
//! canvas pixel size in sync with the viewport.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, Window,
};

use super::config::FieldConfig;
use super::gate::{FrameGate, GateAction};
use super::particles::ParticleField;
use super::render;
use super::theme::FieldStyle;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type VisibilityCallback = Rc<RefCell<Option<Closure<dyn FnMut(js_sys::Array)>>>>;

/// Everything the frame, resize and visibility callbacks share.
struct FieldContext {
	field: ParticleField,
	style: FieldStyle,
	gate: FrameGate,
	ctx: CanvasRenderingContext2d,
	#[allow(dead_code, reason = "held so the observer lives as long as the canvas")]
	observer: IntersectionObserver,
}

/// Shared cells owned by one mounted canvas.
#[derive(Default)]
struct Handles {
	context: Rc<RefCell<Option<FieldContext>>>,
	animate: FrameCallback,
	resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	visibility_cb: VisibilityCallback,
}

/// Renders the drifting particle field on a full-viewport canvas.
///
/// Place it inside the section named by `config.section_id`; the loop only
/// runs while that section intersects the viewport. If the window, the
/// section or a 2D context is unavailable the canvas stays blank.
#[component]
pub fn ParticleFieldCanvas(
	/// Density, motion and styling tunables; stock look when omitted.
	#[prop(optional)]
	config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles = Handles::default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handles.context.borrow().is_some() {
			return;
		}
		if mount(canvas.into(), &config, &handles).is_none() {
			warn!("hero-particles: canvas or section unavailable, particle field disabled");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="hero-canvas"
			aria-hidden="true"
			style="position: absolute; inset: 0; display: block; pointer-events: none;"
		/>
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

/// Wires up the canvas, listeners and observer, then starts the loop.
/// Returns `None` without animating if any piece is missing.
fn mount(canvas: HtmlCanvasElement, config: &FieldConfig, handles: &Handles) -> Option<()> {
	let window = web_sys::window()?;
	let section = window.document()?.get_element_by_id(&config.section_id)?;
	let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

	let (w, h) = viewport_size(&window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
	let field = ParticleField::new(config, w, h, &mut rng);
	let layout = field.layout();
	info!(
		"hero-particles: {} particles, link distance {}{}",
		layout.count,
		layout.link_distance,
		if layout.compact { " (compact)" } else { "" }
	);

	let (context_resize, canvas_resize) = (handles.context.clone(), canvas.clone());
	*handles.resize_cb.borrow_mut() = Some(Closure::new(move || {
		let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
			return;
		};
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			c.field.resize(nw, nh);
		}
		debug!("hero-particles: resized to {}x{}", nw, nh);
	}));

	let (context_anim, animate_inner) = (handles.context.clone(), handles.animate.clone());
	*handles.animate.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut c) = *context_anim.borrow_mut() {
			advance(c, &animate_inner);
		}
	}));

	let (context_vis, animate_vis) = (handles.context.clone(), handles.animate.clone());
	*handles.visibility_cb.borrow_mut() = Some(Closure::new(move |entries: js_sys::Array| {
		for entry in entries.iter() {
			let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
				continue;
			};
			if let Some(ref mut c) = *context_vis.borrow_mut() {
				on_visibility(c, entry.is_intersecting(), &animate_vis);
			}
		}
	}));

	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(0.0));
	let observer = {
		let cb = handles.visibility_cb.borrow();
		let cb = cb.as_ref()?;
		IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &options).ok()?
	};

	// Register only once every piece exists.
	if let Some(ref cb) = *handles.resize_cb.borrow() {
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	observer.observe(&section);

	*handles.context.borrow_mut() = Some(FieldContext {
		field,
		style: FieldStyle::from_config(config),
		gate: FrameGate::new(),
		ctx,
		observer,
	});

	// Observer callbacks are delivered asynchronously, so the loop is always
	// running by the time the first visibility report arrives.
	if let Some(ref mut c) = *handles.context.borrow_mut() {
		advance(c, &handles.animate);
	}
	Some(())
}

/// Steps and draws one frame, then schedules the next.
fn advance(c: &mut FieldContext, animate: &FrameCallback) {
	c.field.step();
	render::draw_frame(&c.field, &c.ctx, &c.style);
	schedule_frame(&mut c.gate, animate);
}

fn schedule_frame(gate: &mut FrameGate, animate: &FrameCallback) {
	let requested = match (web_sys::window(), animate.borrow().as_ref()) {
		(Some(window), Some(cb)) => window.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
		_ => None,
	};
	match requested {
		Some(handle) => gate.arm(handle),
		None => {
			warn!("hero-particles: could not schedule the next frame");
			gate.disarm();
		}
	}
}

fn on_visibility(c: &mut FieldContext, visible: bool, animate: &FrameCallback) {
	match c.gate.on_visibility(visible) {
		GateAction::Cancel(handle) => {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
			debug!("hero-particles: section hidden, loop paused");
		}
		GateAction::Resume => {
			debug!("hero-particles: section visible, loop resumed");
			advance(c, animate);
		}
		GateAction::Idle => {}
	}
}
