//! Canvas rendering for the particle field.
//!
//! One frame is two passes: particles as filled dots, then the proximity
//! links on top. The canvas is cleared rather than filled so the hero
//! section's CSS background shows through.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;
use super::theme::FieldStyle;

/// Draws the current particle positions to the canvas.
pub fn draw_frame(field: &ParticleField, ctx: &CanvasRenderingContext2d, style: &FieldStyle) {
	ctx.clear_rect(0.0, 0.0, field.width(), field.height());
	draw_particles(field, ctx, style);
	draw_links(field, ctx, style);
}

fn draw_particles(field: &ParticleField, ctx: &CanvasRenderingContext2d, style: &FieldStyle) {
	for p in &field.particles {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size, 0.0, PI * 2.0);
		ctx.set_fill_style_str(&style.particle_fill(p.opacity));
		ctx.fill();
	}
}

fn draw_links(field: &ParticleField, ctx: &CanvasRenderingContext2d, style: &FieldStyle) {
	ctx.set_line_width(style.link_width);

	for link in field.links() {
		let (a, b) = (&field.particles[link.a], &field.particles[link.b]);
		ctx.set_stroke_style_str(&style.link_stroke(link.closeness));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}
