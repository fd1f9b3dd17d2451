//! Drifting particles with reflective edges and proximity links.

use rand::Rng;

use super::config::FieldConfig;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in canvas pixels.
	pub x: f64,
	/// Vertical position in canvas pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub speed_x: f64,
	/// Vertical velocity in pixels per frame.
	pub speed_y: f64,
	/// Radius of the drawn dot.
	pub size: f64,
	/// Fill alpha, fixed at spawn.
	pub opacity: f64,
}

impl Particle {
	fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Self {
		let (size_min, size_max) = config.size_range;
		let (opacity_min, opacity_max) = config.opacity_range;
		Self {
			x: rng.random::<f64>() * width,
			y: rng.random::<f64>() * height,
			size: size_min + rng.random::<f64>() * (size_max - size_min),
			speed_x: (rng.random::<f64>() - 0.5) * 2.0 * config.max_speed,
			speed_y: (rng.random::<f64>() - 0.5) * 2.0 * config.max_speed,
			opacity: opacity_min + rng.random::<f64>() * (opacity_max - opacity_min),
		}
	}

	/// Advance one frame, then reflect any velocity component that carried
	/// the particle past an edge.
	///
	/// Reflection points the component back inward rather than negating it,
	/// so a particle already heading home is left alone and one stranded
	/// outside shrunken bounds drifts back instead of flipping every frame.
	pub fn step(&mut self, width: f64, height: f64) {
		self.x += self.speed_x;
		self.y += self.speed_y;

		if self.x < 0.0 {
			self.speed_x = self.speed_x.abs();
		} else if self.x > width {
			self.speed_x = -self.speed_x.abs();
		}
		if self.y < 0.0 {
			self.speed_y = self.speed_y.abs();
		} else if self.y > height {
			self.speed_y = -self.speed_y.abs();
		}
	}
}

/// Particle count and link threshold derived from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldLayout {
	/// Number of particles to spawn.
	pub count: usize,
	/// Pairs closer than this are linked.
	pub link_distance: f64,
	/// Whether the compact density was chosen.
	pub compact: bool,
}

impl FieldLayout {
	/// Pick the density for `width` and derive the count as
	/// `min(max_count, floor(width / px_per_particle))`. Non-positive or
	/// non-finite widths give an empty field.
	pub fn for_viewport(width: f64, config: &FieldConfig) -> Self {
		let (density, compact) = config.density_for(width);
		let per_width = if width.is_finite() && width > 0.0 && density.px_per_particle > 0.0 {
			(width / density.px_per_particle).floor() as usize
		} else {
			0
		};
		Self {
			count: per_width.min(density.max_count),
			link_distance: density.link_distance,
			compact,
		}
	}
}

/// Alpha factor for a link between two particles `distance` apart.
///
/// Falls linearly from 1.0 at zero distance to 0.0 at `threshold`; `None`
/// at or beyond the threshold.
pub fn link_closeness(distance: f64, threshold: f64) -> Option<f64> {
	(distance < threshold).then(|| 1.0 - distance / threshold)
}

/// A line to draw between particles `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the first particle.
	pub a: usize,
	/// Index of the second particle, always greater than `a`.
	pub b: usize,
	/// 1.0 when the particles coincide, approaching 0.0 at the threshold.
	pub closeness: f64,
}

/// Fixed-size set of particles bounded by the canvas.
#[derive(Clone, Debug)]
pub struct ParticleField {
	/// The particles, fixed in number for the field's lifetime.
	pub particles: Vec<Particle>,
	layout: FieldLayout,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// Spawn `FieldLayout::for_viewport(width).count` particles uniformly
	/// over a `width` x `height` canvas.
	pub fn new<R: Rng + ?Sized>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let layout = FieldLayout::for_viewport(width, config);
		let particles = (0..layout.count)
			.map(|_| Particle::spawn(rng, width, height, config))
			.collect();

		Self {
			particles,
			layout,
			width,
			height,
		}
	}

	/// Layout chosen when the field was created.
	pub fn layout(&self) -> FieldLayout {
		self.layout
	}

	/// Current canvas width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Current canvas height.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Move every particle one frame.
	pub fn step(&mut self) {
		for p in &mut self.particles {
			p.step(self.width, self.height);
		}
	}

	/// Adopt new canvas bounds. Positions and velocities are left as they
	/// are; the count and link distance stay fixed for the page lifetime.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// All unordered pairs closer than the link distance.
	pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
		let threshold = self.layout.link_distance;
		self.particles.iter().enumerate().flat_map(move |(i, p)| {
			self.particles[i + 1..]
				.iter()
				.enumerate()
				.filter_map(move |(offset, q)| {
					let distance = (p.x - q.x).hypot(p.y - q.y);
					link_closeness(distance, threshold).map(|closeness| Link {
						a: i,
						b: i + 1 + offset,
						closeness,
					})
				})
		})
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn particle(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Particle {
		Particle {
			x,
			y,
			speed_x,
			speed_y,
			size: 1.0,
			opacity: 0.3,
		}
	}

	fn field(width: f64, height: f64, seed: u64) -> ParticleField {
		let mut rng = StdRng::seed_from_u64(seed);
		ParticleField::new(&FieldConfig::default(), width, height, &mut rng)
	}

	#[test]
	fn layout_counts_follow_viewport_width() {
		let config = FieldConfig::default();

		let wide = FieldLayout::for_viewport(1000.0, &config);
		assert_eq!(wide.count, 66);
		assert_eq!(wide.link_distance, 150.0);
		assert!(!wide.compact);

		let compact = FieldLayout::for_viewport(500.0, &config);
		assert_eq!(compact.count, 25);
		assert_eq!(compact.link_distance, 100.0);
		assert!(compact.compact);

		assert_eq!(FieldLayout::for_viewport(1500.0, &config).count, 80);
		assert_eq!(FieldLayout::for_viewport(690.0, &config).count, 30);
	}

	#[test]
	fn degenerate_widths_spawn_nothing() {
		let config = FieldConfig::default();
		assert_eq!(FieldLayout::for_viewport(0.0, &config).count, 0);
		assert_eq!(FieldLayout::for_viewport(-50.0, &config).count, 0);
		assert_eq!(FieldLayout::for_viewport(f64::NAN, &config).count, 0);
	}

	#[test]
	fn spawned_particles_respect_ranges() {
		let field = field(1200.0, 700.0, 7);
		assert_eq!(field.particles.len(), 80);
		for p in &field.particles {
			assert!((0.0..1200.0).contains(&p.x));
			assert!((0.0..700.0).contains(&p.y));
			assert!((0.3..1.8).contains(&p.size));
			assert!((-0.15..0.15).contains(&p.speed_x));
			assert!((-0.15..0.15).contains(&p.speed_y));
			assert!((0.1..0.5).contains(&p.opacity));
		}
	}

	#[test]
	fn same_seed_same_field() {
		assert_eq!(field(900.0, 600.0, 42).particles, field(900.0, 600.0, 42).particles);
	}

	#[test]
	fn outward_particle_at_edge_flips_once() {
		let mut p = particle(0.0, 50.0, -0.1, 0.0);
		p.step(100.0, 100.0);
		assert!(p.x < 0.0);
		assert_eq!(p.speed_x, 0.1);

		p.step(100.0, 100.0);
		assert!(p.x >= 0.0);
		assert_eq!(p.speed_x, 0.1);
	}

	#[test]
	fn far_edge_reflects_both_axes() {
		let mut p = particle(99.95, 99.95, 0.1, 0.1);
		p.step(100.0, 100.0);
		assert_eq!((p.speed_x, p.speed_y), (-0.1, -0.1));
	}

	#[test]
	fn stranded_particle_heading_inward_keeps_its_velocity() {
		let mut p = particle(900.0, 300.0, -0.1, 0.0);
		p.step(800.0, 600.0);
		assert!((p.x - 899.9).abs() < 1e-9);
		assert_eq!(p.speed_x, -0.1);
	}

	#[test]
	fn particle_on_boundary_is_not_reflected() {
		let mut p = particle(99.5, 0.5, 0.5, -0.5);
		p.step(100.0, 100.0);
		assert_eq!((p.x, p.y), (100.0, 0.0));
		assert_eq!((p.speed_x, p.speed_y), (0.5, -0.5));
	}

	#[test]
	fn resize_keeps_positions() {
		let mut f = field(1000.0, 800.0, 3);
		let before = f.particles.clone();
		f.resize(400.0, 300.0);
		assert_eq!(f.particles, before);
		assert_eq!((f.width(), f.height()), (400.0, 300.0));
		assert_eq!(f.layout().count, 66);
	}

	#[test]
	fn stranded_particle_returns_after_shrink() {
		let mut f = field(1000.0, 800.0, 3);
		f.particles = vec![particle(900.0, 700.0, 0.1, 0.1)];
		f.resize(800.0, 600.0);
		for _ in 0..3000 {
			f.step();
		}
		let p = &f.particles[0];
		assert!(p.x <= 800.0 + 0.1 && p.y <= 600.0 + 0.1);
	}

	#[test]
	fn links_join_only_close_pairs() {
		let mut f = field(1000.0, 800.0, 1);
		f.particles = vec![
			particle(0.0, 0.0, 0.0, 0.0),
			particle(75.0, 0.0, 0.0, 0.0),
			particle(75.0, 100.0, 0.0, 0.0),
			// exactly one threshold away from the first particle
			particle(-150.0, 0.0, 0.0, 0.0),
			particle(900.0, 700.0, 0.0, 0.0),
		];
		let pairs: Vec<(usize, usize)> = f.links().map(|l| (l.a, l.b)).collect();
		assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);

		let links: Vec<Link> = f.links().collect();
		assert_eq!(links[0].closeness, 0.5);
		assert!(links[2].closeness > links[1].closeness);
	}

	#[test]
	fn closeness_hits_zero_at_threshold() {
		assert_eq!(link_closeness(0.0, 150.0), Some(1.0));
		assert_eq!(link_closeness(150.0, 150.0), None);
		assert_eq!(link_closeness(200.0, 150.0), None);
		let near = link_closeness(149.999_999, 150.0).unwrap();
		assert!(near > 0.0 && near < 1e-6);
	}

	#[test]
	fn wide_viewport_stays_in_bounds_for_a_thousand_frames() {
		let mut f = field(1500.0, 800.0, 2024);
		assert_eq!(f.particles.len(), 80);
		assert_eq!(f.layout().link_distance, 150.0);

		let slack = FieldConfig::default().max_speed;
		for _ in 0..1000 {
			f.step();
			for p in &f.particles {
				assert!(p.x >= -slack && p.x <= 1500.0 + slack);
				assert!(p.y >= -slack && p.y <= 800.0 + slack);
			}
		}
	}

	proptest! {
		#[test]
		fn bounce_keeps_particles_within_one_step(
			x in 0.0f64..=400.0,
			y in 0.0f64..=300.0,
			speed_x in -0.15f64..0.15,
			speed_y in -0.15f64..0.15,
			steps in 1usize..2000,
		) {
			let mut p = particle(x, y, speed_x, speed_y);
			for _ in 0..steps {
				p.step(400.0, 300.0);
				prop_assert!(p.x >= -0.15 && p.x <= 400.15);
				prop_assert!(p.y >= -0.15 && p.y <= 300.15);
				if p.x < 0.0 { prop_assert!(p.speed_x >= 0.0); }
				if p.x > 400.0 { prop_assert!(p.speed_x <= 0.0); }
				if p.y < 0.0 { prop_assert!(p.speed_y >= 0.0); }
				if p.y > 300.0 { prop_assert!(p.speed_y <= 0.0); }
			}
		}

		#[test]
		fn closeness_decreases_with_distance(
			a in 0.0f64..149.0,
			b in 0.0f64..149.0,
		) {
			let (near, far) = if a <= b { (a, b) } else { (b, a) };
			let near_alpha = link_closeness(near, 150.0).unwrap();
			let far_alpha = link_closeness(far, 150.0).unwrap();
			prop_assert!(near_alpha >= far_alpha);
			prop_assert!(far_alpha > 0.0);
		}
	}
}
