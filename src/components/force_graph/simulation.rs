//! Iterative force simulation for the participant graph.
//!
//! Each tick cools `alpha` towards `alpha_target`, lets every force nudge
//! node velocities in proportion to `alpha`, then integrates positions with
//! velocity decay. Forces run in a fixed order: many-body repulsion, link
//! springs, centering. Pinned axes (`fx`, `fy`) override integration.
//!
//! The simulation is stepped by the host's animation loop; see [`Simulation::step`].

use std::f64::consts::PI;

/// Radius scale of the initial phyllotaxis layout.
const INITIAL_RADIUS: f64 = 10.0;

/// A simulated node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned x position, if any.
	pub fx: Option<f64>,
	/// Pinned y position, if any.
	pub fy: Option<f64>,
}

impl Default for SimNode {
	fn default() -> Self {
		Self::unplaced()
	}
}

impl SimNode {
	/// A node with no position yet. [`Simulation::set_nodes`] places it.
	pub fn unplaced() -> Self {
		Self {
			x: f64::NAN,
			y: f64::NAN,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
		}
	}

	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}

	pub fn pin(&mut self, x: f64, y: f64) {
		self.fx = Some(x);
		self.fy = Some(y);
	}

	pub fn unpin(&mut self) {
		self.fx = None;
		self.fy = None;
	}
}

/// A spring between two node indices with a rest length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimLink {
	pub source: usize,
	pub target: usize,
	pub distance: f64,
}

/// Cooling and damping parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParameters {
	/// The simulation stops once alpha falls below this.
	pub alpha_min: f64,
	/// Fraction of the gap to `alpha_target` closed per tick.
	pub alpha_decay: f64,
	/// Fraction of velocity kept per tick.
	pub velocity_retention: f64,
	/// Many-body strength; negative repels. Zero disables the force.
	pub charge_strength: f64,
	/// Closest distance used by the many-body force.
	pub charge_distance_min: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			alpha_min,
			// reaches alpha_min after 300 ticks
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_retention: 0.6,
			charge_strength: -30.0,
			charge_distance_min: 1.0,
		}
	}
}

/// What a call to [`Simulation::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationEvent {
	/// Ran one tick; still running.
	Tick,
	/// Ran one tick and alpha dropped below `alpha_min`; now stopped.
	Settled,
}

/// Linear congruential generator used to separate coincident nodes.
#[derive(Clone, Debug)]
struct Lcg(u32);

impl Lcg {
	fn next(&mut self) -> f64 {
		self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		self.0 as f64 / 4_294_967_296.0
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// Force simulation state.
#[derive(Clone, Debug)]
pub struct Simulation {
	params: SimulationParameters,
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	link_strength: Vec<f64>,
	link_bias: Vec<f64>,
	center: Option<(f64, f64)>,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	rng: Lcg,
}

impl Simulation {
	pub fn new(params: SimulationParameters) -> Self {
		Self {
			params,
			nodes: Vec::new(),
			links: Vec::new(),
			link_strength: Vec::new(),
			link_bias: Vec::new(),
			center: None,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			rng: Lcg(1),
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn node_mut(&mut self, index: usize) -> Option<&mut SimNode> {
		self.nodes.get_mut(index)
	}

	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	/// Rest length of every bound link, in link order.
	pub fn link_distances(&self) -> Vec<f64> {
		self.links.iter().map(|l| l.distance).collect()
	}

	/// Bind nodes. Pinned nodes start at their pin; nodes without a position
	/// are laid out on a phyllotaxis spiral around the origin.
	pub fn set_nodes(&mut self, nodes: Vec<SimNode>) {
		let initial_angle = PI * (3.0 - 5f64.sqrt());
		self.nodes = nodes;
		for (i, node) in self.nodes.iter_mut().enumerate() {
			if let Some(fx) = node.fx {
				node.x = fx;
			}
			if let Some(fy) = node.fy {
				node.y = fy;
			}
			if node.x.is_nan() || node.y.is_nan() {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * initial_angle;
				node.x = radius * angle.cos();
				node.y = radius * angle.sin();
			}
			if node.vx.is_nan() || node.vy.is_nan() {
				node.vx = 0.0;
				node.vy = 0.0;
			}
		}
		self.initialize_links();
	}

	/// Bind links. Links with an endpoint outside the node list are dropped.
	pub fn set_links(&mut self, links: Vec<SimLink>) {
		self.links = links;
		self.initialize_links();
	}

	fn initialize_links(&mut self) {
		let n = self.nodes.len();
		self.links.retain(|l| l.source < n && l.target < n);

		let mut degree = vec![0usize; n];
		for link in &self.links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		self.link_bias = self
			.links
			.iter()
			.map(|l| {
				let (s, t) = (degree[l.source] as f64, degree[l.target] as f64);
				s / (s + t)
			})
			.collect();
		self.link_strength = self
			.links
			.iter()
			.map(|l| 1.0 / degree[l.source].min(degree[l.target]) as f64)
			.collect();
	}

	/// Pull the layout's centroid to `(x, y)`.
	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = Some((x, y));
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha;
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn restart(&mut self) {
		self.running = true;
	}

	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Advance one animation frame. Returns `None` while stopped.
	pub fn step(&mut self) -> Option<SimulationEvent> {
		if !self.running {
			return None;
		}
		self.tick();
		if self.alpha < self.params.alpha_min {
			self.running = false;
			Some(SimulationEvent::Settled)
		} else {
			Some(SimulationEvent::Tick)
		}
	}

	/// Run one tick regardless of the running flag.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		let alpha = self.alpha;

		self.apply_many_body(alpha);
		self.apply_links(alpha);
		self.apply_center();

		let retention = self.params.velocity_retention;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= retention;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= retention;
					node.y += node.vy;
				}
			}
		}
	}

	fn apply_many_body(&mut self, alpha: f64) {
		let strength = self.params.charge_strength;
		if strength == 0.0 {
			return;
		}
		let min2 = self.params.charge_distance_min * self.params.charge_distance_min;
		let n = self.nodes.len();
		for i in 0..n {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 {
					dx = self.rng.jiggle();
				}
				if dy == 0.0 {
					dy = self.rng.jiggle();
				}
				let mut l = dx * dx + dy * dy;
				if l < min2 {
					l = (min2 * l).sqrt();
				}
				let w = strength * alpha / l;
				dvx += dx * w;
				dvy += dy * w;
			}
			self.nodes[i].vx += dvx;
			self.nodes[i].vy += dvy;
		}
	}

	fn apply_links(&mut self, alpha: f64) {
		for (i, link) in self.links.iter().enumerate() {
			let (s, t) = (self.nodes[link.source], self.nodes[link.target]);
			let mut dx = t.x + t.vx - s.x - s.vx;
			let mut dy = t.y + t.vy - s.y - s.vy;
			if dx == 0.0 {
				dx = self.rng.jiggle();
			}
			if dy == 0.0 {
				dy = self.rng.jiggle();
			}
			let len = (dx * dx + dy * dy).sqrt();
			let k = (len - link.distance) / len * alpha * self.link_strength[i];
			let (dx, dy) = (dx * k, dy * k);
			let bias = self.link_bias[i];

			let target = &mut self.nodes[link.target];
			target.vx -= dx * bias;
			target.vy -= dy * bias;
			let source = &mut self.nodes[link.source];
			source.vx += dx * (1.0 - bias);
			source.vy += dy * (1.0 - bias);
		}
	}

	fn apply_center(&mut self) {
		let Some((cx, cy)) = self.center else {
			return;
		};
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (sx, sy) = (sx / n - cx, sy / n - cy);
		for node in &mut self.nodes {
			node.x -= sx;
			node.y -= sy;
		}
	}

	/// Index of the node closest to `(x, y)` within `radius`.
	pub fn find(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
		let mut best = None;
		let mut best_d2 = radius * radius;
		for (i, node) in self.nodes.iter().enumerate() {
			let (dx, dy) = (x - node.x, y - node.y);
			let d2 = dx * dx + dy * dy;
			if d2 < best_d2 {
				best = Some(i);
				best_d2 = d2;
			}
		}
		best
	}
}
