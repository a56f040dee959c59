//! Cooling force simulation over a validated [`Graph`].
//!
//! Each tick decays alpha, advances the `force_graph` step (many-body
//! repulsion) by an alpha-scaled time step, then applies the link and
//! center forces from [`forces`](super::forces) on the resulting positions.
//! The simulation settles once alpha drops below `alpha_min`; from then on
//! [`Simulation::tick`] is a no-op.

use std::f64::consts::PI;

use force_graph::{ForceGraph, NodeData, SimulationParameters};

use super::forces::{self, Point};
use super::model::{Graph, Link};
use crate::config::ForceConfig;

/// Spacing of the initial phyllotaxis spiral.
const INITIAL_RADIUS: f64 = 10.0;

/// Snapshot of node positions after a tick, in node order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub tick: u64,
	pub positions: Vec<Point>,
}

impl Frame {
	pub fn position(&self, node: usize) -> Option<Point> {
		self.positions.get(node).copied()
	}
}

pub struct Simulation {
	/// Library graph; node user data is the node's index in `points`.
	graph: ForceGraph<usize, ()>,
	links: Vec<Link>,
	degrees: Vec<usize>,
	points: Vec<Point>,
	center: Point,
	config: ForceConfig,
	alpha: f64,
	ticks: u64,
}

impl Simulation {
	pub fn new(data: &Graph, config: &ForceConfig, center: Point) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: (-config.charge_strength) as f32,
			// links are handled by forces::link, never added to the library graph
			force_spring: 0.0,
			force_max: config.max_force,
			node_speed: config.node_speed,
			damping_factor: config.damping,
		});

		let points: Vec<Point> = (0..data.nodes().len())
			.map(|i| initial_position(i, center))
			.collect();
		for (i, p) in points.iter().enumerate() {
			graph.add_node(NodeData {
				x: p.x as f32,
				y: p.y as f32,
				mass: config.node_mass,
				is_anchor: false,
				user_data: i,
			});
		}

		Self {
			graph,
			links: data.links().to_vec(),
			degrees: data.degrees(),
			points,
			center,
			config: config.clone(),
			alpha: 1.0,
			ticks: 0,
		}
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < self.config.alpha_min
	}

	/// Advances one iteration. Returns `false` without moving anything once
	/// the simulation has settled.
	pub fn tick(&mut self) -> bool {
		if self.is_settled() {
			return false;
		}
		self.alpha += (self.config.alpha_target - self.alpha) * self.config.alpha_decay;

		self.graph.update(self.config.time_step * self.alpha as f32);
		self.pull_positions();
		forces::link(
			&mut self.points,
			&self.links,
			&self.degrees,
			self.config.link_distance,
			self.alpha,
		);
		forces::center(&mut self.points, self.center);
		self.push_positions();

		self.ticks += 1;
		true
	}

	/// Ticks until settled or `max_ticks` is reached; returns ticks run.
	pub fn run(&mut self, max_ticks: u64) -> u64 {
		let mut ran = 0;
		while ran < max_ticks && self.tick() {
			ran += 1;
		}
		ran
	}

	pub fn frame(&self) -> Frame {
		Frame {
			tick: self.ticks,
			positions: self.points.clone(),
		}
	}

	fn pull_positions(&mut self) {
		let points = &mut self.points;
		self.graph.visit_nodes(|node| {
			points[node.data.user_data] = Point::new(node.x() as f64, node.y() as f64);
		});
	}

	fn push_positions(&mut self) {
		let points = &self.points;
		self.graph.visit_nodes_mut(|node| {
			let p = points[node.data.user_data];
			node.data.x = p.x as f32;
			node.data.y = p.y as f32;
		});
	}
}

/// Sunflower spiral around `center`; no two nodes start on the same spot.
fn initial_position(i: usize, center: Point) -> Point {
	let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
	let angle = i as f64 * PI * (3.0 - 5.0_f64.sqrt());
	Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}
