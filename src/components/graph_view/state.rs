use crate::config::{Style, ViewConfig};
use crate::graph::{Graph, Point, Scene, Simulation, compose};

/// Everything the animation loop needs between frames.
pub struct GraphViewState {
	pub graph: Graph,
	pub simulation: Simulation,
	pub style: Style,
	pub width: f64,
	pub height: f64,
}

impl GraphViewState {
	pub fn new(graph: Graph, config: &ViewConfig) -> Self {
		let (cx, cy) = config.center();
		let simulation = Simulation::new(&graph, &config.forces, Point::new(cx, cy));
		Self {
			graph,
			simulation,
			style: config.style.clone(),
			width: config.width,
			height: config.height,
		}
	}

	/// One simulation step; `false` once the layout has settled.
	pub fn tick(&mut self) -> bool {
		self.simulation.tick()
	}

	pub fn scene(&self) -> Scene {
		compose(&self.graph, &self.simulation.frame(), &self.style)
	}
}
