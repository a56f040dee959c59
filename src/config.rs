//! Fixed view parameters: endpoint, canvas size, force tuning and visual encoding.

/// Where the graph comes from and how it is laid out and drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
	/// Endpoint answering `GET` with `{ nodes, links }`.
	pub endpoint: String,
	/// Canvas width in logical units.
	pub width: f64,
	/// Canvas height in logical units.
	pub height: f64,
	/// Simulation parameters.
	pub forces: ForceConfig,
	/// Visual encoding.
	pub style: Style,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			endpoint: "/api/graph-data".into(),
			width: 800.0,
			height: 600.0,
			forces: ForceConfig::default(),
			style: Style::default(),
		}
	}
}

impl ViewConfig {
	/// Point the layout is centered on.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// Force and cooling parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceConfig {
	/// Rest length of a link.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Mass given to every node in the underlying simulation.
	pub node_mass: f32,
	/// Clamp on the force magnitude the library applies per step.
	pub max_force: f32,
	/// Library velocity scale.
	pub node_speed: f32,
	/// Library velocity damping per step.
	pub damping: f32,
	/// Time step handed to the library per tick, before alpha scaling.
	pub time_step: f32,
	/// The simulation settles once alpha drops below this.
	pub alpha_min: f64,
	/// Fraction of the remaining distance to `alpha_target` covered per tick.
	pub alpha_decay: f64,
	/// Value alpha decays toward.
	pub alpha_target: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		let alpha_min = 0.001_f64;
		Self {
			link_distance: 30.0,
			charge_strength: -200.0,
			node_mass: 10.0,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			time_step: 0.016,
			alpha_min,
			// ~300 ticks from 1.0 down to alpha_min
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			alpha_target: 0.0,
		}
	}
}

/// Visual encoding of links, nodes and labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
	pub background: &'static str,
	pub link_color: &'static str,
	pub link_width: f64,
	pub node_fill: &'static str,
	pub node_radius: f64,
	pub label_color: &'static str,
	pub label_font: &'static str,
	/// Label anchor relative to its node center.
	pub label_offset: (f64, f64),
}

impl Default for Style {
	fn default() -> Self {
		Self {
			background: "#ffffff",
			link_color: "#999",
			link_width: 1.0,
			node_fill: "blue",
			node_radius: 10.0,
			label_color: "#000000",
			label_font: "12px sans-serif",
			label_offset: (12.0, 4.0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_cooling_takes_about_300_ticks() {
		let forces = ForceConfig::default();
		let mut alpha = 1.0_f64;
		let mut ticks = 0;
		while alpha >= forces.alpha_min {
			alpha += (forces.alpha_target - alpha) * forces.alpha_decay;
			ticks += 1;
		}
		assert!((299..=301).contains(&ticks), "settled after {ticks} ticks");
	}

	#[test]
	fn center_is_middle_of_canvas() {
		assert_eq!(ViewConfig::default().center(), (400.0, 300.0));
	}
}
