//! Display list for one frame: what to draw, independent of the surface.

use super::forces::Point;
use super::model::{Graph, Node};
use super::simulation::Frame;
use crate::config::Style;

#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleShape {
	pub cx: f64,
	pub cy: f64,
	pub r: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape {
	pub x: f64,
	pub y: f64,
	pub text: String,
}

/// Lines for links, circles for nodes, labels for node names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub lines: Vec<LineShape>,
	pub circles: Vec<CircleShape>,
	pub labels: Vec<LabelShape>,
}

/// Lays out `graph` at the positions in `frame`. Pure: the same frame always
/// composes to the same scene.
pub fn compose(graph: &Graph, frame: &Frame, style: &Style) -> Scene {
	let lines = graph
		.links()
		.iter()
		.filter_map(|link| {
			let (s, t) = (frame.position(link.source)?, frame.position(link.target)?);
			Some(LineShape {
				x1: s.x,
				y1: s.y,
				x2: t.x,
				y2: t.y,
			})
		})
		.collect();

	let circles = placed(graph, frame)
		.map(|(_, p)| CircleShape {
			cx: p.x,
			cy: p.y,
			r: style.node_radius,
		})
		.collect();

	let (dx, dy) = style.label_offset;
	let labels = placed(graph, frame)
		.map(|(node, p)| LabelShape {
			x: p.x + dx,
			y: p.y + dy,
			text: node.name.clone(),
		})
		.collect();

	Scene {
		lines,
		circles,
		labels,
	}
}

/// Nodes paired with their position; nodes missing from the frame are skipped.
fn placed<'a>(graph: &'a Graph, frame: &'a Frame) -> impl Iterator<Item = (&'a Node, Point)> + 'a {
	graph
		.nodes()
		.iter()
		.enumerate()
		.filter_map(move |(i, node)| frame.position(i).map(|p| (node, p)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::GraphPayload;
	use pretty_assertions::assert_eq;

	fn two_nodes() -> Graph {
		let payload: GraphPayload = serde_json::from_str(
			r#"{"nodes":[{"id":"a","name":"A"},{"id":"b","name":"B"}],
			    "links":[{"source":"a","target":"b"}]}"#,
		)
		.unwrap();
		Graph::from_payload(payload).unwrap()
	}

	#[test]
	fn composes_shapes_at_frame_positions() {
		let frame = Frame {
			tick: 7,
			positions: vec![Point::new(100.0, 50.0), Point::new(130.0, 90.0)],
		};

		let scene = compose(&two_nodes(), &frame, &Style::default());

		assert_eq!(
			scene,
			Scene {
				lines: vec![LineShape {
					x1: 100.0,
					y1: 50.0,
					x2: 130.0,
					y2: 90.0
				}],
				circles: vec![
					CircleShape {
						cx: 100.0,
						cy: 50.0,
						r: 10.0
					},
					CircleShape {
						cx: 130.0,
						cy: 90.0,
						r: 10.0
					},
				],
				labels: vec![
					LabelShape {
						x: 112.0,
						y: 54.0,
						text: "A".into()
					},
					LabelShape {
						x: 142.0,
						y: 94.0,
						text: "B".into()
					},
				],
			}
		);
	}

	#[test]
	fn compose_is_idempotent() {
		let graph = two_nodes();
		let frame = Frame {
			tick: 1,
			positions: vec![Point::new(1.5, 2.5), Point::new(-3.0, 4.0)],
		};
		let style = Style::default();

		assert_eq!(compose(&graph, &frame, &style), compose(&graph, &frame, &style));
	}

	#[test]
	fn empty_graph_composes_empty_scene() {
		let scene = compose(&Graph::default(), &Frame::default(), &Style::default());
		assert_eq!(scene, Scene::default());
	}
}
