//! Graph payload as served by the data endpoint, and its validated form.
//!
//! The payload is `{ nodes: [{ id, name }], links: [{ source, target }] }`.
//! [`Graph::from_payload`] resolves every link endpoint to a node index once,
//! so nothing downstream ever deals with a dangling reference.

use std::collections::HashMap;
use std::fmt;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

/// Node identity. The payload may carry it as a JSON string or number;
/// both normalise to the same key, so `1` and `"1"` name the same node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawId")]
pub struct NodeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Number(serde_json::Number),
}

impl From<RawId> for NodeId {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Text(s) => Self(s),
			RawId::Number(n) => Self(n.to_string()),
		}
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		Self(s.to_owned())
	}
}

impl NodeId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeRecord {
	pub id: NodeId,
	#[serde(default)]
	pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LinkRecord {
	pub source: NodeId,
	pub target: NodeId,
}

/// Raw body of the data endpoint. Both arrays are required.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphPayload {
	pub nodes: Vec<NodeRecord>,
	pub links: Vec<LinkRecord>,
}

/// Which end of a link failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEnd {
	Source,
	Target,
}

impl fmt::Display for LinkEnd {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			LinkEnd::Source => "source",
			LinkEnd::Target => "target",
		})
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
	#[error("link #{link}: {end} `{id}` does not match any node id")]
	UnknownEndpoint { link: usize, end: LinkEnd, id: NodeId },
}

/// A validated node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	/// Display label; the id when the payload carries no name.
	pub name: String,
}

/// A link between two node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: usize,
	pub target: usize,
}

/// Validated, immutable graph. Node order follows the payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<Node>,
	links: Vec<Link>,
}

impl Graph {
	/// Resolves link endpoints against node ids.
	///
	/// Duplicate ids are kept as separate nodes, but identity resolution is
	/// last-one-wins: a link naming a duplicated id attaches to the last node
	/// carrying it.
	pub fn from_payload(payload: GraphPayload) -> Result<Self, GraphError> {
		let mut index = HashMap::with_capacity(payload.nodes.len());
		let mut duplicates = 0usize;
		for (i, node) in payload.nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				duplicates += 1;
			}
		}
		if duplicates > 0 {
			warn!("graph payload has {duplicates} duplicate node id(s); links resolve to the last occurrence");
		}

		let resolve = |link: usize, end: LinkEnd, id: &NodeId| {
			index
				.get(id)
				.copied()
				.ok_or_else(|| GraphError::UnknownEndpoint {
					link,
					end,
					id: id.clone(),
				})
		};

		let links = payload
			.links
			.iter()
			.enumerate()
			.map(|(i, link)| -> Result<Link, GraphError> {
				Ok(Link {
					source: resolve(i, LinkEnd::Source, &link.source)?,
					target: resolve(i, LinkEnd::Target, &link.target)?,
				})
			})
			.collect::<Result<Vec<_>, GraphError>>()?;

		let nodes = payload
			.nodes
			.into_iter()
			.map(|record| Node {
				name: record.name.unwrap_or_else(|| record.id.to_string()),
				id: record.id,
			})
			.collect();

		Ok(Self { nodes, links })
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of link ends touching each node, in node order.
	pub fn degrees(&self) -> Vec<usize> {
		let mut degrees = vec![0; self.nodes.len()];
		for link in &self.links {
			degrees[link.source] += 1;
			degrees[link.target] += 1;
		}
		degrees
	}
}

impl TryFrom<GraphPayload> for Graph {
	type Error = GraphError;

	fn try_from(payload: GraphPayload) -> Result<Self, Self::Error> {
		Self::from_payload(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn payload(json: &str) -> GraphPayload {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn resolves_links_to_indices() {
		let graph = Graph::from_payload(payload(
			r#"{"nodes":[{"id":"a","name":"A"},{"id":"b","name":"B"}],
			    "links":[{"source":"b","target":"a"}]}"#,
		))
		.unwrap();

		assert_eq!(graph.nodes().len(), 2);
		assert_eq!(graph.links(), &[Link { source: 1, target: 0 }]);
		assert_eq!(graph.degrees(), vec![1, 1]);
	}

	#[test]
	fn numeric_and_string_ids_are_the_same_identity() {
		let graph = Graph::from_payload(payload(
			r#"{"nodes":[{"id":1,"name":"one"},{"id":"2","name":"two"}],
			    "links":[{"source":"1","target":2}]}"#,
		))
		.unwrap();

		assert_eq!(graph.links(), &[Link { source: 0, target: 1 }]);
	}

	#[test]
	fn dangling_endpoint_is_rejected() {
		let err = Graph::from_payload(payload(
			r#"{"nodes":[{"id":"a","name":"A"}],
			    "links":[{"source":"a","target":"ghost"}]}"#,
		))
		.unwrap_err();

		assert_eq!(
			err,
			GraphError::UnknownEndpoint {
				link: 0,
				end: LinkEnd::Target,
				id: NodeId::from("ghost"),
			}
		);
		assert_eq!(
			err.to_string(),
			"link #0: target `ghost` does not match any node id"
		);
	}

	#[test]
	fn duplicate_id_last_one_wins() {
		let graph = Graph::from_payload(payload(
			r#"{"nodes":[{"id":"a","name":"first"},{"id":"b","name":"B"},{"id":"a","name":"second"}],
			    "links":[{"source":"a","target":"b"}]}"#,
		))
		.unwrap();

		assert_eq!(graph.nodes().len(), 3);
		assert_eq!(graph.links(), &[Link { source: 2, target: 1 }]);
		assert_eq!(graph.degrees(), vec![0, 1, 1]);
	}

	#[test]
	fn missing_name_falls_back_to_id() {
		let graph =
			Graph::from_payload(payload(r#"{"nodes":[{"id":"Q90"}],"links":[]}"#)).unwrap();
		assert_eq!(graph.nodes()[0].name, "Q90");
	}

	#[test]
	fn extra_fields_are_ignored() {
		let graph = Graph::from_payload(payload(
			r#"{"nodes":[{"id":"http://dbpedia.org/resource/Paris","name":"Paris","population":2165423}],
			    "links":[]}"#,
		))
		.unwrap();
		assert_eq!(graph.nodes()[0].name, "Paris");
	}

	#[test]
	fn missing_links_array_does_not_decode() {
		assert!(serde_json::from_str::<GraphPayload>(r#"{"nodes":[]}"#).is_err());
	}

	#[test]
	fn boolean_id_does_not_decode() {
		assert!(
			serde_json::from_str::<GraphPayload>(r#"{"nodes":[{"id":true}],"links":[]}"#).is_err()
		);
	}

	#[test]
	fn self_link_counts_twice() {
		let graph = Graph::from_payload(payload(
			r#"{"nodes":[{"id":"a"}],"links":[{"source":"a","target":"a"}]}"#,
		))
		.unwrap();
		assert_eq!(graph.degrees(), vec![2]);
	}
}
