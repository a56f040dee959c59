//! Fetching and validating the graph payload.

use log::{debug, error, info};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::model::{Graph, GraphError, GraphPayload};

/// Why the graph could not be shown. `Clone` so it can sit in a reactive resource.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LoadError {
	#[error("could not reach the graph endpoint: {0}")]
	Network(String),
	#[error("graph endpoint answered {status}: {message}")]
	Status { status: u16, message: String },
	#[error("graph payload is not {{ nodes, links }} JSON: {0}")]
	Decode(String),
	#[error("graph payload is inconsistent: {0}")]
	Invalid(#[from] GraphError),
}

/// Error body the data endpoint sends alongside a failing status.
#[derive(Deserialize)]
struct ErrorBody {
	error: String,
}

/// Turns a status and body into a validated graph.
pub fn decode_response(status: u16, body: &str) -> Result<Graph, LoadError> {
	if !(200..300).contains(&status) {
		let message = serde_json::from_str::<ErrorBody>(body)
			.map(|b| b.error)
			.unwrap_or_else(|_| body.trim().to_owned());
		let message = if message.is_empty() {
			"no error message".to_owned()
		} else {
			message
		};
		return Err(LoadError::Status { status, message });
	}

	let payload: GraphPayload =
		serde_json::from_str(body).map_err(|e| LoadError::Decode(e.to_string()))?;
	let graph = Graph::from_payload(payload)?;
	info!(
		"loaded graph: {} nodes, {} links",
		graph.nodes().len(),
		graph.links().len()
	);
	Ok(graph)
}

/// `GET`s `endpoint` and decodes the body. No retries, no timeout.
pub async fn fetch_graph(endpoint: &str) -> Result<Graph, LoadError> {
	debug!("fetching graph from {endpoint}");
	let result = fetch_body(endpoint)
		.await
		.and_then(|(status, body)| decode_response(status, &body));
	if let Err(err) = &result {
		error!("{err}");
	}
	result
}

async fn fetch_body(endpoint: &str) -> Result<(u16, String), LoadError> {
	let window = web_sys::window().ok_or_else(|| LoadError::Network("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_str(endpoint))
		.await
		.and_then(|value| value.dyn_into())
		.map_err(network)?;
	let body = JsFuture::from(response.text().map_err(network)?)
		.await
		.map_err(network)?
		.as_string()
		.unwrap_or_default();
	Ok((response.status(), body))
}

fn network(value: JsValue) -> LoadError {
	let message = value
		.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{value:?}"));
	LoadError::Network(message)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::{LinkEnd, NodeId};

	#[test]
	fn ok_body_decodes() {
		let graph = decode_response(
			200,
			r#"{"nodes":[{"id":"a","name":"A"}],"links":[]}"#,
		)
		.unwrap();
		assert_eq!(graph.nodes().len(), 1);
	}

	#[test]
	fn server_error_message_is_surfaced() {
		let err = decode_response(500, r#"{"error":"endpoint timed out"}"#).unwrap_err();
		assert_eq!(
			err,
			LoadError::Status {
				status: 500,
				message: "endpoint timed out".into()
			}
		);
		assert_eq!(err.to_string(), "graph endpoint answered 500: endpoint timed out");
	}

	#[test]
	fn plain_error_body_is_kept() {
		let err = decode_response(404, "Not Found\n").unwrap_err();
		assert_eq!(
			err,
			LoadError::Status {
				status: 404,
				message: "Not Found".into()
			}
		);
	}

	#[test]
	fn empty_error_body() {
		let err = decode_response(502, "").unwrap_err();
		assert!(matches!(err, LoadError::Status { status: 502, ref message } if message == "no error message"));
	}

	#[test]
	fn non_json_body_is_a_decode_error() {
		let err = decode_response(200, "<html></html>").unwrap_err();
		assert!(matches!(err, LoadError::Decode(_)));
	}

	#[test]
	fn missing_nodes_is_a_decode_error() {
		let err = decode_response(200, r#"{"links":[]}"#).unwrap_err();
		assert!(matches!(err, LoadError::Decode(_)));
	}

	#[test]
	fn dangling_link_is_invalid() {
		let err = decode_response(
			200,
			r#"{"nodes":[{"id":"a"}],"links":[{"source":"x","target":"a"}]}"#,
		)
		.unwrap_err();
		assert_eq!(
			err,
			LoadError::Invalid(GraphError::UnknownEndpoint {
				link: 0,
				end: LinkEnd::Source,
				id: NodeId::from("x"),
			})
		);
	}
}
