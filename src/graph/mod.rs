//! Graph data, layout and display list. Nothing here touches the DOM except
//! [`load::fetch_graph`].

pub mod forces;
pub mod load;
pub mod model;
pub mod scene;
pub mod simulation;

pub use forces::Point;
pub use load::{LoadError, decode_response, fetch_graph};
pub use model::{Graph, GraphError, GraphPayload, Link, LinkEnd, Node, NodeId};
pub use scene::{Scene, compose};
pub use simulation::{Frame, Simulation};
