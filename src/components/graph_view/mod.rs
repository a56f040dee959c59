mod component;
mod paint;
mod state;

pub use component::GraphView;
