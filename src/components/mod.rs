//! UI components.

pub mod graph_visualization;
