//! Canvas view of a knowledge graph with edge filtering, legend and controls.

mod component;
mod controls;
pub mod filter;
mod filter_panel;
mod legend;
pub mod palette;
mod render;
mod state;
mod surface;
mod tooltip;
mod types;

pub use component::{EMPTY_TEXT, GraphVisualization, LOADING_TEXT, ViewPhase};
pub use controls::{GraphControls, GraphStatsPanel};
pub use filter::{EdgeFilters, EdgeType, VisibleEdgeTypes, filter_edges, visible_links};
pub use filter_panel::EdgeFilterPanel;
pub use legend::{GraphLegend, types_to_hide, types_to_show};
pub use state::ZOOM_FACTOR;
pub use tooltip::{EdgeTooltip, TOOLTIP_DELAY_MS, TooltipContent, format_weight};
pub use types::{GraphData, GraphLink, GraphNode, LinkEnd};
