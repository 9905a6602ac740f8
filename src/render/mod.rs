pub mod chart;
pub mod export;
pub mod html;
pub mod layout;
pub mod svg;

pub use chart::SankeyChart;
pub use export::{ExportPaths, Exporter};
pub use html::render_page;
pub use layout::{Extent, Link, Node, SankeyLayout};
pub use svg::Sizing;
