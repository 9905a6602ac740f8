//! Aggregates the “business logic” layer.

pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod format;
pub mod workbook;

// re-export frequently-used items for convenience
pub use color::{ColorError, Palette, Rgb};
pub use config::{ConfigBuilder, EdgeColor, FontSize, RenderConfig};
pub use data::{FlowHeader, FlowRecord, SheetFlows};
pub use error::{ConfigError, ExportError, SankeyError, ValidationError};
pub use format::Locale;
pub use workbook::read_workbook;
