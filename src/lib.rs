//! Public-facing crate root – re-exports + one-shot helpers.
//!
//! Reads (source, target, value) rows from spreadsheet sheets and renders
//! one Sankey diagram per sheet as PNG, SVG and HTML.
//!
//! ```rust,no_run
//! use sankey_sheet::{RenderConfig, create_sankeys_from_workbook};
//!
//! let cfg = RenderConfig::builder()
//!     .unit("GWh")
//!     .decimals(Some(1))
//!     .output_dir("./out")
//!     .build()?;
//! create_sankeys_from_workbook("Sankey.xlsx", &["Example A"], &cfg)?;
//! # Ok::<(), sankey_sheet::SankeyError>(())
//! ```

pub mod cli;
pub mod core;
pub mod render;

use std::path::Path;

pub use crate::core::{
    color::{ColorError, Palette, Rgb},
    config::{ConfigBuilder, EdgeColor, FontSize, RenderConfig},
    data::{FlowHeader, FlowRecord, SheetFlows},
    error::{ConfigError, ExportError, SankeyError, ValidationError},
    format::{Locale, format_number, format_value, round_to},
    workbook::read_workbook,
};

pub use render::{ExportPaths, Exporter, SankeyChart, SankeyLayout};

use render::export::sanitize_file_stem;

/// Build one diagram from `records` and, when `filename` is given, write
/// `filename.{png,svg,html}`.
///
/// `filename` has no extension; missing parent directories are created.
pub fn create_and_save_sankey(
    records: &[FlowRecord],
    filename: Option<&Path>,
    title: &str,
    cfg: &RenderConfig,
) -> Result<SankeyChart, SankeyError> {
    let flows = SheetFlows::from_records(title, records)?;
    let chart = SankeyChart::build(&flows, title, cfg)?;

    if let Some(f) = filename {
        Exporter::new().save(&chart, f, cfg)?;
    }
    Ok(chart)
}

/// Render every requested sheet (all sheets when `sheets` is empty) of the
/// workbook at `file` into `cfg.output_dir`.
///
/// Per sheet: `<stem> <sheet>.{png,svg,html}`; plus `<stem>.html` with all
/// charts. Nothing is written unless every sheet loads and lays out.
pub fn create_sankeys_from_workbook<S: AsRef<str>>(
    file: impl AsRef<Path>,
    sheets: &[S],
    cfg: &RenderConfig,
) -> Result<Vec<SankeyChart>, SankeyError> {
    let file = file.as_ref();
    let sheet_flows = read_workbook(file, sheets)?;

    let charts = sheet_flows
        .iter()
        .map(|flows| SankeyChart::build(flows, &flows.name, cfg))
        .collect::<Result<Vec<_>, _>>()?;

    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sankey".to_owned());

    let exporter = Exporter::new();
    for chart in &charts {
        let name = sanitize_file_stem(&format!("{stem} {}", chart.title));
        exporter.save(chart, &cfg.output_dir.join(name), cfg)?;
    }
    let overview = cfg
        .output_dir
        .join(format!("{}.html", sanitize_file_stem(&stem)));
    exporter.save_overview(&charts, &overview, &stem, cfg)?;

    Ok(charts)
}
