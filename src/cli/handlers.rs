use std::time::Instant;

use crate::{
    core::{color::Palette, config::RenderConfig, error::SankeyError},
    create_sankeys_from_workbook,
};

use super::parse::Cli;

/// Map parsed flags onto the config builder.
pub fn config_from_args(a: &Cli) -> Result<RenderConfig, SankeyError> {
    let mut b = RenderConfig::builder()
        .width(a.width)
        .height(a.height)
        .font_size(a.fontsize)
        .label_text_font_size(&a.label_text_font_size)
        .unit(&a.unit)
        .decimals(Some(a.decimals))
        .node_width(a.node_width)
        .node_padding(a.node_padding)
        .language(&a.language)
        .edge_color(a.edge_color_index)
        .export_title(a.export_title)
        .title_max_chars(a.title_max_chars)
        .output_dir(&a.output);

    if let Some(p) = &a.palette {
        b = b.palette(Palette::parse(p)?);
    }
    if let Some(t) = &a.title_html {
        b = b.title_html(t);
    }
    Ok(b.build()?)
}

/// Render the workbook named on the command line.
pub fn sankey(a: &Cli) -> Result<(), SankeyError> {
    let cfg = config_from_args(a)?;
    log::debug!("{cfg:?}");

    let t0 = Instant::now();
    let charts = create_sankeys_from_workbook(&a.file, a.sheets.as_slice(), &cfg)?;
    log::info!(
        "{} chart(s) written to {} in {} ms",
        charts.len(),
        cfg.output_dir.display(),
        t0.elapsed().as_millis()
    );
    Ok(())
}
