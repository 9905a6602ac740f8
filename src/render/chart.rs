//! A finished diagram: layout plus its SVG markup.

use crate::{
    core::{
        config::RenderConfig,
        constants::{MARGIN, TITLE_HEIGHT},
        data::{FlowHeader, SheetFlows},
        error::ValidationError,
    },
    render::{
        layout::{Extent, SankeyLayout},
        svg::{Sizing, render_body, svg_document},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyChart {
    /// Heading used in HTML output (the sheet name by default).
    pub title: String,
    pub header: FlowHeader,
    pub layout: SankeyLayout,
    pub width: u32,
    pub height: u32,
    body: String,
}

impl SankeyChart {
    /// Lay out and draw one sheet.
    pub fn build(
        flows: &SheetFlows,
        title: &str,
        cfg: &RenderConfig,
    ) -> Result<Self, ValidationError> {
        let drawn_title = cfg.export_title_text(title);
        let top = MARGIN + if drawn_title.is_some() { TITLE_HEIGHT } else { 0.0 };
        let extent = Extent {
            x0: MARGIN,
            y0: top,
            x1: (f64::from(cfg.width) - MARGIN).max(MARGIN),
            y1: (f64::from(cfg.height) - MARGIN).max(top),
        };

        let layout = SankeyLayout::compute(&flows.records, cfg, extent)?;
        let body = render_body(&layout, cfg, &flows.header, drawn_title.as_deref());
        log::debug!(
            "{title}: {} node(s) in {} column(s)",
            layout.nodes.len(),
            layout.columns
        );

        Ok(Self {
            title: title.to_owned(),
            header: flows.header.clone(),
            layout,
            width: cfg.width,
            height: cfg.height,
            body,
        })
    }

    /// Standalone SVG at the configured pixel size.
    #[must_use]
    pub fn svg(&self) -> String {
        svg_document(&self.body, self.width, self.height, Sizing::Fixed)
    }

    /// SVG that fills its container's width, for HTML pages.
    #[must_use]
    pub fn svg_stretched(&self) -> String {
        svg_document(&self.body, self.width, self.height, Sizing::StretchWidth)
    }
}
