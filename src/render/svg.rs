//! SVG markup for a laid-out diagram.

use std::fmt::Write;

use crate::{
    core::{
        config::RenderConfig,
        constants::{FONT_FAMILY, LABEL_GAP, LINK_OPACITY, MARGIN},
        data::FlowHeader,
    },
    render::layout::SankeyLayout,
};

/// How the outer `<svg>` element is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Exact pixel size, for files and rasterizing.
    Fixed,
    /// Full container width, height from the aspect ratio.
    StretchWidth,
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Draw nodes, links, labels and the optional title.
///
/// Returns the markup that goes inside `<svg>`; see [`svg_document`].
pub fn render_body(
    layout: &SankeyLayout,
    cfg: &RenderConfig,
    header: &FlowHeader,
    title: Option<&str>,
) -> String {
    let mut out = String::with_capacity(256 * (layout.nodes.len() + layout.links.len()));
    // writing into a String cannot fail
    let _ = write_body(&mut out, layout, cfg, header, title);
    out
}

fn write_body(
    out: &mut String,
    layout: &SankeyLayout,
    cfg: &RenderConfig,
    header: &FlowHeader,
    title: Option<&str>,
) -> std::fmt::Result {
    write!(
        out,
        r#"<rect width="100%" height="100%" fill="{bg}"/>"#,
        bg = "#ffffff"
    )?;

    if let Some(t) = title {
        write!(
            out,
            r##"<text class="title" x="{x:.2}" y="{y:.2}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{fs:.2}" font-weight="bold" fill="#000000">{t}</text>"##,
            x = f64::from(cfg.width) / 2.0,
            y = MARGIN + cfg.font_size * 1.6,
            fs = cfg.font_size * 1.4,
            t = escape_xml(t),
        )?;
    }

    out.push_str(r#"<g class="links" fill="none">"#);
    for link in &layout.links {
        let s = &layout.nodes[link.source];
        let t = &layout.nodes[link.target];
        let (xs, xt) = (s.x1, t.x0);
        let xm = (xs + xt) / 2.0;
        let tip = format!(
            "{}: {}\n{}: {}\n{}: {}",
            header.source,
            s.name,
            header.target,
            t.name,
            header.value,
            cfg.format_value(link.value, link.unit.as_deref()),
        );
        write!(
            out,
            r#"<path class="link" d="M{xs:.2},{y0:.2}C{xm:.2},{y0:.2} {xm:.2},{y1:.2} {xt:.2},{y1:.2}" stroke="{c}" stroke-opacity="{LINK_OPACITY}" stroke-width="{w:.2}"><title>{tip}</title></path>"#,
            y0 = link.y0,
            y1 = link.y1,
            c = link.color,
            w = link.width.max(0.5),
            tip = escape_xml(&tip),
        )?;
    }
    out.push_str("</g>");

    let label_px = cfg.label_font_size.px();
    let last = layout.columns.saturating_sub(1);
    out.push_str(r#"<g class="nodes">"#);
    for node in &layout.nodes {
        let value = cfg.format_value(node.value, None);
        let name = escape_xml(&node.name);
        write!(
            out,
            r#"<g class="node"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{c}"><title>{name}: {v}</title></rect>"#,
            x = node.x0,
            y = node.y0,
            w = node.x1 - node.x0,
            h = (node.y1 - node.y0).max(0.5),
            c = node.color,
            v = escape_xml(&value),
        )?;

        let (lx, anchor) = if node.column == last && layout.columns > 1 {
            (node.x0 - LABEL_GAP, "end")
        } else {
            (node.x1 + LABEL_GAP, "start")
        };
        write!(
            out,
            r##"<text x="{lx:.2}" y="{ly:.2}" dy="0.35em" text-anchor="{anchor}" font-family="{FONT_FAMILY}" font-size="{label_px:.2}" fill="#000000">{name} - {v}</text></g>"##,
            ly = (node.y0 + node.y1) / 2.0,
            v = escape_xml(&value),
        )?;
    }
    out.push_str("</g>");
    Ok(())
}

/// Wrap a body from [`render_body`] into a standalone `<svg>` element.
#[must_use]
pub fn svg_document(body: &str, width: u32, height: u32, sizing: Sizing) -> String {
    let size = match sizing {
        Sizing::Fixed => format!(r#"width="{width}" height="{height}""#),
        Sizing::StretchWidth => r#"width="100%" preserveAspectRatio="xMinYMin meet""#.to_owned(),
    };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" {size} viewBox="0 0 {width} {height}">{body}</svg>"#
    )
}
