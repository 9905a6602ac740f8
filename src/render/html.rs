//! Self-contained HTML pages: one chart per sheet, or all sheets stacked.

use std::fmt::Write;

use crate::{
    core::{config::RenderConfig, constants::FONT_FAMILY},
    render::{chart::SankeyChart, svg::escape_xml},
};

const STYLE: &str = "\
body{margin:0;padding:1em;background:#ffffff;}\
h1,h2{font-weight:normal;margin:.5em 0;}\
.sankey svg{display:block;width:100%;height:auto;}\
.sankey .link{transition:stroke-opacity .15s;}\
.sankey .link:hover{stroke-opacity:.9;}\
.sankey .node:hover rect{opacity:.8;}";

/// `de` from `de_DE.UTF-8`.
fn html_lang(language: &str) -> String {
    let lang = language
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match lang.as_str() {
        "" | "c" | "posix" => "en".to_owned(),
        _ => lang,
    }
}

/// Render `charts` into one page titled `page_title`.
///
/// Each chart gets its own section with its title as heading; with a
/// single chart this is the per-sheet page, with several the workbook
/// overview.
#[must_use]
pub fn render_page(page_title: &str, charts: &[&SankeyChart], cfg: &RenderConfig) -> String {
    let mut out = String::with_capacity(1024 + charts.len() * 16 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>body{{font-family:{FONT_FAMILY};font-size:{fs}px;}}{STYLE}</style>\n\
         </head>\n<body>\n",
        lang = html_lang(&cfg.language),
        title = escape_xml(page_title),
        fs = cfg.font_size,
    );

    if charts.len() > 1 {
        let _ = writeln!(out, "<h1>{}</h1>", escape_xml(page_title));
    }
    for chart in charts {
        let _ = write!(
            out,
            "<section class=\"sankey\">\n<h2>{}</h2>\n{}\n</section>\n",
            escape_xml(&chart.title),
            chart.svg_stretched()
        );
    }
    out.push_str("</body>\n</html>\n");
    out
}
