//! Write charts to disk as PNG, SVG and HTML.
//!
//! PNG output rasterizes the chart's own SVG in-process with `resvg`; the
//! font database is loaded once per [`Exporter`] and reused for every
//! chart.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use resvg::{
    tiny_skia,
    usvg::{self, fontdb},
};

use crate::{
    core::{config::RenderConfig, error::ExportError},
    render::{chart::SankeyChart, html::render_page},
};

/// Preferred faces for `sans-serif`, matching the SVG font stack.
const SANS_FAMILIES: [&str; 3] = ["Helvetica", "Arial", "DejaVu Sans"];

/// Files written for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub png: PathBuf,
    pub svg: PathBuf,
    pub html: PathBuf,
}

pub struct Exporter {
    options: usvg::Options<'static>,
}

impl Exporter {
    /// Load system fonts for rasterizing.
    ///
    /// Without any font the PNG still renders, minus its text.
    #[must_use]
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        let db = options.fontdb_mut();
        db.load_system_fonts();

        if db.is_empty() {
            log::warn!("no system fonts found; png labels will be missing");
        } else if let Some(family) = pick_sans_family(db) {
            db.set_sans_serif_family(family);
        }
        Self { options }
    }

    /// Rasterize `chart` to PNG bytes.
    pub fn render_png(&self, chart: &SankeyChart) -> Result<Vec<u8>, ExportError> {
        let tree = usvg::Tree::from_str(&chart.svg(), &self.options)
            .map_err(|e| ExportError::Svg(e.to_string()))?;
        let size = tree.size().to_int_size();
        let mut pixmap =
            tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(ExportError::Pixmap {
                width: size.width(),
                height: size.height(),
            })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|e| ExportError::Png(e.to_string()))
    }

    /// Write `<filename>.png`, `.svg` and `.html`, creating the parent
    /// directory when needed.
    pub fn save(
        &self,
        chart: &SankeyChart,
        filename: &Path,
        cfg: &RenderConfig,
    ) -> Result<ExportPaths, ExportError> {
        if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }

        let paths = ExportPaths {
            png: with_suffix(filename, "png"),
            svg: with_suffix(filename, "svg"),
            html: with_suffix(filename, "html"),
        };

        write_file(&paths.png, &self.render_png(chart)?)?;
        write_file(&paths.svg, chart.svg().as_bytes())?;
        write_file(
            &paths.html,
            render_page(cfg.html_title(&chart.title), &[chart], cfg).as_bytes(),
        )?;
        Ok(paths)
    }

    /// One HTML page with every chart, in order.
    pub fn save_overview(
        &self,
        charts: &[SankeyChart],
        path: &Path,
        title: &str,
        cfg: &RenderConfig,
    ) -> Result<(), ExportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }
        let refs: Vec<&SankeyChart> = charts.iter().collect();
        write_file(path, render_page(title, &refs, cfg).as_bytes())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

// --- Helpers ---

fn pick_sans_family(db: &fontdb::Database) -> Option<String> {
    let families: Vec<&str> = db
        .faces()
        .filter_map(|f| f.families.first().map(|(name, _)| name.as_str()))
        .collect();
    SANS_FAMILIES
        .iter()
        .find(|want| families.contains(want))
        .map(|s| (*s).to_owned())
        .or_else(|| {
            let mut all = families.clone();
            all.sort_unstable();
            all.first().map(|s| (*s).to_owned())
        })
}

/// `out/Book Sheet` + `png` -> `out/Book Sheet.png` (dots in the stem survive).
#[must_use]
pub fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Replace characters that cannot appear in file names.
#[must_use]
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn create_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{FlowRecord, SheetFlows};

    #[test]
    fn suffix_keeps_dots() {
        assert_eq!(
            with_suffix(Path::new("out/Book v1.2"), "svg"),
            PathBuf::from("out/Book v1.2.svg")
        );
    }

    #[test]
    fn file_stems() {
        assert_eq!(sanitize_file_stem("2024/25: Q1"), "2024_25_ Q1");
        assert_eq!(sanitize_file_stem("Example A"), "Example A");
    }

    #[test]
    fn html_page_title_can_differ_from_chart_title() {
        let flows = SheetFlows::from_records(
            "Sheet1",
            &[FlowRecord::new("Coal", "Power", 3.0)],
        )
        .unwrap();
        let cfg = RenderConfig::builder().title_html("Energy 2024").build().unwrap();
        let chart = SankeyChart::build(&flows, "Sheet1", &cfg).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let paths = Exporter::new()
            .save(&chart, &dir.path().join("energy"), &cfg)
            .unwrap();
        let html = std::fs::read_to_string(paths.html).unwrap();
        assert!(html.contains("<title>Energy 2024</title>"));
        assert!(html.contains("<h2>Sheet1</h2>"));
    }
}
