//! Run-time configuration object + fluent builder.

use std::{fmt, path::PathBuf, str::FromStr};

use crate::core::{
    color::Palette,
    constants::{
        DEFAULT_DECIMALS, DEFAULT_FONT_SIZE, DEFAULT_HEIGHT, DEFAULT_ITERATIONS,
        DEFAULT_LABEL_FONT_SIZE, DEFAULT_LANGUAGE, DEFAULT_NODE_PADDING, DEFAULT_NODE_WIDTH,
        DEFAULT_OUTPUT_DIR, DEFAULT_WIDTH, PX_PER_PT,
    },
    error::ConfigError,
    format::Locale,
};

/// A CSS font size restricted to `pt` and `px`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    Pt(f64),
    Px(f64),
}

impl FontSize {
    #[must_use]
    pub fn px(self) -> f64 {
        match self {
            Self::Pt(v) => v * PX_PER_PT,
            Self::Px(v) => v,
        }
    }
}

impl FromStr for FontSize {
    type Err = ConfigError;

    /// `17pt`, `14px` or a bare number (pixels).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        let err = || ConfigError::InvalidFontSize(s.to_owned());
        let (num, ctor): (&str, fn(f64) -> Self) = if let Some(n) = t.strip_suffix("pt") {
            (n, Self::Pt)
        } else if let Some(n) = t.strip_suffix("px") {
            (n, Self::Px)
        } else {
            (t.as_str(), Self::Px)
        };
        let v: f64 = num.trim().parse().map_err(|_| err())?;
        if v.is_finite() && v > 0.0 {
            Ok(ctor(v))
        } else {
            Err(err())
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pt(v) => write!(f, "{v}pt"),
            Self::Px(v) => write!(f, "{v}px"),
        }
    }
}

/// Which end of a link decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeColor {
    From,
    #[default]
    To,
}

impl FromStr for EdgeColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "from" | "source" => Ok(Self::From),
            "to" | "target" => Ok(Self::To),
            _ => Err(ConfigError::InvalidEdgeColor(s.to_owned())),
        }
    }
}

/// Immutable parameters handed to the layout and renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// General text size in pixels
    pub font_size: f64,
    pub label_font_size: FontSize,
    pub node_width: f64,
    pub node_padding: f64,
    pub unit: String,
    pub decimals: Option<u32>,
    pub language: String,
    pub locale: Locale,
    pub palette: Palette,
    pub edge_color: EdgeColor,
    pub export_title: bool,
    pub title_max_chars: Option<usize>,
    /// `<title>` of per-chart HTML pages; the chart title when unset.
    pub title_html: Option<String>,
    pub iterations: usize,
    pub output_dir: PathBuf,
}

impl RenderConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Format a value the way every label in the chart shows it.
    #[must_use]
    pub fn format_value(&self, x: f64, unit: Option<&str>) -> String {
        crate::core::format::format_value(
            x,
            self.decimals,
            unit.unwrap_or(&self.unit),
            self.locale,
        )
    }

    /// Title as drawn onto exports, or `None` when titles are off.
    #[must_use]
    pub fn export_title_text(&self, title: &str) -> Option<String> {
        if !self.export_title || title.is_empty() {
            return None;
        }
        Some(match self.title_max_chars {
            Some(n) => title.chars().take(n).collect(),
            None => title.to_owned(),
        })
    }

    /// Browser tab title for the HTML page of a chart called `title`.
    #[must_use]
    pub fn html_title<'a>(&'a self, title: &'a str) -> &'a str {
        self.title_html.as_deref().unwrap_or(title)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            label_font_size: FontSize::Pt(17.0),
            node_width: DEFAULT_NODE_WIDTH,
            node_padding: DEFAULT_NODE_PADDING,
            unit: String::new(),
            decimals: Some(DEFAULT_DECIMALS),
            language: DEFAULT_LANGUAGE.to_owned(),
            locale: Locale {
                decimal: ',',
                group: Some('.'),
            },
            palette: Palette::default(),
            edge_color: EdgeColor::default(),
            export_title: false,
            title_max_chars: None,
            title_html: None,
            iterations: DEFAULT_ITERATIONS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Fluent builder; everything is validated in `build`.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    width: Option<u32>,
    height: Option<u32>,
    font_size: Option<f64>,
    label_font_size: Option<String>,
    node_width: Option<f64>,
    node_padding: Option<f64>,
    unit: Option<String>,
    decimals: Option<Option<u32>>,
    language: Option<String>,
    palette: Option<Palette>,
    edge_color: Option<EdgeColor>,
    export_title: bool,
    title_max_chars: Option<usize>,
    title_html: Option<String>,
    iterations: Option<usize>,
    output_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn width(mut self, v: u32) -> Self {
        self.width = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn height(mut self, v: u32) -> Self {
        self.height = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn font_size(mut self, v: f64) -> Self {
        self.font_size = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn label_text_font_size(mut self, s: impl Into<String>) -> Self {
        self.label_font_size = Some(s.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn node_width(mut self, v: f64) -> Self {
        self.node_width = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn node_padding(mut self, v: f64) -> Self {
        self.node_padding = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn unit(mut self, s: impl Into<String>) -> Self {
        self.unit = Some(s.into());
        self
    }
    /// `None` disables rounding and locale formatting.
    #[inline]
    #[must_use]
    pub fn decimals(mut self, d: Option<u32>) -> Self {
        self.decimals = Some(d);
        self
    }
    #[inline]
    #[must_use]
    pub fn language(mut self, s: impl Into<String>) -> Self {
        self.language = Some(s.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn palette(mut self, p: Palette) -> Self {
        self.palette = Some(p);
        self
    }
    #[inline]
    #[must_use]
    pub fn edge_color(mut self, e: EdgeColor) -> Self {
        self.edge_color = Some(e);
        self
    }
    #[inline]
    #[must_use]
    pub fn export_title(mut self, on: bool) -> Self {
        self.export_title = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn title_max_chars(mut self, n: Option<usize>) -> Self {
        self.title_max_chars = n;
        self
    }
    #[inline]
    #[must_use]
    pub fn title_html(mut self, t: impl Into<String>) -> Self {
        self.title_html = Some(t.into()).filter(|t: &String| !t.is_empty());
        self
    }
    #[inline]
    #[must_use]
    pub fn iterations(mut self, n: usize) -> Self {
        self.iterations = Some(n);
        self
    }
    #[inline]
    #[must_use]
    pub fn output_dir(mut self, p: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(p.into());
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let d = RenderConfig::default();

        let width = self.width.unwrap_or(d.width);
        let height = self.height.unwrap_or(d.height);
        for (field, v) in [("width", width), ("height", height)] {
            if v == 0 {
                return Err(ConfigError::InvalidDimension { field, value: 0.0 });
            }
        }

        let font_size = positive("fontsize", self.font_size.unwrap_or(d.font_size))?;
        let node_width = positive("node_width", self.node_width.unwrap_or(d.node_width))?;
        let node_padding = self.node_padding.unwrap_or(d.node_padding);
        if !node_padding.is_finite() || node_padding < 0.0 {
            return Err(ConfigError::InvalidDimension {
                field: "node_padding",
                value: node_padding,
            });
        }

        let label_font_size = self
            .label_font_size
            .as_deref()
            .unwrap_or(DEFAULT_LABEL_FONT_SIZE)
            .parse()?;

        let language = self.language.unwrap_or(d.language);
        let locale = Locale::parse(&language)?;

        let palette = self.palette.unwrap_or(d.palette);
        if palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        Ok(RenderConfig {
            width,
            height,
            font_size,
            label_font_size,
            node_width,
            node_padding,
            unit: self.unit.unwrap_or(d.unit),
            decimals: self.decimals.unwrap_or(d.decimals),
            language,
            locale,
            palette,
            edge_color: self.edge_color.unwrap_or(d.edge_color),
            export_title: self.export_title,
            title_max_chars: self.title_max_chars,
            title_html: self.title_html,
            iterations: self.iterations.unwrap_or(d.iterations),
            output_dir: self.output_dir.unwrap_or(d.output_dir),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}

/// Ergonomic `?` on a builder chain.
impl From<ConfigBuilder> for Result<RenderConfig, ConfigError> {
    fn from(b: ConfigBuilder) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builder() {
        let built = RenderConfig::builder().build().unwrap();
        assert_eq!(built, RenderConfig::default());
        assert_eq!(built.width, 1400);
        assert_eq!(built.label_font_size, FontSize::Pt(17.0));
    }

    #[test]
    fn font_sizes() {
        assert_eq!("17pt".parse::<FontSize>(), Ok(FontSize::Pt(17.0)));
        assert_eq!(" 14PX ".parse::<FontSize>(), Ok(FontSize::Px(14.0)));
        assert_eq!("12".parse::<FontSize>(), Ok(FontSize::Px(12.0)));
        assert!("-3pt".parse::<FontSize>().is_err());
        assert!("large".parse::<FontSize>().is_err());
        assert!((FontSize::Pt(12.0).px() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            RenderConfig::builder().width(0).build(),
            Err(ConfigError::InvalidDimension { field: "width", .. })
        ));
        assert!(matches!(
            RenderConfig::builder().node_width(-1.0).build(),
            Err(ConfigError::InvalidDimension { field: "node_width", .. })
        ));
        assert!(matches!(
            RenderConfig::builder().language("klingon").build(),
            Err(ConfigError::UnknownLanguage(_))
        ));
        assert!(matches!(
            RenderConfig::builder()
                .palette(Palette::Cycle(Vec::new()))
                .build(),
            Err(ConfigError::EmptyPalette)
        ));
    }

    #[test]
    fn edge_color_names() {
        assert_eq!("To".parse::<EdgeColor>(), Ok(EdgeColor::To));
        assert_eq!("from".parse::<EdgeColor>(), Ok(EdgeColor::From));
        assert!("Value".parse::<EdgeColor>().is_err());
    }

    #[test]
    fn title_truncation() {
        let cfg = RenderConfig::builder()
            .export_title(true)
            .title_max_chars(Some(5))
            .build()
            .unwrap();
        assert_eq!(cfg.export_title_text("Energieflüsse").as_deref(), Some("Energ"));
        assert_eq!(RenderConfig::default().export_title_text("x"), None);
    }

    #[test]
    fn html_title_defaults_to_chart_title() {
        assert_eq!(RenderConfig::default().html_title("Sheet1"), "Sheet1");
        let cfg = RenderConfig::builder().title_html("Energy 2024").build().unwrap();
        assert_eq!(cfg.html_title("Sheet1"), "Energy 2024");
        let cfg = RenderConfig::builder().title_html("").build().unwrap();
        assert_eq!(cfg.title_html, None);
    }

    #[test]
    fn labels_use_configured_unit_and_locale() {
        let cfg = RenderConfig::builder()
            .unit("MWh")
            .language("en_US")
            .build()
            .unwrap();
        assert_eq!(cfg.format_value(1234.567, None), "1,234.57 MWh");
        assert_eq!(cfg.format_value(2.0, Some("t")), "2 t");
    }
}
