//! Centralised error types used across the crate.

use std::{error::Error, fmt, io, path::PathBuf};

use crate::core::color::ColorError;

/// Precise configuration faults.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDimension { field: &'static str, value: f64 },
    InvalidFontSize(String),
    UnknownLanguage(String),
    InvalidEdgeColor(String),
    EmptyPalette,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimension { field, value } => {
                write!(f, "`{field}` must be a positive number, got {value}")
            }
            ConfigError::InvalidFontSize(s) => {
                write!(f, "invalid font size `{s}` (expected e.g. `17pt`, `14px` or `12`)")
            }
            ConfigError::UnknownLanguage(s) => {
                write!(f, "unsupported language `{s}` (try e.g. `de_DE.UTF-8` or `en_US`)")
            }
            ConfigError::InvalidEdgeColor(s) => {
                write!(f, "edge colour index must be `From` or `To`, got `{s}`")
            }
            ConfigError::EmptyPalette => f.write_str("palette must contain at least one colour"),
        }
    }
}
impl Error for ConfigError {}

/// Sheet content that cannot be turned into flows.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingColumns {
        sheet: String,
        found: usize,
    },
    BadValue {
        sheet: String,
        row: usize,
        text: String,
    },
    EmptyNode {
        sheet: String,
        row: usize,
    },
    NoFlows {
        sheet: String,
    },
    CircularLink {
        node: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingColumns { sheet, found } => write!(
                f,
                "sheet `{sheet}`: expected header with source, target and value columns, found {found} column(s)"
            ),
            ValidationError::BadValue { sheet, row, text } => {
                write!(f, "sheet `{sheet}`, row {row}: invalid value '{text}'")
            }
            ValidationError::EmptyNode { sheet, row } => {
                write!(f, "sheet `{sheet}`, row {row}: source and target must not be empty")
            }
            ValidationError::NoFlows { sheet } => {
                write!(f, "sheet `{sheet}` contains no non-zero flows")
            }
            ValidationError::CircularLink { node } => {
                write!(f, "circular link through node `{node}`")
            }
        }
    }
}
impl Error for ValidationError {}

/// Failures while writing PNG / SVG / HTML.
#[derive(Debug)]
pub enum ExportError {
    Svg(String),
    Pixmap { width: u32, height: u32 },
    Png(String),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Svg(e) => write!(f, "could not parse rendered svg: {e}"),
            ExportError::Pixmap { width, height } => {
                write!(f, "could not allocate a {width}×{height} raster")
            }
            ExportError::Png(e) => write!(f, "png encoding failed: {e}"),
            ExportError::Io { path, source } => {
                write!(f, "could not write `{}`: {source}", path.display())
            }
        }
    }
}
impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExportError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug)]
pub enum SankeyError {
    FileNotFound(PathBuf),
    Workbook(calamine::Error),
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },
    Validation(ValidationError),
    Config(ConfigError),
    Color(ColorError),
    Export(ExportError),
}

impl fmt::Display for SankeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SankeyError::FileNotFound(p) => write!(f, "file not found: `{}`", p.display()),
            SankeyError::Workbook(e) => write!(f, "could not read workbook: {e}"),
            SankeyError::SheetNotFound { sheet, available } => write!(
                f,
                "sheet `{sheet}` not found (available: {})",
                available.join(", ")
            ),
            SankeyError::Validation(e) => write!(f, "{e}"),
            SankeyError::Config(e) => write!(f, "{e}"),
            SankeyError::Color(e) => write!(f, "{e}"),
            SankeyError::Export(e) => write!(f, "{e}"),
        }
    }
}
impl Error for SankeyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SankeyError::Workbook(e) => Some(e),
            SankeyError::Export(e) => Some(e),
            _ => None,
        }
    }
}

// automatic conversions
impl From<calamine::Error> for SankeyError {
    fn from(e: calamine::Error) -> Self {
        Self::Workbook(e)
    }
}
impl From<ValidationError> for SankeyError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
impl From<ConfigError> for SankeyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
impl From<ColorError> for SankeyError {
    fn from(e: ColorError) -> Self {
        Self::Color(e)
    }
}
impl From<ExportError> for SankeyError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}
