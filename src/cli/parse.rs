use std::path::PathBuf;

use clap::Parser;

use crate::core::{
    config::EdgeColor,
    constants::{
        DEFAULT_DECIMALS, DEFAULT_FONT_SIZE, DEFAULT_HEIGHT, DEFAULT_LABEL_FONT_SIZE,
        DEFAULT_LANGUAGE, DEFAULT_NODE_PADDING, DEFAULT_NODE_WIDTH, DEFAULT_OUTPUT_DIR,
        DEFAULT_WIDTH,
    },
};

/// Top-level CLI structure.
///
/// Long flags are snake_case so they line up with the library's
/// parameter names.
#[derive(Parser, Debug)]
#[command(
    name = "sankey-sheet",
    version,
    about = "Plot Sankey charts from an Excel spreadsheet",
    long_about = "Plot Sankey charts from an Excel spreadsheet.\n\n\
                  Each sheet needs a header row followed by rows of source, target and value \
                  (plus an optional unit column). One chart is written per sheet as png, svg \
                  and html, and one html page collects all charts."
)]
pub struct Cli {
    /// Path to a spreadsheet (xlsx, xlsm, xlsb, xls or ods)
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Sheets to process (all sheets if omitted)
    #[arg(short, long, num_args = 1.., value_name = "SHEET")]
    pub sheets: Vec<String>,

    /// Directory for the output files
    #[arg(
        short,
        long = "output",
        visible_alias = "output_dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long = "log_level", default_value = "info")]
    pub log_level: log::LevelFilter,

    /// Language for number formats, e.g. "en_US" or "de_DE.UTF-8"
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Chart width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// General text size in pixels
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    pub fontsize: f64,

    /// Node label size, e.g. "17pt" or "14px"
    #[arg(long = "label_text_font_size", default_value = DEFAULT_LABEL_FONT_SIZE)]
    pub label_text_font_size: String,

    /// Unit appended to every value
    #[arg(long, default_value = "")]
    pub unit: String,

    /// Decimal places values are rounded to
    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    pub decimals: u32,

    /// Width of the node bars in pixels
    #[arg(long = "node_width", default_value_t = DEFAULT_NODE_WIDTH)]
    pub node_width: f64,

    /// Vertical gap between nodes in pixels
    #[arg(long = "node_padding", default_value_t = DEFAULT_NODE_PADDING)]
    pub node_padding: f64,

    /// Node colours: "#f14124,#ff8021,..." (cycled) or "Coal=#000000,Gas=#ff8021,..."
    #[arg(long)]
    pub palette: Option<String>,

    /// Colour links by their "From" or "To" node
    #[arg(long = "edge_color_index", default_value = "To")]
    pub edge_color_index: EdgeColor,

    /// Draw the sheet name onto png and svg exports
    #[arg(long = "export_title")]
    pub export_title: bool,

    /// Keep only this many characters of the exported title
    #[arg(long = "title_max_chars", value_name = "N")]
    pub title_max_chars: Option<usize>,

    /// Browser tab title of the per-sheet HTML pages (default: sheet name)
    #[arg(long = "title_html", value_name = "TEXT")]
    pub title_html: Option<String>,
}
