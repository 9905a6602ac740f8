//! A collection of constants.

/// Chart width in pixels
pub const DEFAULT_WIDTH: u32 = 1400;
/// Chart height in pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// General text size (title, tooltips) in pixels
pub const DEFAULT_FONT_SIZE: f64 = 11.0;
/// Node label size, CSS notation
pub const DEFAULT_LABEL_FONT_SIZE: &str = "17pt";

/// Width of the node bars
pub const DEFAULT_NODE_WIDTH: f64 = 45.0;
/// Vertical gap between two nodes in the same column
pub const DEFAULT_NODE_PADDING: f64 = 10.0;

/// Values are rounded to the second decimal place.
///
/// 14.832 becomes 14,83 (or 14.83, depending on the language)
pub const DEFAULT_DECIMALS: u32 = 2;

/// Locale used for decimal and grouping separators
pub const DEFAULT_LANGUAGE: &str = "de_DE.UTF-8";

/// Relaxation passes of the layout
pub const DEFAULT_ITERATIONS: usize = 32;

/// Where exports land when no directory is given
pub const DEFAULT_OUTPUT_DIR: &str = "./out";

/// Space kept free around the plot area
pub const MARGIN: f64 = 5.0;
/// Extra room at the top when the title is drawn
pub const TITLE_HEIGHT: f64 = 30.0;
/// Gap between a node and its label
pub const LABEL_GAP: f64 = 6.0;

/// Opacity of link bands
pub const LINK_OPACITY: f64 = 0.6;

pub const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Points to pixels at 96 dpi
pub const PX_PER_PT: f64 = 4.0 / 3.0;

/// Built-in colors, cycled by node order.
pub const DEFAULT_PALETTE: [&str; 13] = [
    "#f14124", "#ff8021", "#e8d654", "#5eccf3", "#b4dcfa", "#4e67c8", "#56c7aa", "#24f198",
    "#2160ff", "#c354e8", "#e73384", "#c76b56", "#facdb4",
];
