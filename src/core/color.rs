//! RGB colours and the node palette.

use std::fmt;

use indexmap::IndexMap;

use crate::core::constants::DEFAULT_PALETTE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    InvalidHexDigit(String),
    InvalidHexLength(String),
    BadMapping(String),
}

// --- Rgb ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);
    pub const GREY: Self = Self(0x80, 0x80, 0x80);

    /// Parse colour names or `#rrggbb`.  Falls back to hex parser on miss.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "grey" | "gray" => Ok(Self::GREY),
            "red" => Ok(Self(0xf1, 0x41, 0x24)),
            "orange" => Ok(Self(0xff, 0x80, 0x21)),
            "yellow" => Ok(Self(0xe8, 0xd6, 0x54)),
            "green" => Ok(Self(0x56, 0xc7, 0xaa)),
            "blue" => Ok(Self(0x21, 0x60, 0xff)),
            "magenta" => Ok(Self(0xc3, 0x54, 0xe8)),
            "cyan" => Ok(Self(0x5e, 0xcc, 0xf3)),
            _ => Self::from_hex(s),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength(hex.to_owned()));
        }
        if !h.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHexDigit(hex.to_owned()));
        }
        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit(hex.to_owned()))
        };
        Ok(Self(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidHexDigit(s) => write!(f, "invalid hex colour digit in `{s}`"),
            ColorError::InvalidHexLength(s) => {
                write!(f, "`{s}` is neither a colour name nor a 6-digit hex colour")
            }
            ColorError::BadMapping(s) => {
                write!(f, "palette entry `{s}` must look like `Name=#rrggbb`")
            }
        }
    }
}
impl std::error::Error for ColorError {}

// --- Palette ---

/// How nodes get their colour.
#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    /// Cycled in node order.
    Cycle(Vec<Rgb>),
    /// Looked up by node name; unmapped nodes are grey.
    Named(IndexMap<String, Rgb>),
}

impl Default for Palette {
    fn default() -> Self {
        Self::Cycle(
            DEFAULT_PALETTE
                .iter()
                .filter_map(|h| Rgb::from_hex(h).ok())
                .collect(),
        )
    }
}

impl Palette {
    /// Parse `#f14124,#ff8021` (cycled) or `A=#f14124,B=red` (by name).
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let entries: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .collect();

        if entries.iter().any(|e| e.contains('=')) {
            let mut map = IndexMap::with_capacity(entries.len());
            for e in entries {
                let (name, color) = e
                    .split_once('=')
                    .ok_or_else(|| ColorError::BadMapping(e.to_owned()))?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(ColorError::BadMapping(e.to_owned()));
                }
                map.insert(name.to_owned(), Rgb::from_name(color)?);
            }
            Ok(Self::Named(map))
        } else {
            let colors = entries
                .into_iter()
                .map(Rgb::from_name)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Self::Cycle(colors))
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Cycle(c) => c.is_empty(),
            Self::Named(m) => m.is_empty(),
        }
    }

    /// Colour for the node at `index` called `name`.
    #[must_use]
    pub fn color_for(&self, index: usize, name: &str) -> Rgb {
        match self {
            Self::Cycle(colors) if !colors.is_empty() => colors[index % colors.len()],
            Self::Cycle(_) => Rgb::GREY,
            Self::Named(map) => map.get(name).copied().unwrap_or(Rgb::GREY),
        }
    }
}
