//! E-ink gray levels and the palette the screens draw with
//!
//! The panel shows 16 gray levels. Colors are named the way the rasterizer
//! names them (`BLACK`, `GRAY1` .. `GRAYE`, `WHITE`); we only carry the
//! handful the screens use.

/// A named gray level understood by the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EinkColor {
    Black,
    /// Mid gray, for secondary text
    Gray8,
    /// Light gray, for disabled labels
    GrayB,
    /// Button face
    GrayD,
    /// Disabled button face
    GrayE,
    White,
}

impl EinkColor {
    /// Name as passed on the rasterizer command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "BLACK",
            Self::Gray8 => "GRAY8",
            Self::GrayB => "GRAYB",
            Self::GrayD => "GRAYD",
            Self::GrayE => "GRAYE",
            Self::White => "WHITE",
        }
    }
}

/// Colors grouped by role so screens never hard-code gray levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Full-screen fill used instead of a clear to avoid a flash
    pub background: EinkColor,
    /// Face of an active button
    pub button: EinkColor,
    /// Face of a button that cannot be pressed
    pub button_disabled: EinkColor,
    /// Label of a button that cannot be pressed
    pub label_disabled: EinkColor,
    /// De-emphasised text (due counts, the question on the answer screen)
    pub muted: EinkColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: EinkColor::White,
            button: EinkColor::GrayD,
            button_disabled: EinkColor::GrayE,
            label_disabled: EinkColor::GrayB,
            muted: EinkColor::Gray8,
        }
    }
}
