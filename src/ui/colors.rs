//! Color scheme for the drawing view
//!
//! The canvas is painted on white, like paper. Drawing colors carry an alpha
//! channel that terminals cannot show, so they are blended onto the paper
//! color before use.

use ratatui::style::Color;

use crate::coords::Rgba;

/// Canvas background
pub const PAPER: (u8, u8, u8) = (255, 255, 255);

pub const CURSOR: Color = Color::Red;
pub const MARK: Color = Color::Magenta;
pub const SQUARE: Color = Color::Rgb(120, 120, 120);

/// Status line
pub mod status {
    use super::*;

    pub const MODE_NORMAL: Color = Color::Cyan;
    pub const MODE_EX: Color = Color::Yellow;
    pub const KEYSTROKES: Color = Color::DarkGray;
    pub const COUNT: Color = Color::Green;
}

/// Blend `c` over the paper color by its alpha
pub fn on_paper(c: Rgba) -> Color {
    let a = u32::from(c.a());
    let mix = |fg: u8, bg: u8| -> u8 {
        let v = (u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255;
        v as u8
    };
    Color::Rgb(
        mix(c.r(), PAPER.0),
        mix(c.g(), PAPER.1),
        mix(c.b(), PAPER.2),
    )
}

pub fn paper() -> Color {
    Color::Rgb(PAPER.0, PAPER.1, PAPER.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_is_unchanged() {
        assert_eq!(on_paper(Rgba([10, 20, 30, 255])), Color::Rgb(10, 20, 30));
    }

    #[test]
    fn test_transparent_is_paper() {
        assert_eq!(on_paper(Rgba([10, 20, 30, 0])), paper());
    }

    #[test]
    fn test_default_gridcolor_is_light_blue() {
        assert_eq!(on_paper(Rgba([0, 0, 255, 50])), Color::Rgb(205, 205, 255));
    }
}
