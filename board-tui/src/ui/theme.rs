use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::board::SquareHighlight;

/// Named theme presets, as stored in preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

/// Colours for the board and the side panel.
///
/// Overlay pairs are `(on light square, on dark square)`.
#[derive(Debug, Clone)]
pub struct Theme {
    pub light_square: Color,
    pub dark_square: Color,
    pub white_piece: Color,
    pub black_piece: Color,
    pub board_border: Color,
    pub board_label: Color,

    pub overlay_selected: (Color, Color),
    pub overlay_legal_move: (Color, Color),
    pub overlay_legal_move_hovered: (Color, Color),

    pub panel_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub positive: Color,
    pub warning: Color,
    pub negative: Color,
    pub muted: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// For dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            light_square: Color::Rgb(240, 217, 181),
            dark_square: Color::Rgb(181, 136, 99),
            // RGB, not ANSI, so remapped terminal palettes cannot hide pieces.
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(0, 0, 0),
            board_border: Color::Cyan,
            board_label: Color::Yellow,

            overlay_selected: (Color::LightYellow, Color::Yellow),
            overlay_legal_move: (Color::LightBlue, Color::Blue),
            overlay_legal_move_hovered: (Color::LightGreen, Color::Green),

            panel_border: Color::Cyan,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            muted: Color::DarkGray,
        }
    }

    /// For light terminal backgrounds. The squares are darker so white
    /// pieces stay visible.
    pub fn light() -> Self {
        Self {
            light_square: Color::Rgb(205, 170, 125),
            dark_square: Color::Rgb(139, 94, 60),
            white_piece: Color::Rgb(250, 250, 245),
            black_piece: Color::Rgb(25, 25, 25),
            board_border: Color::Rgb(70, 70, 70),
            board_label: Color::Rgb(110, 75, 40),

            overlay_selected: (Color::Rgb(230, 205, 90), Color::Rgb(190, 165, 50)),
            overlay_legal_move: (Color::Rgb(110, 165, 215), Color::Rgb(70, 125, 175)),
            overlay_legal_move_hovered: (Color::Rgb(95, 185, 95), Color::Rgb(55, 145, 55)),

            panel_border: Color::Rgb(50, 110, 130),
            text_primary: Color::Rgb(15, 15, 15),
            text_secondary: Color::Rgb(85, 85, 85),
            positive: Color::Rgb(35, 130, 35),
            warning: Color::Rgb(170, 130, 10),
            negative: Color::Rgb(190, 35, 35),
            muted: Color::Rgb(140, 140, 140),
        }
    }

    /// Background of a square given its highlight and shade.
    pub fn square_bg(&self, highlight: SquareHighlight, is_light_square: bool) -> Color {
        let (light, dark) = match highlight {
            SquareHighlight::Selected => self.overlay_selected,
            SquareHighlight::LegalMove => self.overlay_legal_move,
            SquareHighlight::LegalMoveHovered => self.overlay_legal_move_hovered,
            SquareHighlight::None => (self.light_square, self.dark_square),
        };
        if is_light_square {
            light
        } else {
            dark
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
