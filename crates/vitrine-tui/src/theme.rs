use ratatui::style::Color;

use vitrine_core::Theme;

/// Terminal colors for one page theme
#[derive(Debug, Clone)]
pub struct Palette {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Accents
    pub accent: Color,
    pub accent_alt: Color,
    pub success: Color,
    pub warning: Color,
    pub particle: Color,
    pub shadow: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            bg0: Color::Rgb(0x0f, 0x17, 0x2a),
            bg1: Color::Rgb(0x1e, 0x29, 0x3b),
            bg2: Color::Rgb(0x33, 0x41, 0x55),
            fg0: Color::Rgb(0xf8, 0xfa, 0xfc),
            fg1: Color::Rgb(0xcb, 0xd5, 0xe1),
            grey0: Color::Rgb(0x47, 0x55, 0x69),
            grey1: Color::Rgb(0x94, 0xa3, 0xb8),
            accent: Color::Rgb(0x63, 0x66, 0xf1),
            accent_alt: Color::Rgb(0xa8, 0x55, 0xf7),
            success: Color::Rgb(0x10, 0xb9, 0x81),
            warning: Color::Rgb(0xf5, 0x9e, 0x0b),
            particle: Color::Rgb(0x81, 0x8c, 0xf8),
            shadow: Color::Rgb(0x02, 0x06, 0x17),
        }
    }

    pub fn light() -> Self {
        Self {
            bg0: Color::Rgb(0xff, 0xff, 0xff),
            bg1: Color::Rgb(0xf1, 0xf5, 0xf9),
            bg2: Color::Rgb(0xe2, 0xe8, 0xf0),
            fg0: Color::Rgb(0x0f, 0x17, 0x2a),
            fg1: Color::Rgb(0x33, 0x41, 0x55),
            grey0: Color::Rgb(0xcb, 0xd5, 0xe1),
            grey1: Color::Rgb(0x64, 0x74, 0x8b),
            accent: Color::Rgb(0x4f, 0x46, 0xe5),
            accent_alt: Color::Rgb(0x93, 0x33, 0xea),
            success: Color::Rgb(0x05, 0x96, 0x69),
            warning: Color::Rgb(0xd9, 0x77, 0x06),
            particle: Color::Rgb(0xa5, 0xb4, 0xfc),
            shadow: Color::Rgb(0x94, 0xa3, 0xb8),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
