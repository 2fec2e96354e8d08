use crate::api::AccuracyBand;
use ratatui::style::{Color, Modifier, Style};

/// Colors for one appearance. Every view draws through a `Theme` so the dark-mode
/// preference applies everywhere at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub card: Color,
    pub card_flipped: Color,
    pub selected: Color,
    pub good: Color,
    pub fair: Color,
    pub poor: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(245, 246, 250),
            text: Color::Rgb(30, 30, 46),
            accent: Color::Rgb(79, 70, 229),
            muted: Color::Rgb(110, 110, 130),
            card: Color::Rgb(255, 255, 255),
            card_flipped: Color::Rgb(224, 231, 255),
            selected: Color::Rgb(180, 83, 9),
            good: Color::Rgb(22, 163, 74),
            fair: Color::Rgb(234, 88, 12),
            poor: Color::Rgb(220, 38, 38),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 27),
            text: Color::Rgb(226, 228, 240),
            accent: Color::Rgb(129, 140, 248),
            muted: Color::Rgb(120, 124, 150),
            card: Color::Rgb(30, 31, 46),
            card_flipped: Color::Rgb(49, 46, 129),
            selected: Color::Yellow,
            good: Color::Rgb(74, 222, 128),
            fair: Color::Rgb(251, 146, 60),
            poor: Color::Rgb(248, 113, 113),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn band(&self, band: AccuracyBand) -> Color {
        match band {
            AccuracyBand::Good => self.good,
            AccuracyBand::Fair => self.fair,
            AccuracyBand::Poor => self.poor,
        }
    }
}
