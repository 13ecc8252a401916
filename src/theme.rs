/// Colour palette for the dashboard
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub healthy: Color,
    pub critical: Color,
    pub warning: Color,
    pub bg_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            healthy: Color::Green,
            critical: Color::Red,
            warning: Color::Yellow,
            bg_secondary: Color::Rgb(30, 34, 42),
        }
    }
}
