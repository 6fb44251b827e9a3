use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(12, 16, 28);
pub const BG_BAR: Color = Color::Rgb(16, 22, 40);
pub const BG_SURFACE: Color = Color::Rgb(22, 30, 52);
pub const BG_HIGHLIGHT: Color = Color::Rgb(30, 44, 84);

// Primary accent
pub const ACCENT: Color = Color::Rgb(64, 120, 255);
pub const ACCENT_DIM: Color = Color::Rgb(40, 72, 160);

// Text
pub const TEXT: Color = Color::Rgb(222, 226, 236);
pub const TEXT_DIM: Color = Color::Rgb(136, 144, 168);
pub const TEXT_MUTED: Color = Color::Rgb(80, 88, 112);

// Semantic
pub const GREEN: Color = Color::Rgb(52, 211, 153);
pub const RED: Color = Color::Rgb(240, 80, 96);
pub const YELLOW: Color = Color::Rgb(251, 191, 36);
pub const CYAN: Color = Color::Rgb(103, 232, 249);
