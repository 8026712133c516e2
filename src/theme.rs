use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(14, 17, 22);
pub const BG_BAR: Color = Color::Rgb(20, 24, 31);
pub const BG_SURFACE: Color = Color::Rgb(26, 31, 40);
pub const BG_HIGHLIGHT: Color = Color::Rgb(36, 46, 62);

// Primary accent
pub const ACCENT: Color = Color::Rgb(56, 189, 248);

// Text
pub const TEXT: Color = Color::Rgb(220, 224, 232);
pub const TEXT_DIM: Color = Color::Rgb(135, 142, 158);
pub const TEXT_MUTED: Color = Color::Rgb(80, 86, 102);

// Semantic
pub const GREEN: Color = Color::Rgb(52, 211, 153);
pub const BLUE: Color = Color::Rgb(96, 165, 250);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const YELLOW: Color = Color::Rgb(251, 191, 36);
