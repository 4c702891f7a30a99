// Color palette shared across the UI: violet accent on a dark surface.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(124, 58, 237); // #7C3AED
pub const ACTIVE: Color = Color::Rgb(167, 139, 250); // #A78BFA
pub const DIM: Color = Color::Rgb(107, 114, 128); // #6B7280
pub const TEXT: Color = Color::Rgb(209, 213, 219); // #D1D5DB
pub const BRIGHT: Color = Color::Rgb(243, 244, 246); // #F3F4F6
pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
pub const WARNING: Color = Color::Rgb(245, 158, 11); // #F59E0B
pub const DANGER: Color = Color::Rgb(239, 68, 68); // #EF4444
pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6
pub const BORDER: Color = Color::Rgb(55, 65, 81); // #374151
pub const BORDER_DIM: Color = Color::Rgb(31, 41, 55); // #1F2937
pub const HIGHLIGHT_BG: Color = Color::Rgb(49, 46, 129); // #312E81
pub const SESSION_FG: Color = Color::Rgb(156, 163, 175); // #9CA3AF
pub const INPUT_FG: Color = Color::Rgb(224, 224, 255); // #E0E0FF
