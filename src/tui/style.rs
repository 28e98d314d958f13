//! Color constants for the TUI.

use ratatui::style::Color;

use crate::sizing::FitStatus;

/// Base load bar color.
pub const BASE_COLOR: Color = Color::Gray;
/// Surge bar color when under the ceiling.
pub const SURGE_COLOR: Color = Color::Yellow;
/// Surge bar color when above the ceiling.
pub const OVER_COLOR: Color = Color::Red;
/// Coverage gauge color when supply covers the peak.
pub const COVERED: Color = Color::Green;
/// Coverage gauge color when a battery is needed.
pub const SHORT: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::Red;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Selected load highlight.
pub const SELECTED: Color = Color::Cyan;

/// Returns the bar color for a load against the supply ceiling.
pub fn bar_color(is_base: bool, peak_kw: f64, ceiling_kw: f64) -> Color {
    if is_base {
        BASE_COLOR
    } else if peak_kw > ceiling_kw {
        OVER_COLOR
    } else {
        SURGE_COLOR
    }
}

/// Returns the color for a fit status badge.
pub fn fit_color(status: FitStatus) -> Color {
    match status {
        FitStatus::NoneSelected => Color::DarkGray,
        FitStatus::Perfect => Color::Green,
        FitStatus::CheckEnergy => Color::Yellow,
        FitStatus::Multiple => Color::Red,
    }
}

/// Share of the peak the supply ceiling covers, clamped to `[0, 1]`.
pub fn coverage_ratio(ceiling_kw: f64, peak_kw: f64) -> f64 {
    if peak_kw <= 0.0 {
        return 1.0;
    }
    (ceiling_kw / peak_kw).clamp(0.0, 1.0)
}
