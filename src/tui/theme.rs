//! Theme and styling for the dashboard - severity-coded colors

use ratatui::style::{Color, Modifier, Style};

use crate::tui::widgets::Tier;

/// Style definitions
pub struct Styles;

impl Styles {
    /// Column and section headers - bold
    pub fn header() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Nominal value - green
    pub fn ok() -> Style {
        Style::default().fg(Color::Green)
    }

    /// Elevated value - yellow
    pub fn warm() -> Style {
        Style::default().fg(Color::Yellow)
    }

    /// Critical value - red
    pub fn hot() -> Style {
        Style::default().fg(Color::Red)
    }

    /// Active throttling condition - red, bold
    pub fn alert_current() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    /// Throttling condition seen since boot - yellow
    pub fn alert_boot() -> Style {
        Style::default().fg(Color::Yellow)
    }

    /// Secondary/muted text - dimmed
    pub fn muted() -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }
}

/// Maps a temperature severity tier to its display style.
pub fn tier_style(tier: Tier) -> Style {
    match tier {
        Tier::Normal => Styles::ok(),
        Tier::Warm => Styles::warm(),
        Tier::Hot => Styles::hot(),
    }
}
