//! Application settings: theme and performance mode.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on dark background.
    #[default]
    Dark,
    /// Dark text on light background.
    Light,
}

impl Theme {
    /// Returns the display label for this option.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Escuro",
            Self::Light => "Claro",
        }
    }

    /// Toggles between `Dark` and `Light`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// User-adjustable settings, owned by the application for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppSettings {
    /// Color theme.
    pub theme: Theme,
    /// Skip animations.
    pub low_performance: bool,
}

impl AppSettings {
    /// Creates settings with defaults.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the theme.
    #[instrument(skip(self))]
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        info!(theme = %self.theme.label(), "Theme changed");
    }

    /// Switches performance mode.
    #[instrument(skip(self))]
    pub fn toggle_performance(&mut self) {
        self.low_performance = !self.low_performance;
        info!(low_performance = self.low_performance, "Performance mode changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::new();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(!settings.low_performance);
    }

    #[test]
    fn test_toggles() {
        let mut settings = AppSettings::new();
        settings.toggle_theme();
        settings.toggle_performance();
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.low_performance);
        settings.toggle_theme();
        assert_eq!(settings.theme, Theme::Dark);
    }
}
