use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn plot_bg(&self) -> RGBColor {
        match self {
            Theme::Dark => RGBColor(20, 20, 20),
            Theme::Light => RGBColor(255, 255, 255),
        }
    }

    /// Grid lines, already blended toward the background.
    pub fn grid_color(&self) -> RGBColor {
        match self {
            Theme::Dark => RGBColor(70, 70, 70),
            Theme::Light => RGBColor(215, 215, 215),
        }
    }

    /// Frame, whiskers, bar edges.
    pub fn ink(&self) -> RGBColor {
        match self {
            Theme::Dark => RGBColor(230, 230, 230),
            Theme::Light => RGBColor(0, 0, 0),
        }
    }

    /// Main series colour.
    pub fn primary(&self) -> RGBColor {
        match self {
            Theme::Dark => RGBColor(100, 170, 235),
            Theme::Light => RGBColor(31, 119, 180),
        }
    }

    /// Histogram bars.
    pub fn bar_fill(&self) -> RGBColor {
        RGBColor(135, 206, 235)
    }

    /// Reference lines such as the Q-Q fit.
    pub fn accent(&self) -> RGBColor {
        match self {
            Theme::Dark => RGBColor(255, 99, 71),
            Theme::Light => RGBColor(214, 39, 40),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}', expected 'light' or 'dark'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn backgrounds_differ() {
        assert_ne!(Theme::Dark.plot_bg(), Theme::Light.plot_bg());
    }
}
