use std::net::SocketAddr;

use clap::Parser;

use crate::render::canvas::ChartStyle;
use crate::state::theme::Theme;

/// Request body cap, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 8 * 1024 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Descriptive statistics and exploratory charts over HTTP")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "OXIDESTATS_ADDR", default_value = "0.0.0.0:5000")]
    pub addr: SocketAddr,

    /// Rendered chart width in pixels
    #[arg(
        long,
        env = "OXIDESTATS_CHART_WIDTH",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u32).range(64..=4096)
    )]
    pub chart_width: u32,

    /// Rendered chart height in pixels
    #[arg(
        long,
        env = "OXIDESTATS_CHART_HEIGHT",
        default_value_t = 600,
        value_parser = clap::value_parser!(u32).range(64..=4096)
    )]
    pub chart_height: u32,

    /// Default chart theme (light or dark)
    #[arg(long, env = "OXIDESTATS_THEME", default_value = "light")]
    pub theme: Theme,

    /// Largest accepted request body
    #[arg(long, env = "OXIDESTATS_MAX_BODY_BYTES", default_value_t = DEFAULT_BODY_LIMIT)]
    pub max_body_bytes: usize,
}

impl Config {
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            width: self.chart_width,
            height: self.chart_height,
            theme: self.theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["oxidestats"]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.chart_style(), ChartStyle::default());
        assert_eq!(config.max_body_bytes, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn flags_override() {
        let config = Config::try_parse_from([
            "oxidestats",
            "--addr",
            "127.0.0.1:8080",
            "--chart-width",
            "640",
            "--theme",
            "dark",
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.chart_width, 640);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn rejects_tiny_charts() {
        assert!(Config::try_parse_from(["oxidestats", "--chart-height", "8"]).is_err());
    }
}
