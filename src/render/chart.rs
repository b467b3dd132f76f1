use std::fmt;
use std::str::FromStr;

use super::canvas::{self, ChartStyle};
use super::plots;
use crate::error::{AnalyzerError, RenderError};

/// The chart types the service can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Histogram,
    Boxplot,
    Scatter,
    Violin,
    Qq,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Histogram,
        ChartKind::Boxplot,
        ChartKind::Scatter,
        ChartKind::Violin,
        ChartKind::Qq,
    ];

    /// Path segment used in `/api/chart/{kind}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "histogram",
            ChartKind::Boxplot => "boxplot",
            ChartKind::Scatter => "scatter",
            ChartKind::Violin => "violin",
            ChartKind::Qq => "qq",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AnalyzerError::InvalidChartKind { kind: s.to_string() })
    }
}

/// Draw `values` as a `kind` chart and return the PNG bytes.
pub fn render_chart(kind: ChartKind, values: &[f64], style: &ChartStyle) -> Result<Vec<u8>, RenderError> {
    let theme = style.theme;
    canvas::render_png(style, |root| match kind {
        ChartKind::Histogram => plots::histogram(root, values, &theme),
        ChartKind::Boxplot => plots::boxplot(root, values, &theme),
        ChartKind::Scatter => plots::scatter(root, values, &theme),
        ChartKind::Violin => plots::violin(root, values, &theme),
        ChartKind::Qq => plots::qq(root, values, &theme),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::theme::Theme;

    fn small_style(theme: Theme) -> ChartStyle {
        ChartStyle {
            width: 320,
            height: 200,
            theme,
        }
    }

    #[test]
    fn parses_known_kinds() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "pie".parse::<ChartKind>().unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidChartKind { ref kind } if kind == "pie"));
    }

    #[test]
    fn every_kind_renders_a_png() {
        let values = [2.0, 4.5, 3.1, 9.8, 4.4, 4.6, 5.0, -1.2, 3.3, 4.0];
        for theme in [Theme::Light, Theme::Dark] {
            for kind in ChartKind::ALL {
                let png = render_chart(kind, &values, &small_style(theme)).unwrap();
                let img = image::load_from_memory(&png).unwrap();
                assert_eq!((img.width(), img.height()), (320, 200), "{kind}");
            }
        }
    }

    #[test]
    fn degenerate_inputs_still_render() {
        for values in [vec![7.0], vec![3.0, 3.0, 3.0]] {
            for kind in ChartKind::ALL {
                let png = render_chart(kind, &values, &small_style(Theme::Light));
                assert!(png.is_ok(), "{kind} failed for {values:?}");
            }
        }
    }

    #[test]
    fn empty_input_is_a_drawing_error() {
        let err = render_chart(ChartKind::Scatter, &[], &small_style(Theme::Light)).unwrap_err();
        assert!(matches!(err, RenderError::Drawing { .. }));
    }
}
