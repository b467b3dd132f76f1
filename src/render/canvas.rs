use std::io::Cursor;
use std::ops::Range;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::RenderError;
use crate::state::theme::Theme;

/// Outer margin around the plot frame, in pixels.
pub const MARGIN: u32 = 24;

/// Approximate number of grid divisions per axis.
pub const GRID_DIVISIONS: f64 = 8.0;

const MAX_TICKS: usize = 32;

/// Fraction of the data span added on each side of an axis.
pub const AXIS_PADDING: f64 = 0.05;

pub type PlotChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Output size and colours for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            theme: Theme::default(),
        }
    }
}

/// Allocate an RGB surface, run `draw` on it and encode the result as PNG.
///
/// The surface only lives for the duration of this call; the backend is
/// dropped before encoding whether or not `draw` succeeded.
pub fn render_png<F>(style: &ChartStyle, draw: F) -> Result<Vec<u8>, RenderError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), RenderError>,
{
    let (width, height) = (style.width, style.height);
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .filter(|&len| len > 0)
        .ok_or(RenderError::Surface { width, height })?;

    let mut buffer = vec![0u8; len];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&style.theme.plot_bg())
            .map_err(RenderError::drawing)?;
        draw(&root)?;
        root.present().map_err(RenderError::drawing)?;
    }

    encode_png(buffer, width, height)
}

fn encode_png(rgb: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let img = image::RgbImage::from_raw(width, height, rgb)
        .ok_or(RenderError::Surface { width, height })?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Build a cartesian chart over `x` by `y` with grid and frame already drawn.
pub fn plot_area<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    x: Range<f64>,
    y: Range<f64>,
    theme: &Theme,
) -> Result<PlotChart<'a, DB>, RenderError> {
    let mut chart = ChartBuilder::on(root)
        .margin(MARGIN)
        .build_cartesian_2d(x.clone(), y.clone())
        .map_err(RenderError::drawing)?;

    let grid = theme.grid_color().stroke_width(1);
    let verticals = grid_ticks(x.start, x.end)
        .into_iter()
        .map(|gx| PathElement::new(vec![(gx, y.start), (gx, y.end)], grid));
    let horizontals = grid_ticks(y.start, y.end)
        .into_iter()
        .map(|gy| PathElement::new(vec![(x.start, gy), (x.end, gy)], grid));
    chart
        .draw_series(verticals.chain(horizontals))
        .map_err(RenderError::drawing)?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(x.start, y.start), (x.end, y.end)],
            theme.ink().stroke_width(1),
        )))
        .map_err(RenderError::drawing)?;

    Ok(chart)
}

/// Widen `[lo, hi]` by `AXIS_PADDING` on both sides. A zero-width span
/// becomes `lo - 0.5 .. hi + 0.5`.
pub fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = span * AXIS_PADDING;
    (lo - pad)..(hi + pad)
}

/// Round tick positions strictly inside `[lo, hi]`.
pub fn grid_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return Vec::new();
    }
    let step = nice_step(span / GRID_DIVISIONS);
    let first = (lo / step).ceil() * step;
    (0..=MAX_TICKS)
        .map(|i| first + step * i as f64)
        .take_while(|&t| t < hi)
        .filter(|&t| t > lo)
        .collect()
}

/// 1, 2 or 5 times a power of ten, at least `raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_widens_degenerate_span() {
        assert_eq!(padded(2.0, 2.0), 1.5..2.5);
        let r = padded(0.0, 10.0);
        assert!((r.start + 0.5).abs() < 1e-12 && (r.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn ticks_are_round_and_inside() {
        let ticks = grid_ticks(-0.3, 9.7);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert!(ticks.iter().all(|&t| t > -0.3 && t < 9.7));
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - 2.0).abs() < 1e-9));
    }

    #[test]
    fn nice_steps() {
        for (raw, expected) in [(0.7, 1.0), (1.3, 2.0), (3.0, 5.0), (42.0, 50.0)] {
            assert!((nice_step(raw) - expected).abs() < 1e-9, "{raw}");
        }
    }

    #[test]
    fn blank_surface_encodes_png() {
        let style = ChartStyle {
            width: 40,
            height: 30,
            theme: Theme::Light,
        };
        let png = render_png(&style, |_| Ok(())).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let style = ChartStyle {
            width: 0,
            height: 30,
            theme: Theme::Light,
        };
        assert!(matches!(
            render_png(&style, |_| Ok(())),
            Err(RenderError::Surface { .. })
        ));
    }

    #[test]
    fn draw_errors_propagate() {
        let style = ChartStyle {
            width: 10,
            height: 10,
            theme: Theme::Dark,
        };
        let result = render_png(&style, |_| Err(RenderError::drawing("boom")));
        assert!(matches!(result, Err(RenderError::Drawing { .. })));
    }
}
