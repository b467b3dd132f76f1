use plotters::coord::Shift;
use plotters::prelude::*;

use super::canvas::{padded, plot_area};
use crate::error::RenderError;
use crate::processing::binning::Histogram;
use crate::processing::density::DensityCurve;
use crate::processing::probplot::NormalProbabilityPlot;
use crate::processing::statistics::{sorted_copy, BoxSummary};
use crate::state::theme::Theme;

/// Half-width of the box and violin bodies, in x units of a `-1..1` axis.
const BODY_HALF_WIDTH: f64 = 0.5;

const POINT_RADIUS: i32 = 4;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

pub fn histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    values: &[f64],
    theme: &Theme,
) -> Result<(), RenderError> {
    let hist = Histogram::auto(values).ok_or_else(|| RenderError::drawing("no values to bin"))?;
    let lo = hist.edges[0];
    let hi = hist.edges[hist.edges.len() - 1];
    let top = (hist.max_count() as f64 * 1.05).max(1.0);

    let mut chart = plot_area(root, padded(lo, hi), 0.0..top, theme)?;

    let fill = theme.bar_fill().mix(0.7).filled();
    let edge = theme.ink().stroke_width(1);
    chart
        .draw_series(
            hist.bins()
                .map(|(left, right, count)| Rectangle::new([(left, 0.0), (right, count as f64)], fill)),
        )
        .map_err(RenderError::drawing)?;
    chart
        .draw_series(
            hist.bins()
                .filter(|&(_, _, count)| count > 0)
                .map(|(left, right, count)| Rectangle::new([(left, 0.0), (right, count as f64)], edge)),
        )
        .map_err(RenderError::drawing)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

pub fn boxplot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    values: &[f64],
    theme: &Theme,
) -> Result<(), RenderError> {
    let sorted = sorted_copy(values);
    let summary =
        BoxSummary::from_sorted(&sorted).ok_or_else(|| RenderError::drawing("no values to summarize"))?;
    let y = padded(sorted[0], sorted[sorted.len() - 1]);

    let mut chart = plot_area(root, -1.0..1.0, y, theme)?;

    let ink = theme.ink().stroke_width(1);
    let (left, right) = (-BODY_HALF_WIDTH, BODY_HALF_WIDTH);
    let cap = BODY_HALF_WIDTH / 2.0;

    chart
        .draw_series([
            Rectangle::new([(left, summary.q1), (right, summary.q3)], theme.primary().mix(0.35).filled()),
            Rectangle::new([(left, summary.q1), (right, summary.q3)], ink),
        ])
        .map_err(RenderError::drawing)?;

    chart
        .draw_series([
            PathElement::new(vec![(0.0, summary.q1), (0.0, summary.whisker_low)], ink),
            PathElement::new(vec![(0.0, summary.q3), (0.0, summary.whisker_high)], ink),
            PathElement::new(vec![(-cap, summary.whisker_low), (cap, summary.whisker_low)], ink),
            PathElement::new(vec![(-cap, summary.whisker_high), (cap, summary.whisker_high)], ink),
            PathElement::new(
                vec![(left, summary.median), (right, summary.median)],
                theme.accent().stroke_width(2),
            ),
        ])
        .map_err(RenderError::drawing)?;

    chart
        .draw_series(
            summary
                .outliers
                .iter()
                .map(|&v| Circle::new((0.0, v), POINT_RADIUS, theme.ink().stroke_width(1))),
        )
        .map_err(RenderError::drawing)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

pub fn scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    values: &[f64],
    theme: &Theme,
) -> Result<(), RenderError> {
    if values.is_empty() {
        return Err(RenderError::drawing("no values to plot"));
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let last_index = (values.len() - 1) as f64;

    let mut chart = plot_area(root, padded(0.0, last_index), padded(min, max), theme)?;

    let style = theme.primary().mix(0.7).filled();
    chart
        .draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Circle::new((i as f64, v), POINT_RADIUS, style)),
        )
        .map_err(RenderError::drawing)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Violin
// ---------------------------------------------------------------------------

pub fn violin<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    values: &[f64],
    theme: &Theme,
) -> Result<(), RenderError> {
    let curve =
        DensityCurve::estimate(values).ok_or_else(|| RenderError::drawing("no values to estimate"))?;
    let sorted = sorted_copy(values);
    let summary =
        BoxSummary::from_sorted(&sorted).ok_or_else(|| RenderError::drawing("no values to summarize"))?;

    let peak = curve.peak();
    let scale = if peak > 0.0 { BODY_HALF_WIDTH / peak } else { 0.0 };

    // Right edge bottom-to-top, then left edge top-to-bottom.
    let mut outline: Vec<(f64, f64)> = curve.points.iter().map(|&(y, d)| (d * scale, y)).collect();
    outline.extend(curve.points.iter().rev().map(|&(y, d)| (-d * scale, y)));

    let y_lo = curve.points[0].0;
    let y_hi = curve.points[curve.points.len() - 1].0;
    let mut chart = plot_area(root, -1.0..1.0, padded(y_lo, y_hi), theme)?;

    chart
        .draw_series(std::iter::once(Polygon::new(
            outline.clone(),
            theme.primary().mix(0.6).filled(),
        )))
        .map_err(RenderError::drawing)?;
    if let Some(&start) = outline.first() {
        outline.push(start);
    }
    chart
        .draw_series(std::iter::once(PathElement::new(outline, theme.ink().stroke_width(1))))
        .map_err(RenderError::drawing)?;

    // Inner box: whisker line, IQR bar, median dot.
    let bar = BODY_HALF_WIDTH * 0.06;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(0.0, summary.whisker_low), (0.0, summary.whisker_high)],
            theme.ink().stroke_width(1),
        )))
        .map_err(RenderError::drawing)?;
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(-bar, summary.q1), (bar, summary.q3)],
            theme.ink().filled(),
        )))
        .map_err(RenderError::drawing)?;
    chart
        .draw_series(std::iter::once(Circle::new(
            (0.0, summary.median),
            POINT_RADIUS,
            theme.plot_bg().filled(),
        )))
        .map_err(RenderError::drawing)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Q-Q against the standard normal
// ---------------------------------------------------------------------------

pub fn qq<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    values: &[f64],
    theme: &Theme,
) -> Result<(), RenderError> {
    let plot = NormalProbabilityPlot::compute(values).map_err(RenderError::drawing)?;
    let n = plot.theoretical.len();
    let (x_lo, x_hi) = (plot.theoretical[0], plot.theoretical[n - 1]);

    let mut y_lo = plot.sample[0];
    let mut y_hi = plot.sample[n - 1];
    if let Some(fit) = plot.fit {
        for y in [fit.at(x_lo), fit.at(x_hi)] {
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }
    }

    let mut chart = plot_area(root, padded(x_lo, x_hi), padded(y_lo, y_hi), theme)?;

    let style = theme.primary().filled();
    chart
        .draw_series(
            plot.theoretical
                .iter()
                .zip(plot.sample.iter())
                .map(|(&x, &y)| Circle::new((x, y), POINT_RADIUS, style)),
        )
        .map_err(RenderError::drawing)?;

    if let Some(fit) = plot.fit {
        chart
            .draw_series(LineSeries::new(
                [x_lo, x_hi].into_iter().map(|x| (x, fit.at(x))),
                theme.accent().stroke_width(2),
            ))
            .map_err(RenderError::drawing)?;
    }

    Ok(())
}
