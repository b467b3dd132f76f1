use std::f64::consts::PI;

use super::statistics::sample_variance;

/// Number of evaluation points along the support.
pub const GRID_SIZE: usize = 200;

/// How many bandwidths the support extends past the data extremes.
pub const CUT: f64 = 2.0;

/// Gaussian kernel density estimate evaluated on an even grid.
#[derive(Debug, Clone)]
pub struct DensityCurve {
    pub bandwidth: f64,
    /// `(x, density)` pairs in ascending x.
    pub points: Vec<(f64, f64)>,
}

impl DensityCurve {
    /// Estimate with Scott's rule. Returns `None` for an empty slice.
    pub fn estimate(values: &[f64]) -> Option<Self> {
        let (min, max) = min_max(values)?;
        let bandwidth = scott_bandwidth(values);

        let lo = min - CUT * bandwidth;
        let hi = max + CUT * bandwidth;
        let step = (hi - lo) / (GRID_SIZE - 1) as f64;

        let points = (0..GRID_SIZE)
            .map(|i| {
                let x = lo + step * i as f64;
                (x, gaussian_kde_at(values, bandwidth, x))
            })
            .collect();

        Some(DensityCurve { bandwidth, points })
    }

    pub fn peak(&self) -> f64 {
        self.points.iter().map(|&(_, d)| d).fold(0.0, f64::max)
    }
}

/// `sigma * n^(-1/5)`. Degenerate samples (one value, or zero spread) get a
/// unit bandwidth so the curve is still drawable.
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    match sample_variance(values) {
        Some(var) if var > 0.0 && var.is_finite() => var.sqrt() * n.powf(-0.2),
        _ => 1.0,
    }
}

fn gaussian_kde_at(values: &[f64], bandwidth: f64, x: f64) -> f64 {
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    let sum: f64 = values
        .iter()
        .map(|&v| {
            let z = (x - v) / bandwidth;
            (-0.5 * z * z).exp()
        })
        .sum();
    sum * norm
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .skip(1)
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_integrates_to_about_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 7.0];
        let curve = DensityCurve::estimate(&values).unwrap();
        let step = curve.points[1].0 - curve.points[0].0;
        let area: f64 = curve.points.iter().map(|&(_, d)| d * step).sum();
        // Tails beyond two bandwidths hold a few percent of the mass.
        assert!(area > 0.9 && area < 1.01, "area = {area}");
    }

    #[test]
    fn support_extends_past_extremes() {
        let curve = DensityCurve::estimate(&[0.0, 10.0]).unwrap();
        assert!(curve.points.first().unwrap().0 < 0.0);
        assert!(curve.points.last().unwrap().0 > 10.0);
        assert_eq!(curve.points.len(), GRID_SIZE);
    }

    #[test]
    fn constant_sample_uses_unit_bandwidth() {
        assert_eq!(scott_bandwidth(&[5.0, 5.0, 5.0]), 1.0);
        assert_eq!(scott_bandwidth(&[5.0]), 1.0);
        let curve = DensityCurve::estimate(&[5.0, 5.0]).unwrap();
        assert!(curve.peak() > 0.0);
    }

    #[test]
    fn empty_sample_has_no_curve() {
        assert!(DensityCurve::estimate(&[]).is_none());
    }
}
