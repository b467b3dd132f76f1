use statrs::distribution::{ContinuousCDF, Normal};

use super::statistics::sorted_copy;
use crate::error::AnalyzerError;

/// Least-squares line through the probability plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FitLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Sample quantiles against standard-normal theoretical quantiles.
#[derive(Debug, Clone)]
pub struct NormalProbabilityPlot {
    /// Theoretical quantiles, ascending.
    pub theoretical: Vec<f64>,
    /// Ordered sample.
    pub sample: Vec<f64>,
    /// `None` when fewer than two distinct theoretical positions exist.
    pub fit: Option<FitLine>,
}

impl NormalProbabilityPlot {
    pub fn compute(values: &[f64]) -> Result<Self, AnalyzerError> {
        if values.is_empty() {
            return Err(AnalyzerError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| AnalyzerError::computation(format!("standard normal: {e}")))?;

        let theoretical: Vec<f64> = order_statistic_medians(values.len())
            .into_iter()
            .map(|p| normal.inverse_cdf(p))
            .collect();
        let sample = sorted_copy(values);
        let fit = least_squares(&theoretical, &sample);

        Ok(NormalProbabilityPlot {
            theoretical,
            sample,
            fit,
        })
    }
}

/// Filliben's estimate of the uniform order statistic medians.
pub fn order_statistic_medians(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let nf = n as f64;
    let last = 0.5f64.powf(1.0 / nf);
    let mut medians: Vec<f64> = (1..=n)
        .map(|i| (i as f64 - 0.3175) / (nf + 0.365))
        .collect();
    medians[n - 1] = last;
    medians[0] = 1.0 - last;
    medians
}

fn least_squares(x: &[f64], y: &[f64]) -> Option<FitLine> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }
    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(FitLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medians_are_symmetric() {
        let m = order_statistic_medians(5);
        assert_eq!(m.len(), 5);
        assert!((m[2] - 0.5).abs() < 1e-12);
        for i in 0..5 {
            assert!((m[i] + m[4 - i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn single_value_sits_at_zero() {
        let plot = NormalProbabilityPlot::compute(&[3.0]).unwrap();
        assert_eq!(plot.theoretical.len(), 1);
        assert!(plot.theoretical[0].abs() < 1e-9);
        assert!(plot.fit.is_none());
    }

    #[test]
    fn linear_data_fit_line() {
        let values: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let plot = NormalProbabilityPlot::compute(&values).unwrap();
        let fit = plot.fit.unwrap();
        assert!((fit.slope - 14.732).abs() < 1e-2, "{}", fit.slope);
        // Symmetric quantiles put the line through the sample mean at x = 0.
        assert!((fit.at(0.0) - 24.5).abs() < 1e-6);
    }

    #[test]
    fn sample_is_sorted() {
        let plot = NormalProbabilityPlot::compute(&[3.0, -1.0, 2.0]).unwrap();
        assert_eq!(plot.sample, vec![-1.0, 2.0, 3.0]);
        assert!(plot.theoretical[0] < 0.0 && plot.theoretical[2] > 0.0);
    }
}
