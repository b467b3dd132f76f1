use serde::Serialize;

use crate::error::AnalyzerError;

/// Mean, median and mode of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralTendency {
    pub mean: f64,
    pub median: f64,
    /// Smallest value among those sharing the highest frequency.
    pub mode: f64,
    pub mode_count: usize,
}

/// Spread of a dataset. Variance and standard deviation are sample
/// (n - 1) estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispersion {
    pub variance: f64,
    pub std_dev: f64,
    pub range: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
}

/// Both statistic groups, serialized as one flat object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub central_tendency: CentralTendency,
    #[serde(flatten)]
    pub dispersion: Dispersion,
}

impl CentralTendency {
    /// Compute from raw values. Every field is finite or the call fails.
    pub fn compute(values: &[f64]) -> Result<Self, AnalyzerError> {
        let sorted = sorted_copy(values);
        let (Some(mean), Some((mode, mode_count))) = (mean(&sorted), mode_of_sorted(&sorted))
        else {
            return Err(AnalyzerError::InsufficientData {
                required: 1,
                actual: 0,
            });
        };
        let median = percentile_of_sorted(&sorted, 50.0);
        if !mean.is_finite() || !median.is_finite() {
            return Err(AnalyzerError::computation("central tendency is not finite"));
        }

        Ok(CentralTendency {
            mean,
            median,
            mode,
            mode_count,
        })
    }
}

impl Dispersion {
    /// Compute from raw values. Needs at least two values for the sample
    /// variance.
    pub fn compute(values: &[f64]) -> Result<Self, AnalyzerError> {
        let count = values.len();
        if count < 2 {
            return Err(AnalyzerError::InsufficientData {
                required: 2,
                actual: count,
            });
        }

        let sorted = sorted_copy(values);
        let variance = sample_variance(&sorted)
            .ok_or_else(|| AnalyzerError::computation("sample variance is undefined"))?;
        if !variance.is_finite() {
            return Err(AnalyzerError::computation("variance overflowed"));
        }

        let min = sorted[0];
        let max = sorted[count - 1];
        let range = max - min;
        let iqr = percentile_of_sorted(&sorted, 75.0) - percentile_of_sorted(&sorted, 25.0);
        if !range.is_finite() || !iqr.is_finite() {
            return Err(AnalyzerError::computation("range overflowed"));
        }

        Ok(Dispersion {
            variance,
            std_dev: variance.sqrt(),
            range,
            iqr,
            min,
            max,
        })
    }
}

impl Summary {
    /// Both groups or nothing. Any failure is reported as `NoDatasetLoaded`,
    /// the one error the combined endpoint answers with.
    pub fn compute(values: &[f64]) -> Result<Self, AnalyzerError> {
        let summary = CentralTendency::compute(values).and_then(|central_tendency| {
            Ok(Summary {
                central_tendency,
                dispersion: Dispersion::compute(values)?,
            })
        });
        summary.map_err(|err| {
            tracing::debug!(%err, "summary unavailable");
            AnalyzerError::NoDatasetLoaded
        })
    }
}

/// Ascending copy of `values`. NaN sorts last under `total_cmp`.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Arithmetic mean. Falls back to summing pre-divided terms when the plain
/// sum overflows.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        Some(sum / n)
    } else {
        Some(values.iter().map(|v| v / n).sum())
    }
}

/// Bessel-corrected variance. `None` below two samples.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(sum_sq / (n - 1) as f64)
}

/// Percentile of an ascending slice using linear interpolation between the
/// closest ranks (`rank = pct / 100 * (n - 1)`).
pub fn percentile_of_sorted(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => return f64::NAN,
        1 => return sorted[0],
        _ => {}
    }
    let pct = pct.clamp(0.0, 100.0);
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    if lower + 1 >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    let frac = rank - lower as f64;
    let lo = sorted[lower];
    let hi = sorted[lower + 1];
    if frac == 0.0 || lo == hi {
        return lo;
    }
    // Weighted form; `hi - lo` can overflow for finite inputs.
    lo * (1.0 - frac) + hi * frac
}

/// Most frequent value of an ascending slice and its count. Ties resolve to
/// the smallest value because runs are visited in ascending order and only a
/// strictly longer run replaces the current best.
pub fn mode_of_sorted(sorted: &[f64]) -> Option<(f64, usize)> {
    let first = *sorted.first()?;
    let mut best = (first, 0usize);
    let mut current = first;
    let mut run = 0usize;

    for &v in sorted {
        if v == current {
            run += 1;
        } else {
            if run > best.1 {
                best = (current, run);
            }
            current = v;
            run = 1;
        }
    }
    if run > best.1 {
        best = (current, run);
    }

    Some(best)
}

/// Lower quartile, median and upper quartile of an ascending slice.
pub fn quartiles_of_sorted(sorted: &[f64]) -> (f64, f64, f64) {
    (
        percentile_of_sorted(sorted, 25.0),
        percentile_of_sorted(sorted, 50.0),
        percentile_of_sorted(sorted, 75.0),
    )
}

/// Tukey box-and-whisker summary. Whiskers reach the most extreme values
/// within 1.5 IQR of the box; anything beyond is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub const WHISKER_IQR: f64 = 1.5;

    /// Summarize an ascending slice. Returns `None` when empty.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        if sorted.is_empty() {
            return None;
        }
        let (q1, median, q3) = quartiles_of_sorted(sorted);
        let reach = Self::WHISKER_IQR * (q3 - q1);
        let low_fence = q1 - reach;
        let high_fence = q3 + reach;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(BoxSummary {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}
