use super::statistics::{percentile_of_sorted, sorted_copy};

/// Upper bound on bins, so a tiny IQR over a wide range cannot blow up the
/// drawing.
pub const MAX_BINS: usize = 512;

/// Equal-width histogram over a closed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` with the automatic width rule. Returns `None` for an
    /// empty slice.
    pub fn auto(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        let mut lo = sorted[0];
        let mut hi = sorted[sorted.len() - 1];
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let bins = auto_bin_count(&sorted);
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in &sorted {
            // The last bin is closed on the right.
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(left, right, count)` for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

/// Bin count for an ascending slice: the narrower of the Sturges and
/// Freedman-Diaconis widths, Sturges alone when the IQR is zero.
pub fn auto_bin_count(sorted: &[f64]) -> usize {
    let n = sorted.len();
    if n < 2 {
        return 1;
    }
    let span = sorted[n - 1] - sorted[0];
    if span <= 0.0 {
        return 1;
    }

    let sturges_width = span / ((n as f64).log2() + 1.0);
    let iqr = percentile_of_sorted(sorted, 75.0) - percentile_of_sorted(sorted, 25.0);
    let fd_width = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);

    let width = if fd_width > 0.0 {
        sturges_width.min(fd_width)
    } else {
        sturges_width
    };

    ((span / width).ceil() as usize).clamp(1, MAX_BINS)
}
