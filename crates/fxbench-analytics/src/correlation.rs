//! Pairwise return correlation.
//!
//! Each cell is computed over the dates both instruments have a return on,
//! so a short history only narrows the window of the pairs it belongs to.
//! Undefined cells hold NaN.

use fxbench_core::Symbol;
use serde::Serialize;
use std::cmp::Ordering;

use crate::returns::ReturnSeries;

/// Minimum shared returns for a defined coefficient.
pub const MIN_OVERLAP: usize = 2;

/// Square, symmetric matrix of Pearson correlation coefficients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    symbols: Vec<Symbol>,
    values: Vec<Vec<f64>>,
    overlaps: Vec<Vec<usize>>,
}

impl CorrelationMatrix {
    /// Row and column symbols.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the matrix has no instruments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Coefficient at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Shared return count at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[must_use]
    pub fn overlap(&self, i: usize, j: usize) -> usize {
        self.overlaps[i][j]
    }

    /// Coefficient for a pair of symbols.
    #[must_use]
    pub fn get(&self, a: &Symbol, b: &Symbol) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        Some(self.values[i][j])
    }

    /// Rows of coefficients.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}

/// Builds the correlation matrix of `returns`.
#[must_use]
pub fn correlate(returns: &[ReturnSeries]) -> CorrelationMatrix {
    let n = returns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    let mut overlaps = vec![vec![0usize; n]; n];

    for i in 0..n {
        overlaps[i][i] = returns[i].len();
        if returns[i].len() >= MIN_OVERLAP {
            values[i][i] = 1.0;
        }
        for j in (i + 1)..n {
            let (x, y) = shared_returns(&returns[i], &returns[j]);
            let rho = pearson(&x, &y);
            values[i][j] = rho;
            values[j][i] = rho;
            overlaps[i][j] = x.len();
            overlaps[j][i] = x.len();
        }
    }

    CorrelationMatrix {
        symbols: returns.iter().map(|r| r.symbol.clone()).collect(),
        values,
        overlaps,
    }
}

/// Return values of `a` and `b` on the dates both carry, in date order.
fn shared_returns(a: &ReturnSeries, b: &ReturnSeries) -> (Vec<f64>, Vec<f64>) {
    let (mut i, mut j) = (0, 0);
    let (mut x, mut y) = (Vec::new(), Vec::new());
    while i < a.points.len() && j < b.points.len() {
        match a.points[i].date.cmp(&b.points[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                x.push(a.points[i].value);
                y.push(b.points[j].value);
                i += 1;
                j += 1;
            }
        }
    }
    (x, y)
}

/// Pearson correlation of two equal-length samples.
///
/// NaN when fewer than [`MIN_OVERLAP`] pairs exist or either sample has zero
/// variance. Defined values are clamped to `[-1, 1]`.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < MIN_OVERLAP {
        return f64::NAN;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= f64::EPSILON * f64::EPSILON || var_y <= f64::EPSILON * f64::EPSILON {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}
