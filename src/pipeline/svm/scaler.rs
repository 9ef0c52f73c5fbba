//! Per-feature standardization fitted on the training set

use serde::Serialize;

use crate::pipeline::schema::FEATURE_DIM;

/// Mean/scale pairs for each feature in training order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit population mean and standard deviation per column.
    /// Constant columns get a scale of 1.0 so they map to zero.
    pub fn fit(rows: &[[f64; FEATURE_DIM]]) -> Self {
        let n = rows.len().max(1) as f64;

        let mut means = vec![0.0; FEATURE_DIM];
        for row in rows {
            for (m, &x) in means.iter_mut().zip(row.iter()) {
                *m += x;
            }
        }
        means.iter_mut().for_each(|m| *m /= n);

        let mut scales = vec![0.0; FEATURE_DIM];
        for row in rows {
            for ((s, &x), &m) in scales.iter_mut().zip(row.iter()).zip(means.iter()) {
                let dev = x - m;
                *s += dev * dev;
            }
        }
        for s in scales.iter_mut() {
            let std = (*s / n).sqrt();
            *s = if std > f64::EPSILON { std } else { 1.0 };
        }

        Self { means, scales }
    }

    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .map(|(&x, (&m, &s))| (x - m) / s)
            .collect()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_and_transform() {
        let mut a = [0.0; FEATURE_DIM];
        let mut b = [0.0; FEATURE_DIM];
        a[0] = 1.0;
        b[0] = 3.0;
        a[1] = 5.0;
        b[1] = 5.0;

        let scaler = StandardScaler::fit(&[a, b]);
        assert_eq!(scaler.means()[0], 2.0);
        assert_eq!(scaler.scales()[0], 1.0);
        // Constant column keeps unit scale
        assert_eq!(scaler.scales()[1], 1.0);

        let z = scaler.transform(&b);
        assert_eq!(z[0], 1.0);
        assert_eq!(z[1], 0.0);
    }
}
