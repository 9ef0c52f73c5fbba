//! Dual coordinate descent for the soft-margin linear SVM
//!
//! Solves
//!
//! ```text
//! min_a  1/2 aᵀ Q a - eᵀ a    subject to 0 <= a_i <= C
//! Q_ij = y_i y_j (x_i · x_j + 1)
//! ```
//!
//! one coordinate at a time while maintaining `w = Σ a_i y_i x_i` and
//! `b = Σ a_i y_i`.
//!
//! The bias is handled as a constant extra feature, as liblinear does with a
//! positive `-B`. The primal is therefore `1/2 (‖w‖² + b²) + C Σ hinge`: the
//! intercept is regularized along with the weights and the dual has no
//! `Σ a_i y_i = 0` constraint, which is what lets a single coordinate move
//! at a time.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::SvmConfig;

/// Coefficients below this magnitude do not count as support vectors
const ALPHA_EPS: f64 = 1e-12;

/// Output of the dual solver, in the standardized feature space
#[derive(Debug, Clone)]
pub struct DualSolution {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub iterations: usize,
    pub converged: bool,
    pub support_vectors: usize,
}

/// Fit the hyperplane. `rows` and `targets` must have equal length and
/// `targets` must be ±1.
pub fn solve_dual(rows: &[Vec<f64>], targets: &[f64], config: &SvmConfig) -> DualSolution {
    let n = rows.len();
    let dim = rows.first().map_or(0, Vec::len);
    let upper = config.c;

    let mut alpha = vec![0.0; n];
    let mut weights = vec![0.0; dim];
    let mut bias = 0.0;

    // Diagonal of Q including the constant bias feature
    let q_diag: Vec<f64> = rows
        .iter()
        .map(|x| x.iter().map(|v| v * v).sum::<f64>() + 1.0)
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        order.shuffle(&mut rng);

        let mut max_pg = f64::NEG_INFINITY;
        let mut min_pg = f64::INFINITY;

        for &i in &order {
            let x = &rows[i];
            let y = targets[i];

            let margin = dot(&weights, x) + bias;
            let grad = y * margin - 1.0;

            let projected = if alpha[i] <= 0.0 {
                grad.min(0.0)
            } else if alpha[i] >= upper {
                grad.max(0.0)
            } else {
                grad
            };

            max_pg = max_pg.max(projected);
            min_pg = min_pg.min(projected);

            if projected.abs() > ALPHA_EPS {
                let old = alpha[i];
                alpha[i] = (old - grad / q_diag[i]).clamp(0.0, upper);
                let step = (alpha[i] - old) * y;
                if step != 0.0 {
                    for (w, &v) in weights.iter_mut().zip(x.iter()) {
                        *w += step * v;
                    }
                    bias += step;
                }
            }
        }

        if max_pg - min_pg <= config.tolerance {
            converged = true;
            break;
        }
    }

    let support_vectors = alpha.iter().filter(|a| **a > ALPHA_EPS).count();

    DualSolution {
        weights,
        bias,
        iterations,
        converged,
        support_vectors,
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
