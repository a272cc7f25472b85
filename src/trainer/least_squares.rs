//! Reference least-squares collaborator

use crate::error::{Result, StepdownError};
use crate::trainer::{PredictionPair, Trainer};
use ndarray::{Array1, Array2, Axis};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Linear model fit by normal equations over a DataFrame.
///
/// Each `train_predict` call refits on the requested feature columns. With
/// no holdout configured the returned pairs are resubstitution predictions
/// over all rows; `with_holdout` fits on a shuffled train split and
/// predicts the held-out rows instead.
#[derive(Debug, Clone)]
pub struct LeastSquaresTrainer {
    df: DataFrame,
    target_column: String,
    holdout: Option<f64>,
    random_state: Option<u64>,
}

impl LeastSquaresTrainer {
    /// Create a trainer over the given rows
    pub fn new(df: DataFrame, target_column: impl Into<String>) -> Self {
        Self {
            df,
            target_column: target_column.into(),
            holdout: None,
            random_state: None,
        }
    }

    /// Predict a held-out fraction of rows instead of resubstituting
    pub fn with_holdout(mut self, fraction: f64) -> Self {
        self.holdout = Some(fraction.clamp(0.0, 0.9));
        self
    }

    /// Set random state for reproducible holdout splits
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// The target column this trainer predicts
    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let series = self
            .df
            .column(name)
            .map_err(|_| StepdownError::FeatureNotFound(name.to_string()))?;
        let series = series
            .cast(&DataType::Float64)
            .map_err(|e| StepdownError::DataError(e.to_string()))?;
        let chunked = series
            .f64()
            .map_err(|e| StepdownError::DataError(e.to_string()))?;

        let mut values = Vec::with_capacity(chunked.len());
        for (row, value) in chunked.into_iter().enumerate() {
            match value {
                Some(v) => values.push(v),
                None => return Err(StepdownError::MissingValue { row }),
            }
        }
        Ok(values)
    }

    /// Extract named columns into a row-major matrix
    fn features_matrix(&self, names: &[String]) -> Result<Array2<f64>> {
        let n_rows = self.df.height();
        let columns: Vec<Vec<f64>> = names
            .iter()
            .map(|name| self.numeric_column(name))
            .collect::<Result<_>>()?;

        Ok(Array2::from_shape_fn((n_rows, names.len()), |(r, c)| {
            columns[c][r]
        }))
    }

    fn split_indices(&self, n_rows: usize) -> (Vec<usize>, Vec<usize>) {
        let mut indices: Vec<usize> = (0..n_rows).collect();
        match self.holdout {
            Some(fraction) if fraction > 0.0 => {
                let mut rng = match self.random_state {
                    Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                    None => ChaCha8Rng::from_entropy(),
                };
                indices.shuffle(&mut rng);

                let eval_size = ((n_rows as f64 * fraction) as usize)
                    .max(1)
                    .min(n_rows.saturating_sub(1));
                let eval = indices[..eval_size].to_vec();
                let train = indices[eval_size..].to_vec();
                (train, eval)
            }
            _ => (indices.clone(), indices),
        }
    }
}

impl Trainer for LeastSquaresTrainer {
    fn train_predict(&mut self, features: &[String]) -> Result<Vec<PredictionPair>> {
        if features.is_empty() {
            return Err(StepdownError::InvalidConfiguration(
                "no feature columns to train on".to_string(),
            ));
        }

        let x = self.features_matrix(features)?;
        let y = Array1::from_vec(self.numeric_column(&self.target_column)?);

        let (train_idx, eval_idx) = self.split_indices(x.nrows());
        let x_train = take_rows(&x, &train_idx);
        let y_train = take_values(&y, &train_idx);
        let (coefficients, intercept) = fit(&x_train, &y_train)?;

        let x_eval = take_rows(&x, &eval_idx);
        let predictions = x_eval.dot(&coefficients) + intercept;

        Ok(eval_idx
            .iter()
            .zip(predictions.iter())
            .map(|(&row, &pred)| PredictionPair::new(pred, y[row]))
            .collect())
    }
}

fn take_rows(x: &Array2<f64>, indices: &[usize]) -> Array2<f64> {
    Array2::from_shape_fn((indices.len(), x.ncols()), |(r, c)| x[[indices[r], c]])
}

fn take_values(y: &Array1<f64>, indices: &[usize]) -> Array1<f64> {
    indices.iter().map(|&i| y[i]).collect()
}

/// Center the data and solve the normal equations for (coefficients, intercept)
fn fit(x: &Array2<f64>, y: &Array1<f64>) -> Result<(Array1<f64>, f64)> {
    let x_mean = x
        .mean_axis(Axis(0))
        .ok_or_else(|| StepdownError::TrainingError("no training rows".to_string()))?;
    let y_mean = y.mean().unwrap_or(0.0);

    let x_centered = x - &x_mean.clone().insert_axis(Axis(0));
    let y_centered = y - y_mean;

    let xtx = x_centered.t().dot(&x_centered);
    let xty = x_centered.t().dot(&y_centered);

    let coefficients = solve_spd(&xtx, &xty).ok_or_else(|| {
        StepdownError::TrainingError("normal equations are singular".to_string())
    })?;
    let intercept = y_mean - coefficients.dot(&x_mean);
    Ok((coefficients, intercept))
}

/// Solve the symmetric system Ax = b by Cholesky, retrying once with a
/// small ridge term when A is not positive definite, then falling back to
/// Gaussian elimination with partial pivoting.
fn solve_spd(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    if let Some(x) = cholesky_solve(a, b) {
        return Some(x);
    }

    let n = a.nrows();
    let ridge = 1e-8 * a.diag().iter().map(|v| v.abs()).sum::<f64>() / n as f64;
    let mut a_reg = a.clone();
    for k in 0..n {
        a_reg[[k, k]] += ridge + 1e-12;
    }
    cholesky_solve(&a_reg, b).or_else(|| gauss_solve(&a_reg, b))
}

fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    // Decompose A = L * L^T
    let mut l = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L * y = b
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T * x = y
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

fn gauss_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    // Augmented matrix [A | b]
    let mut aug = Array2::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n]] = b[i];
    }

    for col in 0..n {
        let mut max_row = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[max_row, col]].abs() {
                max_row = row;
            }
        }
        if max_row != col {
            for j in 0..=n {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[max_row, j]];
                aug[[max_row, j]] = tmp;
            }
        }
        if aug[[col, col]].abs() < 1e-10 {
            return None;
        }

        let pivot = aug[[col, col]];
        for j in 0..=n {
            aug[[col, j]] /= pivot;
        }
        for row in 0..n {
            if row != col {
                let factor = aug[[row, col]];
                for j in 0..=n {
                    aug[[row, j]] -= factor * aug[[col, j]];
                }
            }
        }
    }

    Some(Array1::from_shape_fn(n, |i| aug[[i, n]]))
}
