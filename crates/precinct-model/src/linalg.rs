//! Cholesky factorisation for symmetric positive semi-definite systems.

use ndarray::{Array1, Array2};

/// Lower-triangular factor `L` with `A = L * L^T`.
#[derive(Debug, Clone)]
pub(crate) struct Cholesky {
    l: Array2<f64>,
}

impl Cholesky {
    /// Factorise `a`, reporting every column that is linearly dependent on
    /// the columns before it.
    ///
    /// A pivot is dependent when the mass left after removing earlier columns
    /// is at most `tolerance` times its original diagonal. Dependent columns
    /// are zeroed and the scan continues so that all of them are reported.
    pub(crate) fn factorize(a: &Array2<f64>, tolerance: f64) -> Result<Self, Vec<usize>> {
        let n = a.nrows();
        let mut l = Array2::<f64>::zeros((n, n));
        let mut dependent = Vec::new();

        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[j, k]] * l[[j, k]];
            }
            let diag = a[[j, j]] - sum;

            if a[[j, j]] <= 0.0 || diag <= tolerance * a[[j, j]] {
                dependent.push(j);
                continue;
            }

            let pivot = diag.sqrt();
            l[[j, j]] = pivot;
            for i in (j + 1)..n {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += l[[i, k]] * l[[j, k]];
                }
                l[[i, j]] = (a[[i, j]] - sum) / pivot;
            }
        }

        if dependent.is_empty() {
            Ok(Self { l })
        } else {
            Err(dependent)
        }
    }

    /// Solve `A x = b`.
    pub(crate) fn solve(&self, b: &Array1<f64>) -> Array1<f64> {
        let n = self.l.nrows();

        // L z = b
        let mut z = Array1::<f64>::zeros(n);
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += self.l[[i, j]] * z[j];
            }
            z[i] = (b[i] - sum) / self.l[[i, i]];
        }

        // L^T x = z
        let mut x = Array1::<f64>::zeros(n);
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += self.l[[j, i]] * x[j];
            }
            x[i] = (z[i] - sum) / self.l[[i, i]];
        }

        x
    }

    /// `A^-1`, one column at a time.
    pub(crate) fn inverse(&self) -> Array2<f64> {
        let n = self.l.nrows();
        let mut inv = Array2::<f64>::zeros((n, n));
        for j in 0..n {
            let mut e = Array1::<f64>::zeros(n);
            e[j] = 1.0;
            inv.column_mut(j).assign(&self.solve(&e));
        }
        inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_factorize_and_solve() {
        let a = array![[4.0, 2.0, 0.6], [2.0, 5.0, 1.0], [0.6, 1.0, 3.0]];
        let chol = Cholesky::factorize(&a, 1e-10).unwrap();

        let b = array![1.0, 2.0, 3.0];
        let x = chol.solve(&b);
        let back = a.dot(&x);
        for i in 0..3 {
            assert_abs_diff_eq!(back[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_inverse() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let inv = Cholesky::factorize(&a, 1e-10).unwrap().inverse();
        let identity = a.dot(&inv);

        assert_abs_diff_eq!(identity[[0, 0]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(identity[[0, 1]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(identity[[1, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(identity[[1, 1]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reports_every_dependent_column() {
        // Column 1 = 2 * column 0, column 3 is all zero.
        let x = array![
            [1.0, 2.0, 0.0, 0.0],
            [1.0, 2.0, 1.0, 0.0],
            [1.0, 2.0, 3.0, 0.0],
        ];
        let xtx = x.t().dot(&x);
        let err = Cholesky::factorize(&xtx, 1e-10).unwrap_err();
        assert_eq!(err, vec![1, 3]);
    }
}
