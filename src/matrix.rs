//! Preference matrix.
//!
//! `A[i][j]` is the aggregate strength of the preference for entity `i`
//! over entity `j`. The matrix is stored row-major in a single flat vector
//! and never mutated after construction, so it can be shared by reference
//! across any number of concurrent trials.

use rand::Rng;

use crate::error::{KemenyError, Result};

/// An immutable `m x m` matrix of pairwise preference weights.
///
/// # Examples
///
/// ```
/// use u_kemeny::PreferenceMatrix;
///
/// let a = PreferenceMatrix::from_rows(&[
///     vec![0.0, 6.0, 9.0],
///     vec![7.0, 0.0, 11.0],
///     vec![13.0, 12.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(a.size(), 3);
/// assert_eq!(a.get(2, 0), 13.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMatrix"))]
pub struct PreferenceMatrix {
    size: usize,
    weights: Vec<f64>,
}

/// Wire form of [`PreferenceMatrix`], validated by
/// [`PreferenceMatrix::from_flat`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix {
    size: usize,
    weights: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMatrix> for PreferenceMatrix {
    type Error = KemenyError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Self::from_flat(raw.size, raw.weights)
    }
}

impl PreferenceMatrix {
    /// Builds a matrix from rows. Every row must have `rows.len()` entries,
    /// all finite and non-negative.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut weights = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(KemenyError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: size,
                });
            }
            weights.extend_from_slice(row);
        }
        Self::from_flat(size, weights)
    }

    /// Builds a matrix from a row-major vector of `size * size` weights.
    pub fn from_flat(size: usize, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != size * size {
            return Err(KemenyError::NotSquare {
                row: weights.len() / size.max(1),
                len: weights.len(),
                expected: size * size,
            });
        }
        check_weights(size, &weights, false)?;
        Ok(Self { size, weights })
    }

    /// Builds a matrix by evaluating `f(i, j)` for every cell.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(size: usize, f: F) -> Result<Self> {
        let weights = tabulate(size, f);
        check_weights(size, &weights, false)?;
        Ok(Self { size, weights })
    }

    /// Like [`from_fn`](Self::from_fn), but accepts negative weights.
    ///
    /// The score, the exact solver, merge and both searches are well
    /// defined for any finite weights; only the non-negativity check is
    /// skipped.
    pub fn from_fn_signed<F: FnMut(usize, usize) -> f64>(size: usize, f: F) -> Result<Self> {
        let weights = tabulate(size, f);
        check_weights(size, &weights, true)?;
        Ok(Self { size, weights })
    }

    /// Number of entities `m`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` for the `0 x 0` matrix.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Weight of the preference for `i` over `j`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "index out of bounds");
        self.weights[i * self.size + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.weights[i * self.size..(i + 1) * self.size]
    }

    /// The full index set `0..m` in natural order.
    pub fn indices(&self) -> Vec<usize> {
        (0..self.size).collect()
    }

    /// Fails with [`KemenyError::IndexOutOfBounds`] unless `i < m`.
    pub fn check_index(&self, i: usize) -> Result<()> {
        if i < self.size {
            Ok(())
        } else {
            Err(KemenyError::IndexOutOfBounds {
                index: i,
                size: self.size,
            })
        }
    }

    // ------------------------------------------------------------------
    // Synthetic matrices
    // ------------------------------------------------------------------

    /// Deterministic large-valued matrix,
    /// `A[i][j] = trunc(10^12 * sin(i + 3) * sqrt(j + 3))`.
    ///
    /// Entries may be negative.
    pub fn sinusoid(m: usize) -> Self {
        let n = 1e12;
        let weights = tabulate(m, |i, j| {
            (n * (i as f64 + 3.0).sin() * (j as f64 + 3.0).sqrt()).trunc()
        });
        Self { size: m, weights }
    }

    /// Deterministic small-valued matrix,
    /// `A[i][j] = |trunc(10 * sin(i + 3) * sqrt(j + 3))|`.
    pub fn small_sinusoid(m: usize) -> Self {
        let n = 10.0;
        let weights = tabulate(m, |i, j| {
            (n * (i as f64 + 3.0).sin() * (j as f64 + 3.0).sqrt())
                .trunc()
                .abs()
        });
        Self { size: m, weights }
    }

    /// Random "contested" matrix: for every pair `i < j` a fraction
    /// `x ~ Beta(alpha, beta)` of `voters` prefers `i`, the rest prefer `j`.
    ///
    /// `A[i][j] = trunc(x * voters)`, `A[j][i] = trunc((1 - x) * voters)`,
    /// and the diagonal is zero. Shape parameters are integers so the beta
    /// draw is an order statistic of uniforms.
    ///
    /// # Errors
    /// [`KemenyError::InvalidConfig`] if `alpha` or `beta` is zero.
    pub fn contested<R: Rng>(
        m: usize,
        alpha: u32,
        beta: u32,
        voters: u32,
        rng: &mut R,
    ) -> Result<Self> {
        if alpha == 0 || beta == 0 {
            return Err(KemenyError::InvalidConfig(format!(
                "beta shape parameters must be positive, got alpha={alpha} beta={beta}"
            )));
        }
        let n = voters as f64;
        let mut weights = vec![0.0; m * m];
        for i in 0..m {
            for j in (i + 1)..m {
                let x = beta_variate(alpha, beta, rng);
                weights[i * m + j] = (x * n).trunc();
                weights[j * m + i] = ((1.0 - x) * n).trunc();
            }
        }
        Ok(Self { size: m, weights })
    }
}

fn tabulate<F: FnMut(usize, usize) -> f64>(size: usize, mut f: F) -> Vec<f64> {
    let mut weights = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in 0..size {
            weights.push(f(i, j));
        }
    }
    weights
}

fn check_weights(size: usize, weights: &[f64], allow_negative: bool) -> Result<()> {
    for (k, &value) in weights.iter().enumerate() {
        if !value.is_finite() || (!allow_negative && value < 0.0) {
            return Err(KemenyError::InvalidWeight {
                row: k / size,
                col: k % size,
                value,
            });
        }
    }
    Ok(())
}

/// `Beta(a, b)` for integer shapes: the `a`-th smallest of `a + b - 1`
/// independent uniforms.
fn beta_variate<R: Rng>(a: u32, b: u32, rng: &mut R) -> f64 {
    let mut u: Vec<f64> = (0..(a + b - 1)).map(|_| rng.random::<f64>()).collect();
    u.sort_by(|x, y| x.total_cmp(y));
    u[(a - 1) as usize]
}
